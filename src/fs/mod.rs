pub mod clipboard;
pub mod listing;
pub mod navigation;
pub mod operations;
pub mod path;
pub mod volume;
