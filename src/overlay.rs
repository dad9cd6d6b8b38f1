use crate::fs::listing::DirectoryEntry;

/// Extension of a launchable homebrew package.
pub const EXECUTABLE_EXTENSION: &str = ".nro";

/// Extensions of installable game packages.
pub const INSTALLER_EXTENSIONS: &[&str] = &[".nsp", ".nsz", ".xci", ".xcz"];

/// Operations offered by the overlay menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOp {
    Copy,
    Paste,
    Move,
    Delete,
    Rename,
    Launch,
    Install,
}

impl MenuOp {
    /// Operations every entry gets, in display order.
    pub const BASE: [MenuOp; 5] = [
        MenuOp::Copy,
        MenuOp::Paste,
        MenuOp::Move,
        MenuOp::Delete,
        MenuOp::Rename,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOp::Copy => "Copy",
            MenuOp::Paste => "Paste",
            MenuOp::Move => "Move",
            MenuOp::Delete => "Delete",
            MenuOp::Rename => "Rename",
            MenuOp::Launch => "Launch",
            MenuOp::Install => "Install",
        }
    }
}

/// Case-insensitive suffix match on a file name.
fn has_extension(name: &str, ext: &str) -> bool {
    let (name, ext) = (name.as_bytes(), ext.as_bytes());
    name.len() >= ext.len() && name[name.len() - ext.len()..].eq_ignore_ascii_case(ext)
}

pub fn is_executable(name: &str) -> bool {
    has_extension(name, EXECUTABLE_EXTENSION)
}

pub fn is_installer(name: &str) -> bool {
    INSTALLER_EXTENSIONS
        .iter()
        .any(|ext| has_extension(name, ext))
}

/// Contextual operation menu for the selected entry.
///
/// The option list is rebuilt on every open and dropped on close.
#[derive(Debug, Default)]
pub struct OverlayMenu {
    active: bool,
    options: Vec<MenuOp>,
    selected: usize,
}

impl OverlayMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the menu for `entry`.
    pub fn open(&mut self, entry: &DirectoryEntry) {
        self.options = MenuOp::BASE.to_vec();
        if !entry.is_dir {
            if is_executable(&entry.name) {
                self.options.push(MenuOp::Launch);
            }
            if is_installer(&entry.name) {
                self.options.push(MenuOp::Install);
            }
        }
        self.selected = 0;
        self.active = true;
    }

    pub fn close(&mut self) {
        self.active = false;
        self.options.clear();
        self.selected = 0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn options(&self) -> &[MenuOp] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The highlighted operation while the menu is open.
    pub fn selected_op(&self) -> Option<MenuOp> {
        if !self.active {
            return None;
        }
        self.options.get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        if self.active && self.selected + 1 < self.options.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.active && self.selected > 0 {
            self.selected -= 1;
        }
    }
}
