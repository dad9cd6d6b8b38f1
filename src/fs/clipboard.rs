use crate::fs::path;

/// What a paste should do with the staged path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOp {
    Copy,
    Move,
}

impl ClipboardOp {
    pub fn label(&self) -> &'static str {
        match self {
            ClipboardOp::Copy => "COPY",
            ClipboardOp::Move => "MOVE",
        }
    }
}

/// Single staged path plus the operation to apply on paste.
///
/// The path is not checked when staged; a stale entry only shows up as a
/// failed paste.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardState {
    item: Option<(String, ClipboardOp)>,
}

impl ClipboardState {
    /// Create a new empty clipboard.
    pub fn new() -> Self {
        Self { item: None }
    }

    /// Stage `path`, replacing anything already held.
    pub fn set(&mut self, path: impl Into<String>, op: ClipboardOp) {
        self.item = Some((path.into(), op));
    }

    /// The staged path and operation, if any.
    pub fn get(&self) -> Option<(&str, ClipboardOp)> {
        self.item.as_ref().map(|(p, op)| (p.as_str(), *op))
    }

    /// Clear the clipboard.
    pub fn clear(&mut self) {
        self.item = None;
    }

    /// Whether the clipboard has content.
    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// File name of the staged path, for display.
    pub fn name(&self) -> Option<&str> {
        self.item.as_ref().map(|(p, _)| path::filename(p))
    }
}
