use crate::capability::Capability;
use crate::error::{AppError, Result};
use crate::fs::clipboard::{ClipboardOp, ClipboardState};
use crate::fs::listing::DirectoryEntry;
use crate::fs::navigation::NavigationState;
use crate::fs::operations::{self, PasteOutcome};
use crate::fs::path;
use crate::fs::volume::Volume;
use crate::overlay::{MenuOp, OverlayMenu};
use crate::popup::PopupController;
use crate::prompt::{PromptOutcome, RenamePrompt};

/// Discrete, newly pressed controls delivered once per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Select,
    Back,
    FileOps,
    Exit,
}

/// Appended to an operation popup when the listing could not be re-read.
const STALE_LISTING_NOTE: &str = " (listing not refreshed)";

/// Main application state.
pub struct App {
    pub volume: Volume,
    pub nav: NavigationState,
    pub clipboard: ClipboardState,
    pub overlay: OverlayMenu,
    pub popup: PopupController,
    /// Open while the user is typing a new name.
    pub rename: Option<RenamePrompt>,
    launcher: Option<Box<dyn Capability>>,
    installer: Option<Box<dyn Capability>>,
    message_ticks: u32,
    error_ticks: u32,
    pub should_quit: bool,
}

impl App {
    /// Create a new App browsing the root of `volume`.
    ///
    /// Fails when the root cannot be listed.
    pub fn new(volume: Volume, message_ticks: u32, error_ticks: u32) -> Result<Self> {
        let nav = NavigationState::open(&volume, "/")?;
        Ok(Self {
            volume,
            nav,
            clipboard: ClipboardState::new(),
            overlay: OverlayMenu::new(),
            popup: PopupController::new(),
            rename: None,
            launcher: None,
            installer: None,
            message_ticks,
            error_ticks,
            should_quit: false,
        })
    }

    pub fn with_launcher(mut self, launcher: Box<dyn Capability>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    pub fn with_installer(mut self, installer: Box<dyn Capability>) -> Self {
        self.installer = Some(installer);
        self
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        self.popup.tick();
    }

    /// Route a button press to the topmost modal layer.
    ///
    /// Order: popup, rename prompt, overlay, browser. A layer that takes the
    /// press stops it from reaching the ones below.
    pub fn handle_button(&mut self, button: Button) {
        if self.popup.consume_input() {
            return;
        }
        if self.rename.is_some() {
            self.handle_rename_button(button);
        } else if self.overlay.is_active() {
            self.handle_overlay_button(button);
        } else {
            self.handle_browser_button(button);
        }
    }

    fn handle_browser_button(&mut self, button: Button) {
        match button {
            Button::Up => self.nav.select_prev(),
            Button::Down => self.nav.select_next(),
            Button::Select => match self.nav.selected_entry().map(|e| e.is_dir) {
                Some(true) => {
                    if let Err(e) = self.nav.enter_directory(&self.volume) {
                        self.fail("Open failed", e);
                    }
                }
                Some(false) => self.open_overlay(),
                None => {}
            },
            Button::FileOps => self.open_overlay(),
            Button::Back => match self.nav.go_back(&self.volume) {
                Ok(()) | Err(AppError::AtRoot) => {}
                Err(e) => self.fail("Back failed", e),
            },
            Button::Exit => self.quit(),
            Button::Left | Button::Right => {}
        }
    }

    fn open_overlay(&mut self) {
        if let Some(entry) = self.nav.selected_entry() {
            self.overlay.open(entry);
        }
    }

    fn handle_overlay_button(&mut self, button: Button) {
        match button {
            Button::Up => self.overlay.select_prev(),
            Button::Down => self.overlay.select_next(),
            Button::Select => self.confirm_overlay(),
            Button::Back => self.overlay.close(),
            _ => {}
        }
    }

    fn handle_rename_button(&mut self, button: Button) {
        match button {
            Button::Select => self.finish_rename(),
            Button::Back => {
                self.rename = None;
                tracing::debug!("rename cancelled");
            }
            Button::Left => {
                if let Some(prompt) = self.rename.as_mut() {
                    prompt.move_cursor_left();
                }
            }
            Button::Right => {
                if let Some(prompt) = self.rename.as_mut() {
                    prompt.move_cursor_right();
                }
            }
            _ => {}
        }
    }

    /// Run the highlighted overlay operation on the selected entry and close
    /// the menu.
    fn confirm_overlay(&mut self) {
        let op = self.overlay.selected_op();
        self.overlay.close();

        let Some(op) = op else { return };
        let Some(entry) = self.nav.selected_entry().cloned() else {
            return;
        };
        let target = match self.nav.selected_path() {
            Ok(Some(target)) => target,
            Ok(None) => return,
            Err(e) => {
                self.fail("Operation failed", e);
                return;
            }
        };

        tracing::debug!(op = op.label(), path = %target, "overlay confirmed");
        self.run_op(op, &entry, target);
    }

    fn run_op(&mut self, op: MenuOp, entry: &DirectoryEntry, target: String) {
        match op {
            MenuOp::Copy => {
                self.clipboard.set(target, ClipboardOp::Copy);
                self.notify(format!("Copied: {}", entry.name));
            }
            MenuOp::Move => {
                self.clipboard.set(target, ClipboardOp::Move);
                self.notify(format!("Marked to move: {}", entry.name));
            }
            MenuOp::Paste => {
                let dest = if entry.is_dir {
                    target
                } else {
                    self.nav.current_path().to_string()
                };
                let result = operations::paste_item(&self.volume, &mut self.clipboard, &dest);
                let note = self.reload();
                match result {
                    Ok(outcome) => self.notify(format!("{}{}", paste_message(&outcome), note)),
                    Err(e) => self.fail_noted("Paste failed", e, note),
                }
            }
            MenuOp::Delete => {
                let result = operations::delete_item(&self.volume, &target);
                let note = self.reload();
                match result {
                    Ok(()) => self.notify(format!("Deleted: {}{}", entry.name, note)),
                    Err(e) => self.fail_noted("Delete failed", e, note),
                }
            }
            MenuOp::Rename => {
                self.rename = Some(RenamePrompt::new(target, &entry.name));
            }
            MenuOp::Launch => {
                let result = invoke(self.launcher.as_deref(), "launch", &self.volume, &target);
                match result {
                    Ok(()) => self.notify(format!("Launched: {}", entry.name)),
                    Err(e) => self.fail("Launch failed", e),
                }
            }
            MenuOp::Install => {
                let result = invoke(self.installer.as_deref(), "install", &self.volume, &target);
                match result {
                    Ok(()) => self.notify(format!("Installed: {}", entry.name)),
                    Err(e) => self.fail("Install failed", e),
                }
            }
        }
    }

    /// Close the rename prompt and apply its result.
    fn finish_rename(&mut self) {
        let Some(prompt) = self.rename.take() else {
            return;
        };
        let target = prompt.target.clone();
        let name = match prompt.submit() {
            PromptOutcome::Submitted(name) => name,
            PromptOutcome::Cancelled => {
                tracing::debug!(path = %target, "rename cancelled");
                return;
            }
        };

        match operations::rename_item(&self.volume, &target, &name) {
            Ok(_) => {
                let note = self.reload();
                self.notify(format!("Renamed to: {}{}", name, note));
            }
            Err(e) => self.fail("Rename failed", e),
        }
    }

    /// Re-list after a mutation. Returns a suffix for the popup when the
    /// listing on screen could not be refreshed.
    fn reload(&mut self) -> &'static str {
        match self.nav.reload(&self.volume) {
            Ok(()) => "",
            Err(e) => {
                tracing::warn!(dir = %self.nav.current_path(), error = %e, "reload failed");
                STALE_LISTING_NOTE
            }
        }
    }

    fn notify(&mut self, message: String) {
        tracing::info!("{}", message);
        self.popup.show(message, self.message_ticks);
    }

    fn fail(&mut self, context: &str, err: AppError) {
        self.fail_noted(context, err, "");
    }

    fn fail_noted(&mut self, context: &str, err: AppError, note: &str) {
        tracing::warn!(error = %err, "{}", context);
        self.popup
            .show(format!("{}: {}{}", context, err, note), self.error_ticks);
    }
}

fn paste_message(outcome: &PasteOutcome) -> String {
    let name = path::filename(&outcome.source);
    match outcome.op {
        ClipboardOp::Copy => format!("Pasted: {}", name),
        ClipboardOp::Move => format!("Moved: {}", name),
    }
}

fn invoke(
    capability: Option<&dyn Capability>,
    what: &'static str,
    volume: &Volume,
    target: &str,
) -> Result<()> {
    let capability = capability.ok_or(AppError::Unsupported(what))?;
    capability.invoke(&volume.resolve(target)?)
}
