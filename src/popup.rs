/// Modal message shown above everything else.
///
/// With a tick budget the popup dismisses itself when the budget runs out;
/// with a budget of 0 it waits for input. Any input dismisses it either way.
#[derive(Debug, Default)]
pub struct PopupController {
    active: bool,
    message: String,
    remaining_ticks: u32,
}

impl PopupController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, replacing any popup already visible.
    pub fn show(&mut self, message: impl Into<String>, duration_ticks: u32) {
        self.message = message.into();
        self.remaining_ticks = duration_ticks;
        self.active = true;
        tracing::debug!(message = %self.message, duration_ticks, "popup shown");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    /// Advance one frame. Timed popups close when their budget reaches zero.
    pub fn tick(&mut self) {
        if !self.active || self.remaining_ticks == 0 {
            return;
        }
        self.remaining_ticks -= 1;
        if self.remaining_ticks == 0 {
            self.dismiss();
        }
    }

    /// Offer an input event. Returns `true` if the popup swallowed it.
    pub fn consume_input(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.dismiss();
        true
    }

    pub fn dismiss(&mut self) {
        self.active = false;
        self.message.clear();
        self.remaining_ticks = 0;
    }
}
