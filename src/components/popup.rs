use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::centered_rect;
use crate::popup::PopupController;

/// Message box drawn above every other layer.
pub struct PopupWidget<'a> {
    popup: &'a PopupController,
}

impl<'a> PopupWidget<'a> {
    pub fn new(popup: &'a PopupController) -> Self {
        Self { popup }
    }
}

impl<'a> Widget for PopupWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.popup.is_active() {
            return;
        }

        let message = self.popup.message();
        let width = (message.chars().count() as u16 + 6)
            .max(30)
            .min(area.width.saturating_sub(4));
        let rect = centered_rect(width, 5, area);

        Clear.render(rect, buf);

        // Popups that wait for input are failures.
        let border = if self.popup.remaining_ticks() == 0 {
            Color::Red
        } else {
            Color::Green
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .padding(Padding::horizontal(1));

        let inner = block.inner(rect);
        block.render(rect, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let msg_line = Line::from(Span::styled(message, Style::default().fg(Color::White)));
        buf.set_line(inner.x, inner.y + inner.height / 2, &msg_line, inner.width);

        if self.popup.remaining_ticks() == 0 && inner.height > 1 {
            let hint_style = Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM);
            let hint_line = Line::from(Span::styled("[any key] Dismiss", hint_style));
            buf.set_line(inner.x, inner.y + inner.height - 1, &hint_line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::buffer_to_string;

    #[test]
    fn test_timed_popup_renders_message() {
        let mut popup = PopupController::new();
        popup.show("Copied: a.txt", 120);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        PopupWidget::new(&popup).render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("Copied: a.txt"));
        assert!(!content.contains("Dismiss"));
    }

    #[test]
    fn test_waiting_popup_shows_hint() {
        let mut popup = PopupController::new();
        popup.show("Delete failed: access denied: /x", 0);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        PopupWidget::new(&popup).render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("Delete failed"));
        assert!(content.contains("[any key] Dismiss"));
    }

    #[test]
    fn test_inactive_popup_noop() {
        let popup = PopupController::new();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        PopupWidget::new(&popup).render(area, &mut buf);

        assert!(buffer_to_string(&buf, area).trim().is_empty());
    }
}
