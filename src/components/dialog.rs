use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::centered_rect;
use crate::prompt::RenamePrompt;

/// Centered text-entry dialog for picking a new name.
pub struct RenameDialogWidget<'a> {
    prompt: &'a RenamePrompt,
}

impl<'a> RenameDialogWidget<'a> {
    pub fn new(prompt: &'a RenamePrompt) -> Self {
        Self { prompt }
    }
}

impl<'a> Widget for RenameDialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_width = 50.min(area.width.saturating_sub(4));
        let dialog_height = 5;
        let rect = centered_rect(dialog_width, dialog_height, area);

        Clear.render(rect, buf);

        let block = Block::default()
            .title(" Rename ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1));

        let inner = block.inner(rect);
        block.render(rect, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let input = self.prompt.input.as_str();
        let cursor_pos = self.prompt.cursor_position;
        let max_width = inner.width as usize;

        let (before, cursor_char, after) = match input[cursor_pos..].chars().next() {
            Some(ch) => {
                let end = cursor_pos + ch.len_utf8();
                (&input[..cursor_pos], &input[cursor_pos..end], &input[end..])
            }
            None => (input, " ", ""),
        };

        // Keep the cursor in view by dropping characters on the left.
        let room = max_width.saturating_sub(2);
        let before_len = before.chars().count();
        let before_display = if before_len > room {
            let skip = before
                .char_indices()
                .nth(before_len - room)
                .map(|(i, _)| i)
                .unwrap_or(0);
            &before[skip..]
        } else {
            before
        };

        let input_style = Style::default().fg(Color::White);
        let cursor_style = Style::default()
            .bg(Color::White)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD);

        let line = Line::from(vec![
            Span::styled(before_display, input_style),
            Span::styled(cursor_char, cursor_style),
            Span::styled(after, input_style),
        ]);
        buf.set_line(inner.x, inner.y + inner.height / 2, &line, inner.width);

        let hint = "[Enter] Confirm  [Esc] Cancel";
        let hint_style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM);
        let hint_line = Line::from(Span::styled(hint, hint_style));
        if inner.height > 1 {
            buf.set_line(inner.x, inner.y + inner.height - 1, &hint_line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::buffer_to_string;

    #[test]
    fn test_rename_dialog_renders() {
        let prompt = RenamePrompt::new("/tmp/old_name.txt", "old_name.txt");
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        RenameDialogWidget::new(&prompt).render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("Rename"));
        assert!(content.contains("old_name.txt"));
        assert!(content.contains("[Enter] Confirm"));
    }

    #[test]
    fn test_cursor_on_multibyte_char() {
        let mut prompt = RenamePrompt::new("/a", "añb");
        prompt.move_cursor_left();
        prompt.move_cursor_left();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        RenameDialogWidget::new(&prompt).render(area, &mut buf);

        assert!(buffer_to_string(&buf, area).contains("añb"));
    }

    #[test]
    fn test_long_input_keeps_cursor_visible() {
        let long = "x".repeat(100) + "END";
        let prompt = RenamePrompt::new("/a", &long);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        RenameDialogWidget::new(&prompt).render(area, &mut buf);

        assert!(buffer_to_string(&buf, area).contains("END"));
    }
}
