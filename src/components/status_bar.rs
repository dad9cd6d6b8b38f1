use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Two-line footer: key hints on top, selection and clipboard below.
pub struct StatusBarWidget<'a> {
    hints: &'a str,
    selection: Option<&'a str>,
    clipboard_info: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(hints: &'a str) -> Self {
        Self {
            hints,
            selection: None,
            clipboard_info: None,
        }
    }

    pub fn selection(mut self, info: &'a str) -> Self {
        self.selection = Some(info);
        self
    }

    pub fn clipboard_info(mut self, info: &'a str) -> Self {
        self.clipboard_info = Some(info);
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let hints_style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM);
        let hints_line = Line::from(Span::styled(self.hints, hints_style));
        buf.set_line(area.x, area.y, &hints_line, area.width);

        if area.height < 2 {
            return;
        }

        let width = area.width as usize;
        let mut spans = Vec::new();
        if let Some(selection) = self.selection {
            spans.push(Span::styled(selection, Style::default().fg(Color::White)));
        }

        // Clipboard goes flush right.
        if let Some(clip) = self.clipboard_info {
            let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
            let clip_len = clip.chars().count();
            let pad = width.saturating_sub(used).saturating_sub(clip_len).max(1);
            spans.push(Span::raw(" ".repeat(pad)));
            spans.push(Span::styled(
                clip,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y + 1, &line, area.width);
    }
}
