use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::centered_rect;
use crate::overlay::OverlayMenu;

/// Modal box listing the file operations for the selected entry.
pub struct OverlayWidget<'a> {
    menu: &'a OverlayMenu,
}

impl<'a> OverlayWidget<'a> {
    pub fn new(menu: &'a OverlayMenu) -> Self {
        Self { menu }
    }
}

impl<'a> Widget for OverlayWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.menu.is_active() {
            return;
        }

        let options = self.menu.options();
        // Borders, a blank row and the hint row around the options.
        let height = options.len() as u16 + 4;
        let width = 34.min(area.width.saturating_sub(4));
        let rect = centered_rect(width, height, area);

        Clear.render(rect, buf);

        let block = Block::default()
            .title(" FILE OPS ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1));

        let inner = block.inner(rect);
        block.render(rect, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let selected = self.menu.selected_index();
        for (i, op) in options.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            let (marker, style) = if i == selected {
                ("> ", Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };
            let line = Line::from(Span::styled(format!("{}{}", marker, op.label()), style));
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }

        let hint = "[Enter] Select  [Esc] Cancel";
        let hint_style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM);
        let hint_line = Line::from(Span::styled(hint, hint_style));
        if inner.height > options.len() as u16 {
            buf.set_line(inner.x, inner.y + inner.height - 1, &hint_line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::buffer_to_string;
    use crate::fs::listing::DirectoryEntry;

    fn open_menu(name: &str, is_dir: bool) -> OverlayMenu {
        let mut menu = OverlayMenu::new();
        menu.open(&DirectoryEntry {
            name: name.into(),
            is_dir,
            size: 0,
        });
        menu
    }

    #[test]
    fn test_renders_base_ops() {
        let menu = open_menu("folder", true);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        OverlayWidget::new(&menu).render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("FILE OPS"));
        for label in ["Copy", "Paste", "Move", "Delete", "Rename"] {
            assert!(content.contains(label), "{}", label);
        }
        assert!(!content.contains("Launch"));
        assert!(content.contains("> Copy"));
    }

    #[test]
    fn test_renders_launch_for_executable() {
        let menu = open_menu("app.nro", false);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        OverlayWidget::new(&menu).render(area, &mut buf);

        assert!(buffer_to_string(&buf, area).contains("Launch"));
    }

    #[test]
    fn test_highlight_follows_selection() {
        let mut menu = open_menu("a.txt", false);
        menu.select_next();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        OverlayWidget::new(&menu).render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("> Paste"));
        assert!(!content.contains("> Copy"));
    }

    #[test]
    fn test_inactive_menu_noop() {
        let menu = OverlayMenu::new();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        OverlayWidget::new(&menu).render(area, &mut buf);

        assert!(buffer_to_string(&buf, area).trim().is_empty());
    }
}
