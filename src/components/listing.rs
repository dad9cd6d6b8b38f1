use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::fs::listing::DirectoryEntry;
use crate::fs::navigation::NavigationState;

/// Human-readable size with integer division: `512B`, `2KB`, `3MB`.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{}B", bytes)
    } else if bytes < MB {
        format!("{}KB", bytes / KB)
    } else {
        format!("{}MB", bytes / MB)
    }
}

/// Text of one listing row: `[dir]` or `file (size)`.
pub fn entry_label(entry: &DirectoryEntry) -> String {
    if entry.is_dir {
        format!("[{}]", entry.name)
    } else {
        format!("{} ({})", entry.name, format_size(entry.size))
    }
}

/// Renders the visible window of the current directory.
pub struct ListingWidget<'a> {
    nav: &'a NavigationState,
    block: Option<Block<'a>>,
}

impl<'a> ListingWidget<'a> {
    pub fn new(nav: &'a NavigationState) -> Self {
        Self { nav, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl<'a> Widget for ListingWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        if self.nav.listing().is_empty() {
            let line = Line::from(Span::styled(
                "(empty)",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            ));
            buf.set_line(inner_area.x, inner_area.y, &line, inner_area.width);
            return;
        }

        let selected = self.nav.selected_index();
        let rows = self.nav.visible().take(inner_area.height as usize);

        for (i, (idx, entry)) in rows.enumerate() {
            let y = inner_area.y + i as u16;
            let style = if idx == selected {
                Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else if entry.is_dir {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let line = Line::from(Span::styled(entry_label(entry), style));
            buf.set_line(inner_area.x, y, &line, inner_area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::buffer_to_string;
    use crate::fs::volume::{Volume, DEFAULT_DEVICE_PREFIX};
    use tempfile::TempDir;

    fn nav_for(dir: &TempDir) -> NavigationState {
        let volume = Volume::mount(dir.path(), DEFAULT_DEVICE_PREFIX).unwrap();
        NavigationState::open(&volume, "/").unwrap()
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1024), "1KB");
        assert_eq!(format_size(2047), "1KB");
        assert_eq!(format_size(2048), "2KB");
        assert_eq!(format_size(1024 * 1024 - 1), "1023KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3MB");
    }

    #[test]
    fn test_entry_label() {
        let dir = DirectoryEntry {
            name: "games".into(),
            is_dir: true,
            size: 0,
        };
        let file = DirectoryEntry {
            name: "save.bin".into(),
            is_dir: false,
            size: 2048,
        };
        assert_eq!(entry_label(&dir), "[games]");
        assert_eq!(entry_label(&file), "save.bin (2KB)");
    }

    #[test]
    fn test_renders_entries() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("switch")).unwrap();
        std::fs::write(tmp.path().join("readme.txt"), vec![0u8; 512]).unwrap();
        let nav = nav_for(&tmp);

        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        ListingWidget::new(&nav).render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("[switch]"));
        assert!(content.contains("readme.txt (512B)"));
    }

    #[test]
    fn test_selected_row_is_reversed() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.txt"), b"a").unwrap();
        let nav = nav_for(&tmp);

        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ListingWidget::new(&nav).render(area, &mut buf);

        let cell = buf.cell((0, 0)).unwrap();
        assert!(cell.modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_empty_directory() {
        let tmp = TempDir::new().unwrap();
        let nav = nav_for(&tmp);

        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ListingWidget::new(&nav).render(area, &mut buf);

        assert!(buffer_to_string(&buf, area).contains("(empty)"));
    }

    #[test]
    fn test_rows_limited_to_area() {
        let tmp = TempDir::new().unwrap();
        for i in 0..30 {
            std::fs::write(tmp.path().join(format!("f{:02}", i)), b"").unwrap();
        }
        let nav = nav_for(&tmp);

        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        ListingWidget::new(&nav).render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert_eq!(content.matches("(0B)").count(), 4);
    }

    #[test]
    fn test_zero_area_does_not_panic() {
        let tmp = TempDir::new().unwrap();
        let nav = nav_for(&tmp);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        ListingWidget::new(&nav).render(area, &mut buf);
    }
}
