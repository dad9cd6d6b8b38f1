use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

use crate::app::App;
use crate::components::dialog::RenameDialogWidget;
use crate::components::listing::ListingWidget;
use crate::components::overlay::OverlayWidget;
use crate::components::popup::PopupWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::fs::navigation::VISIBLE_WINDOW;

const BROWSER_HINTS: &str = "Up/Down=Navigate  Enter=Select  Esc=Back  x=FileOps  q=Exit";
const OVERLAY_HINTS: &str = "Up/Down=Select  Enter=Confirm  Esc=Cancel";
const RENAME_HINTS: &str = "Type a name  Enter=OK  Esc=Cancel  Left/Right=Move";

/// Render the application UI. Later layers draw over earlier ones.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Max(VISIBLE_WINDOW as u16),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(app, frame, chunks[0]);
    frame.render_widget(ListingWidget::new(&app.nav), chunks[1]);

    let selection = app
        .nav
        .selected_entry()
        .map(|e| format!("Selected: {} ({})", e.name, if e.is_dir { "DIR" } else { "FILE" }));
    let clipboard = app
        .clipboard
        .get()
        .zip(app.clipboard.name())
        .map(|((_, op), name)| format!("[{}] {}", op.label(), name));

    let hints = if app.rename.is_some() {
        RENAME_HINTS
    } else if app.overlay.is_active() {
        OVERLAY_HINTS
    } else {
        BROWSER_HINTS
    };
    let mut status = StatusBarWidget::new(hints);
    if let Some(selection) = selection.as_deref() {
        status = status.selection(selection);
    }
    if let Some(clipboard) = clipboard.as_deref() {
        status = status.clipboard_info(clipboard);
    }
    frame.render_widget(status, chunks[3]);

    if app.overlay.is_active() {
        frame.render_widget(OverlayWidget::new(&app.overlay), area);
    }
    if let Some(prompt) = &app.rename {
        frame.render_widget(RenameDialogWidget::new(prompt), area);
    }
    frame.render_widget(PopupWidget::new(&app.popup), area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let lines = [
        Line::from(Span::styled("=== FILE BROWSER ===", title_style)),
        Line::from(Span::raw(app.nav.current_path())),
        Line::from(Span::styled("====================", title_style)),
    ];

    let buf = frame.buffer_mut();
    for (i, line) in lines.iter().enumerate() {
        if i as u16 >= area.height {
            break;
        }
        buf.set_line(area.x, area.y + i as u16, line, area.width);
    }
}
