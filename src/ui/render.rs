use ratatui::{
    Frame,
    layout::{ Constraint, Direction, Layout, Rect },
    style::{ Color, Modifier, Style },
    text::{ Line, Span, Text },
    widgets::{ Block, Borders, Paragraph, Wrap },
};

use super::app::AppState;

pub fn render(f: &mut Frame<'_>, app: &AppState) {
    let composer_height = (app.composer.line_count() as u16).clamp(1, 8) + 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(composer_height),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_conversation(f, app, chunks[1]);
    render_composer(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame<'_>, app: &AppState, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            "termchat",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  ·  "),
        Span::styled(
            format!("{} messages", app.conversation.len()),
            Style::default().fg(Color::Gray),
        ),
    ]);
    f.render_widget(Paragraph::new(Text::from(header)), area);
}

fn render_conversation(f: &mut Frame<'_>, app: &AppState, area: Rect) {
    let mut lines = Vec::new();
    for (idx, message) in app.conversation.messages().iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }
        lines.extend(message_lines(message));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No messages yet. Type below and press Alt+Enter to send.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let total = lines.len() as u16;
    let max_scroll = total.saturating_sub(area.height);
    let scroll = max_scroll.saturating_sub(app.scroll_from_bottom.min(max_scroll));

    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

// One block of display lines per message; an empty message still occupies a
// line so insertion order stays visible.
fn message_lines(message: &str) -> Vec<Line<'_>> {
    if message.is_empty() {
        return vec![Line::from("")];
    }
    message.lines().map(Line::from).collect()
}

fn render_composer(f: &mut Frame<'_>, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = if app.composer.is_empty() {
        Paragraph::new(Span::styled(
            "Type here...",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block)
    } else {
        Paragraph::new(app.composer.text())
            .block(block)
            .wrap(Wrap { trim: false })
    };
    f.render_widget(paragraph, area);

    let (row, col) = app.composer.cursor_rowcol();
    f.set_cursor_position((area.x + col, area.y + 1 + row));
}

fn render_status(f: &mut Frame<'_>, app: &AppState, area: Rect) {
    let content = match &app.status_line {
        Some(status) => Span::styled(status.clone(), Style::default().fg(Color::Gray)),
        None => Span::raw("Alt+Enter send   ·   Enter newline   ·   Ctrl+C quit"),
    };
    f.render_widget(Paragraph::new(Line::from(content)), area);
}
