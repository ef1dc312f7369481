// ABOUTME: Main TUI rendering function — assembles header, active panel, input, notice, and status bar.
// ABOUTME: Splits the terminal frame into vertical layout chunks and delegates to widgets.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::router::Panel;
use crate::tui::state::{TextField, TuiState};
use crate::tui::widgets::chat::render_message_lines;
use crate::tui::widgets::forms::{
    LABEL_WIDTH, login_cursor_row, login_lines, profile_cursor_row, profile_lines,
};
use crate::tui::widgets::splash::splash_lines;
use crate::tui::widgets::status::{StatusBarParams, status_line};

/// Render the full TUI screen layout to the given frame.
pub fn render(frame: &mut Frame, state: &mut TuiState) {
    let area = frame.area();

    // The input strip carries the location prompt when open, else the room's comment box.
    let has_input = state.has_location_prompt() || state.panel == Panel::Room;

    let mut constraints = vec![
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Panel body
    ];
    if has_input {
        constraints.push(Constraint::Length(3)); // Input area
    }
    constraints.push(Constraint::Length(1)); // Notice
    constraints.push(Constraint::Length(1)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let (input_chunk, notice_chunk, status_chunk) = if has_input {
        (Some(chunks[2]), chunks[3], chunks[4])
    } else {
        (None, chunks[2], chunks[3])
    };

    render_header(frame, state, chunks[0]);

    // Cursor belongs to the input strip when it is editing, else to the focused form field.
    let body_cursor = render_body(frame, state, chunks[1]);

    let input_cursor = input_chunk.and_then(|chunk| render_input(frame, state, chunk));

    if let Some(pos) = input_cursor.or(body_cursor) {
        frame.set_cursor_position(pos);
    }

    if let Some(notice) = &state.notice {
        let line = Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(Color::Yellow),
        ));
        frame.render_widget(Paragraph::new(line), notice_chunk);
    }

    let status = status_line(&StatusBarParams {
        panel: state.panel,
        polling_room: state.polling_room,
        last_refresh: state.last_refresh,
        logged_in: state.logged_in,
    });
    frame.render_widget(Paragraph::new(status), status_chunk);
}

fn render_header(frame: &mut Frame, state: &TuiState, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(
            " watchparty",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", dim),
        Span::styled(state.location.clone(), Style::default().fg(Color::Cyan)),
    ];
    if let Some(greeting) = &state.greeting {
        spans.push(Span::styled("  ", dim));
        spans.push(Span::styled(greeting.clone(), Style::default().fg(Color::Green)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the active panel. Returns the cursor position of a focused form field, if any.
fn render_body(frame: &mut Frame, state: &mut TuiState, area: Rect) -> Option<Position> {
    match state.panel {
        Panel::Login => {
            let block = Block::default().borders(Borders::ALL).title(" Log in ");
            let inner = block.inner(area);
            frame.render_widget(Paragraph::new(login_lines(&state.login)).block(block), area);
            let row = login_cursor_row(&state.login);
            let masked = row != 0;
            field_cursor(state.login.focused_mut(), masked, inner, row, LABEL_WIDTH)
        }
        Panel::Profile => {
            let title = if state.user_name.is_empty() {
                " Profile ".to_string()
            } else {
                format!(" Profile: {} ", state.user_name)
            };
            let block = Block::default().borders(Borders::ALL).title(title);
            let inner = block.inner(area);
            frame.render_widget(
                Paragraph::new(profile_lines(&state.profile)).block(block),
                area,
            );
            let row = profile_cursor_row(&state.profile);
            let masked = row != 0;
            field_cursor(state.profile.focused_mut(), masked, inner, row, LABEL_WIDTH)
        }
        Panel::Splash => {
            let block = Block::default().borders(Borders::ALL).title(" Rooms ");
            frame.render_widget(
                Paragraph::new(splash_lines(&state.splash, state.logged_in)).block(block),
                area,
            );
            None
        }
        Panel::Room => {
            render_room(frame, state, area);
            None
        }
    }
}

fn render_room(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    let room = &mut state.room;
    let title = if room.room_name.is_empty() {
        " Room ".to_string()
    } else {
        format!(" {} ", room.room_name)
    };
    let mut block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    if !room.invite_link.is_empty() {
        block = block.title_bottom(Span::styled(
            format!(" invite: {} ", room.invite_link),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = render_message_lines(&room.messages);
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });

    // Use ratatui's own line_count() so wrapped bodies are measured exactly as drawn.
    let total_lines = paragraph.line_count(inner.width) as u16;
    let max_scroll = total_lines.saturating_sub(inner.height);

    if room.scroll_offset > max_scroll {
        room.scroll_offset = max_scroll;
    }

    // scroll_offset is lines scrolled up from the bottom (0 = at bottom)
    let scroll = max_scroll.saturating_sub(room.scroll_offset);
    frame.render_widget(paragraph.scroll((scroll, 0)), inner);
}

/// Draw the input strip. Returns the cursor position inside it.
fn render_input(frame: &mut Frame, state: &mut TuiState, area: Rect) -> Option<Position> {
    let (title, border, field) = if let Some(field) = state.location_prompt.as_mut() {
        (" go to ", Color::Cyan, field)
    } else if let Some(field) = state.room.rename.as_mut() {
        (" rename room ", Color::Yellow, field)
    } else {
        (" message ", Color::DarkGray, &mut state.room.comment)
    };

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(border))
        .title(Span::styled(title, Style::default().fg(border)));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(field.value.clone()).block(block), area);

    field_cursor(field, false, inner, 0, 0)
}

/// Cursor position for a field drawn at `row` within `inner`, after a label column of `label_width`.
fn field_cursor(
    field: &mut TextField,
    masked: bool,
    inner: Rect,
    row: u16,
    label_width: u16,
) -> Option<Position> {
    if inner.width == 0 || inner.height <= row {
        return None;
    }
    field.clamp_cursor();
    let prefix = field.display_prefix(masked);
    let visual_col = label_width as usize + UnicodeWidthStr::width(prefix.as_str());
    let max_visual_col = inner.width.saturating_sub(1) as usize;
    let x = inner.x.saturating_add(visual_col.min(max_visual_col) as u16);
    Some(Position::new(x, inner.y.saturating_add(row)))
}
