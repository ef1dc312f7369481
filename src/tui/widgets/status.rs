// ABOUTME: Status bar widget — renders the active panel, polling state, last refresh, and key hints.
// ABOUTME: Displayed at the bottom of the TUI as a single-line summary.

use chrono::{DateTime, Local};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::api::RoomId;
use crate::router::Panel;

/// Inputs for the status bar.
pub struct StatusBarParams {
    pub panel: Panel,
    pub polling_room: Option<RoomId>,
    pub last_refresh: Option<DateTime<Local>>,
    pub logged_in: bool,
}

/// Render the status bar line.
pub fn status_line(params: &StatusBarParams) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![Span::styled(
        format!(" {} ", params.panel.title()),
        Style::default().fg(Color::Cyan),
    )];

    match params.polling_room {
        Some(room_id) => {
            spans.push(Span::styled("| ", dim));
            spans.push(Span::styled(
                format!("polling room {room_id} "),
                Style::default().fg(Color::Green),
            ));
            if let Some(at) = params.last_refresh {
                spans.push(Span::styled(
                    format!("(updated {}) ", at.format("%H:%M:%S")),
                    dim,
                ));
            }
        }
        None if !params.logged_in => {
            spans.push(Span::styled("| ", dim));
            spans.push(Span::styled("not logged in ", Style::default().fg(Color::Yellow)));
        }
        None => {}
    }

    spans.push(Span::styled("| ", dim));
    spans.push(Span::styled(key_hints(params.panel, params.logged_in), dim));
    Line::from(spans)
}

/// Short key reminder for the active panel.
pub fn key_hints(panel: Panel, logged_in: bool) -> &'static str {
    match panel {
        Panel::Login => "Tab field · Enter log in · Ctrl+S sign up · Ctrl+C quit",
        Panel::Splash if logged_in => {
            "Enter open · Ctrl+N new room · Ctrl+P profile · Ctrl+G go · Ctrl+C quit"
        }
        Panel::Splash => "Ctrl+L log in · Ctrl+S sign up · Ctrl+C quit",
        Panel::Profile => "Tab field · Enter save · Ctrl+O log out · Esc back",
        Panel::Room => "Enter post · Ctrl+R rename · PgUp/PgDn scroll · Esc leave",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn shows_polling_room_and_refresh_time() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 8, 7).unwrap();
        let line = status_line(&StatusBarParams {
            panel: Panel::Room,
            polling_room: Some(12),
            last_refresh: Some(at),
            logged_in: true,
        });
        let text = text(&line);
        assert!(text.contains("Room"));
        assert!(text.contains("polling room 12"));
        assert!(text.contains("09:08:07"));
        assert!(text.contains("Ctrl+R rename"));
    }

    #[test]
    fn logged_out_is_flagged() {
        let line = status_line(&StatusBarParams {
            panel: Panel::Login,
            polling_room: None,
            last_refresh: None,
            logged_in: false,
        });
        let text = text(&line);
        assert!(text.contains("not logged in"));
        assert!(!text.contains("polling"));
    }

    #[test]
    fn splash_hints_depend_on_login() {
        assert!(key_hints(Panel::Splash, true).contains("Ctrl+N"));
        assert!(key_hints(Panel::Splash, false).contains("Ctrl+L"));
    }
}
