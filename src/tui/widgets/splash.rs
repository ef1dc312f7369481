// ABOUTME: Splash widget — the room list shown on the home panel.
// ABOUTME: Logged-out users see a prompt to log in instead of rooms.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::state::SplashView;

pub fn splash_lines(splash: &SplashView, logged_in: bool) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);

    if !logged_in {
        return vec![
            Line::from("Watch together, chat together."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Ctrl+L to log in or Ctrl+S to sign up.",
                dim,
            )),
        ];
    }

    let Some(rooms) = &splash.rooms else {
        return vec![Line::from(Span::styled("Loading rooms...", dim))];
    };
    if rooms.is_empty() {
        return vec![Line::from(Span::styled(
            "No rooms yet. Press Ctrl+N to create one.",
            dim,
        ))];
    }

    rooms
        .iter()
        .enumerate()
        .map(|(i, room)| {
            if i == splash.selected {
                Line::from(vec![
                    Span::styled("▸ ", Style::default().fg(Color::Green)),
                    Span::styled(
                        room.room_name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  #{}", room.room_id), dim),
                ])
            } else {
                Line::from(vec![
                    Span::raw("  "),
                    Span::raw(room.room_name.clone()),
                    Span::styled(format!("  #{}", room.room_id), dim),
                ])
            }
        })
        .collect()
}
