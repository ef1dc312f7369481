// ABOUTME: Chat widget — renders a room's message list into styled ratatui Lines.
// ABOUTME: Each message is "author: body"; multi-line bodies are indented under the author.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::api::Message;

/// Render a room's messages, oldest first, into styled Lines.
pub fn render_message_lines(messages: &[Message]) -> Vec<Line<'static>> {
    if messages.is_empty() {
        return vec![Line::from(Span::styled(
            "No messages yet. Say something!",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))];
    }

    let mut lines = Vec::new();
    for msg in messages {
        let author = if msg.author.is_empty() {
            "anonymous"
        } else {
            msg.author.as_str()
        };
        let indent = " ".repeat(author.chars().count() + 2);

        for (i, text) in msg.body.split('\n').enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{author}: "),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(text.to_string()),
                ]));
            } else {
                lines.push(Line::from(Span::raw(format!("{indent}{text}"))));
            }
        }
    }
    lines
}
