// ABOUTME: Form widgets — the login form and the profile editor.
// ABOUTME: Fields render as "label value" rows; the focused field is highlighted.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::state::{LoginField, LoginForm, ProfileField, ProfileForm, TextField};

/// Column where field values start, counted from the left of the panel.
pub const LABEL_WIDTH: u16 = 12;

/// One form row: padded label followed by the (possibly masked) value.
pub fn field_line(label: &str, field: &TextField, masked: bool, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(
            format!("{label:<width$}", width = LABEL_WIDTH as usize),
            label_style,
        ),
        Span::raw(field.display(masked)),
    ])
}

pub fn login_lines(form: &LoginForm) -> Vec<Line<'static>> {
    let mut lines = vec![
        field_line(
            "User name",
            &form.user_name,
            false,
            form.focus == LoginField::UserName,
        ),
        field_line(
            "Password",
            &form.password,
            true,
            form.focus == LoginField::Password,
        ),
    ];
    if form.failed {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Login failed. Press Ctrl+S to sign up for a new account.",
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

/// Row of the focused login field, for cursor placement.
pub fn login_cursor_row(form: &LoginForm) -> u16 {
    match form.focus {
        LoginField::UserName => 0,
        LoginField::Password => 1,
    }
}

pub fn profile_lines(form: &ProfileForm) -> Vec<Line<'static>> {
    let mut lines = vec![
        field_line(
            "User name",
            &form.user_name,
            false,
            form.focus == ProfileField::UserName,
        ),
        Line::from(""),
        field_line(
            "Password",
            &form.password,
            true,
            form.focus == ProfileField::Password,
        ),
        field_line(
            "Repeat",
            &form.repeat,
            true,
            form.focus == ProfileField::Repeat,
        ),
    ];
    if let Some(error) = &form.repeat_error {
        lines.push(Line::from(Span::styled(
            format!("{:width$}{error}", "", width = LABEL_WIDTH as usize),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

pub fn profile_cursor_row(form: &ProfileForm) -> u16 {
    match form.focus {
        ProfileField::UserName => 0,
        ProfileField::Password => 2,
        ProfileField::Repeat => 3,
    }
}
