// ABOUTME: E2E tests for TUI rendering using ratatui's TestBackend.
// ABOUTME: Verifies each panel, the notice line, the status bar, and room scrolling.

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use watchparty::api::{Message, RoomSummary};
use watchparty::router::Panel;
use watchparty::tui::state::{TextField, TuiState};
use watchparty::tui::ui;

/// Extract a single row of text from the terminal buffer as a String.
fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buf = terminal.backend().buffer();
    let width = buf.area.width;
    (0..width)
        .map(|x| {
            buf.cell((x, y))
                .map(|c| c.symbol().chars().next().unwrap_or(' '))
                .unwrap_or(' ')
        })
        .collect()
}

/// Extract all text from the terminal buffer as a single string (rows joined by newlines).
fn all_text(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    let height = buf.area.height;
    (0..height)
        .map(|y| row_text(terminal, y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw(terminal: &mut Terminal<TestBackend>, state: &mut TuiState) {
    terminal.draw(|frame| ui::render(frame, state)).unwrap();
}

fn message(author: &str, body: &str) -> Message {
    Message {
        id: None,
        author: author.to_string(),
        body: body.to_string(),
    }
}

fn room_state(room_id: i64, name: &str) -> TuiState {
    let mut state = TuiState::new();
    state.panel = Panel::Room;
    state.logged_in = true;
    state.location = format!("/room/{room_id}");
    state.room.room_id = Some(room_id);
    state.room.room_name = name.to_string();
    state.room.invite_link = format!("/room/{room_id}");
    state
}

/// A fresh state renders the login panel with the app name and location in the header.
#[test]
fn renders_login_panel_by_default() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = TuiState::new();

    draw(&mut terminal, &mut state);

    let header = row_text(&terminal, 0);
    assert!(
        header.contains("watchparty"),
        "header should contain 'watchparty', got: {:?}",
        header,
    );
    let text = all_text(&terminal);
    assert!(text.contains("Log in"), "missing login title:\n{}", text);
    assert!(text.contains("User name"), "missing user field:\n{}", text);
    assert!(text.contains("Password"), "missing password field:\n{}", text);
}

/// Password characters must never reach the screen.
#[test]
fn login_password_is_masked() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = TuiState::new();
    state.login.user_name.set("alice");
    state.login.password.set("hunter2");

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(text.contains("alice"));
    assert!(text.contains("*******"));
    assert!(!text.contains("hunter2"), "password leaked:\n{}", text);
}

/// The status bar (last row) names the panel and flags a logged-out session.
#[test]
fn renders_status_bar() {
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    let mut state = TuiState::new();

    draw(&mut terminal, &mut state);

    let status = row_text(&terminal, 23);
    assert!(
        status.contains("Login"),
        "status bar should name the panel, got: {:?}",
        status,
    );
    assert!(
        status.contains("not logged in"),
        "status bar should flag logged-out state, got: {:?}",
        status,
    );
}

/// The notice sits on the row just above the status bar.
#[test]
fn renders_notice_above_status_bar() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = TuiState::new();
    state.set_notice("Password updated successfully.");

    draw(&mut terminal, &mut state);

    let notice = row_text(&terminal, 22);
    assert!(
        notice.contains("Password updated successfully."),
        "notice row should carry the notice, got: {:?}",
        notice,
    );
}

#[test]
fn splash_lists_rooms_and_greets_user() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = TuiState::new();
    state.panel = Panel::Splash;
    state.logged_in = true;
    state.greeting = Some("Welcome back, ann!".to_string());
    state.splash.set_rooms(vec![
        RoomSummary {
            room_id: 1,
            room_name: "Lobby".to_string(),
        },
        RoomSummary {
            room_id: 2,
            room_name: "Cinema".to_string(),
        },
    ]);

    draw(&mut terminal, &mut state);

    assert!(row_text(&terminal, 0).contains("Welcome back, ann!"));
    let text = all_text(&terminal);
    assert!(text.contains("▸ Lobby"), "selected room should be marked:\n{}", text);
    assert!(text.contains("Cinema"));
}

#[test]
fn room_shows_messages_invite_and_polling() {
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    let mut state = room_state(3, "Movie night");
    state.polling_room = Some(3);
    state.replace_messages(vec![message("ann", "popcorn?"), message("bo", "yes")]);

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(text.contains("Movie night"), "missing room title:\n{}", text);
    assert!(text.contains("invite: /room/3"), "missing invite link:\n{}", text);
    assert!(text.contains("ann: popcorn?"));
    assert!(text.contains("bo: yes"));
    assert!(text.contains("message"), "missing comment box:\n{}", text);
    assert!(row_text(&terminal, 23).contains("polling room 3"));
}

#[test]
fn empty_room_shows_placeholder() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = room_state(1, "Lobby");

    draw(&mut terminal, &mut state);

    assert!(all_text(&terminal).contains("No messages yet"));
}

#[test]
fn rename_editor_replaces_comment_box() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = room_state(1, "Lobby");
    state.room.rename = Some(TextField::with_value("Lobby 2"));

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(text.contains("rename room"), "missing rename title:\n{}", text);
    assert!(text.contains("Lobby 2"));
}

#[test]
fn location_prompt_is_drawn_on_any_panel() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = TuiState::new();
    state.panel = Panel::Splash;
    state.logged_in = true;
    state.location_prompt = Some(TextField::with_value("/room/9"));

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(text.contains("go to"), "missing prompt title:\n{}", text);
    assert!(text.contains("/room/9"));
}

#[test]
fn profile_shows_repeat_mismatch() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = TuiState::new();
    state.panel = Panel::Profile;
    state.logged_in = true;
    state.user_name = "ann".to_string();
    state.profile.user_name.set("ann");
    state.profile.password.set("abc");
    state.profile.repeat.set("abd");
    state.profile.check_password_repeat();

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(text.contains("Profile: ann"));
    assert!(text.contains("Password doesn't match"));
    assert!(!text.contains("abd"));
}

/// Wrapped message lines should contribute to scroll bounds.
#[test]
fn scroll_clamp_accounts_for_wrapped_message_height() {
    let mut terminal = Terminal::new(TestBackend::new(24, 10)).unwrap();
    let mut state = room_state(1, "Lobby");
    state.replace_messages(vec![message(
        "ann",
        "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu nu xi omicron pi rho sigma tau upsilon phi chi psi omega",
    )]);
    state.room.scroll_offset = 100;

    draw(&mut terminal, &mut state);

    assert!(
        state.room.scroll_offset > 0 && state.room.scroll_offset < 100,
        "scroll offset should clamp to the wrapped content height, got {}",
        state.room.scroll_offset,
    );
}

/// With scroll_offset at 0, a poll that replaces the list keeps the newest messages in view.
#[test]
fn view_stays_pinned_to_newest_messages() {
    let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
    let mut state = room_state(1, "Lobby");
    state.replace_messages((1..=4).map(|i| message("a", &format!("line{i}"))).collect());

    draw(&mut terminal, &mut state);

    state.replace_messages((1..=8).map(|i| message("a", &format!("line{i}"))).collect());
    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(
        text.contains("line8"),
        "viewport should include newest content, got:\n{}",
        text,
    );
    assert!(
        !text.contains("line1"),
        "viewport should have scrolled past oldest content, got:\n{}",
        text,
    );
}

/// Cursor should be clamped to the input viewport when the comment exceeds available width.
#[test]
fn cursor_is_clamped_inside_input_viewport_for_long_comment() {
    let mut terminal = Terminal::new(TestBackend::new(12, 10)).unwrap();
    let mut state = room_state(1, "Lobby");
    state.room.comment.set("abcdefghijklmnopqrstuvwxyz");

    draw(&mut terminal, &mut state);

    let cursor = terminal.get_cursor_position().unwrap();
    assert!(
        cursor.x < 12,
        "cursor x should stay within terminal width, got {:?}",
        cursor,
    );
}
