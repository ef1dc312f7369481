// ABOUTME: App orchestrator — owns session, router history, poller, and view state.
// ABOUTME: Dispatches actions to their handlers and drives the terminal event loop.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use crate::actions::Action;
use crate::api::{AuthResponse, ChatApi, HttpApi, InMemoryApi, LoginReply, RoomId};
use crate::config::Config;
use crate::poller::{MessagePoller, PollEvent};
use crate::router::{History, Panel, resolve, room_path};
use crate::session::{FileStore, KeyValueStore, MemoryStore, Session, SessionStore};
use crate::tui::input::{self, InputResult};
use crate::tui::state::{RoomView, TuiState};
use crate::tui::ui;

/// Upper bound on router redirects followed for one navigation.
const MAX_REDIRECTS: usize = 4;

/// How to start the client.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub config: Config,
    /// Initial location. Defaults to the persisted room, else "/".
    pub initial_path: Option<String>,
    /// Talk to an in-process demo server and keep nothing on disk.
    pub demo: bool,
    /// Wipe local storage before starting.
    pub fresh: bool,
}

/// Set up storage and the API client, then run the TUI until quit.
pub async fn launch(opts: LaunchOptions) -> anyhow::Result<()> {
    let store: Box<dyn KeyValueStore>;
    let api: Arc<dyn ChatApi>;
    if opts.demo {
        store = Box::new(MemoryStore::new());
        api = Arc::new(InMemoryApi::new());
    } else {
        let storage_path = opts.config.storage_path();
        let file_store = FileStore::open(&storage_path)
            .with_context(|| format!("opening local storage {}", storage_path.display()))?;
        store = Box::new(file_store);
        api = Arc::new(HttpApi::new(&opts.config.server.base_url, None)?);
    }

    let mut session = SessionStore::new(store);
    if opts.fresh {
        session.clear_all().context("clearing local storage")?;
    }

    let (app, poll_rx) = App::new(api, session, opts.config.poll.interval());
    let initial_path = opts.initial_path.unwrap_or_else(|| app.resume_path());
    tracing::info!(
        server = %opts.config.server.base_url,
        demo = opts.demo,
        path = %initial_path,
        "starting watchparty"
    );

    app.run(poll_rx, &initial_path).await
}

/// Application state plus the collaborators it drives.
pub struct App {
    api: Arc<dyn ChatApi>,
    session: SessionStore,
    history: History,
    poller: MessagePoller,
    pub view: TuiState,
    /// Room shown right now; reset to 0 whenever a panel is shown.
    current_room: RoomId,
    should_quit: bool,
}

impl App {
    /// Build the app. The returned receiver carries poll results and must be fed to `apply_poll`.
    pub fn new(
        api: Arc<dyn ChatApi>,
        session: SessionStore,
        poll_interval: Duration,
    ) -> (Self, mpsc::Receiver<PollEvent>) {
        let (tx, rx) = mpsc::channel(64);
        api.set_token(session.api_key());
        let poller = MessagePoller::new(Arc::clone(&api), tx, poll_interval);
        let app = Self {
            api,
            session,
            history: History::new(),
            poller,
            view: TuiState::new(),
            current_room: 0,
            should_quit: false,
        };
        (app, rx)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn poller(&self) -> &MessagePoller {
        &self.poller
    }

    pub fn current_room(&self) -> RoomId {
        self.current_room
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Where a restart should land: the persisted room if any, else home.
    pub fn resume_path(&self) -> String {
        self.session
            .current_room()
            .map(room_path)
            .unwrap_or_else(|| "/".to_string())
    }

    /// Run the terminal UI. Restores the terminal even when the loop fails.
    pub async fn run(
        mut self,
        mut poll_rx: mpsc::Receiver<PollEvent>,
        initial_path: &str,
    ) -> anyhow::Result<()> {
        let mut terminal = ratatui::init();
        let result = self
            .event_loop(&mut terminal, &mut poll_rx, initial_path)
            .await;
        ratatui::restore();
        self.poller.stop();
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        poll_rx: &mut mpsc::Receiver<PollEvent>,
        initial_path: &str,
    ) -> anyhow::Result<()> {
        self.load(initial_path).await;
        let mut events = EventStream::new();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, &mut self.view))?;

            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_terminal_event(event).await,
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some(event) = poll_rx.recv() => self.apply_poll(event),
            }
        }
        Ok(())
    }

    async fn handle_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            if let InputResult::Dispatch(action) = input::handle_key(&mut self.view, key) {
                self.dispatch(action).await;
            }
        }
    }

    /// Apply one poll result. Results for a room no longer being polled are dropped.
    pub fn apply_poll(&mut self, event: PollEvent) {
        if self.view.panel == Panel::Room && self.poller.active_room() == Some(event.room_id) {
            self.view.replace_messages(event.messages);
        }
    }

    /// Carry out one user action.
    pub async fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.name(), "dispatch");
        match action {
            Action::Login {
                user_name,
                password,
            } => self.login(&user_name, &password).await,
            Action::Signup => self.signup().await,
            Action::Logout => self.logout().await,
            Action::CreateRoom => self.create_room().await,
            Action::RenameRoom { new_name } => self.rename_room(&new_name).await,
            Action::PostMessage { body } => self.post_message(&body).await,
            Action::UpdateUsername { new_name } => self.update_username(&new_name).await,
            Action::UpdatePassword { password, repeat } => {
                self.update_password(&password, &repeat).await
            }
            Action::Navigate(path) => self.navigate(&path).await,
            Action::Back => self.back().await,
            Action::Forward => self.forward().await,
            Action::Quit => self.quit(),
        }
    }

    // --- navigation ---

    /// Full load of `path`: login status check, profile prefill, then routing.
    pub async fn load(&mut self, path: &str) {
        self.view.location = path.to_string();
        self.view.login.failed = false;
        self.check_login_status().await;
        self.setup_profile();
        self.route().await;
    }

    pub async fn navigate(&mut self, path: &str) {
        tracing::debug!(path, "navigate");
        self.load(path).await;
    }

    async fn reload(&mut self) {
        let path = self.view.location.clone();
        self.load(&path).await;
    }

    /// History back; re-runs the router only.
    pub async fn back(&mut self) {
        if let Some(path) = self.history.back().map(str::to_string) {
            self.view.location = path;
            self.route().await;
        }
    }

    pub async fn forward(&mut self) {
        if let Some(path) = self.history.forward().map(str::to_string) {
            self.view.location = path;
            self.route().await;
        }
    }

    async fn route(&mut self) {
        let logged_in = self.session.is_logged_in();
        let mut resolution = resolve(&self.view.location, logged_in);
        for _ in 0..MAX_REDIRECTS {
            let Some(target) = resolution.redirect.take() else {
                break;
            };
            self.view.location = target;
            resolution = resolve(&self.view.location, logged_in);
        }

        if let Some(path) = &resolution.remember {
            if let Err(e) = self.session.set_redirect_after_login(path) {
                tracing::warn!(error = %e, "failed to store post-login redirect");
            }
        }

        self.show_only(resolution.panel);
        match resolution.enter_room {
            Some(room_id) => {
                if self.view.room.room_id != Some(room_id) {
                    self.view.room = RoomView::default();
                }
                self.current_room = room_id;
                if let Err(e) = self.session.set_current_room(room_id) {
                    tracing::warn!(room_id, error = %e, "failed to persist current room");
                }
                self.enter_room().await;
            }
            None => self.stop_polling(),
        }

        let location = self.view.location.clone();
        self.history.push_if_changed(&location);
    }

    fn show_only(&mut self, panel: Panel) {
        self.current_room = 0;
        self.view.panel = panel;
    }

    // --- page state ---

    async fn check_login_status(&mut self) {
        match self.session.session() {
            Some(session) => {
                self.view.logged_in = true;
                self.view.greeting = Some(format!("Welcome back, {}!", session.user_name));
                self.view.user_name = session.user_name;
                self.fetch_rooms().await;
            }
            None => {
                self.view.logged_in = false;
                self.view.greeting = None;
                self.view.user_name.clear();
                self.view.splash.rooms = None;
            }
        }
    }

    fn setup_profile(&mut self) {
        if let Some(name) = self.session.user_name() {
            self.view.profile.user_name.set(&name);
        }
        self.view.profile.clear_passwords();
    }

    fn update_username_display(&mut self) {
        self.view.user_name = self.session.user_name().unwrap_or_default();
    }

    async fn fetch_rooms(&mut self) {
        match self.api.list_rooms().await {
            Ok(rooms) => self.view.splash.set_rooms(rooms),
            Err(e) => tracing::error!(error = %e, "error fetching rooms"),
        }
    }

    async fn enter_room(&mut self) {
        self.view.room.close_rename();
        let Some(room_id) = self.session.current_room() else {
            return;
        };
        match self.api.get_room(room_id).await {
            Ok(room) => {
                self.view.room.room_id = Some(room.room_id);
                self.view.room.invite_link = room_path(room.room_id);
                self.view.room.rename_draft = room.room_name.clone();
                self.view.room.room_name = room.room_name;
                self.update_username_display();
                self.show_only(Panel::Room);
                self.current_room = room_id;
                self.fetch_messages(room_id).await;
                self.start_polling(room_id);
            }
            Err(e) => {
                tracing::error!(room_id, error = %e, "error entering room");
                self.stop_polling();
            }
        }
    }

    async fn fetch_messages(&mut self, room_id: RoomId) {
        match self.api.get_messages(room_id).await {
            Ok(messages) => self.view.replace_messages(messages),
            Err(e) => tracing::error!(room_id, error = %e, "error fetching messages"),
        }
    }

    fn start_polling(&mut self, room_id: RoomId) {
        self.poller.start(room_id);
        self.view.polling_room = Some(room_id);
    }

    fn stop_polling(&mut self) {
        self.poller.stop();
        self.view.polling_room = None;
    }

    fn store_session(&mut self, auth: AuthResponse) {
        let session = Session {
            api_key: auth.api_key,
            user_name: auth.user_name,
            user_id: auth.user_id,
        };
        if let Err(e) = self.session.save_session(&session) {
            tracing::warn!(error = %e, "failed to persist session");
        }
        self.api.set_token(Some(session.api_key));
    }

    // --- action handlers ---

    async fn login(&mut self, user_name: &str, password: &str) {
        match self.api.login(user_name, password).await {
            Ok(LoginReply::Authenticated(auth)) => {
                tracing::info!(user_id = auth.user_id, "logged in");
                self.store_session(auth);
                self.login_success().await;
            }
            Ok(LoginReply::Failed { error }) => {
                tracing::warn!(%error, "login rejected");
                self.view.login.failed = true;
            }
            Err(e) => {
                tracing::error!(error = %e, "login request failed");
                self.view.login.failed = true;
            }
        }
    }

    async fn login_success(&mut self) {
        let redirect = match self.session.take_redirect_after_login() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "failed to clear post-login redirect");
                None
            }
        };
        let target = redirect.unwrap_or_else(|| "/".to_string());
        self.navigate(&target).await;
    }

    async fn signup(&mut self) {
        match self.api.signup().await {
            Ok(auth) => {
                tracing::info!(user_id = auth.user_id, "signed up");
                self.store_session(auth);
                self.check_login_status().await;
                self.navigate("/").await;
            }
            Err(e) => tracing::error!(error = %e, "error signing up"),
        }
    }

    async fn logout(&mut self) {
        if let Err(e) = self.session.clear_session() {
            tracing::warn!(error = %e, "failed to clear session");
        }
        self.api.set_token(None);
        self.view.user_name.clear();
        tracing::info!("logged out");
        self.navigate("/").await;
    }

    async fn create_room(&mut self) {
        match self.api.create_room().await {
            Ok(room) => {
                tracing::info!(room_id = room.id, name = %room.name, "created room");
                self.navigate(&room_path(room.id)).await;
            }
            Err(e) => tracing::error!(error = %e, "error creating room"),
        }
    }

    async fn rename_room(&mut self, new_name: &str) {
        let Some(room_id) = self.session.current_room() else {
            tracing::warn!("rename requested with no current room");
            return;
        };
        match self.api.rename_room(room_id, new_name).await {
            Ok(_) => {
                self.view.set_notice("Room name updated successfully.");
                self.enter_room().await;
            }
            Err(e) => tracing::error!(room_id, error = %e, "error updating room name"),
        }
    }

    async fn post_message(&mut self, body: &str) {
        let Some(room_id) = self.session.current_room() else {
            tracing::warn!("post requested with no current room");
            return;
        };
        let user_id = self.session.user_id();
        match self.api.post_message(room_id, user_id, body).await {
            Ok(_) => {
                self.view.set_notice("Message posted successfully.");
                self.fetch_messages(room_id).await;
            }
            Err(e) => tracing::error!(room_id, error = %e, "error posting message"),
        }
    }

    async fn update_username(&mut self, new_name: &str) {
        match self.api.update_username(new_name).await {
            Ok(_) => {
                self.view.set_notice("Username updated successfully.");
                if let Err(e) = self.session.set_user_name(new_name) {
                    tracing::warn!(error = %e, "failed to persist user name");
                }
                self.reload().await;
            }
            Err(e) => tracing::error!(error = %e, "error updating username"),
        }
    }

    async fn update_password(&mut self, password: &str, repeat: &str) {
        if password != repeat {
            self.view.set_notice("Passwords do not match.");
            return;
        }
        match self.api.update_password(password).await {
            Ok(_) => {
                self.view.set_notice("Password updated successfully.");
                self.reload().await;
            }
            Err(e) => tracing::error!(error = %e, "error updating password"),
        }
    }

    fn quit(&mut self) {
        self.stop_polling();
        self.should_quit = true;
    }
}
