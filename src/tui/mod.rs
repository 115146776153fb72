//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values and performs the
//! `Effect`s the reducer returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (media playing, ad countdown, generation in flight):
//!   ticks every ~100ms so the playback clock and spinner move smoothly.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background
//!   actions or terminal resize.
//!
//! ## Background Work
//!
//! Every long-running effect runs on a tokio task that reports back by
//! sending an `Action` over an `mpsc` channel, drained once per loop:
//!
//! ```text
//! Effect::StartAdCountdown  → 1s interval   → Action::AdTick
//! Effect::StartDownload     → fetch_material → Action::DownloadFinished
//! Effect::SpawnGeneration   → generator      → Action::GenerationFinished
//! Effect::LoadMedia / Media → PlaybackClock  → Action::MediaEvent
//! ```

mod component;
mod components;
mod event;
mod playback;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::layout::{Constraint, Layout, Rect};
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::modules::{LessonModule, ModuleKind};
use crate::core::profile::UserProfile;
use crate::core::state::{App, Screen};
use crate::download::fetch_material;
use crate::inference::{build_generator, generate_topic_content};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AdminState, LessonMenuState, OnboardingState, PathState, QuizState, flashcard, infographic,
    player, profile,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::playback::PlaybackClock;

/// Screens reachable with Tab, in tab order.
pub const TABS: [Screen; 4] = [Screen::Path, Screen::Leaderboard, Screen::Profile, Screen::Admin];

/// The "download" spinner stays up at least this long.
const MIN_DOWNLOAD_DISPLAY: Duration = Duration::from_secs(2);

/// TUI-specific presentation state (not part of core business logic)
#[derive(Debug, Default)]
pub struct TuiState {
    pub onboarding: OnboardingState,
    pub path: PathState,
    pub lesson_menu: LessonMenuState,
    pub quiz: QuizState,
    pub admin: AdminState,
    pub spinner_frame: usize,
}

/// Compute a centered rect using percentage of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

fn next_tab(screen: Screen) -> Screen {
    let index = TABS.iter().position(|s| *s == screen).unwrap_or(0);
    TABS[(index + 1) % TABS.len()]
}

/// Translate a terminal event into an `Action` for the current screen.
pub fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if *event == TuiEvent::ForceQuit {
        return Some(Action::Quit);
    }
    let is_premium = app.session.profile().is_premium;
    let action = match app.screen {
        Screen::Onboarding => tui.onboarding.handle_event(event, app.onboarding),
        Screen::Lesson => match app.session.active_module() {
            None => tui.lesson_menu.handle_event(event),
            Some(LessonModule::Flashcard(_)) => flashcard::handle_event(event),
            Some(LessonModule::Quiz(quiz)) => tui.quiz.handle_event(event, quiz),
            Some(LessonModule::Media(media)) => player::handle_event(event, media),
            Some(LessonModule::Infographic(_)) => infographic::handle_event(event, is_premium),
        },
        screen if *event == TuiEvent::Tab => Some(Action::Navigate(next_tab(screen))),
        Screen::Path => match event {
            TuiEvent::Escape => Some(Action::Quit),
            _ => tui.path.handle_event(event, app.session.graph()),
        },
        Screen::Leaderboard => match event {
            TuiEvent::Escape => Some(Action::Navigate(Screen::Path)),
            _ => None,
        },
        Screen::Profile => match event {
            TuiEvent::Escape => Some(Action::Navigate(Screen::Path)),
            _ => profile::handle_event(event, is_premium),
        },
        Screen::Admin => tui.admin.handle_event(event),
    };

    match &action {
        Some(Action::SelectModule(_)) => tui.quiz = QuizState::default(),
        Some(Action::ChangeBranch) => tui.path = PathState::default(),
        _ => {}
    }
    action
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Performs effects for the event loop and owns every background task.
pub struct EffectRunner {
    tx: mpsc::Sender<Action>,
    http: reqwest::Client,
    downloads_dir: PathBuf,
    video_secs: u32,
    podcast_secs: u32,
    clock: PlaybackClock,
    ad_countdown: Option<AbortHandle>,
    download: Option<AbortHandle>,
    tasks: Vec<AbortHandle>,
}

impl EffectRunner {
    pub fn new(tx: mpsc::Sender<Action>, config: &ResolvedConfig) -> Self {
        Self {
            tx,
            http: reqwest::Client::new(),
            downloads_dir: config.downloads_dir.clone(),
            video_secs: config.video_secs,
            podcast_secs: config.podcast_secs,
            clock: PlaybackClock::default(),
            ad_countdown: None,
            download: None,
            tasks: Vec::new(),
        }
    }

    /// True while something on screen changes without input.
    pub fn is_animating(&self, app: &App) -> bool {
        self.clock.is_playing() || self.ad_countdown.is_some() || app.is_generating
    }

    /// Applies one effect. Returns `false` when the app should quit.
    pub fn perform(&mut self, app: &App, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return false,
            Effect::LoadMedia { kind, url } => {
                let secs = match kind {
                    ModuleKind::Podcast => self.podcast_secs,
                    _ => self.video_secs,
                };
                info!("Loading {:?} media: {}", kind, url);
                self.clock.load(f64::from(secs));
            }
            Effect::Media(command) => command.apply_to(&mut self.clock),
            Effect::StartAdCountdown => self.start_ad_countdown(),
            Effect::StopAdCountdown => self.stop_ad_countdown(),
            Effect::StartDownload { ticket, url } => {
                self.stop_ad_countdown();
                self.spawn_download(ticket, url);
            }
            Effect::ReleaseModule => {
                self.clock.unload();
                self.stop_ad_countdown();
                self.cancel_download();
            }
            Effect::SpawnGeneration(title) => self.spawn_generation(app, title),
        }
        true
    }

    /// Advances simulated playback, feeding its notifications to the reducer.
    pub fn tick_playback(&mut self, now: Instant) {
        if !self.clock.is_loaded() {
            return;
        }
        for notification in self.clock.tick(now) {
            if self.tx.send(Action::MediaEvent(notification)).is_err() {
                warn!("Failed to send playback notification: receiver dropped");
            }
        }
    }

    fn start_ad_countdown(&mut self) {
        self.stop_ad_countdown();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // First tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Action::AdTick).is_err() {
                    break;
                }
            }
        });
        debug!("Ad countdown started");
        self.ad_countdown = Some(handle.abort_handle());
    }

    fn stop_ad_countdown(&mut self) {
        if let Some(handle) = self.ad_countdown.take() {
            handle.abort();
            debug!("Ad countdown stopped");
        }
    }

    fn spawn_download(&mut self, ticket: u64, url: String) {
        self.cancel_download();
        info!("Spawning material download #{}: {}", ticket, url);
        let tx = self.tx.clone();
        let client = self.http.clone();
        let dir = self.downloads_dir.clone();
        let handle = tokio::spawn(async move {
            let started = tokio::time::Instant::now();
            let result = fetch_material(&client, &url, &dir).await;
            tokio::time::sleep_until(started + MIN_DOWNLOAD_DISPLAY).await;
            if let Err(e) = &result {
                warn!("Material download failed: {}", e);
            }
            if tx
                .send(Action::DownloadFinished {
                    ticket,
                    result: result.map_err(|e| e.to_string()),
                })
                .is_err()
            {
                warn!("Failed to send download result: receiver dropped");
            }
        });
        self.download = Some(handle.abort_handle());
    }

    fn cancel_download(&mut self) {
        if let Some(handle) = self.download.take() {
            if !handle.is_finished() {
                handle.abort();
                debug!("In-flight download cancelled");
            }
        }
    }

    fn spawn_generation(&mut self, app: &App, title: String) {
        info!("Spawning content generation for {:?}", title);
        let tx = self.tx.clone();
        let generator = app.generator.clone();
        let model = app.model_name.clone();
        let handle = tokio::spawn(async move {
            let content = generate_topic_content(generator.as_ref(), &title, &model).await;
            if tx.send(Action::GenerationFinished { title, content }).is_err() {
                warn!("Failed to send generation result: receiver dropped");
            }
        });
        self.track(handle.abort_handle());
    }

    fn track(&mut self, handle: AbortHandle) {
        self.tasks.retain(|h| !h.is_finished());
        self.tasks.push(handle);
    }

    /// Aborts every background task.
    pub fn shutdown(&mut self) {
        self.stop_ad_countdown();
        self.cancel_download();
        for handle in self.tasks.drain(..) {
            handle.abort();
        }
    }
}

fn initial_profile(config: &ResolvedConfig) -> UserProfile {
    UserProfile {
        name: config.learner_name.clone(),
        course: config.course,
        branch: config.branch,
        is_premium: config.premium,
        ..UserProfile::default()
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let generator = build_generator(&config);
    info!("Content generator: {}", generator.name());
    let mut app = App::new(
        generator,
        config.model_name.clone(),
        initial_profile(&config),
        config.rewards,
    );
    let mut tui = TuiState::default();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut effects = EffectRunner::new(tx, &config);

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        let animating = effects.is_animating(&app);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 10.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain every pending event before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            let Some(action) = route_event(&app, &mut tui, &event) else {
                continue;
            };
            let effect = update(&mut app, action);
            if !effects.perform(&app, effect) {
                break 'main;
            }
        }

        effects.tick_playback(Instant::now());

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if !effects.perform(&app, effect) {
                break 'main;
            }
        }
    }

    effects.shutdown();
    info!(
        "Sözelio shutting down: {} XP, {} gems",
        app.session.profile().xp,
        app.session.profile().gems
    );
    ratatui::restore();
    Ok(())
}
