//! # Actions
//!
//! Everything that can happen in Sözelio becomes an `Action`.
//! Learner picks a topic? That's `Action::EnterNode(id)`.
//! The player reaches the end? That's `Action::MediaEvent(Ended)`.
//!
//! `update()` applies an action to the `App` and returns the `Effect` the
//! adapter has to carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Module signals map onto effects one to one, except `Completed`, which
//! is consumed here: the reward goes through the session controller and the
//! learner is sent back to the path.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::core::modules::{
    InfographicInput, LessonModule, MediaCommand, MediaNotification, ModuleInput, ModuleKind,
    ModuleSignal, Reward,
};
use crate::core::profile::{Branch, Course};
use crate::core::state::{App, OnboardingStep, Screen};
use crate::inference::GeneratedContent;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Onboarding ──
    SelectCourse(Course),
    SelectBranch(Branch),
    OnboardingBack,
    /// From the profile screen: back to the branch step.
    ChangeBranch,

    // ── Navigation ──
    Navigate(Screen),
    EnterNode(String),
    LeaveNode,
    SelectModule(ModuleKind),
    ExitModule,

    // ── Running module ──
    Module(ModuleInput),
    MediaEvent(MediaNotification),
    AdTick,
    /// Result of the download started with the same `ticket`.
    DownloadFinished {
        ticket: u64,
        result: Result<PathBuf, String>,
    },

    // ── Admin / profile ──
    GenerateTopic(String),
    GenerationFinished {
        title: String,
        content: GeneratedContent,
    },
    UpgradeToPremium,

    Quit,
}

/// I/O the adapter performs after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Prepare the playback backend for a freshly started media module.
    LoadMedia { kind: ModuleKind, url: String },
    Media(MediaCommand),
    StartAdCountdown,
    StopAdCountdown,
    /// Fetch `url`; report back with `DownloadFinished` carrying `ticket`.
    StartDownload { ticket: u64, url: String },
    /// The running module is gone: stop playback and any countdown.
    ReleaseModule,
    SpawnGeneration(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::SelectCourse(course) => {
            app.session.select_course(course);
            app.onboarding = OnboardingStep::Branch;
            Effect::None
        }
        Action::SelectBranch(branch) => {
            app.session.select_branch(branch);
            app.onboarding = OnboardingStep::Course;
            app.screen = Screen::Path;
            app.status_message = format!("{} yolu hazır.", branch.label());
            Effect::None
        }
        Action::OnboardingBack => {
            app.onboarding = OnboardingStep::Course;
            Effect::None
        }
        Action::ChangeBranch => {
            let effect = release_lesson(app);
            app.screen = Screen::Onboarding;
            app.onboarding = OnboardingStep::Branch;
            effect
        }

        Action::Navigate(screen) => {
            if matches!(screen, Screen::Lesson | Screen::Onboarding) {
                debug!("Ignoring direct navigation to {:?}", screen);
                return Effect::None;
            }
            let effect = release_lesson(app);
            app.screen = screen;
            effect
        }
        Action::EnterNode(node_id) => {
            if app.session.enter_node(&node_id) {
                app.screen = Screen::Lesson;
            } else {
                app.status_message = "Bu ders henüz kilitli.".to_string();
            }
            Effect::None
        }
        Action::LeaveNode => {
            let effect = release_lesson(app);
            app.screen = Screen::Path;
            effect
        }
        Action::SelectModule(kind) => select_module(app, kind),
        Action::ExitModule => {
            if app.session.active_module().is_none() {
                return Effect::None;
            }
            app.session.exit_module();
            app.pending_download = None;
            Effect::ReleaseModule
        }

        Action::Module(input) => {
            let signal = app.session.drive(input);
            apply_signal(app, signal)
        }
        Action::MediaEvent(notification) => {
            let signal = app.session.drive(ModuleInput::Notify(notification));
            apply_signal(app, signal)
        }
        Action::AdTick => {
            if !matches!(app.session.active_module(), Some(LessonModule::Infographic(_))) {
                return Effect::StopAdCountdown;
            }
            let signal = app
                .session
                .drive(ModuleInput::Infographic(InfographicInput::AdTick));
            apply_signal(app, signal)
        }
        Action::DownloadFinished { ticket, result } => {
            if app.pending_download != Some(ticket) {
                debug!("Dropping result of stale download #{}", ticket);
                return Effect::None;
            }
            app.pending_download = None;
            app.session
                .drive(ModuleInput::Infographic(InfographicInput::DownloadFinished));
            app.status_message = match result {
                Ok(path) => format!("Materyal indirildi: {}", path.display()),
                Err(e) => format!("İndirme başarısız: {e}"),
            };
            Effect::None
        }

        Action::GenerateTopic(title) => {
            let title = title.trim().to_string();
            if title.is_empty() || app.is_generating {
                return Effect::None;
            }
            app.is_generating = true;
            app.status_message = format!("\"{title}\" için içerik oluşturuluyor...");
            Effect::SpawnGeneration(title)
        }
        Action::GenerationFinished { title, content } => {
            app.is_generating = false;
            let id = app
                .session
                .append_generated_topic(&title, content.into_topic_content());
            info!("Admin generation finished: {} -> {}", title, id);
            app.status_message = format!("\"{title}\" yola eklendi.");
            Effect::None
        }
        Action::UpgradeToPremium => {
            app.session.upgrade_to_premium();
            app.status_message = "Premium'a geçtin! Reklamlar kaldırıldı.".to_string();
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

fn select_module(app: &mut App, kind: ModuleKind) -> Effect {
    if app.session.active_module().is_some() {
        debug!("A module is already running; ignoring {:?}", kind);
        return Effect::None;
    }
    match app.session.select_module(kind) {
        Some(LessonModule::Media(player)) => match player.url() {
            Some(url) => Effect::LoadMedia {
                kind,
                url: url.to_string(),
            },
            None => {
                app.status_message = "Bu ders için medya bulunamadı.".to_string();
                Effect::None
            }
        },
        Some(_) => Effect::None,
        None => {
            warn!("select_module({:?}) without an active topic", kind);
            Effect::None
        }
    }
}

fn apply_signal(app: &mut App, signal: ModuleSignal) -> Effect {
    match signal {
        ModuleSignal::Idle => Effect::None,
        ModuleSignal::Completed(reward) => complete(app, reward),
        ModuleSignal::Media(command) => Effect::Media(command),
        ModuleSignal::StartAdCountdown => {
            app.status_message = "Reklam izleniyor...".to_string();
            Effect::StartAdCountdown
        }
        ModuleSignal::StopAdCountdown => Effect::StopAdCountdown,
        ModuleSignal::Download(url) => {
            app.status_message = "İndiriliyor...".to_string();
            let ticket = app.next_download_ticket;
            app.next_download_ticket += 1;
            app.pending_download = Some(ticket);
            Effect::StartDownload { ticket, url }
        }
    }
}

fn complete(app: &mut App, reward: Reward) -> Effect {
    match app.session.on_module_completed(reward) {
        Some(summary) => {
            app.pending_download = None;
            app.screen = Screen::Path;
            app.status_message = format!("Tebrikler! {} XP kazandın! 🎉", summary.xp_gained);
            Effect::ReleaseModule
        }
        None => Effect::None,
    }
}

/// Closes any open lesson. Returns `ReleaseModule` if a module was running.
fn release_lesson(app: &mut App) -> Effect {
    let had_module = app.session.active_module().is_some();
    app.session.leave_node();
    app.pending_download = None;
    if had_module {
        Effect::ReleaseModule
    } else {
        Effect::None
    }
}
