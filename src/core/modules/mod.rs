//! # Lesson Modules
//!
//! One interactive exercise per `ModuleKind`. Each runner owns a small
//! state machine and reacts to inputs with a `ModuleSignal`:
//!
//! ```text
//! ModuleInput ──► LessonModule::handle() ──► ModuleSignal
//!                   │                          ├── Idle
//!                   ├── FlashcardDeck          ├── Completed(Reward)
//!                   ├── QuizRunner             ├── Media(MediaCommand)
//!                   ├── MediaPlayer (x2)       ├── StartAdCountdown / StopAdCountdown
//!                   └── InfographicViewer      └── Download(url)
//! ```
//!
//! Inputs whose preconditions fail (checking with nothing selected,
//! advancing an unchecked question, ...) return `Idle` and leave the state
//! untouched. Inputs addressed to a different kind are ignored the same way.

pub mod flashcard;
pub mod infographic;
pub mod media;
pub mod quiz;

use serde::{Deserialize, Serialize};

use crate::core::content::{TopicContent, placeholder_flashcard, placeholder_question};

pub use flashcard::{Face, FlashcardDeck, FlashcardInput};
pub use infographic::{AD_SECONDS, InfographicInput, InfographicViewer};
pub use media::{
    MediaBackend, MediaCommand, MediaInput, MediaNotification, MediaPlayer, PlaybackRate,
};
pub use quiz::{QuizInput, QuizRunner, Verdict};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleKind {
    Video,
    Podcast,
    Flashcard,
    Quiz,
    Infographic,
}

impl ModuleKind {
    /// Menu order of the lesson screen.
    pub const ALL: [ModuleKind; 5] = [
        ModuleKind::Video,
        ModuleKind::Podcast,
        ModuleKind::Flashcard,
        ModuleKind::Quiz,
        ModuleKind::Infographic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModuleKind::Video => "Ders İçeriği",
            ModuleKind::Podcast => "Podcast",
            ModuleKind::Flashcard => "Flashcards",
            ModuleKind::Quiz => "Test Çöz",
            ModuleKind::Infographic => "Ders Materyali",
        }
    }
}

/// What a finished module reports back to the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reward {
    /// Fixed XP amount.
    Xp(u32),
    /// Raw quiz score; the controller scales it into XP.
    Score(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModuleSignal {
    Idle,
    Completed(Reward),
    Media(MediaCommand),
    StartAdCountdown,
    StopAdCountdown,
    Download(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModuleInput {
    Flashcard(FlashcardInput),
    Quiz(QuizInput),
    Media(MediaInput),
    Notify(MediaNotification),
    Infographic(InfographicInput),
}

/// Common capability of every lesson module.
pub trait Runner {
    type Input;

    fn kind(&self) -> ModuleKind;

    /// Applies one transition. Never panics; invalid transitions are `Idle`.
    fn handle(&mut self, input: Self::Input) -> ModuleSignal;
}

#[derive(Debug, Clone, PartialEq)]
pub enum LessonModule {
    Flashcard(FlashcardDeck),
    Quiz(QuizRunner),
    Media(MediaPlayer),
    Infographic(InfographicViewer),
}

impl LessonModule {
    /// Starts a fresh runner of `kind` over `content`. Empty card or question
    /// sequences are replaced by a single placeholder so no module starts empty.
    pub fn start(kind: ModuleKind, content: &TopicContent) -> Self {
        match kind {
            ModuleKind::Flashcard => {
                let cards = if content.flashcards.is_empty() {
                    vec![placeholder_flashcard()]
                } else {
                    content.flashcards.clone()
                };
                LessonModule::Flashcard(FlashcardDeck::new(cards))
            }
            ModuleKind::Quiz => {
                let questions = if content.questions.is_empty() {
                    vec![placeholder_question()]
                } else {
                    content.questions.clone()
                };
                LessonModule::Quiz(QuizRunner::new(questions))
            }
            ModuleKind::Video => {
                LessonModule::Media(MediaPlayer::new(kind, content.video_url.clone()))
            }
            ModuleKind::Podcast => {
                LessonModule::Media(MediaPlayer::new(kind, content.podcast_url.clone()))
            }
            ModuleKind::Infographic => LessonModule::Infographic(InfographicViewer::new(
                content.infographic_url.clone(),
            )),
        }
    }

    pub fn kind(&self) -> ModuleKind {
        match self {
            LessonModule::Flashcard(deck) => deck.kind(),
            LessonModule::Quiz(quiz) => quiz.kind(),
            LessonModule::Media(player) => player.kind(),
            LessonModule::Infographic(viewer) => viewer.kind(),
        }
    }

    pub fn handle(&mut self, input: ModuleInput) -> ModuleSignal {
        match (self, input) {
            (LessonModule::Flashcard(deck), ModuleInput::Flashcard(i)) => deck.handle(i),
            (LessonModule::Quiz(quiz), ModuleInput::Quiz(i)) => quiz.handle(i),
            (LessonModule::Media(player), ModuleInput::Media(i)) => player.handle(i),
            (LessonModule::Media(player), ModuleInput::Notify(n)) => player.notify(n),
            (LessonModule::Infographic(viewer), ModuleInput::Infographic(i)) => viewer.handle(i),
            (module, input) => {
                log::debug!("Ignoring {:?} for {:?} module", input, module.kind());
                ModuleSignal::Idle
            }
        }
    }

    /// True while a background countdown is owned by this module.
    pub fn has_pending_countdown(&self) -> bool {
        matches!(self, LessonModule::Infographic(v) if v.ad_in_progress())
    }
}
