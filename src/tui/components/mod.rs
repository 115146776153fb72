//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: learner stats and the status message
//! - `FlashcardView`, `QuizView`, `PlayerView`, `InfographicView`: lesson modules
//! - `LeaderboardView`, `ProfileView`
//!
//! Their key handling is a free `handle_event` function, since every input
//! they need lives in core state.
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep presentation state in `TuiState` and emit `Action`s:
//! - `OnboardingState` / `Onboarding`: course and branch pickers
//! - `PathState` / `PathView`: the topic path
//! - `LessonMenuState` / `LessonMenu`: module picker of a topic
//! - `QuizState`: option cursor of the quiz view
//! - `AdminState` / `AdminPanel`: topic title input for generation
//!
//! The persistent state lives in `TuiState`; the render wrapper is created
//! each frame with borrowed state.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (top status bar)
//! ├── onboarding.rs   (course → branch)
//! ├── path.rs         (zig-zag topic path)
//! ├── lesson_menu.rs  (module picker)
//! ├── flashcard.rs
//! ├── quiz.rs
//! ├── player.rs       (video + podcast)
//! ├── infographic.rs  (download with ad gate)
//! ├── leaderboard.rs
//! ├── profile.rs
//! └── admin.rs        (content generation)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod admin;
pub mod flashcard;
pub mod infographic;
pub mod leaderboard;
pub mod lesson_menu;
pub mod onboarding;
pub mod path;
pub mod player;
pub mod profile;
pub mod quiz;

pub use admin::{AdminPanel, AdminState};
pub use flashcard::FlashcardView;
pub use infographic::InfographicView;
pub use leaderboard::LeaderboardView;
pub use lesson_menu::{LessonMenu, LessonMenuState};
pub use onboarding::{Onboarding, OnboardingState};
pub use path::{PathState, PathView};
pub use player::PlayerView;
pub use profile::ProfileView;
pub use quiz::{QuizState, QuizView};
