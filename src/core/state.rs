//! # Application State
//!
//! Core business state for Sözelio. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── generator: Arc<dyn ContentGenerator>  // admin content generation
//! ├── model_name: String                    // model passed to the generator
//! ├── session: SessionController            // profile, graph, active lesson
//! ├── screen: Screen                        // which view is showing
//! ├── onboarding: OnboardingStep            // course → branch
//! ├── status_message: String                // status bar text
//! ├── is_generating: bool                   // generation request in flight
//! └── pending_download: Option<u64>         // ticket of the running download
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::profile::UserProfile;
use crate::core::session::{RewardPolicy, SessionController};
use crate::inference::ContentGenerator;

pub const WELCOME_MESSAGE: &str = "Sözelio'ya Hoş Geldin!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Onboarding,
    Path,
    /// Lesson menu of the active node, or the module running inside it.
    Lesson,
    Leaderboard,
    Profile,
    Admin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnboardingStep {
    #[default]
    Course,
    Branch,
}

pub struct App {
    pub generator: Arc<dyn ContentGenerator>,
    pub model_name: String,
    pub session: SessionController,
    pub screen: Screen,
    pub onboarding: OnboardingStep,
    pub status_message: String,
    pub is_generating: bool,
    /// Ticket of the download whose result the open viewer is waiting for.
    pub pending_download: Option<u64>,
    pub next_download_ticket: u64,
}

impl App {
    pub fn new(
        generator: Arc<dyn ContentGenerator>,
        model_name: String,
        profile: UserProfile,
        policy: RewardPolicy,
    ) -> Self {
        Self {
            generator,
            model_name,
            session: SessionController::new(profile, policy),
            screen: Screen::Onboarding,
            onboarding: OnboardingStep::Course,
            status_message: WELCOME_MESSAGE.to_string(),
            is_generating: false,
            pending_download: None,
            next_download_ticket: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, WELCOME_MESSAGE);
        assert_eq!(app.screen, Screen::Onboarding);
        assert_eq!(app.onboarding, OnboardingStep::Course);
        assert!(!app.is_generating);
        assert_eq!(app.model_name, "test-model");
        assert!(app.session.active_node().is_none());
    }
}
