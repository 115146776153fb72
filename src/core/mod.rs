//! # Core Application Logic
//!
//! This module contains Sözelio's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Content + graph      │
//!                    │  • Lesson modules       │
//!                    │  • Session controller   │
//!                    │  • Action / update()    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Playback  │      │ Generator  │
//!     │  Adapter   │      │  backend   │      │ / download │
//!     │ (ratatui)  │      │            │      │  (reqwest) │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`content`]: topic nodes, their content and the static branch data
//! - [`graph`]: the ordered topic path and its unlock rule
//! - [`modules`]: flashcard, quiz, media and infographic runners
//! - [`session`]: the controller owning profile, graph and active lesson
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum, `Effect` and the `update()` reducer
//! - [`profile`]: learner profile and leaderboard
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod content;
pub mod graph;
pub mod modules;
pub mod profile;
pub mod session;
pub mod state;
