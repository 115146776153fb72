//! Sözelio library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod download;
pub mod inference;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Content-generation backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    #[default]
    Gemini,
    #[value(name = "openrouter")]
    OpenRouter,
}
