//! # TitleBar Component
//!
//! Top status bar showing the learner's stats and the latest status message.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::from_app(&app, tui.spinner_frame);
//! title_bar.render(frame, area);
//! ```
//!
//! The stats block is always drawn first so it survives narrow terminals;
//! the status message is truncated by the terminal edge instead.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::App;
use crate::tui::component::Component;

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

pub struct TitleBar {
    pub course: String,
    pub branch: String,
    pub xp: u32,
    pub gems: u32,
    pub streak: u32,
    pub is_premium: bool,
    pub status_message: String,
    /// `Some(frame)` while a generation request is in flight.
    pub spinner: Option<usize>,
}

impl TitleBar {
    pub fn from_app(app: &App, spinner_frame: usize) -> Self {
        let profile = app.session.profile();
        Self {
            course: profile.course.label().to_string(),
            branch: profile.branch.label().to_string(),
            xp: profile.xp,
            gems: profile.gems,
            streak: profile.streak,
            is_premium: profile.is_premium,
            status_message: app.status_message.clone(),
            spinner: app.is_generating.then_some(spinner_frame),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!(" Sözelio {} · {} ", self.course, self.branch),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("🔥 {} ", self.streak), Style::default().fg(Color::Red)),
            Span::styled(format!("💎 {} ", self.gems), Style::default().fg(Color::Cyan)),
            Span::styled(format!("⚡ {} XP ", self.xp), Style::default().fg(Color::Yellow)),
        ];
        if self.is_premium {
            spans.push(Span::styled(
                "PREMIUM ",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(frame_index) = self.spinner {
            spans.push(Span::raw(format!("{} ", SPINNER[frame_index % SPINNER.len()])));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!("| {}", self.status_message),
                Style::default().fg(Color::Gray),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(title_bar: &mut TitleBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 1)).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_title_bar_shows_profile_stats() {
        let app = test_app();
        let text = draw(&mut TitleBar::from_app(&app, 0));

        assert!(text.contains("Sözelio TYT"));
        assert!(text.contains("100"));
        assert!(text.contains("0 XP"));
        assert!(text.contains("Hoş Geldin"));
        assert!(!text.contains("PREMIUM"));
    }

    #[test]
    fn test_title_bar_marks_premium_and_generation() {
        let mut app = test_app();
        app.session.upgrade_to_premium();
        app.is_generating = true;
        let mut title_bar = TitleBar::from_app(&app, 1);
        assert_eq!(title_bar.spinner, Some(1));

        let text = draw(&mut title_bar);
        assert!(text.contains("PREMIUM"));
        assert!(text.contains("⠙"));
    }

    #[test]
    fn test_title_bar_without_status_has_no_separator() {
        let mut app = test_app();
        app.status_message.clear();
        let text = draw(&mut TitleBar::from_app(&app, 0));
        assert!(!text.contains('|'));
    }
}
