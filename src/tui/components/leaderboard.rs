//! # Leaderboard Component
//!
//! Weekly league standings with the learner slotted in by XP. The first
//! `PROMOTION_SLOTS` rows are the promotion zone.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Padding, Row, Table};

use crate::core::profile::{LeaderboardEntry, PROMOTION_SLOTS};
use crate::tui::component::Component;

pub struct LeaderboardView {
    pub entries: Vec<LeaderboardEntry>,
}

impl Component for LeaderboardView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self
            .entries
            .iter()
            .map(|entry| {
                let mut style = if entry.rank <= PROMOTION_SLOTS {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                if entry.is_learner {
                    style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
                }
                let name = if entry.is_learner {
                    format!("{} (Sen)", entry.name)
                } else {
                    entry.name.clone()
                };
                Row::new(vec![
                    format!("{:>2}.", entry.rank),
                    name,
                    format!("{} XP", entry.xp),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(10),
            ],
        )
        .header(
            Row::new(vec!["#", "Öğrenci", "Puan"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Altın Lig ")
                .title_bottom(
                    Line::from(format!(" İlk {PROMOTION_SLOTS} üst lige yükselir ")).centered(),
                )
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(table, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{UserProfile, leaderboard};
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_render_marks_learner_row() {
        let profile = UserProfile {
            name: "Zeynep".into(),
            xp: 2200,
            ..Default::default()
        };
        let mut view = LeaderboardView {
            entries: leaderboard(&profile),
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal.draw(|f| view.render(f, f.area())).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Zeynep (Sen)"));
        assert!(text.contains("2200 XP"));
        assert!(text.contains("Ahmet Y."));
        assert!(text.contains("Altın Lig"));
    }
}
