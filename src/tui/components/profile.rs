//! # Profile Component
//!
//! Learner stats plus the two account actions: upgrade to premium and
//! switch branch (which resets the path).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::core::action::Action;
use crate::core::profile::UserProfile;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

pub fn handle_event(event: &TuiEvent, is_premium: bool) -> Option<Action> {
    match event {
        TuiEvent::InputChar('p') if !is_premium => Some(Action::UpgradeToPremium),
        TuiEvent::InputChar('b') => Some(Action::ChangeBranch),
        _ => None,
    }
}

pub struct ProfileView<'a> {
    pub profile: &'a UserProfile,
}

fn stat(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

impl Component for ProfileView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let p = self.profile;
        let mut lines = vec![
            Line::from(Span::styled(
                p.name.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            stat("Sınav", p.course.label().to_string()),
            stat("Ders", p.branch.label().to_string()),
            stat("XP", p.xp.to_string()),
            stat("Elmas", p.gems.to_string()),
            stat("Seri", format!("{} gün", p.streak)),
            Line::default(),
        ];
        if p.is_premium {
            lines.push(Line::from(Span::styled(
                "★ Premium üye",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from("p  Premium'a geç (reklamsız indirme)"));
        }
        lines.push(Line::from("b  Ders değiştir (ilerleme sıfırlanır)"));

        let body = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Profil ")
                .padding(Padding::uniform(1)),
        );
        frame.render_widget(body, area);
    }
}
