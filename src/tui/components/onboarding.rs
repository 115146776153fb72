//! # Onboarding Component
//!
//! Two-step picker shown at launch and on "change branch": first the exam
//! course, then the subject branch. The step itself lives in core
//! (`App::onboarding`); only the highlighted row is kept here.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::action::Action;
use crate::core::profile::{Branch, Course};
use crate::core::state::OnboardingStep;
use crate::tui::centered_rect;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct OnboardingState {
    pub selected: usize,
    pub list_state: ListState,
}

impl OnboardingState {
    fn option_count(step: OnboardingStep) -> usize {
        match step {
            OnboardingStep::Course => Course::ALL.len(),
            OnboardingStep::Branch => Branch::ALL.len(),
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent, step: OnboardingStep) -> Option<Action> {
        let count = Self::option_count(step);
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(count - 1);
                None
            }
            TuiEvent::Submit => {
                let index = self.selected.min(count - 1);
                self.selected = 0;
                Some(match step {
                    OnboardingStep::Course => Action::SelectCourse(Course::ALL[index]),
                    OnboardingStep::Branch => Action::SelectBranch(Branch::ALL[index]),
                })
            }
            TuiEvent::Escape => {
                self.selected = 0;
                Some(match step {
                    OnboardingStep::Course => Action::Quit,
                    OnboardingStep::Branch => Action::OnboardingBack,
                })
            }
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct Onboarding<'a> {
    state: &'a mut OnboardingState,
    step: OnboardingStep,
}

impl<'a> Onboarding<'a> {
    pub fn new(state: &'a mut OnboardingState, step: OnboardingStep) -> Self {
        Self { state, step }
    }
}

impl Component for Onboarding<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let panel = centered_rect(60, 60, area);
        let (title, labels): (&str, Vec<&str>) = match self.step {
            OnboardingStep::Course => (
                " Hangi sınava hazırlanıyorsun? ",
                Course::ALL.iter().map(|c| c.label()).collect(),
            ),
            OnboardingStep::Branch => (
                " Hangi dersi çalışmak istersin? ",
                Branch::ALL.iter().map(|b| b.label()).collect(),
            ),
        };
        let help = match self.step {
            OnboardingStep::Course => " Enter Seç  Esc Çıkış ",
            OnboardingStep::Branch => " Enter Seç  Esc Geri ",
        };

        let [logo_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(panel);

        let logo = Paragraph::new(vec![
            Line::from(Span::styled(
                "SÖZELİO",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Sözel derslerde oyunla öğren",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(logo, logo_area);

        let selected = self.state.selected.min(labels.len().saturating_sub(1));
        self.state.list_state.select(Some(selected));
        let items: Vec<ListItem> = labels
            .into_iter()
            .map(|label| ListItem::new(Line::from(format!("  {label}"))))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(title)
                    .title_bottom(Line::from(help).centered())
                    .padding(Padding::horizontal(1)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
    }
}
