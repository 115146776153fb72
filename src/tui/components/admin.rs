//! # Admin Component
//!
//! Content generation panel. The admin types a topic title; on Enter the
//! generator produces summary, flashcards and questions and the topic is
//! appended to the path as a new locked node.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Padding, Paragraph};

use crate::core::action::Action;
use crate::core::graph::TopicGraph;
use crate::core::state::Screen;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct AdminState {
    pub input: String,
}

impl EventHandler for AdminState {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::InputChar(c) => {
                self.input.push(*c);
                None
            }
            TuiEvent::Paste(text) => {
                self.input
                    .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
                None
            }
            TuiEvent::Backspace => {
                self.input.pop();
                None
            }
            TuiEvent::Submit => {
                if self.input.trim().is_empty() {
                    return None;
                }
                Some(Action::GenerateTopic(std::mem::take(&mut self.input)))
            }
            TuiEvent::Escape => Some(Action::Navigate(Screen::Path)),
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct AdminPanel<'a> {
    pub state: &'a AdminState,
    pub graph: &'a TopicGraph,
    pub model_name: &'a str,
    pub is_generating: bool,
}

impl Component for AdminPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [input_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        let input_title = if self.is_generating {
            " Oluşturuluyor... ".to_string()
        } else {
            format!(" Yeni konu başlığı (model: {}) ", self.model_name)
        };
        let input = Paragraph::new(format!("{}▏", self.state.input)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(input_title)
                .title_bottom(Line::from(" Enter Oluştur  Esc Yola Dön ").centered()),
        );
        frame.render_widget(input, input_area);

        let generated: Vec<ListItem> = self
            .graph
            .nodes()
            .iter()
            .filter(|n| n.is_new)
            .map(|n| {
                ListItem::new(Line::from(vec![
                    Span::styled("YENİ ", Style::default().fg(Color::Green)),
                    Span::styled(n.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!(
                            "  {} kart, {} soru",
                            n.content.flashcards.len(),
                            n.content.questions.len()
                        ),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(generated).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Oluşturulan konular ")
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(list, list_area);
    }
}
