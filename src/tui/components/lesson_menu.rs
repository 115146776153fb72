//! # Lesson Menu Component
//!
//! Shown after entering an open topic: the topic summary and one row per
//! `ModuleKind`, in `ModuleKind::ALL` order.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::content::TopicNode;
use crate::core::modules::ModuleKind;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct LessonMenuState {
    pub selected: usize,
    pub list_state: ListState,
}

impl EventHandler for LessonMenuState {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(ModuleKind::ALL.len() - 1);
                None
            }
            TuiEvent::Submit => ModuleKind::ALL
                .get(self.selected)
                .map(|kind| Action::SelectModule(*kind)),
            TuiEvent::Escape => {
                self.selected = 0;
                Some(Action::LeaveNode)
            }
            _ => None,
        }
    }
}

fn module_hint(kind: ModuleKind) -> &'static str {
    match kind {
        ModuleKind::Video => "Konu anlatım videosu",
        ModuleKind::Podcast => "Sesli tekrar",
        ModuleKind::Flashcard => "Kartlarla hızlı tekrar",
        ModuleKind::Quiz => "Bilgini test et",
        ModuleKind::Infographic => "İnfografiği indir",
    }
}

/// Transient render wrapper.
pub struct LessonMenu<'a> {
    state: &'a mut LessonMenuState,
    node: &'a TopicNode,
}

impl<'a> LessonMenu<'a> {
    pub fn new(state: &'a mut LessonMenuState, node: &'a TopicNode) -> Self {
        Self { state, node }
    }
}

impl Component for LessonMenu<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [summary_area, menu_area] =
            Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(area);

        let summary = Paragraph::new(self.node.content.summary.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(format!(" {} ", self.node.title))
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(summary, summary_area);

        self.state.selected = self.state.selected.min(ModuleKind::ALL.len() - 1);
        self.state.list_state.select(Some(self.state.selected));

        let items: Vec<ListItem> = ModuleKind::ALL
            .iter()
            .map(|kind| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<18}", kind.label()),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(module_hint(*kind), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Modüller ")
                    .title_bottom(Line::from(" Enter Başla  Esc Yola Dön ").centered())
                    .padding(Padding::horizontal(1)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, menu_area, &mut self.state.list_state);
    }
}
