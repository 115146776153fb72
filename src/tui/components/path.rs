//! # Path Component
//!
//! The zig-zag topic path of the current branch. Each node is drawn at the
//! horizontal offset its `Position` hints, with a status glyph in front.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::content::{NodeStatus, Position, TopicNode};
use crate::core::graph::TopicGraph;
use crate::core::profile::Branch;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct PathState {
    pub selected: usize,
    pub list_state: ListState,
}

impl PathState {
    pub fn handle_event(&mut self, event: &TuiEvent, graph: &TopicGraph) -> Option<Action> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if !graph.is_empty() {
                    self.selected = (self.selected + 1).min(graph.len() - 1);
                }
                None
            }
            TuiEvent::Submit => graph
                .nodes()
                .get(self.selected)
                .map(|node| Action::EnterNode(node.id.clone())),
            _ => None,
        }
    }
}

fn status_glyph(status: NodeStatus) -> (&'static str, Style) {
    match status {
        NodeStatus::Locked => ("🔒", Style::default().fg(Color::DarkGray)),
        NodeStatus::Active => (
            "★",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        NodeStatus::Completed => ("✓", Style::default().fg(Color::Yellow)),
        NodeStatus::Legendary => ("♛", Style::default().fg(Color::Magenta)),
    }
}

fn indent(position: Position, width: u16) -> usize {
    let third = (width / 3) as usize;
    match position {
        Position::Left => 2,
        Position::Center => third,
        Position::Right => third * 2,
    }
}

fn node_line(node: &TopicNode, width: u16) -> Line<'static> {
    let (glyph, style) = status_glyph(node.status);
    let mut spans = vec![
        Span::raw(" ".repeat(indent(node.position, width))),
        Span::styled(format!("{glyph} "), style),
        Span::styled(node.title.clone(), style),
    ];
    if node.is_new {
        spans.push(Span::styled(
            " YENİ",
            Style::default().fg(Color::Black).bg(Color::Green),
        ));
    }
    Line::from(spans)
}

/// Transient render wrapper.
pub struct PathView<'a> {
    state: &'a mut PathState,
    graph: &'a TopicGraph,
    branch: Branch,
}

impl<'a> PathView<'a> {
    pub fn new(state: &'a mut PathState, graph: &'a TopicGraph, branch: Branch) -> Self {
        Self {
            state,
            graph,
            branch,
        }
    }
}

impl Component for PathView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, list_area, detail_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .areas(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled("ÜNİTE 1  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.branch.unit_title(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, header_area);

        if self.graph.is_empty() {
            frame.render_widget(Paragraph::new("Bu dalda henüz konu yok."), list_area);
            return;
        }

        self.state.selected = self.state.selected.min(self.graph.len() - 1);
        self.state.list_state.select(Some(self.state.selected));

        let items: Vec<ListItem> = self
            .graph
            .nodes()
            .iter()
            .map(|node| ListItem::new(node_line(node, list_area.width)))
            .collect();
        let list = List::new(items).highlight_style(Style::default().bg(Color::DarkGray));
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);

        if let Some(node) = self.graph.nodes().get(self.state.selected) {
            let detail = Paragraph::new(vec![
                Line::from(Span::styled(
                    node.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(node.description.clone()),
                Line::from(Span::styled(
                    node.status.label(),
                    status_glyph(node.status).1,
                )),
            ])
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP));
            frame.render_widget(detail, detail_area);
        }
    }
}
