//! # Flashcard Component
//!
//! One card at a time. Space or Enter flips, the arrow keys move on
//! ("biliyorum" / "bilmiyorum" both advance the deck).

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Padding, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::modules::{Face, FlashcardDeck, FlashcardInput, ModuleInput};
use crate::tui::centered_rect;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

pub fn handle_event(event: &TuiEvent) -> Option<Action> {
    let input = match event {
        TuiEvent::InputChar(' ') | TuiEvent::Submit => FlashcardInput::Flip,
        TuiEvent::CursorLeft | TuiEvent::CursorRight => FlashcardInput::Advance,
        TuiEvent::Escape => return Some(Action::ExitModule),
        _ => return None,
    };
    Some(Action::Module(ModuleInput::Flashcard(input)))
}

pub struct FlashcardView<'a> {
    pub deck: &'a FlashcardDeck,
}

impl Component for FlashcardView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [progress_area, card_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let done = self.deck.index() as f64 / self.deck.len().max(1) as f64;
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(done.clamp(0.0, 1.0))
            .label(format!("Kart {} / {}", self.deck.index() + 1, self.deck.len()));
        frame.render_widget(gauge, progress_area);

        let card = self.deck.current();
        let (title, text, color) = match self.deck.face() {
            Face::Front => (" Soru ", card.front.as_str(), Color::White),
            Face::Back => (" Cevap ", card.back.as_str(), Color::Green),
        };
        let body = Paragraph::new(text)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(title)
                    .padding(Padding::uniform(1)),
            );
        frame.render_widget(body, centered_rect(70, 60, card_area));

        let help = match self.deck.face() {
            Face::Front => " Space Çevir  Esc Çık ",
            Face::Back => " ← Bilmiyorum  → Biliyorum  Space Çevir  Esc Çık ",
        };
        frame.render_widget(
            Line::from(help)
                .style(Style::default().fg(Color::DarkGray))
                .centered(),
            help_area,
        );
    }
}
