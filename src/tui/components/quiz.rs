//! # Quiz Component
//!
//! Multiple choice questions with an explicit check step. Moving the cursor
//! selects an option; Enter checks the selection, and after a verdict is
//! shown Enter moves to the next question.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::modules::{ModuleInput, QuizInput, QuizRunner, Verdict};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct QuizState {
    pub cursor: usize,
}

fn quiz_action(input: QuizInput) -> Option<Action> {
    Some(Action::Module(ModuleInput::Quiz(input)))
}

impl QuizState {
    pub fn handle_event(&mut self, event: &TuiEvent, quiz: &QuizRunner) -> Option<Action> {
        let option_count = quiz.current().options.len();
        match event {
            TuiEvent::Escape => {
                self.cursor = 0;
                Some(Action::ExitModule)
            }
            _ if quiz.is_checked() => match event {
                TuiEvent::Submit | TuiEvent::CursorRight => {
                    self.cursor = 0;
                    quiz_action(QuizInput::Advance)
                }
                _ => None,
            },
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                quiz_action(QuizInput::Select(self.cursor))
            }
            TuiEvent::CursorDown => {
                self.cursor = (self.cursor + 1).min(option_count.saturating_sub(1));
                quiz_action(QuizInput::Select(self.cursor))
            }
            TuiEvent::InputChar(c) => {
                let index = c.to_digit(10)?.checked_sub(1)? as usize;
                if index >= option_count {
                    return None;
                }
                self.cursor = index;
                quiz_action(QuizInput::Select(index))
            }
            TuiEvent::Submit => match quiz.selected() {
                Some(_) => quiz_action(QuizInput::Check),
                None => quiz_action(QuizInput::Select(self.cursor)),
            },
            _ => None,
        }
    }
}

pub struct QuizView<'a> {
    pub quiz: &'a QuizRunner,
    pub cursor: usize,
}

impl QuizView<'_> {
    fn option_style(&self, index: usize) -> Style {
        let question = self.quiz.current();
        let selected = self.quiz.selected() == Some(index);
        if self.quiz.is_checked() {
            if index == question.correct_index {
                return Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
            }
            if selected {
                return Style::default().fg(Color::Red).add_modifier(Modifier::CROSSED_OUT);
            }
            return Style::default().fg(Color::DarkGray);
        }
        if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if index == self.cursor {
            Style::default().add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default()
        }
    }
}

impl Component for QuizView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [progress_area, question_area, options_area, verdict_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(area);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(self.quiz.progress().clamp(0.0, 1.0))
            .label(format!(
                "Soru {} / {}",
                self.quiz.current_index() + 1,
                self.quiz.len()
            ));
        frame.render_widget(gauge, progress_area);

        let question = self.quiz.current();
        frame.render_widget(
            Paragraph::new(question.text.as_str())
                .style(Style::default().add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true })
                .block(Block::default().padding(Padding::uniform(1))),
            question_area,
        );

        let items: Vec<ListItem> = question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let marker = if self.quiz.selected() == Some(i) { "●" } else { "○" };
                ListItem::new(Line::from(Span::styled(
                    format!(" {marker} {}. {option}", i + 1),
                    self.option_style(i),
                )))
            })
            .collect();
        frame.render_widget(
            List::new(items).block(Block::default().padding(Padding::horizontal(1))),
            options_area,
        );

        let (text, style, help) = match self.quiz.verdict() {
            Some(Verdict::Correct) => (
                "Harika! Doğru cevap.".to_string(),
                Style::default().fg(Color::Green),
                " Enter Devam ",
            ),
            Some(Verdict::Wrong) => (
                format!(
                    "Yanlış cevap. Doğru cevap: {}",
                    question.correct_option().unwrap_or("-")
                ),
                Style::default().fg(Color::Red),
                " Enter Devam ",
            ),
            None => (
                String::new(),
                Style::default(),
                " ↑↓ Seç  Enter Kontrol Et  Esc Çık ",
            ),
        };
        frame.render_widget(
            Paragraph::new(text).style(style).block(
                Block::default()
                    .borders(Borders::TOP)
                    .title_bottom(Line::from(help).centered()),
            ),
            verdict_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::{Question, QuestionKind};
    use crate::core::modules::Runner;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn runner() -> QuizRunner {
        QuizRunner::new(vec![Question {
            id: "q".into(),
            text: "Parayı bulan uygarlık?".into(),
            options: vec!["Urartular".into(), "Lidyalılar".into(), "Hititler".into()],
            correct_index: 1,
            kind: QuestionKind::MultipleChoice,
        }])
    }

    #[test]
    fn test_enter_selects_then_checks() {
        let mut quiz = runner();
        let mut state = QuizState::default();

        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &quiz),
            quiz_action(QuizInput::Select(0))
        );
        quiz.handle(QuizInput::Select(0));
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &quiz),
            quiz_action(QuizInput::Check)
        );
    }

    #[test]
    fn test_digit_keys_select_options() {
        let quiz = runner();
        let mut state = QuizState::default();
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('2'), &quiz),
            quiz_action(QuizInput::Select(1))
        );
        assert_eq!(state.cursor, 1);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('9'), &quiz), None);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('0'), &quiz), None);
    }

    #[test]
    fn test_checked_question_only_advances() {
        let mut quiz = runner();
        quiz.handle(QuizInput::Select(2));
        quiz.handle(QuizInput::Check);
        let mut state = QuizState { cursor: 2 };

        assert_eq!(state.handle_event(&TuiEvent::CursorUp, &quiz), None);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &quiz),
            quiz_action(QuizInput::Advance)
        );
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_render_reveals_correct_answer_after_wrong_check() {
        let mut quiz = runner();
        quiz.handle(QuizInput::Select(0));
        quiz.handle(QuizInput::Check);

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| QuizView { quiz: &quiz, cursor: 0 }.render(f, f.area()))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Parayı bulan uygarlık?"));
        assert!(text.contains("Doğru cevap: Lidyalılar"));
        assert!(text.contains("Soru 1 / 1"));
    }
}
