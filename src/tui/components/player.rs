//! # Player Component
//!
//! Shared view for video and podcast lessons. The completion control stays
//! disabled until enough of the track has been watched.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Padding, Paragraph};

use crate::core::action::Action;
use crate::core::modules::{MediaInput, MediaPlayer, ModuleInput, ModuleKind, Runner};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

pub fn handle_event(event: &TuiEvent, player: &MediaPlayer) -> Option<Action> {
    let input = match event {
        TuiEvent::Escape => return Some(Action::ExitModule),
        TuiEvent::InputChar(' ') => MediaInput::Toggle,
        TuiEvent::CursorLeft => MediaInput::SeekBack,
        TuiEvent::InputChar('r') => MediaInput::CycleRate,
        TuiEvent::Submit if player.watched_enough() => MediaInput::Confirm,
        _ => return None,
    };
    Some(Action::Module(ModuleInput::Media(input)))
}

fn clock(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

pub struct PlayerView<'a> {
    pub player: &'a MediaPlayer,
}

impl Component for PlayerView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = match self.player.kind() {
            ModuleKind::Podcast => " 🎧 Podcast ",
            _ => " ▶ Ders İçeriği ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title)
            .padding(Padding::uniform(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.player.url().is_none() {
            frame.render_widget(
                Paragraph::new("Bu ders için medya bulunamadı.")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                inner,
            );
            return;
        }

        let [state_area, gauge_area, controls_area, _, confirm_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        let state = if self.player.is_buffering() {
            Span::styled("Yükleniyor...", Style::default().fg(Color::Yellow))
        } else if self.player.is_playing() {
            Span::styled("▶ Oynatılıyor", Style::default().fg(Color::Green))
        } else {
            Span::styled("⏸ Duraklatıldı", Style::default().fg(Color::Gray))
        };
        frame.render_widget(
            Line::from(vec![state, Span::raw(format!("   Hız {}", self.player.rate().label()))]),
            state_area,
        );

        let duration = self.player.duration().unwrap_or(0.0);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(self.player.elapsed_fraction())
            .label(format!(
                "{} / {}",
                clock(self.player.position()),
                clock(duration)
            ));
        frame.render_widget(gauge, gauge_area);

        frame.render_widget(
            Line::from(" Space Oynat/Duraklat  ← 5 sn Geri  r Hız  Esc Çık ")
                .style(Style::default().fg(Color::DarkGray)),
            controls_area,
        );

        let confirm = if self.player.watched_enough() {
            Span::styled(
                "[ Enter  Tamamladım ]",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "[ Tamamladım ] izlemeye devam et",
                Style::default().fg(Color::DarkGray),
            )
        };
        frame.render_widget(Line::from(confirm).centered(), confirm_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::modules::MediaNotification;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn loaded_player() -> MediaPlayer {
        let mut player = MediaPlayer::new(
            ModuleKind::Video,
            Some("https://example.com/lesson.mp4".into()),
        );
        player.notify(MediaNotification::DurationKnown(100.0));
        player
    }

    fn draw(player: &MediaPlayer) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 14)).unwrap();
        terminal
            .draw(|f| PlayerView { player }.render(f, f.area()))
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_confirm_key_ignored_until_watched_enough() {
        let mut player = loaded_player();
        player.notify(MediaNotification::PositionChanged(50.0));
        assert_eq!(handle_event(&TuiEvent::Submit, &player), None);

        player.notify(MediaNotification::PositionChanged(95.0));
        assert_eq!(
            handle_event(&TuiEvent::Submit, &player),
            Some(Action::Module(ModuleInput::Media(MediaInput::Confirm)))
        );
    }

    #[test]
    fn test_transport_keys() {
        let player = loaded_player();
        assert_eq!(
            handle_event(&TuiEvent::InputChar(' '), &player),
            Some(Action::Module(ModuleInput::Media(MediaInput::Toggle)))
        );
        assert_eq!(
            handle_event(&TuiEvent::CursorLeft, &player),
            Some(Action::Module(ModuleInput::Media(MediaInput::SeekBack)))
        );
        assert_eq!(
            handle_event(&TuiEvent::InputChar('r'), &player),
            Some(Action::Module(ModuleInput::Media(MediaInput::CycleRate)))
        );
    }

    #[test]
    fn test_render_shows_clock_and_rate() {
        let mut player = loaded_player();
        player.notify(MediaNotification::PositionChanged(65.0));
        player.handle(MediaInput::CycleRate);
        let text = draw(&player);
        assert!(text.contains("01:05 / 01:40"));
        assert!(text.contains("Hız 1.25x"));
        assert!(text.contains("izlemeye devam et"));
    }

    #[test]
    fn test_render_without_url() {
        let player = MediaPlayer::new(ModuleKind::Podcast, None);
        assert!(draw(&player).contains("medya bulunamadı"));
    }
}
