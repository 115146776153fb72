//! # Infographic Component
//!
//! Material download. Free learners sit through a short ad countdown first;
//! premium learners download straight away.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Padding, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::modules::{AD_SECONDS, InfographicInput, InfographicViewer, ModuleInput};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

pub fn handle_event(event: &TuiEvent, is_premium: bool) -> Option<Action> {
    match event {
        TuiEvent::Escape => Some(Action::ExitModule),
        TuiEvent::Submit | TuiEvent::InputChar('d') => Some(Action::Module(
            ModuleInput::Infographic(InfographicInput::RequestDownload {
                premium: is_premium,
            }),
        )),
        _ => None,
    }
}

pub struct InfographicView<'a> {
    pub viewer: &'a InfographicViewer,
    pub is_premium: bool,
}

impl Component for InfographicView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Ders Materyali ")
            .title_bottom(Line::from(" Enter İndir  Esc Çık ").centered())
            .padding(Padding::uniform(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(url) = self.viewer.url() else {
            frame.render_widget(
                Paragraph::new("Bu ders için materyal bulunamadı.")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                inner,
            );
            return;
        };

        let [info_area, url_area, status_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(inner);

        let offer = if self.is_premium {
            Span::styled(
                "Premium: reklamsız indirme",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!("Ücretsiz indirme için {AD_SECONDS} sn reklam izlenir"),
                Style::default().fg(Color::Yellow),
            )
        };
        frame.render_widget(
            Paragraph::new(vec![
                Line::from("Konu özeti infografiği (PNG)"),
                Line::from(offer),
            ]),
            info_area,
        );

        frame.render_widget(
            Paragraph::new(url)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: false }),
            url_area,
        );

        let [status_line, _] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(status_area);
        if self.viewer.ad_in_progress() {
            let remaining = self.viewer.ad_seconds_remaining();
            let watched = f64::from(AD_SECONDS.saturating_sub(remaining)) / f64::from(AD_SECONDS);
            frame.render_widget(
                Gauge::default()
                    .gauge_style(Style::default().fg(Color::Yellow))
                    .ratio(watched.clamp(0.0, 1.0))
                    .label(format!("Reklam: {remaining} sn")),
                status_line,
            );
        } else if self.viewer.is_downloading() {
            frame.render_widget(
                Line::from(Span::styled(
                    "İndiriliyor...",
                    Style::default().fg(Color::Cyan),
                )),
                status_line,
            );
        }
    }
}
