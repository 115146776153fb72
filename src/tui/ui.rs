use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Paragraph, Tabs};

use crate::core::modules::LessonModule;
use crate::core::profile::leaderboard;
use crate::core::state::{App, Screen};
use crate::tui::component::Component;
use crate::tui::components::{
    AdminPanel, FlashcardView, InfographicView, LeaderboardView, LessonMenu, Onboarding,
    PathView, PlayerView, ProfileView, QuizView, TitleBar,
};
use crate::tui::{TABS, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, nav_area] = layout.areas(frame.area());

    TitleBar::from_app(app, tui.spinner_frame).render(frame, title_area);

    match app.screen {
        Screen::Onboarding => {
            Onboarding::new(&mut tui.onboarding, app.onboarding).render(frame, main_area);
        }
        Screen::Path => draw_path(frame, main_area, app, tui),
        Screen::Lesson => draw_lesson(frame, main_area, app, tui),
        Screen::Leaderboard => LeaderboardView {
            entries: leaderboard(app.session.profile()),
        }
        .render(frame, main_area),
        Screen::Profile => ProfileView {
            profile: app.session.profile(),
        }
        .render(frame, main_area),
        Screen::Admin => AdminPanel {
            state: &tui.admin,
            graph: app.session.graph(),
            model_name: &app.model_name,
            is_generating: app.is_generating,
        }
        .render(frame, main_area),
    }

    if app.screen != Screen::Onboarding {
        draw_nav(frame, nav_area, app.screen);
    }
}

fn draw_path(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let profile = app.session.profile();
    PathView::new(&mut tui.path, app.session.graph(), profile.branch).render(frame, area);
}

fn draw_lesson(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let Some(node) = app.session.active_node() else {
        draw_path(frame, area, app, tui);
        return;
    };
    match app.session.active_module() {
        None => LessonMenu::new(&mut tui.lesson_menu, node).render(frame, area),
        Some(LessonModule::Flashcard(deck)) => FlashcardView { deck }.render(frame, area),
        Some(LessonModule::Quiz(quiz)) => QuizView {
            quiz,
            cursor: tui.quiz.cursor,
        }
        .render(frame, area),
        Some(LessonModule::Media(player)) => PlayerView { player }.render(frame, area),
        Some(LessonModule::Infographic(viewer)) => InfographicView {
            viewer,
            is_premium: app.session.profile().is_premium,
        }
        .render(frame, area),
    }
}

fn tab_label(screen: Screen) -> &'static str {
    match screen {
        Screen::Leaderboard => "Sıralama",
        Screen::Profile => "Profil",
        Screen::Admin => "Admin",
        _ => "Yol",
    }
}

fn draw_nav(frame: &mut Frame, area: Rect, screen: Screen) {
    // The lesson screen belongs to the path tab
    let selected = TABS.iter().position(|s| *s == screen).unwrap_or(0);
    let tabs = Tabs::new(TABS.iter().map(|s| tab_label(*s)))
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    let [tabs_area, help_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(22)]).areas(area);
    frame.render_widget(tabs, tabs_area);
    frame.render_widget(
        Paragraph::new("Tab Sekme  Ctrl+C Çık").style(Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::modules::ModuleKind;
    use crate::core::profile::{Branch, Course};
    use crate::test_support::{buffer_text, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        buffer_text(&terminal)
    }

    fn onboarded() -> App {
        let mut app = test_app();
        update(&mut app, Action::SelectCourse(Course::Kpss));
        update(&mut app, Action::SelectBranch(Branch::History));
        app
    }

    #[test]
    fn test_draw_ui_onboarding_hides_tabs() {
        let app = test_app();
        let text = draw(&app, &mut TuiState::default());
        assert!(text.contains("KPSS"));
        assert!(!text.contains("Sıralama"));
    }

    #[test]
    fn test_draw_ui_path_with_tabs() {
        let app = onboarded();
        let text = draw(&app, &mut TuiState::default());
        assert!(text.contains("Tarihe Giriş"));
        assert!(text.contains("Sıralama"));
        assert!(text.contains("Sözelio KPSS"));
    }

    #[test]
    fn test_draw_ui_lesson_module() {
        let mut app = onboarded();
        update(&mut app, Action::EnterNode("2".into()));
        let text = draw(&app, &mut TuiState::default());
        assert!(text.contains("Modüller"));

        update(&mut app, Action::SelectModule(ModuleKind::Quiz));
        let text = draw(&app, &mut TuiState::default());
        assert!(text.contains("Parayı bulan uygarlık hangisidir?"));
    }

    #[test]
    fn test_draw_ui_every_tab() {
        let mut app = onboarded();
        let mut tui = TuiState::default();
        for (screen, needle) in [
            (Screen::Leaderboard, "Altın Lig"),
            (Screen::Profile, "Elmas"),
            (Screen::Admin, "Oluşturulan konular"),
        ] {
            update(&mut app, Action::Navigate(screen));
            assert!(draw(&app, &mut tui).contains(needle), "{screen:?}");
        }
    }
}
