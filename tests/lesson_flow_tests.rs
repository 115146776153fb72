use std::sync::Arc;

use async_trait::async_trait;
use sozelio::core::action::{Action, Effect, update};
use sozelio::core::content::NodeStatus;
use sozelio::core::modules::{
    FlashcardInput, InfographicInput, LessonModule, MediaInput, MediaNotification, ModuleInput,
    ModuleKind, QuizInput,
};
use sozelio::core::profile::{Branch, Course, UserProfile, leaderboard};
use sozelio::core::session::RewardPolicy;
use sozelio::core::state::{App, Screen};
use sozelio::inference::{
    ContentGenerator, GeneratedContent, GenerationRequest, ProviderError, generate_topic_content,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Generator that answers every topic with one card and one question.
struct CannedGenerator;

#[async_trait]
impl ContentGenerator for CannedGenerator {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<GeneratedContent, ProviderError> {
        let json = format!(
            r#"{{"summary":"{} özeti.","flashcards":[{{"front":"Soru","back":"Cevap"}}],
               "questions":[{{"text":"Doğru mu?","options":["Evet","Hayır"],"correctIndex":0}}]}}"#,
            request.topic_title
        );
        serde_json::from_str(&json).map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

fn app_on(branch: Branch, profile: UserProfile) -> App {
    let mut app = App::new(
        Arc::new(CannedGenerator),
        "canned-model".to_string(),
        profile,
        RewardPolicy::default(),
    );
    update(&mut app, Action::SelectCourse(Course::Kpss));
    update(&mut app, Action::SelectBranch(branch));
    app
}

fn status_of(app: &App, id: &str) -> NodeStatus {
    app.session.graph().get(id).map(|n| n.status).unwrap()
}

fn module(input: ModuleInput) -> Action {
    Action::Module(input)
}

// ============================================================================
// Lesson Scenarios
// ============================================================================

#[test]
fn test_perfect_quiz_unlocks_next_topic() {
    let mut app = app_on(Branch::History, UserProfile::default());
    assert_eq!(app.screen, Screen::Path);
    assert_eq!(status_of(&app, "3"), NodeStatus::Locked);

    update(&mut app, Action::EnterNode("2".into()));
    update(&mut app, Action::SelectModule(ModuleKind::Quiz));
    for answer in [1, 0] {
        update(&mut app, module(ModuleInput::Quiz(QuizInput::Select(answer))));
        update(&mut app, module(ModuleInput::Quiz(QuizInput::Check)));
        update(&mut app, module(ModuleInput::Quiz(QuizInput::Advance)));
    }

    let profile = app.session.profile();
    assert_eq!(profile.xp, 20);
    assert_eq!(profile.gems, 110);
    assert_eq!(status_of(&app, "2"), NodeStatus::Completed);
    assert_eq!(status_of(&app, "3"), NodeStatus::Active);
    assert_eq!(app.screen, Screen::Path);
    assert!(app.status_message.contains("20 XP"));
}

#[test]
fn test_flashcards_reward_fixed_xp_on_completed_topic() {
    let mut app = app_on(Branch::History, UserProfile::default());
    update(&mut app, Action::EnterNode("1".into()));
    update(&mut app, Action::SelectModule(ModuleKind::Flashcard));

    update(&mut app, module(ModuleInput::Flashcard(FlashcardInput::Flip)));
    update(&mut app, module(ModuleInput::Flashcard(FlashcardInput::Advance)));
    let effect = update(&mut app, module(ModuleInput::Flashcard(FlashcardInput::Advance)));

    assert_eq!(effect, Effect::ReleaseModule);
    assert_eq!(app.session.profile().xp, 15);
    // Replaying a completed topic never re-locks or skips ahead
    assert_eq!(status_of(&app, "2"), NodeStatus::Active);
}

#[test]
fn test_video_completes_when_playback_ends() {
    let mut app = app_on(Branch::Geography, UserProfile::default());
    update(&mut app, Action::EnterNode("g2".into()));
    let effect = update(&mut app, Action::SelectModule(ModuleKind::Video));
    assert!(matches!(effect, Effect::LoadMedia { kind: ModuleKind::Video, .. }));

    update(&mut app, Action::MediaEvent(MediaNotification::DurationKnown(60.0)));
    update(&mut app, Action::MediaEvent(MediaNotification::PositionChanged(30.0)));
    // Half watched: confirming is refused
    assert_eq!(
        update(&mut app, module(ModuleInput::Media(MediaInput::Confirm))),
        Effect::None
    );

    let effect = update(&mut app, Action::MediaEvent(MediaNotification::Ended));
    assert_eq!(effect, Effect::ReleaseModule);
    assert_eq!(app.session.profile().xp, 20);
    assert_ne!(status_of(&app, "g2"), NodeStatus::Active);
}

#[test]
fn test_free_learner_waits_for_ad_before_download() {
    let mut app = app_on(Branch::History, UserProfile::default());
    update(&mut app, Action::EnterNode("2".into()));
    update(&mut app, Action::SelectModule(ModuleKind::Infographic));

    let effect = update(
        &mut app,
        module(ModuleInput::Infographic(InfographicInput::RequestDownload {
            premium: true,
        })),
    );
    // The profile decides, not the caller
    assert_eq!(effect, Effect::StartAdCountdown);

    let mut last = Effect::None;
    for _ in 0..5 {
        last = update(&mut app, Action::AdTick);
    }
    let Effect::StartDownload { ticket, url } = last else {
        panic!("expected download after countdown, got {last:?}");
    };
    assert!(url.contains("unnamed.png"));

    update(
        &mut app,
        Action::DownloadFinished {
            ticket,
            result: Ok(std::env::temp_dir().join("DersMateryali-x.png")),
        },
    );
    assert!(app.status_message.contains("DersMateryali-x.png"));
    let Some(LessonModule::Infographic(viewer)) = app.session.active_module() else {
        panic!("infographic should stay open after download");
    };
    assert!(viewer.can_download());
}

#[test]
fn test_premium_learner_downloads_immediately() {
    let profile = UserProfile {
        is_premium: true,
        ..Default::default()
    };
    let mut app = app_on(Branch::History, profile);
    update(&mut app, Action::EnterNode("1".into()));
    update(&mut app, Action::SelectModule(ModuleKind::Infographic));

    let effect = update(
        &mut app,
        module(ModuleInput::Infographic(InfographicInput::RequestDownload {
            premium: false,
        })),
    );
    assert!(matches!(effect, Effect::StartDownload { .. }));
}

#[test]
fn test_upgrade_then_leaderboard_reflects_progress() {
    let mut app = app_on(Branch::History, UserProfile::default());
    update(&mut app, Action::UpgradeToPremium);
    assert!(app.session.profile().is_premium);

    let board = leaderboard(app.session.profile());
    let me = board.iter().find(|e| e.is_learner).unwrap();
    assert_eq!(me.rank, board.len());
}

#[test]
fn test_changing_branch_resets_path() {
    let mut app = app_on(Branch::History, UserProfile::default());
    update(&mut app, Action::EnterNode("2".into()));
    update(&mut app, Action::SelectModule(ModuleKind::Quiz));

    let effect = update(&mut app, Action::ChangeBranch);
    assert_eq!(effect, Effect::ReleaseModule);
    assert_eq!(app.screen, Screen::Onboarding);

    update(&mut app, Action::SelectBranch(Branch::Geography));
    assert_eq!(app.session.graph().nodes()[0].id, "g1");
    assert!(app.session.active_node().is_none());
}

// ============================================================================
// Admin Generation
// ============================================================================

#[tokio::test]
async fn test_admin_generation_appends_locked_topic() {
    let mut app = app_on(Branch::History, UserProfile::default());
    let before = app.session.graph().len();

    let Effect::SpawnGeneration(title) = update(&mut app, Action::GenerateTopic(" Lale Devri ".into()))
    else {
        panic!("expected generation effect");
    };
    assert_eq!(title, "Lale Devri");
    assert!(app.is_generating);
    // A second request while one is in flight is ignored
    assert_eq!(
        update(&mut app, Action::GenerateTopic("Tanzimat".into())),
        Effect::None
    );

    let content = generate_topic_content(app.generator.as_ref(), &title, &app.model_name).await;
    update(&mut app, Action::GenerationFinished { title, content });

    let graph = app.session.graph();
    assert_eq!(graph.len(), before + 1);
    let node = &graph.nodes()[before];
    assert_eq!(node.title, "Lale Devri");
    assert_eq!(node.status, NodeStatus::Locked);
    assert!(node.is_new);
    assert_eq!(node.description, "Lale Devri özeti.");
    assert_eq!(node.content.questions[0].correct_option(), Some("Evet"));
    assert!(!app.is_generating);
}
