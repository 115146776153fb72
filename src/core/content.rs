//! # Content Store
//!
//! Lesson data: topic nodes, their owned content, and the static topic
//! sequences for each branch.
//!
//! ```text
//! TopicNode
//! ├── id, title, description
//! ├── status: NodeStatus        // the only field mutated after creation
//! ├── position: Position        // zig-zag layout hint, no logic depends on it
//! ├── is_new: bool
//! └── content: TopicContent
//!     ├── video_url / podcast_url / infographic_url (optional)
//!     ├── summary
//!     ├── flashcards: Vec<Flashcard>
//!     └── questions: Vec<Question>
//! ```

use serde::{Deserialize, Serialize};

use crate::core::profile::Branch;

const COMMON_VIDEO_URL: &str = "https://firebasestorage.googleapis.com/v0/b/sozelio.firebasestorage.app/o/Tu%CC%88rkiye_nin_I%CC%87klimi__H%C4%B1zl%C4%B1_KPSS_Tekrar%C4%B1.mp4?alt=media&token=6807829f-b1ed-4672-a93b-c45cca492d87";
const COMMON_PODCAST_URL: &str = "https://firebasestorage.googleapis.com/v0/b/sozelio.firebasestorage.app/o/Tu%CC%88rkiye_I%CC%87kliminin_S%CC%A7ifresi_Mutlak_ve_Go%CC%88receli_Konum.m4a?alt=media&token=d039ab42-74e2-4cda-b457-cfe2490a13b9";
const COMMON_INFOGRAPHIC_URL: &str = "https://firebasestorage.googleapis.com/v0/b/sozelio.firebasestorage.app/o/unnamed.png?alt=media&token=e20189bf-7a46-4a2b-933a-5faf31c8965c";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeStatus {
    Locked,
    Active,
    Completed,
    Legendary,
}

impl NodeStatus {
    /// Whether the learner may open a node in this state.
    pub fn is_open(self) -> bool {
        matches!(self, NodeStatus::Active | NodeStatus::Completed)
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeStatus::Locked => "LOCKED",
            NodeStatus::Active => "ACTIVE",
            NodeStatus::Completed => "COMPLETED",
            NodeStatus::Legendary => "LEGENDARY",
        }
    }
}

/// Zig-zag layout hint for the path view.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Center,
    Right,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub id: String,
    pub front: String,
    pub back: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    #[default]
    MultipleChoice,
    FillBlank,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
}

impl Question {
    /// `correct_index` must point inside `options`.
    pub fn is_well_formed(&self) -> bool {
        self.correct_index < self.options.len()
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicContent {
    pub video_url: Option<String>,
    pub podcast_url: Option<String>,
    pub infographic_url: Option<String>,
    pub summary: String,
    pub flashcards: Vec<Flashcard>,
    pub questions: Vec<Question>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TopicNode {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: NodeStatus,
    pub position: Position,
    #[serde(default)]
    pub is_new: bool,
    pub content: TopicContent,
}

/// Stand-in deck used when a topic has no flashcards.
pub fn placeholder_flashcard() -> Flashcard {
    Flashcard {
        id: "0".into(),
        front: "Örnek Soru".into(),
        back: "Örnek Cevap".into(),
    }
}

/// Stand-in question used when a topic has no questions.
pub fn placeholder_question() -> Question {
    Question {
        id: "0".into(),
        text: "Örnek Soru?".into(),
        options: vec!["A".into(), "B".into()],
        correct_index: 0,
        kind: QuestionKind::MultipleChoice,
    }
}

/// Returns the static topic sequence for a branch.
pub fn topics_for(branch: Branch) -> Vec<TopicNode> {
    match branch {
        Branch::History => history_topics(),
        Branch::Geography => geography_topics(),
    }
}

fn card(id: &str, front: &str, back: &str) -> Flashcard {
    Flashcard {
        id: id.into(),
        front: front.into(),
        back: back.into(),
    }
}

fn question(id: &str, text: &str, options: &[&str], correct_index: usize) -> Question {
    Question {
        id: id.into(),
        text: text.into(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_index,
        kind: QuestionKind::MultipleChoice,
    }
}

fn with_media(summary: &str, flashcards: Vec<Flashcard>, questions: Vec<Question>) -> TopicContent {
    TopicContent {
        video_url: Some(COMMON_VIDEO_URL.into()),
        podcast_url: Some(COMMON_PODCAST_URL.into()),
        infographic_url: Some(COMMON_INFOGRAPHIC_URL.into()),
        summary: summary.into(),
        flashcards,
        questions,
    }
}

fn node(
    id: &str,
    title: &str,
    description: &str,
    status: NodeStatus,
    position: Position,
    content: TopicContent,
) -> TopicNode {
    TopicNode {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        status,
        position,
        is_new: false,
        content,
    }
}

fn history_topics() -> Vec<TopicNode> {
    vec![
        node(
            "1",
            "Tarih Bilimine Giriş",
            "Tarihin tanımı, yöntemi ve kaynakları.",
            NodeStatus::Completed,
            Position::Center,
            with_media(
                "Tarih, geçmişteki olayları yer ve zaman göstererek, sebep-sonuç ilişkisi içinde inceleyen bilim dalıdır.",
                vec![
                    card("f1", "Tarihin babası kimdir?", "Herodot"),
                    card("f2", "Olay vs Olgu farkı?", "Olay anlık, olgu süreçtir."),
                ],
                vec![question(
                    "q1",
                    "Aşağıdakilerden hangisi tarihin yöntemlerinden biri değildir?",
                    &["Tarama", "Tasnif", "Deney", "Tahlil"],
                    2,
                )],
            ),
        ),
        node(
            "2",
            "İlk Çağ Uygarlıkları",
            "Mezopotamya, Mısır ve Anadolu uygarlıkları.",
            NodeStatus::Active,
            Position::Left,
            with_media(
                "Sümerler yazıyı buldu. Mısırlılar hiyeroglifi geliştirdi.",
                vec![
                    card("f3", "Yazıyı kim buldu?", "Sümerler"),
                    card("f4", "Parayı kim buldu?", "Lidyalılar"),
                ],
                vec![
                    question(
                        "q2",
                        "Parayı bulan uygarlık hangisidir?",
                        &["Urartular", "Lidyalılar", "Hititler", "İyonlar"],
                        1,
                    ),
                    question(
                        "q3",
                        "Tarihte bilinen ilk yazılı antlaşma hangisidir?",
                        &["Kadeş", "Vestfalya", "Ankara", "Lozan"],
                        0,
                    ),
                ],
            ),
        ),
        node(
            "3",
            "İslamiyet Öncesi Türk Tarihi",
            "Orta Asya Türk devletleri ve kültür.",
            NodeStatus::Locked,
            Position::Right,
            with_media(
                "Türk adının anlamı güç, kuvvet, olgunluk çağı demektir.",
                vec![],
                vec![],
            ),
        ),
        node(
            "4",
            "İlk Türk İslam Devletleri",
            "Karahanlılar, Gazneliler, Selçuklular.",
            NodeStatus::Locked,
            Position::Center,
            with_media("", vec![], vec![]),
        ),
        node(
            "5",
            "Türkiye Tarihi",
            "Anadolu Selçuklu Devleti ve Beylikler.",
            NodeStatus::Locked,
            Position::Left,
            with_media("", vec![], vec![]),
        ),
    ]
}

fn geography_topics() -> Vec<TopicNode> {
    let mut topics = vec![
        node(
            "g1",
            "Doğa ve İnsan",
            "Coğrafyanın bölümleri ve insan doğa etkileşimi.",
            NodeStatus::Completed,
            Position::Center,
            with_media(
                "Coğrafya; fiziki ve beşeri coğrafya olarak ikiye ayrılır. İnsan ve doğa sürekli etkileşim halindedir.",
                vec![
                    card("gf1", "Fiziki Coğrafya nedir?", "Doğal ortamı inceleyen bilim dalıdır."),
                    card("gf2", "Litosfer nedir?", "Taş küre."),
                ],
                vec![question(
                    "gq1",
                    "Aşağıdakilerden hangisi fiziki coğrafyanın alt dalıdır?",
                    &["Klimatoloji", "Nüfus Coğrafyası", "Siyasi Coğrafya", "Turizm Coğrafyası"],
                    0,
                )],
            ),
        ),
        node(
            "g2",
            "Coğrafi Konum",
            "Matematik ve Özel Konum, Paralel ve Meridyenler.",
            NodeStatus::Active,
            Position::Right,
            with_media(
                "Türkiye 36-42 Kuzey paralelleri ve 26-45 Doğu meridyenleri arasındadır.",
                vec![
                    card("gf3", "Türkiye hangi saat dilimini kullanır?", "3. Saat Dilimi (+3 GMT)"),
                    card("gf4", "Ekvatorun çevresi kaç kmdir?", "40.076 km"),
                ],
                vec![question(
                    "gq2",
                    "Türkiye'nin en doğusu ile en batısı arasında kaç dakikalık zaman farkı vardır?",
                    &["60", "76", "55", "40"],
                    1,
                )],
            ),
        ),
        node(
            "g_yt_1",
            "Konu Anlatımı (Video)",
            "Coğrafi konum detaylı anlatım videosu.",
            NodeStatus::Active,
            Position::Left,
            with_media("Video anlatımı ile konuları pekiştirin.", vec![], vec![]),
        ),
        node(
            "g_drive_1",
            "Ders Video Serisi 2",
            "Devam niteliğinde ders videosu.",
            NodeStatus::Active,
            Position::Center,
            with_media("Videoyu izleyerek tekrar yapın.", vec![], vec![]),
        ),
        node(
            "g3",
            "Harita Bilgisi",
            "Projeksiyonlar, Ölçekler ve Harita Çeşitleri.",
            NodeStatus::Locked,
            Position::Right,
            with_media("", vec![], vec![]),
        ),
        node(
            "g4",
            "Dünya'nın Şekli ve Hareketleri",
            "Eksen eğikliği, Yıllık ve Günlük hareketler.",
            NodeStatus::Locked,
            Position::Center,
            with_media("", vec![], vec![]),
        ),
        node(
            "g5",
            "İklim Bilgisi",
            "Atmosfer, Sıcaklık, Basınç ve Rüzgarlar.",
            NodeStatus::Locked,
            Position::Left,
            with_media("", vec![], vec![]),
        ),
    ];
    for topic in topics.iter_mut().filter(|t| t.id.starts_with("g_")) {
        topic.is_new = true;
    }
    topics
}
