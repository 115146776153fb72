//! # Session Controller
//!
//! Owns the learner profile, the topic graph and the pairing of
//! `(active node, active module)`.
//!
//! ```text
//! Path ──enter_node──► Lesson menu ──select_module──► Module running
//!  ▲                     ▲    │                          │      │
//!  │                     │    └──leave_node──► Path      │      │
//!  │                     └────────exit_module────────────┘      │
//!  └──────────────────on_module_completed(reward)───────────────┘
//! ```
//!
//! `on_module_completed` is the only place that touches `xp`, `gems` or a
//! node's status.

use log::{debug, info, warn};

use crate::core::content::{NodeStatus, Position, TopicContent, TopicNode};
use crate::core::graph::TopicGraph;
use crate::core::modules::{
    InfographicInput, LessonModule, ModuleInput, ModuleKind, ModuleSignal, Reward,
};
use crate::core::profile::{Branch, Course, UserProfile};

/// Description given to generated topics that came back without a summary.
pub const MISSING_DESCRIPTION: &str = "Açıklama yok";

/// How module rewards translate into profile currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardPolicy {
    pub xp_per_quiz_point: u32,
    pub completion_gems: u32,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            xp_per_quiz_point: 10,
            completion_gems: 10,
        }
    }
}

impl RewardPolicy {
    pub fn xp_for(&self, reward: Reward) -> u32 {
        match reward {
            Reward::Xp(xp) => xp,
            Reward::Score(score) => score.saturating_mul(self.xp_per_quiz_point),
        }
    }
}

/// The node the learner opened, plus the module running inside it (if any).
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveLesson {
    pub node_id: String,
    pub module: Option<LessonModule>,
}

/// What a completion changed, for the congratulation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSummary {
    pub node_id: String,
    pub xp_gained: u32,
    pub gems_gained: u32,
    /// Id of the node that went from locked to active, if any.
    pub unlocked: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SessionController {
    profile: UserProfile,
    graph: TopicGraph,
    policy: RewardPolicy,
    active: Option<ActiveLesson>,
}

impl SessionController {
    pub fn new(profile: UserProfile, policy: RewardPolicy) -> Self {
        let graph = TopicGraph::for_branch(profile.branch);
        Self::with_graph(profile, graph, policy)
    }

    pub fn with_graph(profile: UserProfile, graph: TopicGraph, policy: RewardPolicy) -> Self {
        Self {
            profile,
            graph,
            policy,
            active: None,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn graph(&self) -> &TopicGraph {
        &self.graph
    }

    pub fn policy(&self) -> RewardPolicy {
        self.policy
    }

    pub fn active_node(&self) -> Option<&TopicNode> {
        self.active
            .as_ref()
            .and_then(|lesson| self.graph.get(&lesson.node_id))
    }

    pub fn active_module(&self) -> Option<&LessonModule> {
        self.active.as_ref().and_then(|lesson| lesson.module.as_ref())
    }

    /// Opens the lesson menu of `node_id`. Only active and completed nodes open.
    pub fn enter_node(&mut self, node_id: &str) -> bool {
        match self.graph.get(node_id) {
            Some(node) if node.status.is_open() => {
                debug!("Entering topic {} ({})", node.id, node.title);
                self.active = Some(ActiveLesson {
                    node_id: node_id.to_string(),
                    module: None,
                });
                true
            }
            Some(_) => {
                debug!("Topic {} is locked", node_id);
                false
            }
            None => {
                warn!("enter_node: unknown topic {}", node_id);
                false
            }
        }
    }

    /// Starts a fresh `kind` runner over the active node's content,
    /// replacing any module already running.
    pub fn select_module(&mut self, kind: ModuleKind) -> Option<&LessonModule> {
        let lesson = self.active.as_mut()?;
        let node = self.graph.get(&lesson.node_id)?;
        info!("Starting {:?} module for topic {}", kind, node.id);
        lesson.module = Some(LessonModule::start(kind, &node.content));
        lesson.module.as_ref()
    }

    /// Forwards input to the running module. Download requests carry the
    /// profile's premium flag regardless of what the caller passed.
    pub fn drive(&mut self, input: ModuleInput) -> ModuleSignal {
        let premium = self.profile.is_premium;
        let Some(module) = self.active.as_mut().and_then(|l| l.module.as_mut()) else {
            return ModuleSignal::Idle;
        };
        let input = match input {
            ModuleInput::Infographic(InfographicInput::RequestDownload { .. }) => {
                ModuleInput::Infographic(InfographicInput::RequestDownload { premium })
            }
            other => other,
        };
        module.handle(input)
    }

    /// Applies `reward`, completes the active node and returns to the path.
    /// Without a running module nothing changes.
    pub fn on_module_completed(&mut self, reward: Reward) -> Option<CompletionSummary> {
        if self.active_module().is_none() {
            debug!("Completion ignored: no active module");
            return None;
        }
        let lesson = self.active.take()?;

        let xp_gained = self.policy.xp_for(reward);
        let gems_gained = self.policy.completion_gems;
        self.profile.xp = self.profile.xp.saturating_add(xp_gained);
        self.profile.gems = self.profile.gems.saturating_add(gems_gained);

        let successor_was_locked = self.successor_status(&lesson.node_id) == Some(NodeStatus::Locked);
        self.graph.complete_node(&lesson.node_id);
        let unlocked = if successor_was_locked {
            self.successor_id(&lesson.node_id)
        } else {
            None
        };

        info!(
            "Topic {} completed: +{} XP, +{} gems (total {} XP)",
            lesson.node_id, xp_gained, gems_gained, self.profile.xp
        );
        Some(CompletionSummary {
            node_id: lesson.node_id,
            xp_gained,
            gems_gained,
            unlocked,
        })
    }

    /// Back to the lesson menu of the same node.
    pub fn exit_module(&mut self) {
        if let Some(lesson) = self.active.as_mut() {
            lesson.module = None;
        }
    }

    /// Back to the path.
    pub fn leave_node(&mut self) {
        self.active = None;
    }

    /// Switches subject track. Progress on the previous track is dropped.
    pub fn select_branch(&mut self, branch: Branch) {
        self.active = None;
        self.profile.branch = branch;
        self.graph.select_branch(branch);
    }

    pub fn select_course(&mut self, course: Course) {
        info!("Course selected: {:?}", course);
        self.profile.course = course;
    }

    pub fn upgrade_to_premium(&mut self) {
        if !self.profile.is_premium {
            info!("Profile upgraded to premium");
        }
        self.profile.is_premium = true;
    }

    /// Appends a generated topic as a locked node and returns its id.
    pub fn append_generated_topic(&mut self, title: &str, content: TopicContent) -> String {
        let id = format!("gen-{}", uuid::Uuid::new_v4());
        let description = if content.summary.trim().is_empty() {
            MISSING_DESCRIPTION.to_string()
        } else {
            content.summary.clone()
        };
        self.graph.append_node(TopicNode {
            id: id.clone(),
            title: title.to_string(),
            description,
            status: NodeStatus::Locked,
            position: Position::Center,
            is_new: true,
            content,
        });
        info!("Generated topic appended: {} ({})", title, id);
        id
    }

    fn successor_index(&self, node_id: &str) -> Option<usize> {
        self.graph
            .nodes()
            .iter()
            .position(|n| n.id == node_id)
            .map(|i| i + 1)
            .filter(|&i| i < self.graph.len())
    }

    fn successor_status(&self, node_id: &str) -> Option<NodeStatus> {
        self.successor_index(node_id)
            .map(|i| self.graph.nodes()[i].status)
    }

    fn successor_id(&self, node_id: &str) -> Option<String> {
        self.successor_index(node_id)
            .map(|i| self.graph.nodes()[i].id.clone())
    }
}
