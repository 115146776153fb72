//! # Topic Graph
//!
//! The ordered lesson path of the current branch and its unlock rules.
//!
//! ```text
//! [1: Completed] → [2: Active] → [3: Locked] → [4: Locked]
//!                   complete_node("2")
//! [1: Completed] → [2: Completed] → [3: Active] → [4: Locked]
//! ```
//!
//! Only the immediate successor of a completed node can be unlocked, and
//! only when it was `Locked`. Node status is mutated exclusively through
//! `SessionController::on_module_completed`.

use log::{debug, info};

use crate::core::content::{self, NodeStatus, Position, TopicNode};
use crate::core::profile::Branch;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicGraph {
    nodes: Vec<TopicNode>,
}

impl TopicGraph {
    /// Builds a graph holding the static topics of `branch`.
    pub fn for_branch(branch: Branch) -> Self {
        Self {
            nodes: content::topics_for(branch),
        }
    }

    pub fn from_nodes(nodes: Vec<TopicNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[TopicNode] {
        &self.nodes
    }

    pub fn get(&self, node_id: &str) -> Option<&TopicNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Replaces the whole sequence with the static topics of `branch`.
    /// Progress made on the previous branch is discarded.
    pub fn select_branch(&mut self, branch: Branch) -> &[TopicNode] {
        self.nodes = content::topics_for(branch);
        info!("Branch selected: {:?} ({} topics)", branch, self.nodes.len());
        &self.nodes
    }

    /// Marks `node_id` completed and unlocks its successor if it was locked.
    /// Unknown ids are ignored.
    pub(crate) fn complete_node(&mut self, node_id: &str) {
        let Some(index) = self.nodes.iter().position(|n| n.id == node_id) else {
            debug!("complete_node: unknown node id {}", node_id);
            return;
        };

        self.nodes[index].status = NodeStatus::Completed;

        if let Some(next) = self.nodes.get_mut(index + 1)
            && next.status == NodeStatus::Locked
        {
            next.status = NodeStatus::Active;
            info!("Unlocked topic {} ({})", next.id, next.title);
        }
    }

    /// Appends a node as `Locked`, alternating left/right by sequence parity.
    pub fn append_node(&mut self, mut node: TopicNode) {
        node.status = NodeStatus::Locked;
        node.position = if self.nodes.len() % 2 == 0 {
            Position::Left
        } else {
            Position::Right
        };
        debug!("Appending topic {} at {:?}", node.id, node.position);
        self.nodes.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::TopicContent;

    fn bare(id: &str, status: NodeStatus) -> TopicNode {
        TopicNode {
            id: id.into(),
            title: format!("Topic {id}"),
            description: String::new(),
            status,
            position: Position::Center,
            is_new: false,
            content: TopicContent::default(),
        }
    }

    fn statuses(graph: &TopicGraph) -> Vec<NodeStatus> {
        graph.nodes().iter().map(|n| n.status).collect()
    }

    #[test]
    fn test_complete_node_unlocks_locked_successor() {
        let mut graph = TopicGraph::from_nodes(vec![
            bare("1", NodeStatus::Completed),
            bare("2", NodeStatus::Active),
            bare("3", NodeStatus::Locked),
        ]);
        graph.complete_node("2");
        assert_eq!(
            statuses(&graph),
            vec![NodeStatus::Completed, NodeStatus::Completed, NodeStatus::Active]
        );
    }

    #[test]
    fn test_complete_node_leaves_open_successor_alone() {
        let mut graph = TopicGraph::from_nodes(vec![
            bare("a", NodeStatus::Active),
            bare("b", NodeStatus::Completed),
            bare("c", NodeStatus::Locked),
        ]);
        graph.complete_node("a");
        assert_eq!(
            statuses(&graph),
            vec![NodeStatus::Completed, NodeStatus::Completed, NodeStatus::Locked]
        );

        let mut graph = TopicGraph::from_nodes(vec![
            bare("a", NodeStatus::Active),
            bare("b", NodeStatus::Active),
        ]);
        graph.complete_node("a");
        assert_eq!(statuses(&graph), vec![NodeStatus::Completed, NodeStatus::Active]);
    }

    #[test]
    fn test_complete_node_changes_at_most_two_nodes() {
        let nodes: Vec<TopicNode> = (0..6)
            .map(|i| bare(&i.to_string(), NodeStatus::Locked))
            .collect();
        for target in 0..6 {
            let mut graph = TopicGraph::from_nodes(nodes.clone());
            let before = statuses(&graph);
            graph.complete_node(&target.to_string());
            let changed = before
                .iter()
                .zip(statuses(&graph))
                .filter(|(a, b)| **a != *b)
                .count();
            assert!(changed <= 2, "target {target} changed {changed} nodes");
        }
    }

    #[test]
    fn test_complete_last_node_has_no_successor() {
        let mut graph = TopicGraph::from_nodes(vec![
            bare("1", NodeStatus::Completed),
            bare("2", NodeStatus::Active),
        ]);
        graph.complete_node("2");
        assert_eq!(statuses(&graph), vec![NodeStatus::Completed, NodeStatus::Completed]);
    }

    #[test]
    fn test_complete_unknown_node_is_noop() {
        let mut graph = TopicGraph::for_branch(Branch::History);
        let before = graph.clone();
        graph.complete_node("missing");
        assert_eq!(graph, before);
    }

    #[test]
    fn test_select_branch_replaces_progress() {
        let mut graph = TopicGraph::for_branch(Branch::History);
        graph.complete_node("2");
        assert_eq!(graph.get("3").unwrap().status, NodeStatus::Active);

        let geo = graph.select_branch(Branch::Geography);
        assert_eq!(geo[0].id, "g1");

        graph.select_branch(Branch::History);
        assert_eq!(graph.get("3").unwrap().status, NodeStatus::Locked);
    }

    #[test]
    fn test_append_node_forces_locked_and_alternates_position() {
        let mut graph = TopicGraph::from_nodes(vec![]);
        graph.append_node(bare("x", NodeStatus::Completed));
        graph.append_node(bare("y", NodeStatus::Active));
        graph.append_node(bare("z", NodeStatus::Legendary));

        let nodes = graph.nodes();
        assert!(nodes.iter().all(|n| n.status == NodeStatus::Locked));
        assert_eq!(nodes[0].position, Position::Left);
        assert_eq!(nodes[1].position, Position::Right);
        assert_eq!(nodes[2].position, Position::Left);
    }
}
