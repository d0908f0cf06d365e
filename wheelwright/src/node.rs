//! Wheel tree type: one topic with its ordered child impacts.
//!
//! `path` and `branch_text` are never stored on a node; both are derived
//! during traversal by `WheelGenerator`, so the serialized shape is always
//! `{topic, impacts: [...]}` with no internal bookkeeping fields.

use serde::{Deserialize, Serialize};

/// One node of a futures wheel: a topic and its ordered child impacts.
///
/// The root node holds the central topic; every other node is one generated
/// impact. Children keep the order in which the completion returned them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelNode {
    /// Topic label for this node.
    pub topic: String,
    /// Child impacts, in generation order; empty for leaves.
    #[serde(default)]
    pub impacts: Vec<WheelNode>,
}

impl WheelNode {
    /// Creates a node with no impacts.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            impacts: Vec::new(),
        }
    }

    /// Depth of the subtree below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.impacts
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: new() sets the topic and leaves impacts empty.
    #[test]
    fn new_node_has_no_impacts() {
        let node = WheelNode::new("The future of education");
        assert_eq!(node.topic, "The future of education");
        assert!(node.impacts.is_empty());
        assert_eq!(node.depth(), 0);
    }

    /// **Scenario**: depth() returns the longest chain below the node.
    #[test]
    fn depth_counts_longest_chain() {
        let mut root = WheelNode::new("X");
        let mut a = WheelNode::new("A");
        a.impacts.push(WheelNode::new("A1"));
        root.impacts.push(a);
        root.impacts.push(WheelNode::new("B"));
        assert_eq!(root.depth(), 2);
    }

    /// **Scenario**: a node round-trips through serde_json with shape and order intact,
    /// and "impacts" defaults to empty when absent in the input.
    #[test]
    fn node_serde_roundtrip_and_default_impacts() {
        let mut root = WheelNode::new("X");
        root.impacts.push(WheelNode::new("A"));
        root.impacts.push(WheelNode::new("B"));
        let json = serde_json::to_string(&root).expect("serialize");
        let back: WheelNode = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, root);

        let leaf: WheelNode = serde_json::from_str(r#"{"topic":"bare"}"#).expect("deserialize");
        assert_eq!(leaf, WheelNode::new("bare"));
    }
}
