//! Node labels.

use std::borrow::Borrow;
use std::fmt;

/// A circuit node, identified by its label.
///
/// Labels are opaque strings. `"0"` is the reference (ground) node and
/// `"GND"` in any letter case is an alias for it; the alias is resolved when
/// the node is created so every element and lookup sees `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node(String);

impl Node {
    /// Label of the reference node.
    pub const GROUND_LABEL: &'static str = "0";

    /// Create a node from a label, resolving the ground alias.
    pub fn new(label: impl AsRef<str>) -> Self {
        let label = label.as_ref().trim();
        if label.eq_ignore_ascii_case("GND") {
            Self::ground()
        } else {
            Node(label.to_string())
        }
    }

    /// The reference node.
    pub fn ground() -> Self {
        Node(Self::GROUND_LABEL.to_string())
    }

    /// Check if this is the reference node.
    pub fn is_ground(&self) -> bool {
        self.0 == Self::GROUND_LABEL
    }

    /// Get the node's label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Node {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Node {
    fn from(label: &str) -> Self {
        Node::new(label)
    }
}

impl From<String> for Node {
    fn from(label: String) -> Self {
        Node::new(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_node() {
        assert!(Node::ground().is_ground());
        assert_eq!(Node::ground().as_str(), "0");
        assert!(Node::new("0").is_ground());
    }

    #[test]
    fn test_gnd_alias() {
        assert_eq!(Node::new("GND"), Node::ground());
        assert_eq!(Node::new("gnd"), Node::ground());
        assert_eq!(Node::new("Gnd").to_string(), "0");
    }

    #[test]
    fn test_named_node() {
        let node = Node::new("vdd");
        assert!(!node.is_ground());
        assert_eq!(node.as_str(), "vdd");
        assert_eq!(node, Node::from("vdd"));
    }

    #[test]
    fn test_label_order_is_lexicographic() {
        let mut nodes = vec![Node::new("2"), Node::new("10"), Node::new("1")];
        nodes.sort();
        let labels: Vec<_> = nodes.iter().map(Node::as_str).collect();
        assert_eq!(labels, ["1", "10", "2"]);
    }
}
