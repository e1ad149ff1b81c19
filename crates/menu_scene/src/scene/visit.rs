//! Depth-first scene graph traversal
//!
//! Visitors return [`VisitControl`] per node. Traversal is pre-order and
//! stops as soon as any visitor asks it to.

use std::sync::Arc;

use super::graph::Node;

/// Whether traversal continues after visiting a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitControl {
    /// Keep walking
    Continue,
    /// Abort the whole traversal
    Stop,
}

/// A node that can enumerate its children
pub trait Traversable {
    /// Snapshot of the node's direct children
    fn children(&self) -> Vec<Arc<Self>>;
}

/// Visit `root` and every descendant, parents before children
///
/// Returns [`VisitControl::Stop`] if a visitor stopped the walk.
pub fn traverse_nodes<N, F>(root: &N, mut visitor: F) -> VisitControl
where
    N: Traversable,
    F: FnMut(&N) -> VisitControl,
{
    walk(root, &mut visitor)
}

fn walk<N, F>(node: &N, visitor: &mut F) -> VisitControl
where
    N: Traversable,
    F: FnMut(&N) -> VisitControl,
{
    if visitor(node) == VisitControl::Stop {
        return VisitControl::Stop;
    }

    for child in node.children() {
        if walk(&*child, visitor) == VisitControl::Stop {
            return VisitControl::Stop;
        }
    }

    VisitControl::Continue
}

/// Visit every geometry node under `root` (including `root` itself)
pub fn traverse_geometries<F>(root: &Node, mut visitor: F) -> VisitControl
where
    F: FnMut(&Node) -> VisitControl,
{
    traverse_nodes(root, |node| {
        if node.is_geometry() {
            visitor(node)
        } else {
            VisitControl::Continue
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MaterialInstanceKey;

    fn sample_tree() -> Arc<Node> {
        let root = Node::group("root");
        let left = Node::group("left");
        left.attach_child(Node::geometry("left_mesh", MaterialInstanceKey(1)));
        left.attach_child(Node::group("left_empty"));
        root.attach_child(left);
        root.attach_child(Node::geometry("right_mesh", MaterialInstanceKey(2)));
        root
    }

    #[test]
    fn test_visits_every_node_pre_order() {
        let root = sample_tree();
        let mut names = Vec::new();

        let result = traverse_nodes(&*root, |node| {
            names.push(node.name().to_string());
            VisitControl::Continue
        });

        assert_eq!(result, VisitControl::Continue);
        assert_eq!(names, ["root", "left", "left_mesh", "left_empty", "right_mesh"]);
    }

    #[test]
    fn test_stop_ends_traversal() {
        let root = sample_tree();
        let mut visited = 0;

        let result = traverse_nodes(&*root, |node| {
            visited += 1;
            if node.name() == "left_mesh" {
                VisitControl::Stop
            } else {
                VisitControl::Continue
            }
        });

        assert_eq!(result, VisitControl::Stop);
        assert_eq!(visited, 3);
    }

    #[test]
    fn test_geometry_traversal_skips_groups() {
        let root = sample_tree();
        let mut names = Vec::new();

        traverse_geometries(&root, |geometry| {
            names.push(geometry.name().to_string());
            VisitControl::Continue
        });

        assert_eq!(names, ["left_mesh", "right_mesh"]);
    }
}
