//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed; removing a node only detaches it, so a `NodeId`
//! stays valid for the lifetime of the tree.

use crate::node::{ElementData, Node};
use crate::{DomError, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Document root
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::element(tag));
        id
    }

    /// Allocate an element as the last child of `parent`.
    ///
    /// A fresh node cannot be an ancestor of anything, so the only failure
    /// left is a missing parent, which leaves the element detached.
    pub fn create_child_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        if let Some(node) = self.get_mut(parent) {
            node.children.push(id);
            if let Some(child) = self.get_mut(id) {
                child.parent = Some(parent);
            }
        }
        id
    }

    pub fn element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        self.get(id)
            .ok_or(DomError::NodeNotFound(id))?
            .as_element()
            .ok_or(DomError::NotAnElement(id))
    }

    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        self.get_mut(id)
            .ok_or(DomError::NodeNotFound(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.get(parent).is_none() {
            return Err(DomError::NodeNotFound(parent));
        }
        if self.get(child).is_none() {
            return Err(DomError::NodeNotFound(child));
        }
        if child == NodeId::ROOT || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let is_child = self.get(child).and_then(|n| n.parent) == Some(parent);
        if !is_child {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    /// Detach a node from its parent (no-op when already detached)
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.get(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    /// Children of a node, in order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// All descendants in pre-order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Nearest inclusive ancestor element with the given tag
    pub fn closest(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id)?;
            if node.as_element().is_some_and(|e| e.tag.eq_ignore_ascii_case(tag)) {
                return Some(node_id);
            }
            current = node.parent;
        }
        None
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.get(node_id).and_then(|n| n.parent);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_descendants() {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        let ul = tree.create_element("ul");
        let li = tree.create_element("li");
        let button = tree.create_element("button");

        tree.append_child(tree.root(), body).unwrap();
        tree.append_child(body, ul).unwrap();
        tree.append_child(ul, li).unwrap();
        tree.append_child(li, button).unwrap();

        assert_eq!(tree.descendants(body), vec![ul, li, button]);
        assert_eq!(tree.closest(button, "li"), Some(li));
        assert_eq!(tree.closest(button, "table"), None);
        assert!(tree.is_connected(button));
    }

    #[test]
    fn test_create_child_element() {
        let mut tree = DomTree::new();
        let html = tree.create_child_element(tree.root(), "html");
        let body = tree.create_child_element(html, "body");
        assert_eq!(tree.descendants(tree.root()), vec![html, body]);
        assert!(tree.is_connected(body));

        let orphan = tree.create_child_element(NodeId(999), "div");
        assert!(tree.is_element(orphan));
        assert!(!tree.is_connected(orphan));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut tree = DomTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        tree.append_child(a, b).unwrap();

        let err = tree.append_child(b, a).unwrap_err();
        assert_eq!(err, DomError::HierarchyRequest { parent: b, child: a });
    }

    #[test]
    fn test_remove_child_detaches() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.append_child(tree.root(), div).unwrap();

        tree.remove_child(tree.root(), div).unwrap();
        assert!(!tree.is_connected(div));
        assert!(tree.is_element(div));

        let err = tree.remove_child(tree.root(), div).unwrap_err();
        assert!(matches!(err, DomError::NotAChild { .. }));
    }

    #[test]
    fn test_root_is_not_element() {
        let tree = DomTree::new();
        assert_eq!(tree.element(tree.root()).unwrap_err(), DomError::NotAnElement(NodeId::ROOT));
        assert_eq!(tree.element(NodeId(42)).unwrap_err(), DomError::NodeNotFound(NodeId(42)));
    }
}
