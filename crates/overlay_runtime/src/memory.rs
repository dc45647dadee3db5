//! In-memory document implementing [`OverlayHost`] for tests and non-browser targets.

use std::{cell::RefCell, rc::Rc};

use crate::host::OverlayHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Handle to a node in a [`MemoryOverlayHost`] document.
pub struct NodeId(pub u32);

#[derive(Debug, Clone)]
struct MemoryNode {
    dom_id: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    focusable: bool,
    aria_hidden: bool,
}

#[derive(Debug)]
struct MemoryDocument {
    nodes: Vec<MemoryNode>,
    active: Option<NodeId>,
    scroll_locks: usize,
}

impl MemoryDocument {
    fn node(&self, id: NodeId) -> &MemoryNode {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut MemoryNode {
        &mut self.nodes[id.0 as usize]
    }

    fn push(&mut self, parent: Option<NodeId>, focusable: bool) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(MemoryNode {
            dom_id: None,
            parent,
            children: Vec::new(),
            focusable,
            aria_hidden: false,
        });
        if let Some(parent) = parent {
            self.node_mut(parent).children.push(id);
        }
        id
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|child| *child != id);
        }
    }

    fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == BODY {
                return true;
            }
            match self.node(current).parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn collect_focusable(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.node(id).children {
            let node = self.node(*child);
            if node.aria_hidden {
                continue;
            }
            if node.focusable {
                out.push(*child);
            }
            self.collect_focusable(*child, out);
        }
    }
}

const BODY: NodeId = NodeId(0);

#[derive(Debug, Clone)]
/// Shared in-memory document with a body, focus, aria-hidden flags, and a scroll-lock depth.
pub struct MemoryOverlayHost {
    document: Rc<RefCell<MemoryDocument>>,
}

impl Default for MemoryOverlayHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryOverlayHost {
    /// Empty document containing only the body.
    pub fn new() -> Self {
        let mut document = MemoryDocument {
            nodes: Vec::new(),
            active: None,
            scroll_locks: 0,
        };
        document.push(None, false);
        Self {
            document: Rc::new(RefCell::new(document)),
        }
    }

    /// The body node.
    pub fn body(&self) -> NodeId {
        BODY
    }

    /// Appends a new element under `parent`.
    pub fn create_element(&self, parent: NodeId, focusable: bool) -> NodeId {
        self.document.borrow_mut().push(Some(parent), focusable)
    }

    /// Sets the aria-hidden flag directly.
    pub fn set_aria_hidden(&self, node: NodeId, hidden: bool) {
        self.document.borrow_mut().node_mut(node).aria_hidden = hidden;
    }

    /// Whether a node is hidden from assistive technology.
    pub fn is_aria_hidden(&self, node: NodeId) -> bool {
        self.document.borrow().node(node).aria_hidden
    }

    /// Whether the node is connected to the body.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.document.borrow().is_attached(node)
    }

    /// Node carrying DOM id `id`, if attached.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let document = self.document.borrow();
        document
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index as u32), node))
            .find(|(node_id, node)| {
                node.dom_id.as_deref() == Some(id) && document.is_attached(*node_id)
            })
            .map(|(node_id, _)| node_id)
    }

    /// Currently focused node.
    pub fn active(&self) -> Option<NodeId> {
        self.document.borrow().active
    }

    /// Whether any scroll lock is held.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock_depth() > 0
    }

    /// Number of outstanding scroll locks.
    pub fn scroll_lock_depth(&self) -> usize {
        self.document.borrow().scroll_locks
    }
}

impl OverlayHost for MemoryOverlayHost {
    type Element = NodeId;

    fn lock_scroll(&self) {
        self.document.borrow_mut().scroll_locks += 1;
    }

    fn unlock_scroll(&self) {
        let mut document = self.document.borrow_mut();
        document.scroll_locks = document.scroll_locks.saturating_sub(1);
    }

    fn mount_portal(&self, id: &str) -> Option<NodeId> {
        if self.element_by_id(id).is_some() {
            return None;
        }
        let mut document = self.document.borrow_mut();
        let node = document.push(Some(BODY), false);
        document.node_mut(node).dom_id = Some(id.to_string());
        Some(node)
    }

    fn unmount_portal(&self, node: &NodeId) {
        let mut document = self.document.borrow_mut();
        document.detach(*node);
        if let Some(active) = document.active {
            if !document.is_attached(active) {
                document.active = None;
            }
        }
    }

    fn hide_others(&self, keep: &NodeId) -> Vec<NodeId> {
        let mut document = self.document.borrow_mut();
        let mut hidden = Vec::new();
        let mut current = *keep;
        while let Some(parent) = document.node(current).parent {
            let siblings = document.node(parent).children.clone();
            for sibling in siblings {
                if sibling != current && !document.node(sibling).aria_hidden {
                    document.node_mut(sibling).aria_hidden = true;
                    hidden.push(sibling);
                }
            }
            if parent == BODY {
                break;
            }
            current = parent;
        }
        hidden
    }

    fn unhide(&self, hidden: &[NodeId]) {
        let mut document = self.document.borrow_mut();
        for node in hidden {
            document.node_mut(*node).aria_hidden = false;
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active()
    }

    fn focus(&self, element: &NodeId) -> bool {
        let mut document = self.document.borrow_mut();
        if !document.is_attached(*element) {
            return false;
        }
        document.active = Some(*element);
        true
    }

    fn focusable_descendants(&self, container: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.document.borrow().collect_focusable(*container, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn focusable_descendants_are_in_document_order() {
        let host = MemoryOverlayHost::new();
        let root = host.create_element(host.body(), false);
        let first = host.create_element(root, true);
        let group = host.create_element(root, false);
        let nested = host.create_element(group, true);
        let last = host.create_element(root, true);
        assert_eq!(host.focusable_descendants(&root), vec![first, nested, last]);
    }

    #[test]
    fn hide_others_walks_every_ancestor_level() {
        let host = MemoryOverlayHost::new();
        let header = host.create_element(host.body(), true);
        let main = host.create_element(host.body(), false);
        let aside = host.create_element(main, true);
        let dialog = host.create_element(main, false);

        let hidden = host.hide_others(&dialog);
        assert_eq!(hidden, vec![aside, header]);
        assert!(!host.is_aria_hidden(main));
    }

    #[test]
    fn unmounting_focused_portal_clears_focus() {
        let host = MemoryOverlayHost::new();
        let portal = host.mount_portal("p").expect("mount");
        let button = host.create_element(portal, true);
        assert!(host.focus(&button));
        host.unmount_portal(&portal);
        assert_eq!(host.active(), None);
        assert!(!host.focus(&button));
    }
}
