use glam::Vec2;
use crate::api::types::NodeId;
use crate::components::node::Node;

/// Flat node storage in draw order.
/// Designed for small-to-medium node counts (hundreds, not millions).
pub struct NodeStore {
    nodes: Vec<Node>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(256),
        }
    }

    /// Add a node on top of the draw order.
    pub fn spawn(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Remove a node by ID, keeping the order of the others.
    /// Its children become roots.
    pub fn despawn(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        let removed = self.nodes.remove(idx);
        for node in self.nodes.iter_mut().filter(|n| n.parent == Some(id)) {
            node.parent = None;
        }
        Some(removed)
    }

    /// Remove a node and every node below it.
    pub fn despawn_tree(&mut self, id: NodeId) -> usize {
        let mut doomed = vec![id];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let current = doomed[cursor];
            doomed.extend(self.nodes.iter().filter(|n| n.parent == Some(current)).map(|n| n.id));
            cursor += 1;
        }
        let before = self.nodes.len();
        self.nodes.retain(|n| !doomed.contains(&n.id));
        before - self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Iterate over all nodes in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Direct children of `parent`, in draw order.
    pub fn children_of(&self, parent: NodeId) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.parent == Some(parent))
    }

    /// Find the first node with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    /// Move a node to the end of the draw order (drawn last, on top).
    pub fn bring_to_front(&mut self, id: NodeId) -> bool {
        match self.nodes.iter().position(|n| n.id == id) {
            Some(idx) => {
                let node = self.nodes.remove(idx);
                self.nodes.push(node);
                true
            }
            None => false,
        }
    }

    /// Screen-space position and scale of a node, composed through its parents.
    pub fn world_transform(&self, id: NodeId) -> Option<(Vec2, Vec2)> {
        let node = self.get(id)?;
        let mut pos = node.pos;
        let mut scale = node.scale;
        let mut parent = node.parent;
        // Bounded walk; a parent cycle stops after len() hops.
        let mut depth = 0;
        while let Some(pid) = parent {
            let Some(p) = self.get(pid) else { break };
            pos = p.pos + pos * p.scale;
            scale *= p.scale;
            parent = p.parent;
            depth += 1;
            if depth > self.nodes.len() {
                log::warn!("parent cycle detected at node {:?}", id);
                break;
            }
        }
        Some((pos, scale))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}
