//! Stacking for nested portal layers.

/// z-index of the first layer, matching the theme's `modal` z-index.
pub const PORTAL_BASE_Z_INDEX: i32 = 1400;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One portal node handed out by [`PortalManager`].
pub struct PortalLayer {
    /// DOM id of the portal node.
    pub id: String,
    /// Nesting depth at acquisition (0 for the outermost layer).
    pub depth: usize,
    /// Stacking order for the layer's node.
    pub z_index: i32,
}

#[derive(Debug, Clone)]
/// Hands out portal layers that stack above each other in acquisition order.
pub struct PortalManager {
    prefix: String,
    next_id: u64,
    layers: Vec<PortalLayer>,
}

impl Default for PortalManager {
    fn default() -> Self {
        Self::new("ui-portal")
    }
}

impl PortalManager {
    /// Manager issuing ids `<prefix>-<n>`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next_id: 1,
            layers: Vec::new(),
        }
    }

    /// Acquires a layer above every live layer.
    pub fn push(&mut self) -> PortalLayer {
        let depth = self.layers.len();
        let layer = PortalLayer {
            id: format!("{}-{}", self.prefix, self.next_id),
            depth,
            z_index: PORTAL_BASE_Z_INDEX + depth as i32,
        };
        self.next_id += 1;
        self.layers.push(layer.clone());
        tracing::trace!(id = %layer.id, depth, "portal layer acquired");
        layer
    }

    /// Frees a layer. Returns `false` for unknown ids.
    pub fn release(&mut self, id: &str) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        before != self.layers.len()
    }

    /// Number of live layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Topmost live layer.
    pub fn top(&self) -> Option<&PortalLayer> {
        self.layers.last()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn nested_layers_stack_upward() {
        let mut manager = PortalManager::default();
        let outer = manager.push();
        let inner = manager.push();
        assert_eq!(outer.z_index, PORTAL_BASE_Z_INDEX);
        assert_eq!(inner.z_index, PORTAL_BASE_Z_INDEX + 1);
        assert_eq!(inner.id, "ui-portal-2");
        assert_eq!(manager.top(), Some(&inner));
    }

    #[test]
    fn released_depth_is_reused_but_ids_are_not() {
        let mut manager = PortalManager::new("layer");
        let first = manager.push();
        assert!(manager.release(&first.id));
        assert!(!manager.release(&first.id));
        let second = manager.push();
        assert_eq!(second.depth, 0);
        assert_eq!(second.id, "layer-2");
        assert_eq!(manager.depth(), 1);
    }
}
