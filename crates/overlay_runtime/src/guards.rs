//! Scoped acquisitions of overlay resources. Each guard releases its resource when dropped.

use crate::host::OverlayHost;

#[must_use = "dropping the guard releases the scroll lock immediately"]
/// Held scroll lock on the hosting document.
pub struct ScrollLockGuard<H: OverlayHost> {
    host: H,
}

impl<H: OverlayHost> ScrollLockGuard<H> {
    /// Locks scrolling until the guard is dropped.
    pub fn acquire(host: &H) -> Self {
        host.lock_scroll();
        tracing::trace!("scroll lock acquired");
        Self { host: host.clone() }
    }
}

impl<H: OverlayHost> Drop for ScrollLockGuard<H> {
    fn drop(&mut self) {
        self.host.unlock_scroll();
        tracing::trace!("scroll lock released");
    }
}

#[must_use = "dropping the guard restores sibling visibility immediately"]
/// Content hidden from assistive technology while an overlay is open.
pub struct InertGuard<H: OverlayHost> {
    host: H,
    hidden: Vec<H::Element>,
}

impl<H: OverlayHost> InertGuard<H> {
    /// Hides everything outside `keep` until the guard is dropped.
    pub fn acquire(host: &H, keep: &H::Element) -> Self {
        let hidden = host.hide_others(keep);
        tracing::trace!(count = hidden.len(), "sibling content marked inert");
        Self {
            host: host.clone(),
            hidden,
        }
    }

    /// Elements this guard hid.
    pub fn hidden(&self) -> &[H::Element] {
        &self.hidden
    }
}

impl<H: OverlayHost> Drop for InertGuard<H> {
    fn drop(&mut self) {
        self.host.unhide(&self.hidden);
    }
}

#[must_use = "dropping the lease unmounts the portal node immediately"]
/// Exclusive ownership of one mounted portal node.
pub struct PortalLease<H: OverlayHost> {
    host: H,
    node: H::Element,
}

impl<H: OverlayHost> PortalLease<H> {
    /// Mounts portal node `id`; `None` when another owner holds it.
    pub fn acquire(host: &H, id: &str) -> Option<Self> {
        let node = host.mount_portal(id)?;
        Some(Self {
            host: host.clone(),
            node,
        })
    }

    /// The mounted node.
    pub fn node(&self) -> &H::Element {
        &self.node
    }
}

impl<H: OverlayHost> Drop for PortalLease<H> {
    fn drop(&mut self) {
        self.host.unmount_portal(&self.node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryOverlayHost;

    #[test]
    fn nested_scroll_locks_release_in_pairs() {
        let host = MemoryOverlayHost::new();
        let outer = ScrollLockGuard::acquire(&host);
        let inner = ScrollLockGuard::acquire(&host);
        assert_eq!(host.scroll_lock_depth(), 2);
        drop(inner);
        assert!(host.is_scroll_locked());
        drop(outer);
        assert!(!host.is_scroll_locked());
    }

    #[test]
    fn portal_lease_is_exclusive_until_dropped() {
        let host = MemoryOverlayHost::new();
        let lease = PortalLease::acquire(&host, "ui-portal").expect("first lease");
        assert!(PortalLease::acquire(&host, "ui-portal").is_none());
        assert!(host.is_attached(*lease.node()));
        drop(lease);
        assert!(PortalLease::acquire(&host, "ui-portal").is_some());
    }

    #[test]
    fn inert_guard_leaves_previously_hidden_content_hidden() {
        let host = MemoryOverlayHost::new();
        let already_hidden = host.create_element(host.body(), false);
        host.set_aria_hidden(already_hidden, true);
        let page = host.create_element(host.body(), true);
        let portal = host.create_element(host.body(), false);

        let guard = InertGuard::acquire(&host, &portal);
        assert_eq!(guard.hidden(), &[page]);
        assert!(host.is_aria_hidden(page));
        drop(guard);
        assert!(!host.is_aria_hidden(page));
        assert!(host.is_aria_hidden(already_hidden));
    }
}
