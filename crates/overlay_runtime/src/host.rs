//! Display-surface contract the overlay runtime drives.

/// Document operations needed to open and close an overlay.
///
/// Implementations are cheap handles (`Clone`) onto one shared document, so guards can keep a
/// copy and release their resource from `Drop`.
pub trait OverlayHost: Clone {
    /// Element handle type.
    type Element: Clone + PartialEq + std::fmt::Debug;

    /// Disables scrolling on the document's root scroll container. Calls nest.
    fn lock_scroll(&self);

    /// Releases one [`OverlayHost::lock_scroll`]; scrolling resumes when none remain.
    fn unlock_scroll(&self);

    /// Creates and attaches the portal node `id`. Returns `None` while `id` is already mounted.
    fn mount_portal(&self, id: &str) -> Option<Self::Element>;

    /// Detaches a node created by [`OverlayHost::mount_portal`].
    fn unmount_portal(&self, node: &Self::Element);

    /// Marks everything outside `keep` as hidden from assistive technology.
    ///
    /// Returns only the elements this call hid, so already-hidden content stays hidden on undo.
    fn hide_others(&self, keep: &Self::Element) -> Vec<Self::Element>;

    /// Reverses a [`OverlayHost::hide_others`] call.
    fn unhide(&self, hidden: &[Self::Element]);

    /// Currently focused element.
    fn active_element(&self) -> Option<Self::Element>;

    /// Moves focus; returns `false` when the element could not take focus.
    fn focus(&self, element: &Self::Element) -> bool;

    /// Tabbable descendants of `container` in document order.
    fn focusable_descendants(&self, container: &Self::Element) -> Vec<Self::Element>;
}
