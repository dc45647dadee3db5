//! Executes modal effects against an [`OverlayHost`].

use crate::focus::{cycle_focus, initial_focus_target};
use crate::guards::{InertGuard, PortalLease, ScrollLockGuard};
use crate::host::OverlayHost;
use crate::model::{CloseReason, ModalIds, ModalOptions, ModalState};
use crate::reducer::{reduce_modal, ModalAction, ModalEffect, ModalError};

/// Resources held during one open cycle. Every field is released independently.
struct ModalSession<H: OverlayHost> {
    return_focus: Option<H::Element>,
    scroll: Option<ScrollLockGuard<H>>,
    portal: Option<PortalLease<H>>,
    content: Option<H::Element>,
    inert: Option<InertGuard<H>>,
}

impl<H: OverlayHost> Default for ModalSession<H> {
    fn default() -> Self {
        Self {
            return_focus: None,
            scroll: None,
            portal: None,
            content: None,
            inert: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// What a dispatched action asks of the caller.
pub struct DispatchOutcome {
    /// Forward to the owner's `on_close`.
    pub close_requested: Option<CloseReason>,
    /// Focus was moved by the coordinator; the key event's default should be suppressed.
    pub focus_moved: bool,
}

/// Owner of one modal instance's state and held overlay resources.
///
/// Dropping the coordinator releases everything still held, so abrupt removal cannot leak a
/// scroll lock or leave the page hidden.
pub struct ModalCoordinator<H: OverlayHost> {
    host: H,
    options: ModalOptions,
    ids: ModalIds,
    state: ModalState,
    initial_focus: Option<H::Element>,
    final_focus: Option<H::Element>,
    session: Option<ModalSession<H>>,
}

impl<H: OverlayHost> ModalCoordinator<H> {
    /// Closed coordinator for one modal.
    pub fn new(host: H, options: ModalOptions, ids: ModalIds) -> Self {
        Self {
            host,
            options,
            ids,
            state: ModalState::Closed,
            initial_focus: None,
            final_focus: None,
            session: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Whether the modal is open.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Behavior switches.
    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    /// Accessibility and portal ids.
    pub fn ids(&self) -> &ModalIds {
        &self.ids
    }

    /// Element focused when content mounts, instead of the first focusable.
    pub fn set_initial_focus(&mut self, element: Option<H::Element>) {
        self.initial_focus = element;
    }

    /// Element focused on close, instead of the element focused before opening.
    pub fn set_final_focus(&mut self, element: Option<H::Element>) {
        self.final_focus = element;
    }

    /// Mounted portal node while open.
    pub fn portal_node(&self) -> Option<&H::Element> {
        self.session
            .as_ref()
            .and_then(|session| session.portal.as_ref())
            .map(PortalLease::node)
    }

    /// Mirrors the owner's open flag.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::PortalBusy`] when the portal id is held elsewhere. The open is rolled
    /// back: the scroll lock is released and the modal is `Closed` again.
    pub fn set_open(&mut self, open: bool) -> Result<DispatchOutcome, ModalError> {
        self.dispatch(ModalAction::SetOpen(open))
    }

    /// Records the attached content element, hides siblings, and focuses the initial target.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::NotOpen`] when the modal is closed.
    pub fn content_mounted(&mut self, content: H::Element) -> Result<DispatchOutcome, ModalError> {
        let effects = reduce_modal(&mut self.state, &self.options, ModalAction::ContentMounted)?;
        self.session.get_or_insert_with(ModalSession::default).content = Some(content);
        self.run(effects)
    }

    /// Escape closes, Tab wraps inside the content.
    pub fn key_down(&mut self, key: &str, shift: bool) -> DispatchOutcome {
        self.dispatch_infallible(ModalAction::KeyDown {
            key: key.to_string(),
            shift,
        })
    }

    /// Backdrop press.
    pub fn overlay_click(&mut self) -> DispatchOutcome {
        self.dispatch_infallible(ModalAction::OverlayClicked)
    }

    /// Close button activation.
    pub fn close_button(&mut self) -> DispatchOutcome {
        self.dispatch_infallible(ModalAction::CloseButtonClicked)
    }

    /// Closes immediately and releases every held resource. Calling it again is a no-op.
    pub fn close(&mut self) -> DispatchOutcome {
        self.dispatch_infallible(ModalAction::Close)
    }

    /// Routes an action through [`reduce_modal`] and executes its effects.
    ///
    /// # Errors
    ///
    /// Propagates reducer errors and [`ModalError::PortalBusy`].
    pub fn dispatch(&mut self, action: ModalAction) -> Result<DispatchOutcome, ModalError> {
        tracing::debug!(?action, state = ?self.state, modal = %self.ids.id, "modal action");
        let effects = reduce_modal(&mut self.state, &self.options, action)?;
        self.run(effects)
    }

    fn dispatch_infallible(&mut self, action: ModalAction) -> DispatchOutcome {
        match self.dispatch(action) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(%err, modal = %self.ids.id, "modal action failed");
                DispatchOutcome::default()
            }
        }
    }

    fn run(&mut self, effects: Vec<ModalEffect>) -> Result<DispatchOutcome, ModalError> {
        let mut outcome = DispatchOutcome::default();
        let mut failure = None;
        for effect in effects {
            match effect {
                ModalEffect::RequestClose(reason) => outcome.close_requested = Some(reason),
                ModalEffect::CycleFocus { backwards } => {
                    outcome.focus_moved = self.cycle(backwards);
                }
                other => {
                    let mounting = matches!(other, ModalEffect::MountPortal);
                    if let Err(err) = self.apply(other) {
                        if mounting {
                            self.abort_open(&err);
                            return Err(err);
                        }
                        failure = Some(err);
                    }
                }
            }
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(outcome),
        }
    }

    /// Drops everything acquired by a failed open and returns to `Closed`.
    fn abort_open(&mut self, err: &ModalError) {
        tracing::warn!(%err, modal = %self.ids.id, "modal open aborted");
        self.session = None;
        self.state = ModalState::Closed;
    }

    fn apply(&mut self, effect: ModalEffect) -> Result<(), ModalError> {
        let host = self.host.clone();
        match effect {
            ModalEffect::CaptureReturnFocus => {
                self.session.get_or_insert_with(ModalSession::default).return_focus =
                    host.active_element();
            }
            ModalEffect::LockScroll => {
                let session = self.session.get_or_insert_with(ModalSession::default);
                if session.scroll.is_none() {
                    session.scroll = Some(ScrollLockGuard::acquire(&host));
                }
            }
            ModalEffect::MountPortal => {
                let session = self.session.get_or_insert_with(ModalSession::default);
                if session.portal.is_none() {
                    match PortalLease::acquire(&host, &self.ids.portal) {
                        Some(lease) => session.portal = Some(lease),
                        None => return Err(ModalError::PortalBusy(self.ids.portal.clone())),
                    }
                }
            }
            ModalEffect::HideOthers => {
                let Some(session) = self.session.as_mut() else {
                    return Ok(());
                };
                if session.inert.is_some() {
                    return Ok(());
                }
                let keep = session
                    .portal
                    .as_ref()
                    .map(|lease| lease.node().clone())
                    .or_else(|| session.content.clone());
                if let Some(keep) = keep {
                    session.inert = Some(InertGuard::acquire(&host, &keep));
                }
            }
            ModalEffect::FocusInitial => {
                let Some(content) = self.session.as_ref().and_then(|s| s.content.clone()) else {
                    return Ok(());
                };
                let focusables = host.focusable_descendants(&content);
                let target =
                    initial_focus_target(self.initial_focus.as_ref(), &focusables, &content);
                if !host.focus(&target) && target != content && !host.focus(&content) {
                    tracing::warn!(modal = %self.ids.id, "modal content could not take focus");
                }
            }
            ModalEffect::UnlockScroll => {
                if let Some(session) = self.session.as_mut() {
                    session.scroll.take();
                }
            }
            ModalEffect::UnmountPortal => {
                if let Some(session) = self.session.as_mut() {
                    session.portal.take();
                    session.content.take();
                }
            }
            ModalEffect::RestoreOthers => {
                if let Some(session) = self.session.as_mut() {
                    session.inert.take();
                }
            }
            ModalEffect::ReturnFocus => {
                let Some(session) = self.session.take() else {
                    return Ok(());
                };
                let target = self.final_focus.clone().or_else(|| {
                    self.options
                        .return_focus_on_close
                        .then_some(session.return_focus)
                        .flatten()
                });
                if let Some(target) = target {
                    if !host.focus(&target) {
                        tracing::debug!(modal = %self.ids.id, "return focus target is gone");
                    }
                }
            }
            ModalEffect::RequestClose(_) | ModalEffect::CycleFocus { .. } => {}
        }
        Ok(())
    }

    fn cycle(&self, backwards: bool) -> bool {
        let Some(content) = self.session.as_ref().and_then(|s| s.content.as_ref()) else {
            return false;
        };
        let focusables = self.host.focusable_descendants(content);
        let active = self.host.active_element();
        match cycle_focus(&focusables, active.as_ref(), backwards) {
            Some(index) => self.host.focus(&focusables[index]),
            None if focusables.is_empty() => {
                self.host.focus(content);
                true
            }
            None => false,
        }
    }
}

impl<H: OverlayHost> Drop for ModalCoordinator<H> {
    fn drop(&mut self) {
        if self.session.is_some() {
            let _ = self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::memory::{MemoryOverlayHost, NodeId};

    struct Page {
        host: MemoryOverlayHost,
        trigger: NodeId,
        sidebar: NodeId,
    }

    fn page() -> Page {
        let host = MemoryOverlayHost::new();
        let main = host.create_element(host.body(), false);
        let trigger = host.create_element(main, true);
        let sidebar = host.create_element(host.body(), true);
        assert!(host.focus(&trigger));
        Page {
            host,
            trigger,
            sidebar,
        }
    }

    fn coordinator(host: &MemoryOverlayHost) -> ModalCoordinator<MemoryOverlayHost> {
        ModalCoordinator::new(
            host.clone(),
            ModalOptions::default(),
            ModalIds::new(Some("dialog")),
        )
    }

    fn open_with_content(
        modal: &mut ModalCoordinator<MemoryOverlayHost>,
        host: &MemoryOverlayHost,
        focusables: usize,
    ) -> (NodeId, Vec<NodeId>) {
        let _ = modal.set_open(true).expect("open");
        let portal = *modal.portal_node().expect("portal mounted");
        let content = host.create_element(portal, false);
        let buttons = (0..focusables)
            .map(|_| host.create_element(content, true))
            .collect();
        let _ = modal.content_mounted(content).expect("content");
        (content, buttons)
    }

    #[test]
    fn open_focuses_first_focusable_and_hides_page() {
        let page = page();
        let mut modal = coordinator(&page.host);
        let (_, buttons) = open_with_content(&mut modal, &page.host, 2);

        assert_eq!(page.host.active(), Some(buttons[0]));
        assert!(page.host.is_scroll_locked());
        assert!(page.host.is_aria_hidden(page.sidebar));
        assert!(page
            .host
            .element_by_id("dialog-portal")
            .is_some_and(|node| !page.host.is_aria_hidden(node)));
    }

    #[test]
    fn container_receives_focus_without_focusables() {
        let page = page();
        let mut modal = coordinator(&page.host);
        let (content, _) = open_with_content(&mut modal, &page.host, 0);
        assert_eq!(page.host.active(), Some(content));
    }

    #[test]
    fn explicit_initial_focus_wins() {
        let page = page();
        let mut modal = coordinator(&page.host);
        let _ = modal.set_open(true).expect("open");
        let portal = *modal.portal_node().expect("portal");
        let content = page.host.create_element(portal, false);
        let _first = page.host.create_element(content, true);
        let second = page.host.create_element(content, true);
        modal.set_initial_focus(Some(second));
        let _ = modal.content_mounted(content).expect("content");
        assert_eq!(page.host.active(), Some(second));
    }

    #[test]
    fn close_restores_page_and_returns_focus() {
        let page = page();
        let mut modal = coordinator(&page.host);
        let _ = open_with_content(&mut modal, &page.host, 1);

        let _ = modal.set_open(false).expect("close");
        assert!(!page.host.is_scroll_locked());
        assert!(!page.host.is_aria_hidden(page.sidebar));
        assert_eq!(page.host.element_by_id("dialog-portal"), None);
        assert_eq!(page.host.active(), Some(page.trigger));
    }

    #[test]
    fn final_focus_overrides_return_target() {
        let page = page();
        let mut modal = coordinator(&page.host);
        modal.set_final_focus(Some(page.sidebar));
        let _ = open_with_content(&mut modal, &page.host, 1);
        let _ = modal.set_open(false).expect("close");
        assert_eq!(page.host.active(), Some(page.sidebar));
    }

    #[test]
    fn close_before_content_mounts_releases_everything() {
        let page = page();
        let mut modal = coordinator(&page.host);
        let _ = modal.set_open(true).expect("open");
        assert!(page.host.is_scroll_locked());

        let _ = modal.set_open(false).expect("close");
        let _ = modal.set_open(false).expect("close again");
        assert_eq!(page.host.scroll_lock_depth(), 0);
        assert!(!page.host.is_aria_hidden(page.sidebar));
        assert_eq!(modal.portal_node(), None);
    }

    #[test]
    fn double_close_is_a_no_op() {
        let page = page();
        let mut modal = coordinator(&page.host);
        let _ = open_with_content(&mut modal, &page.host, 1);
        assert_eq!(
            modal.close().close_requested,
            Some(CloseReason::Programmatic)
        );
        assert!(page.host.focus(&page.sidebar));
        assert_eq!(modal.close(), DispatchOutcome::default());
        assert_eq!(page.host.active(), Some(page.sidebar));
        assert_eq!(page.host.scroll_lock_depth(), 0);
    }

    #[test]
    fn dropping_open_modal_releases_resources() {
        let page = page();
        {
            let mut modal = coordinator(&page.host);
            let _ = open_with_content(&mut modal, &page.host, 1);
            assert!(page.host.is_scroll_locked());
        }
        assert!(!page.host.is_scroll_locked());
        assert!(!page.host.is_aria_hidden(page.sidebar));
    }

    #[test]
    fn escape_requests_close_without_tearing_down() {
        let page = page();
        let mut modal = coordinator(&page.host);
        let _ = open_with_content(&mut modal, &page.host, 1);
        let outcome = modal.key_down("Escape", false);
        assert_eq!(outcome.close_requested, Some(CloseReason::PressedEscape));
        assert!(modal.is_open());
        assert!(page.host.is_scroll_locked());
    }

    #[test]
    fn tab_wraps_inside_content() {
        let page = page();
        let mut modal = coordinator(&page.host);
        let (_, buttons) = open_with_content(&mut modal, &page.host, 2);

        assert!(!modal.key_down("Tab", false).focus_moved);
        assert!(page.host.focus(&buttons[1]));
        assert!(modal.key_down("Tab", false).focus_moved);
        assert_eq!(page.host.active(), Some(buttons[0]));
        assert!(modal.key_down("Tab", true).focus_moved);
        assert_eq!(page.host.active(), Some(buttons[1]));
    }

    #[test]
    fn busy_portal_rolls_the_open_back() {
        let page = page();
        let squatter = page.host.mount_portal("dialog-portal").expect("squat");
        let mut modal = coordinator(&page.host);
        let err = modal.set_open(true).expect_err("busy");
        assert_eq!(err, ModalError::PortalBusy("dialog-portal".to_string()));
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(!modal.is_open());
        assert!(!page.host.is_scroll_locked());
        assert!(modal.portal_node().is_none());

        assert_eq!(modal.close(), DispatchOutcome::default());
        assert!(page.host.is_attached(squatter));

        page.host.unmount_portal(&squatter);
        modal.set_open(true).expect("portal freed");
        assert!(modal.is_open());
        assert!(page.host.is_scroll_locked());
    }

    #[test]
    fn second_modal_on_same_portal_leaves_no_scroll_lock_behind() {
        let page = page();
        let mut first = coordinator(&page.host);
        let mut second = coordinator(&page.host);
        first.set_open(true).expect("first open");
        assert_eq!(page.host.scroll_lock_depth(), 1);

        let err = second.set_open(true).expect_err("portal held by first");
        assert_eq!(err, ModalError::PortalBusy("dialog-portal".to_string()));
        assert!(!second.is_open());
        assert_eq!(page.host.scroll_lock_depth(), 1);

        let _ = first.close();
        assert_eq!(page.host.scroll_lock_depth(), 0);
    }
}
