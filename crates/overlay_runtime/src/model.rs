//! Modal lifecycle state, options, and accessibility ids.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_MODAL_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
/// Position of one modal instance in its Closed → Open → Closed cycle.
pub enum ModalState {
    #[default]
    /// Nothing mounted; no resources held.
    Closed,
    /// Open flag set.
    Open {
        /// Whether the content element has been attached and focused.
        content_mounted: bool,
    },
}

impl ModalState {
    /// Whether the modal is open.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Whether the content element is attached.
    pub const fn is_content_mounted(self) -> bool {
        matches!(
            self,
            Self::Open {
                content_mounted: true
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Why a modal asked its owner to close.
pub enum CloseReason {
    /// Escape key inside the modal.
    PressedEscape,
    /// Pointer press on the backdrop.
    ClickedOverlay,
    /// The modal's close button.
    CloseButton,
    /// Imperative close call.
    Programmatic,
}

impl CloseReason {
    /// Stable token used in `data-*` attributes and logs.
    pub const fn token(self) -> &'static str {
        match self {
            Self::PressedEscape => "pressed-escape",
            Self::ClickedOverlay => "clicked-overlay",
            Self::CloseButton => "close-button",
            Self::Programmatic => "programmatic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Behavior switches for one modal instance.
pub struct ModalOptions {
    /// Lock document scroll while open.
    pub block_scroll_on_mount: bool,
    /// Escape requests a close.
    pub close_on_esc: bool,
    /// Backdrop clicks request a close.
    pub close_on_overlay_click: bool,
    /// Restore focus to the element focused before opening.
    pub return_focus_on_close: bool,
    /// Hide sibling content from assistive technology while open.
    pub use_inert: bool,
    /// Content is labelled by the header id.
    pub has_header: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            block_scroll_on_mount: true,
            close_on_esc: true,
            close_on_overlay_click: true,
            return_focus_on_close: true,
            use_inert: true,
            has_header: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// DOM ids wiring a modal's content to its header, body, and portal node.
pub struct ModalIds {
    /// Content id.
    pub id: String,
    /// `aria-labelledby` target.
    pub header: String,
    /// `aria-describedby` target, `<id>-content`.
    pub body: String,
    /// Portal node id.
    pub portal: String,
}

impl ModalIds {
    /// Derives the id set from `id`, or from a fresh `modal-<n>` id when none is supplied.
    pub fn new(id: Option<&str>) -> Self {
        let id = match id {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => format!("modal-{}", NEXT_MODAL_ID.fetch_add(1, Ordering::Relaxed)),
        };
        Self {
            header: format!("{id}-header"),
            body: format!("{id}-content"),
            portal: format!("{id}-portal"),
            id,
        }
    }

    /// Replaces the portal node id.
    #[must_use]
    pub fn with_portal(mut self, portal: impl Into<String>) -> Self {
        self.portal = portal.into();
        self
    }

    /// `aria-labelledby` value, present only when the modal renders a header.
    pub fn labelled_by(&self, options: &ModalOptions) -> Option<&str> {
        options.has_header.then_some(self.header.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ids_derive_from_supplied_id() {
        let ids = ModalIds::new(Some("settings"));
        assert_eq!(ids.header, "settings-header");
        assert_eq!(ids.body, "settings-content");
        assert_eq!(ids.portal, "settings-portal");
    }

    #[test]
    fn described_by_target_is_distinct_from_content_id() {
        let ids = ModalIds::new(Some("profile"));
        assert_eq!(ids.id, "profile");
        assert_eq!(ids.body, "profile-content");
        assert_ne!(ids.body, ids.id);
        assert_ne!(ids.body, ids.header);
    }

    #[test]
    fn generated_ids_are_unique() {
        let first = ModalIds::new(None);
        let second = ModalIds::new(Some("  "));
        assert!(first.id.starts_with("modal-"));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn header_label_follows_option() {
        let ids = ModalIds::new(Some("m"));
        let mut options = ModalOptions::default();
        assert_eq!(ids.labelled_by(&options), Some("m-header"));
        options.has_header = false;
        assert_eq!(ids.labelled_by(&options), None);
    }

    #[test]
    fn state_serializes_with_tag() {
        let value = serde_json::to_value(ModalState::Open {
            content_mounted: false,
        })
        .expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({ "state": "open", "content_mounted": false })
        );
    }
}
