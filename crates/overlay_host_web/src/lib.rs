//! Browser [`OverlayHost`] backed by `web-sys`.
//!
//! DOM calls are compiled only for `wasm32`; other targets keep the scroll-lock bookkeeping and
//! report no document, so server-side or native test builds link without a browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod scroll;

use std::cell::RefCell;

use overlay_runtime::OverlayHost;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

pub use scroll::ScrollLockState;

/// Selector for tabbable content inside a modal.
pub const FOCUSABLE_SELECTOR: &str = "a[href], area[href], button:not([disabled]), \
input:not([disabled]):not([type='hidden']), select:not([disabled]), textarea:not([disabled]), \
iframe, audio[controls], video[controls], [contenteditable]:not([contenteditable='false']), \
[tabindex]:not([tabindex='-1'])";

/// Marker attribute on portal nodes created by [`WebOverlayHost`].
pub const PORTAL_ATTRIBUTE: &str = "data-ui-portal";

thread_local! {
    static SCROLL_LOCK: RefCell<ScrollLockState> = RefCell::new(ScrollLockState::default());
}

/// Outstanding scroll locks on this thread's document.
pub fn scroll_lock_depth() -> usize {
    SCROLL_LOCK.with(|state| state.borrow().depth())
}

/// Whether a sibling of the modal's ancestor chain should be marked `aria-hidden`.
///
/// Non-rendered elements, content that is already hidden, and live regions are left alone.
pub fn should_hide(tag_name: &str, aria_hidden: Option<&str>, live_region: bool) -> bool {
    let inert_tag = ["script", "style", "template", "link", "meta", "noscript"]
        .iter()
        .any(|tag| tag_name.eq_ignore_ascii_case(tag));
    !inert_tag && aria_hidden != Some("true") && !live_region
}

#[cfg(target_arch = "wasm32")]
fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

#[cfg(target_arch = "wasm32")]
fn root_style() -> Option<web_sys::CssStyleDeclaration> {
    let root = document()?.document_element()?;
    Some(root.dyn_into::<web_sys::HtmlElement>().ok()?.style())
}

#[derive(Debug, Clone, Copy, Default)]
/// Overlay host for the page's `document`.
pub struct WebOverlayHost;

impl WebOverlayHost {
    /// Looks up an attached element by DOM id.
    pub fn element_by_id(&self, id: &str) -> Option<web_sys::Element> {
        #[cfg(target_arch = "wasm32")]
        {
            document()?.get_element_by_id(id)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = id;
            None
        }
    }
}

impl OverlayHost for WebOverlayHost {
    type Element = web_sys::Element;

    fn lock_scroll(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            let style = root_style();
            let current = style
                .as_ref()
                .and_then(|style| style.get_property_value("overflow").ok())
                .unwrap_or_default();
            let outermost = SCROLL_LOCK.with(|state| state.borrow_mut().lock(&current));
            if let (true, Some(style)) = (outermost, style) {
                if let Err(err) = style.set_property("overflow", "hidden") {
                    tracing::warn!(?err, "failed to lock document scroll");
                }
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = SCROLL_LOCK.with(|state| state.borrow_mut().lock(""));
        }
    }

    fn unlock_scroll(&self) {
        let restore = SCROLL_LOCK.with(|state| state.borrow_mut().unlock());

        #[cfg(target_arch = "wasm32")]
        {
            let (Some(previous), Some(style)) = (restore, root_style()) else {
                return;
            };
            let result = if previous.is_empty() {
                style.remove_property("overflow").map(|_| ())
            } else {
                style.set_property("overflow", &previous)
            };
            if let Err(err) = result {
                tracing::warn!(?err, "failed to restore document scroll");
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = restore;
        }
    }

    fn mount_portal(&self, id: &str) -> Option<Self::Element> {
        #[cfg(target_arch = "wasm32")]
        {
            let document = document()?;
            if document.get_element_by_id(id).is_some() {
                return None;
            }
            let body = document.body()?;
            let node = document.create_element("div").ok()?;
            node.set_id(id);
            let _ = node.set_attribute(PORTAL_ATTRIBUTE, "");
            if let Err(err) = body.append_child(&node) {
                tracing::warn!(?err, id, "failed to attach portal node");
                return None;
            }
            Some(node)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::debug!(id, "no document; portal not mounted");
            None
        }
    }

    fn unmount_portal(&self, node: &Self::Element) {
        #[cfg(target_arch = "wasm32")]
        node.remove();

        #[cfg(not(target_arch = "wasm32"))]
        let _ = node;
    }

    fn hide_others(&self, keep: &Self::Element) -> Vec<Self::Element> {
        #[cfg(target_arch = "wasm32")]
        {
            let mut hidden = Vec::new();
            let mut current = keep.clone();
            while let Some(parent) = current.parent_element() {
                let children = parent.children();
                for index in 0..children.length() {
                    let Some(sibling) = children.item(index) else {
                        continue;
                    };
                    if sibling == current {
                        continue;
                    }
                    let aria_hidden = sibling.get_attribute("aria-hidden");
                    if !should_hide(
                        &sibling.tag_name(),
                        aria_hidden.as_deref(),
                        sibling.has_attribute("aria-live"),
                    ) {
                        continue;
                    }
                    if sibling.set_attribute("aria-hidden", "true").is_ok() {
                        hidden.push(sibling);
                    }
                }
                if parent.tag_name().eq_ignore_ascii_case("body") {
                    break;
                }
                current = parent;
            }
            hidden
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = keep;
            Vec::new()
        }
    }

    fn unhide(&self, hidden: &[Self::Element]) {
        #[cfg(target_arch = "wasm32")]
        for element in hidden {
            let _ = element.remove_attribute("aria-hidden");
        }

        #[cfg(not(target_arch = "wasm32"))]
        let _ = hidden;
    }

    fn active_element(&self) -> Option<Self::Element> {
        #[cfg(target_arch = "wasm32")]
        {
            document()?.active_element()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    fn focus(&self, element: &Self::Element) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(html) = element.dyn_ref::<web_sys::HtmlElement>() else {
                return false;
            };
            let tabbable = element.matches(FOCUSABLE_SELECTOR).unwrap_or(false);
            if !tabbable && !element.has_attribute("tabindex") {
                let _ = element.set_attribute("tabindex", "-1");
            }
            if let Err(err) = html.focus() {
                tracing::warn!(?err, "element refused focus");
                return false;
            }
            true
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = element;
            false
        }
    }

    fn focusable_descendants(&self, container: &Self::Element) -> Vec<Self::Element> {
        #[cfg(target_arch = "wasm32")]
        {
            let Ok(nodes) = container.query_selector_all(FOCUSABLE_SELECTOR) else {
                return Vec::new();
            };
            let mut items = Vec::new();
            for index in 0..nodes.length() {
                let Some(node) = nodes.item(index) else {
                    continue;
                };
                let Ok(item) = node.dyn_into::<web_sys::Element>() else {
                    continue;
                };
                if item.get_attribute("aria-disabled").as_deref() == Some("true") {
                    continue;
                }
                if matches!(item.closest("[hidden], [inert]"), Ok(Some(_))) {
                    continue;
                }
                items.push(item);
            }
            items
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = container;
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn hiding_skips_non_rendered_and_live_content() {
        assert!(should_hide("DIV", None, false));
        assert!(should_hide("main", Some("false"), false));
        assert!(!should_hide("SCRIPT", None, false));
        assert!(!should_hide("div", Some("true"), false));
        assert!(!should_hide("div", None, true));
    }

    #[test]
    fn focusable_selector_excludes_negative_tabindex() {
        assert!(FOCUSABLE_SELECTOR.contains("[tabindex]:not([tabindex='-1'])"));
        assert!(FOCUSABLE_SELECTOR.contains("button:not([disabled])"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_host_keeps_lock_pairing_without_a_document() {
        let host = WebOverlayHost;
        host.lock_scroll();
        host.lock_scroll();
        assert_eq!(scroll_lock_depth(), 2);
        host.unlock_scroll();
        host.unlock_scroll();
        assert_eq!(scroll_lock_depth(), 0);
        assert_eq!(host.mount_portal("p"), None);
        assert_eq!(host.element_by_id("p"), None);
    }
}
