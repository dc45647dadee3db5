use std::rc::Rc;

use leptos::Portal as LeptosPortal;
use overlay_host_web::WebOverlayHost;
use overlay_runtime::{
    CloseReason, DispatchOutcome, ModalCoordinator, ModalIds, ModalOptions, PortalLayer,
    PortalLease, PortalManager,
};
use serde_json::json;
use style_system::presets::{
    self, modal_body_style, modal_content_style, modal_transition_style, modal_wrapper_style,
    MODAL_TRANSITION_MS,
};
use style_system::{ColorMode, ModalTransition, ScrollBehavior, ThemeProps};

use super::*;
use crate::style::{class_list, use_style_class};
use crate::theme::use_theme;

fn stacking_style(z_index: i32) -> String {
    format!("z-index: {z_index};")
}

#[component]
/// Renders children into a body-level node stacked above earlier portals.
///
/// Without a document (or when `id` is already taken) children render in place.
pub fn Portal(
    /// Node id; the next layer id (`ui-portal-<n>`) when omitted.
    #[prop(optional, into)]
    id: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let portals = use_theme().portals;
    let Some(layer) = portals.try_update_value(PortalManager::push) else {
        return children().into_view();
    };
    let PortalLayer {
        id: layer_id,
        z_index,
        ..
    } = layer;
    let node_id = id.unwrap_or_else(|| layer_id.clone());
    let lease = PortalLease::acquire(&WebOverlayHost, &node_id);
    let mount = lease.as_ref().map(|lease| lease.node().clone());
    let lease = store_value(lease);
    on_cleanup(move || {
        lease.try_update_value(Option::take);
        portals.try_update_value(|manager| manager.release(&layer_id));
    });

    match mount {
        Some(mount) => {
            if let Err(err) = mount.set_attribute("style", &stacking_style(z_index)) {
                logging::warn!("portal stacking failed: {err:?}");
            }
            view! { <LeptosPortal mount=mount>{children()}</LeptosPortal> }.into_view()
        }
        None => {
            logging::warn!("portal node `{node_id}` unavailable; rendering in place");
            children().into_view()
        }
    }
}

#[derive(Clone, Copy)]
/// Wiring shared by a [`Modal`] and its parts.
pub struct ModalHandle {
    coordinator: StoredValue<ModalCoordinator<WebOverlayHost>>,
    ids: StoredValue<ModalIds>,
    on_close: Option<Callback<CloseReason>>,
    portal: RwSignal<Option<web_sys::Element>>,
    z_index: RwSignal<i32>,
    layer: StoredValue<Option<PortalLayer>>,
    portals: StoredValue<PortalManager>,
    color_mode: RwSignal<ColorMode>,
    size: StoredValue<Option<String>>,
    is_centered: bool,
    scroll_behavior: ScrollBehavior,
    transition: ModalTransition,
    transition_ms: u32,
    initial_focus: StoredValue<Option<String>>,
    final_focus: StoredValue<Option<String>>,
}

impl ModalHandle {
    /// Content, header, body, and portal ids.
    pub fn ids(&self) -> ModalIds {
        self.ids.get_value()
    }

    /// Whether the coordinator currently holds the modal open.
    pub fn is_open(&self) -> bool {
        self.coordinator
            .try_with_value(ModalCoordinator::is_open)
            .unwrap_or(false)
    }

    /// Closes immediately and notifies `on_close` with [`CloseReason::Programmatic`].
    pub fn close(&self) {
        self.portal.set(None);
        let outcome = self
            .coordinator
            .try_update_value(ModalCoordinator::close)
            .unwrap_or_default();
        self.release_layer();
        self.forward(outcome);
    }

    /// Preset inputs for the modal parts.
    pub fn theme_props(&self) -> ThemeProps {
        ThemeProps {
            color_mode: self.color_mode.get(),
            size: self.size.get_value(),
            ..ThemeProps::default()
        }
    }

    fn has_header(&self) -> bool {
        self.coordinator
            .try_with_value(|coordinator| coordinator.options().has_header)
            .unwrap_or(true)
    }

    fn sync_open(self, open: bool) {
        if open {
            if let Some(layer) = self.portals.try_update_value(PortalManager::push) {
                self.z_index.set(layer.z_index);
                self.layer.set_value(Some(layer));
            }
            let result = self.coordinator.try_update_value(|coordinator| {
                let outcome = coordinator.set_open(true);
                (outcome, coordinator.portal_node().cloned())
            });
            let Some((outcome, node)) = result else {
                return;
            };
            if let Err(err) = outcome {
                logging::warn!("modal open rolled back: {err}");
                self.release_layer();
                self.portal.set(None);
                return;
            }
            self.portal.set(node);
            return;
        }

        self.portal.set(None);
        let final_focus = self
            .final_focus
            .get_value()
            .and_then(|id| WebOverlayHost.element_by_id(&id));
        self.coordinator.update_value(|coordinator| {
            coordinator.set_final_focus(final_focus);
            if let Err(err) = coordinator.set_open(false) {
                logging::warn!("modal close incomplete: {err}");
            }
        });
        self.release_layer();
    }

    fn content_mounted(self, content: web_sys::Element) {
        let initial_focus = self
            .initial_focus
            .get_value()
            .and_then(|id| WebOverlayHost.element_by_id(&id));
        self.coordinator.update_value(|coordinator| {
            coordinator.set_initial_focus(initial_focus);
            if let Err(err) = coordinator.content_mounted(content) {
                logging::warn!("modal content mount ignored: {err}");
            }
        });
    }

    fn key_down(self, ev: &web_sys::KeyboardEvent) {
        let outcome = self
            .coordinator
            .try_update_value(|coordinator| coordinator.key_down(&ev.key(), ev.shift_key()))
            .unwrap_or_default();
        if outcome.focus_moved {
            ev.prevent_default();
        }
        if outcome.close_requested.is_some() {
            ev.stop_propagation();
        }
        self.forward(outcome);
    }

    fn overlay_click(self) {
        let outcome = self
            .coordinator
            .try_update_value(ModalCoordinator::overlay_click)
            .unwrap_or_default();
        self.forward(outcome);
    }

    fn close_button(self) {
        let outcome = self
            .coordinator
            .try_update_value(ModalCoordinator::close_button)
            .unwrap_or_default();
        self.forward(outcome);
    }

    fn release_layer(&self) {
        if let Some(Some(layer)) = self.layer.try_update_value(Option::take) {
            self.portals
                .try_update_value(|manager| manager.release(&layer.id));
        }
    }

    fn forward(&self, outcome: DispatchOutcome) {
        if let (Some(reason), Some(on_close)) = (outcome.close_requested, self.on_close) {
            on_close.call(reason);
        }
    }
}

#[component]
/// Dialog rendered into a portal while `is_open` holds.
///
/// Escape, backdrop clicks, and the close button only request a close through `on_close`; the
/// owner decides by clearing `is_open`.
pub fn Modal<F, IV>(
    #[prop(into)] is_open: MaybeSignal<bool>,
    #[prop(optional)] on_close: Option<Callback<CloseReason>>,
    #[prop(optional, into)] id: Option<String>,
    /// DOM id of the element focused when the content mounts.
    #[prop(optional, into)]
    initial_focus: Option<String>,
    /// DOM id of the element focused after closing.
    #[prop(optional, into)]
    final_focus: Option<String>,
    #[prop(default = true)] block_scroll_on_mount: bool,
    #[prop(default = true)] close_on_esc: bool,
    #[prop(default = true)] close_on_overlay_click: bool,
    #[prop(default = true)] return_focus_on_close: bool,
    #[prop(default = true)] use_inert: bool,
    #[prop(default = true)] has_header: bool,
    #[prop(optional, into)] size: Option<String>,
    #[prop(optional)] is_centered: bool,
    #[prop(optional)] scroll_behavior: ScrollBehavior,
    /// Enter motion for the content.
    #[prop(optional)]
    transition: ModalTransition,
    #[prop(default = MODAL_TRANSITION_MS)] transition_duration: u32,
    children: F,
) -> impl IntoView
where
    F: Fn(ModalHandle) -> IV + 'static,
    IV: IntoView + 'static,
{
    let theme = use_theme();
    let options = ModalOptions {
        block_scroll_on_mount,
        close_on_esc,
        close_on_overlay_click,
        return_focus_on_close,
        use_inert,
        has_header,
    };
    let ids = ModalIds::new(id.as_deref());
    let handle = ModalHandle {
        coordinator: store_value(ModalCoordinator::new(
            WebOverlayHost,
            options,
            ids.clone(),
        )),
        ids: store_value(ids),
        on_close,
        portal: create_rw_signal(None),
        z_index: create_rw_signal(overlay_runtime::PORTAL_BASE_Z_INDEX),
        layer: store_value(None),
        portals: theme.portals,
        color_mode: theme.color_mode,
        size: store_value(size),
        is_centered,
        scroll_behavior,
        transition,
        transition_ms: transition_duration,
        initial_focus: store_value(initial_focus),
        final_focus: store_value(final_focus),
    };

    create_effect(move |previous: Option<bool>| {
        let open = is_open.get();
        if previous.unwrap_or(false) != open {
            handle.sync_open(open);
        }
        open
    });
    on_cleanup(move || {
        handle.coordinator.try_update_value(ModalCoordinator::close);
        handle.release_layer();
    });

    let children = Rc::new(children);
    move || {
        handle.portal.get().map(|mount| {
            let children = Rc::clone(&children);
            view! { <LeptosPortal mount=mount>{children(handle)}</LeptosPortal> }
        })
    }
}

#[component]
/// Fixed full-viewport backdrop.
pub fn ModalOverlay(
    handle: ModalHandle,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
) -> impl IntoView {
    let generated = use_style_class(move || {
        with_sx(presets::modal().part(&handle.theme_props(), "Overlay"), sx.get())
    });
    view! {
        <div
            class=move || class_list("ui-modal-overlay", &generated.get())
            style=move || stacking_style(handle.z_index.get())
            aria-hidden="true"
            data-ui-primitive="true"
            data-ui-kind="modal-overlay"
        ></div>
    }
}

#[component]
/// Dialog surface. Its wrapper covers the viewport and turns outside presses into overlay clicks.
pub fn ModalContent(
    handle: ModalHandle,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    children: Children,
) -> impl IntoView {
    let ids = handle.ids();
    let labelled_by = handle.has_header().then(|| ids.header.clone());
    let is_centered = handle.is_centered;
    let scroll = handle.scroll_behavior;
    let entered = create_rw_signal(false);
    let wrapper_class = use_style_class(move || modal_wrapper_style(is_centered, scroll));
    let content_class = use_style_class(move || {
        let base = with_sx(
            presets::modal().part(&handle.theme_props(), "Content"),
            modal_content_style(is_centered, scroll),
        );
        let motion =
            modal_transition_style(handle.transition, handle.transition_ms, entered.get());
        with_sx(with_sx(base, motion), sx.get())
    });

    let content_ref = create_node_ref::<html::Section>();
    content_ref.on_load(move |section| {
        let element: &web_sys::Element = &section;
        let element = element.clone();
        request_animation_frame(move || {
            handle.content_mounted(element);
            // A second frame lets the offset styles paint before the transition starts.
            request_animation_frame(move || entered.set(true));
        });
    });

    let pressed_outside = create_rw_signal(false);
    let on_mousedown = move |ev: web_sys::MouseEvent| {
        pressed_outside.set(ev.target() == ev.current_target());
    };
    let on_click = move |ev: web_sys::MouseEvent| {
        let outside = ev.target() == ev.current_target();
        if outside && pressed_outside.get_untracked() {
            handle.overlay_click();
        }
        pressed_outside.set(false);
    };

    view! {
        <div
            class=move || class_list("ui-modal-wrapper", &wrapper_class.get())
            style=move || stacking_style(handle.z_index.get())
            data-ui-primitive="true"
            data-ui-kind="modal-wrapper"
            on:mousedown=on_mousedown
            on:click=on_click
        >
            <section
                node_ref=content_ref
                class=move || class_list("ui-modal-content", &content_class.get())
                id=ids.id
                role="dialog"
                aria-modal="true"
                tabindex="-1"
                aria-labelledby=labelled_by
                aria-describedby=ids.body
                data-ui-primitive="true"
                data-ui-kind="modal-content"
                on:keydown=move |ev: web_sys::KeyboardEvent| handle.key_down(&ev)
            >
                {children()}
            </section>
        </div>
    }
}

#[component]
/// Title region; its id labels the dialog.
pub fn ModalHeader(
    handle: ModalHandle,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    children: Children,
) -> impl IntoView {
    let generated = use_style_class(move || {
        with_sx(presets::modal().part(&handle.theme_props(), "Header"), sx.get())
    });
    view! {
        <header
            class=move || class_list("ui-modal-header", &generated.get())
            id=handle.ids().header
            data-ui-primitive="true"
            data-ui-kind="modal-header"
        >
            {children()}
        </header>
    }
}

#[component]
/// Main region; its id describes the dialog.
pub fn ModalBody(
    handle: ModalHandle,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    children: Children,
) -> impl IntoView {
    let scroll = handle.scroll_behavior;
    let generated = use_style_class(move || {
        let base = with_sx(
            presets::modal().part(&handle.theme_props(), "Body"),
            modal_body_style(scroll),
        );
        with_sx(base, sx.get())
    });
    view! {
        <div
            class=move || class_list("ui-modal-body", &generated.get())
            id=handle.ids().body
            data-ui-primitive="true"
            data-ui-kind="modal-body"
        >
            {children()}
        </div>
    }
}

#[component]
/// Action row.
pub fn ModalFooter(
    handle: ModalHandle,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    children: Children,
) -> impl IntoView {
    let generated = use_style_class(move || {
        with_sx(presets::modal().part(&handle.theme_props(), "Footer"), sx.get())
    });
    view! {
        <footer
            class=move || class_list("ui-modal-footer", &generated.get())
            data-ui-primitive="true"
            data-ui-kind="modal-footer"
        >
            {children()}
        </footer>
    }
}

fn close_button_style(props: &ThemeProps) -> StyleObject {
    let reset = json!({
        "d": "flex",
        "alignItems": "center",
        "justifyContent": "center",
        "w": "32px",
        "h": "32px",
        "rounded": "md",
        "border": "none",
        "bg": "transparent",
        "cursor": "pointer",
        "fontSize": "lg",
        "_hover": { "bg": props.color_mode.pick("blackAlpha.100", "whiteAlpha.100") },
        "_focus": { "shadow": "outline" }
    });
    let reset = match reset {
        serde_json::Value::Object(map) => map,
        _ => StyleObject::new(),
    };
    with_sx(reset, presets::modal().part(props, "CloseButton"))
}

#[component]
/// Button requesting a close with [`CloseReason::CloseButton`].
pub fn ModalCloseButton(
    handle: ModalHandle,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    #[prop(optional, into)] aria_label: Option<String>,
) -> impl IntoView {
    let generated = use_style_class(move || {
        with_sx(close_button_style(&handle.theme_props()), sx.get())
    });
    view! {
        <button
            type="button"
            class=move || class_list("ui-modal-close-button", &generated.get())
            aria-label=aria_label.unwrap_or_else(|| "Close".to_string())
            data-ui-primitive="true"
            data-ui-kind="modal-close-button"
            on:click=move |_| handle.close_button()
        >
            "×"
        </button>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn stacking_style_sets_z_index() {
        assert_eq!(stacking_style(1401), "z-index: 1401;");
    }

    #[test]
    fn close_button_sits_in_the_top_right_corner() {
        let style = close_button_style(&ThemeProps::default());
        assert_eq!(style["position"], json!("absolute"));
        assert_eq!(style["top"], json!("8px"));
        assert_eq!(style["right"], json!("12px"));
        assert_eq!(style["_hover"]["bg"], json!("blackAlpha.100"));

        let theme = style_system::Theme::default();
        for mode in [ColorMode::Light, ColorMode::Dark] {
            let style = close_button_style(&ThemeProps {
                color_mode: mode,
                ..ThemeProps::default()
            });
            let token = style["_hover"]["bg"].as_str().unwrap_or_default().to_string();
            assert!(
                theme
                    .token(style_system::scales::ScaleKind::Colors, &token)
                    .is_some(),
                "{token} missing from the default palette"
            );
        }
    }

    #[test]
    fn failed_open_releases_layer_and_closes_idempotently() {
        let runtime = create_runtime();
        let theme = use_theme();
        let ids = ModalIds::new(Some("handle-test"));
        let handle = ModalHandle {
            coordinator: store_value(ModalCoordinator::new(
                WebOverlayHost,
                ModalOptions::default(),
                ids.clone(),
            )),
            ids: store_value(ids),
            on_close: None,
            portal: create_rw_signal(None),
            z_index: create_rw_signal(0),
            layer: store_value(None),
            portals: theme.portals,
            color_mode: theme.color_mode,
            size: store_value(Some("lg".to_string())),
            is_centered: true,
            scroll_behavior: ScrollBehavior::Inside,
            transition: ModalTransition::Scale,
            transition_ms: MODAL_TRANSITION_MS,
            initial_focus: store_value(None),
            final_focus: store_value(None),
        };

        assert_eq!(handle.theme_props().size.as_deref(), Some("lg"));

        // No document on the native target, so the portal node cannot be mounted.
        handle.sync_open(true);
        assert!(!handle.is_open());
        assert!(handle.portal.get_untracked().is_none());
        assert_eq!(theme.portals.with_value(PortalManager::depth), 0);
        assert_eq!(overlay_host_web::scroll_lock_depth(), 0);

        handle.close();
        handle.close();
        assert!(!handle.is_open());
        assert_eq!(theme.portals.with_value(PortalManager::depth), 0);
        assert_eq!(overlay_host_web::scroll_lock_depth(), 0);
        runtime.dispose();
    }
}
