//! Layout, navigation, control, and overlay primitives.

use leptos::*;
use style_system::{merge_style_objects, StyleObject};

mod controls;
mod layout;
mod navigation;
mod overlays;

pub use controls::{pointer_fraction, Slider, SliderValue};
pub use layout::{aspect_ratio_padding, AspectRatio, Box, Flex, FlexOptions, Grid, GridOptions};
pub use navigation::{
    breadcrumb_layout, Breadcrumb, BreadcrumbEntry, BreadcrumbItem, BreadcrumbLink,
    BreadcrumbNode, BreadcrumbSeparator,
};
pub use overlays::{
    Modal, ModalBody, ModalCloseButton, ModalContent, ModalFooter, ModalHandle, ModalHeader,
    ModalOverlay, Portal,
};

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// `base` with the caller's `sx` overrides merged over it.
pub(crate) fn with_sx(mut base: StyleObject, sx: StyleObject) -> StyleObject {
    merge_style_objects(&mut base, sx);
    base
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn layout_class_appends_non_empty_override() {
        assert_eq!(merge_layout_class("ui-box", None), "ui-box");
        assert_eq!(merge_layout_class("ui-box", Some("")), "ui-box");
        assert_eq!(merge_layout_class("ui-box", Some("hero")), "ui-box hero");
    }

    #[test]
    fn sx_overrides_base_keys() {
        let base = json!({ "d": "flex", "_hover": { "bg": "gray.100" } });
        let sx = json!({ "d": "grid", "_hover": { "color": "white" } });
        let merged = with_sx(
            base.as_object().cloned().expect("object"),
            sx.as_object().cloned().expect("object"),
        );
        assert_eq!(
            serde_json::Value::Object(merged),
            json!({ "d": "grid", "_hover": { "bg": "gray.100", "color": "white" } })
        );
    }
}
