//! Themeable Leptos component library built on the `style_system` pipeline.
//!
//! Components accept `sx` style objects, resolve them through the [`ThemeProvider`]'s engine,
//! and emit one generated class per distinct style. Every rendered element carries the stable
//! `data-ui-primitive` / `data-ui-kind` DOM contract. Modal behavior lives in
//! `overlay_runtime`; this crate only binds it to the DOM.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod primitives;
pub mod style;
pub mod theme;

pub use primitives::{
    aspect_ratio_padding, breadcrumb_layout, pointer_fraction, AspectRatio, Box, Breadcrumb,
    BreadcrumbEntry, BreadcrumbItem, BreadcrumbLink, BreadcrumbNode, BreadcrumbSeparator, Flex,
    FlexOptions, Grid, GridOptions, Modal, ModalBody, ModalCloseButton, ModalContent, ModalFooter,
    ModalHandle, ModalHeader, ModalOverlay, Portal, Slider, SliderValue,
};
pub use style::{collected_styles, inject_style, use_style_class, StyleRegistry};
pub use theme::{
    use_color_mode, use_theme, ColorModeContext, ColorModeStore, ThemeContext, ThemeProvider,
    COLOR_MODE_KEY,
};

/// Convenience imports for application crates consuming the component set.
pub mod prelude {
    pub use crate::{
        use_color_mode, use_theme, AspectRatio, Box, Breadcrumb, BreadcrumbEntry, BreadcrumbItem,
        BreadcrumbLink, BreadcrumbSeparator, Flex, Grid, Modal, ModalBody, ModalCloseButton,
        ModalContent, ModalFooter, ModalHandle, ModalHeader, ModalOverlay, Portal, Slider,
        ThemeProvider,
    };
    pub use overlay_runtime::CloseReason;
    pub use style_system::{ColorMode, ModalTransition, Orientation, ScrollBehavior, StyleObject};
}
