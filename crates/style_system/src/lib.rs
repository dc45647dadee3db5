//! Headless style pipeline for the shared design system.
//!
//! The crate owns the shorthand registry, pseudo-selector rewriting, prop expansion, breakpoint
//! construction, theme scales, component presets, and CSS serialization. It has no DOM or
//! framework dependency so every stage can be exercised with plain unit tests; the Leptos layer
//! in `system_ui` only calls [`StyleEngine`] and injects the resulting CSS.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod breakpoints;
pub mod css;
pub mod engine;
mod error;
pub mod merge;
pub mod presets;
pub mod pseudo;
pub mod scales;
pub mod theme;
pub mod tokens;
pub mod transform;

/// Style-props object: prop name to primitive, array (responsive), or nested object.
pub type StyleObject = serde_json::Map<String, serde_json::Value>;

pub use breakpoints::{create_breakpoints, Breakpoint, Breakpoints};
pub use engine::{StyleEngine, StyledClass};
pub use error::StyleError;
pub use merge::merge_style_objects;
pub use presets::{ComponentTheme, ModalTransition, Orientation, ScrollBehavior, ThemeProps};
pub use pseudo::PseudoResolver;
pub use theme::{ColorMode, Theme};
pub use tokens::{PropConfig, TokenConfig};
pub use transform::PropTransformer;
