//! Component theme presets: per-part base styles and size variants.

use serde_json::{json, Value};

use crate::merge::merge_style_objects;
use crate::theme::ColorMode;
use crate::StyleObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Layout axis for orientation-aware components.
pub enum Orientation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Bottom to top.
    Vertical,
}

impl Orientation {
    /// Stable token used in `aria-orientation` and data attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Where a modal scrolls when its content overflows the viewport.
pub enum ScrollBehavior {
    /// Only the modal body scrolls.
    Inside,
    /// The whole content box scrolls within the viewport.
    #[default]
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Enter motion applied to modal content once it mounts.
pub enum ModalTransition {
    /// Fades in while rising 10px.
    #[default]
    SlideIn,
    /// Fades in while growing from 95%.
    Scale,
    /// Appears without motion.
    Immediate,
}

/// Default enter duration in milliseconds.
pub const MODAL_TRANSITION_MS: u32 = 150;

#[derive(Debug, Clone, PartialEq)]
/// Inputs a preset uses to compute its styles.
pub struct ThemeProps {
    /// Active color mode.
    pub color_mode: ColorMode,
    /// Palette name for accent parts (`blue`, `teal`).
    pub color_scheme: String,
    /// Layout axis.
    pub orientation: Orientation,
    /// Size variant; falls back to the preset default.
    pub size: Option<String>,
}

impl Default for ThemeProps {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Light,
            color_scheme: "blue".to_string(),
            orientation: Orientation::Horizontal,
            size: None,
        }
    }
}

/// Chooses the value matching `orientation`.
pub fn orientation_style(orientation: Orientation, horizontal: Value, vertical: Value) -> Value {
    match orientation {
        Orientation::Horizontal => horizontal,
        Orientation::Vertical => vertical,
    }
}

#[derive(Clone, Copy)]
/// Style recipe for a multi-part component.
pub struct ComponentTheme {
    /// Size used when [`ThemeProps::size`] is `None`.
    pub default_size: &'static str,
    /// Size variants this preset knows.
    pub size_names: &'static [&'static str],
    base_style: fn(&ThemeProps) -> Value,
    size_style: fn(&str, &ThemeProps) -> Option<Value>,
}

impl std::fmt::Debug for ComponentTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentTheme")
            .field("default_size", &self.default_size)
            .field("size_names", &self.size_names)
            .finish_non_exhaustive()
    }
}

fn into_object(value: Value) -> StyleObject {
    match value {
        Value::Object(map) => map,
        _ => StyleObject::new(),
    }
}

impl ComponentTheme {
    /// Builds a preset from its base and size style functions.
    pub const fn new(
        default_size: &'static str,
        size_names: &'static [&'static str],
        base_style: fn(&ThemeProps) -> Value,
        size_style: fn(&str, &ThemeProps) -> Option<Value>,
    ) -> Self {
        Self {
            default_size,
            size_names,
            base_style,
            size_style,
        }
    }

    /// Part name to style object: base style with the size variant merged over it.
    ///
    /// Unknown sizes contribute nothing.
    pub fn styles(&self, props: &ThemeProps) -> StyleObject {
        let mut styles = into_object((self.base_style)(props));
        let size = props.size.as_deref().unwrap_or(self.default_size);
        match (self.size_style)(size, props) {
            Some(sized) => merge_style_objects(&mut styles, into_object(sized)),
            None => tracing::debug!(size, "component preset has no such size"),
        }
        styles
    }

    /// Style object for one part (`Track`, `Content`); empty when the part has no styles.
    pub fn part(&self, props: &ThemeProps, part: &str) -> StyleObject {
        match self.styles(props).remove(part) {
            Some(Value::Object(style)) => style,
            _ => StyleObject::new(),
        }
    }
}

/// Slider preset with `Root`, `Track`, `FilledTrack`, and `Thumb` parts.
pub fn slider() -> ComponentTheme {
    ComponentTheme::new("md", &["sm", "md", "lg"], slider_base_style, slider_size_style)
}

fn slider_base_style(props: &ThemeProps) -> Value {
    let scheme = &props.color_scheme;
    let mut root = json!({
        "position": "relative",
        "display": "inline-block",
        "cursor": "pointer",
        "_disabled": {
            "opacity": 0.6,
            "cursor": "default",
            "pointerEvents": "none"
        }
    });
    crate::merge::merge_values(
        &mut root,
        orientation_style(
            props.orientation,
            json!({ "w": "100%" }),
            json!({ "h": "100%" }),
        ),
    );

    let mut thumb = json!({
        "position": "absolute",
        "zIndex": 1,
        "rounded": "full",
        "bg": "white",
        "shadow": "sm",
        "border": "1px solid",
        "borderColor": "transparent",
        "transition": "transform 0.2s",
        "_focus": { "shadow": "outline" },
        "_disabled": { "bg": "gray.300" }
    });
    crate::merge::merge_values(
        &mut thumb,
        orientation_style(
            props.orientation,
            json!({
                "top": "50%",
                "transform": "translateY(-50%)",
                "_active": { "transform": "translateY(-50%) scale(1.15)" }
            }),
            json!({
                "left": "50%",
                "transform": "translateX(-50%)",
                "_active": { "transform": "translateX(-50%) scale(1.15)" }
            }),
        ),
    );

    json!({
        "Root": root,
        "Track": {
            "position": "relative",
            "overflow": "hidden",
            "rounded": "sm",
            "bg": props.color_mode.pick("gray.200", "whiteAlpha.200"),
            "_disabled": {
                "bg": props.color_mode.pick("gray.300", "whiteAlpha.300")
            }
        },
        "Thumb": thumb,
        "FilledTrack": {
            "position": "absolute",
            "bg": props.color_mode.pick(format!("{scheme}.500"), format!("{scheme}.200"))
        }
    })
}

fn slider_size_style(size: &str, props: &ThemeProps) -> Option<Value> {
    let (thumb, track) = match size {
        "lg" => ("16px", "4px"),
        "md" => ("14px", "4px"),
        "sm" => ("10px", "2px"),
        _ => return None,
    };
    Some(json!({
        "Thumb": { "w": thumb, "h": thumb },
        "Track": orientation_style(
            props.orientation,
            json!({ "h": track }),
            json!({ "w": track }),
        ),
        "FilledTrack": orientation_style(
            props.orientation,
            json!({ "h": "100%" }),
            json!({ "w": "100%" }),
        )
    }))
}

/// Modal preset with `Overlay`, `Content`, `Header`, `Body`, `Footer`, and `CloseButton` parts.
pub fn modal() -> ComponentTheme {
    ComponentTheme::new(
        "md",
        &[
            "xs", "sm", "md", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "full",
        ],
        modal_base_style,
        modal_size_style,
    )
}

fn modal_base_style(props: &ThemeProps) -> Value {
    json!({
        "Overlay": {
            "pos": "fixed",
            "left": "0",
            "top": "0",
            "w": "100vw",
            "h": "100vh",
            "bg": "rgba(0,0,0,0.4)"
        },
        "Content": {
            "pos": "relative",
            "d": "flex",
            "flexDir": "column",
            "w": "100%",
            "outline": 0,
            "rounded": { "md": "lg" },
            "bg": props.color_mode.pick("white", "gray.700"),
            "shadow": props.color_mode.pick(
                "0 7px 14px 0 rgba(0,0,0, 0.1), 0 3px 6px 0 rgba(0, 0, 0, .07)",
                "rgba(0, 0, 0, 0.1) 0px 0px 0px 1px, rgba(0, 0, 0, 0.2) 0px 5px 10px, rgba(0, 0, 0, 0.4) 0px 15px 40px",
            )
        },
        "Header": {
            "px": 6,
            "py": 4,
            "position": "relative",
            "fontSize": "xl",
            "fontWeight": "semibold"
        },
        "Body": { "px": 6, "py": 2, "flex": 1 },
        "Footer": {
            "d": "flex",
            "px": 6,
            "py": 4,
            "justifyContent": "flex-end"
        },
        "CloseButton": {
            "position": "absolute",
            "top": "8px",
            "right": "12px"
        }
    })
}

fn modal_size_style(size: &str, _props: &ThemeProps) -> Option<Value> {
    if size == "full" {
        return Some(json!({ "Content": { "maxW": "100vw", "minH": "100vh" } }));
    }
    modal()
        .size_names
        .contains(&size)
        .then(|| json!({ "Content": { "maxW": size } }))
}

/// Positioning for the fixed wrapper around modal content.
pub fn modal_wrapper_style(is_centered: bool, scroll_behavior: ScrollBehavior) -> StyleObject {
    let mut style = into_object(json!({
        "pos": "fixed",
        "left": "0",
        "top": "0",
        "w": "100%",
        "h": "100%"
    }));
    if is_centered {
        merge_style_objects(
            &mut style,
            into_object(json!({
                "display": "flex",
                "alignItems": "center",
                "justifyContent": "center"
            })),
        );
    }
    let scroll = match scroll_behavior {
        ScrollBehavior::Inside => json!({
            "maxHeight": "calc(100vh - 7.5rem)",
            "overflow": "hidden",
            "top": "3.75rem"
        }),
        ScrollBehavior::Outside => json!({ "overflowY": "auto", "overflowX": "hidden" }),
    };
    merge_style_objects(&mut style, into_object(scroll));
    style
}

/// Offsets for the modal content box itself.
pub fn modal_content_style(is_centered: bool, scroll_behavior: ScrollBehavior) -> StyleObject {
    let mut style = if is_centered {
        StyleObject::new()
    } else {
        into_object(json!({ "top": "3.75rem", "mx": "auto" }))
    };
    let scroll = match scroll_behavior {
        ScrollBehavior::Inside => json!({ "height": "100%" }),
        ScrollBehavior::Outside => json!({ "my": "3.75rem", "top": 0 }),
    };
    merge_style_objects(&mut style, into_object(scroll));
    style
}

/// Extra body styles for a modal scrolling on the inside.
pub fn modal_body_style(scroll_behavior: ScrollBehavior) -> StyleObject {
    match scroll_behavior {
        ScrollBehavior::Inside => into_object(json!({ "overflowY": "auto" })),
        ScrollBehavior::Outside => StyleObject::new(),
    }
}

/// Content opacity and transform for the frame before (`entered == false`) and after entry.
pub fn modal_transition_style(
    transition: ModalTransition,
    duration_ms: u32,
    entered: bool,
) -> StyleObject {
    let (from, to) = match transition {
        ModalTransition::SlideIn => ("translate3d(0, 10px, 0)", "translate3d(0, 0, 0)"),
        ModalTransition::Scale => ("scale(0.95)", "scale(1)"),
        ModalTransition::Immediate => return StyleObject::new(),
    };
    into_object(json!({
        "opacity": if entered { 1 } else { 0 },
        "transform": if entered { to } else { from },
        "transition": format!("opacity {duration_ms}ms ease-out, transform {duration_ms}ms ease-out")
    }))
}
