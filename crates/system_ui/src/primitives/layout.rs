use serde_json::{json, Value};

use super::*;
use crate::style::{class_list, use_style_class};

#[component]
/// Styled element that resolves an `sx` style object through the theme.
pub fn Box(
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    #[prop(optional)] as_tag: Option<&'static str>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] role: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] ui_kind: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let generated = use_style_class(move || sx.get());
    let base = merge_layout_class("ui-box", layout_class);
    html::custom(html::Custom::new(as_tag.unwrap_or("div")))
        .attr("class", move || class_list(&base, &generated.get()))
        .attr("id", id)
        .attr("role", role)
        .attr("aria-label", aria_label)
        .attr("data-ui-primitive", "true")
        .attr("data-ui-kind", ui_kind.unwrap_or("box"))
        .child(children())
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Flexbox shorthands. Each value may be a plain value or a responsive map/array.
pub struct FlexOptions {
    /// `flexDirection`.
    pub direction: Option<Value>,
    /// `alignItems`.
    pub align: Option<Value>,
    /// `justifyContent`.
    pub justify: Option<Value>,
    /// `flexWrap`.
    pub wrap: Option<Value>,
    /// `flexBasis`.
    pub basis: Option<Value>,
    /// `flexGrow`.
    pub grow: Option<Value>,
    /// `flexShrink`.
    pub shrink: Option<Value>,
}

fn insert_some(style: &mut StyleObject, entries: &[(&str, &Option<Value>)]) {
    for (property, value) in entries {
        if let Some(value) = value {
            style.insert(property.to_string(), value.clone());
        }
    }
}

impl FlexOptions {
    /// `display: flex` plus every set shorthand.
    pub fn to_style(&self) -> StyleObject {
        let mut style = StyleObject::new();
        style.insert("display".to_string(), json!("flex"));
        insert_some(
            &mut style,
            &[
                ("flexDirection", &self.direction),
                ("alignItems", &self.align),
                ("justifyContent", &self.justify),
                ("flexWrap", &self.wrap),
                ("flexBasis", &self.basis),
                ("flexGrow", &self.grow),
                ("flexShrink", &self.shrink),
            ],
        );
        style
    }
}

#[component]
/// Flex container.
pub fn Flex(
    #[prop(optional, into)] direction: Option<Value>,
    #[prop(optional, into)] align: Option<Value>,
    #[prop(optional, into)] justify: Option<Value>,
    #[prop(optional, into)] wrap: Option<Value>,
    #[prop(optional, into)] basis: Option<Value>,
    #[prop(optional, into)] grow: Option<Value>,
    #[prop(optional, into)] shrink: Option<Value>,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    #[prop(optional)] as_tag: Option<&'static str>,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let options = FlexOptions {
        direction,
        align,
        justify,
        wrap,
        basis,
        grow,
        shrink,
    };
    let style = Signal::derive(move || with_sx(options.to_style(), sx.get()));
    view! {
        <Box
            sx=style
            as_tag=as_tag.unwrap_or("div")
            layout_class=layout_class.unwrap_or("")
            ui_kind="flex"
        >
            {children()}
        </Box>
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Grid shorthands mapped onto `grid*` properties.
pub struct GridOptions {
    /// `gridTemplateColumns`.
    pub template_columns: Option<Value>,
    /// `gridTemplateRows`.
    pub template_rows: Option<Value>,
    /// `gridTemplateAreas`.
    pub template_areas: Option<Value>,
    /// `gridGap`.
    pub gap: Option<Value>,
    /// `gridRowGap`.
    pub row_gap: Option<Value>,
    /// `gridColumnGap`.
    pub column_gap: Option<Value>,
    /// `gridAutoFlow`.
    pub auto_flow: Option<Value>,
    /// `gridAutoRows`.
    pub auto_rows: Option<Value>,
    /// `gridAutoColumns`.
    pub auto_columns: Option<Value>,
    /// `gridArea`.
    pub area: Option<Value>,
    /// `gridColumn`.
    pub column: Option<Value>,
    /// `gridRow`.
    pub row: Option<Value>,
}

impl GridOptions {
    /// `display: grid` plus every set shorthand.
    pub fn to_style(&self) -> StyleObject {
        let mut style = StyleObject::new();
        style.insert("display".to_string(), json!("grid"));
        insert_some(
            &mut style,
            &[
                ("gridTemplateColumns", &self.template_columns),
                ("gridTemplateRows", &self.template_rows),
                ("gridTemplateAreas", &self.template_areas),
                ("gridGap", &self.gap),
                ("gridRowGap", &self.row_gap),
                ("gridColumnGap", &self.column_gap),
                ("gridAutoFlow", &self.auto_flow),
                ("gridAutoRows", &self.auto_rows),
                ("gridAutoColumns", &self.auto_columns),
                ("gridArea", &self.area),
                ("gridColumn", &self.column),
                ("gridRow", &self.row),
            ],
        );
        style
    }
}

#[component]
/// CSS grid container.
pub fn Grid(
    #[prop(optional, into)] template_columns: Option<Value>,
    #[prop(optional, into)] template_rows: Option<Value>,
    #[prop(optional, into)] template_areas: Option<Value>,
    #[prop(optional, into)] gap: Option<Value>,
    #[prop(optional, into)] row_gap: Option<Value>,
    #[prop(optional, into)] column_gap: Option<Value>,
    #[prop(optional, into)] auto_flow: Option<Value>,
    #[prop(optional, into)] auto_rows: Option<Value>,
    #[prop(optional, into)] auto_columns: Option<Value>,
    #[prop(optional, into)] area: Option<Value>,
    #[prop(optional, into)] column: Option<Value>,
    #[prop(optional, into)] row: Option<Value>,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    #[prop(optional)] as_tag: Option<&'static str>,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let options = GridOptions {
        template_columns,
        template_rows,
        template_areas,
        gap,
        row_gap,
        column_gap,
        auto_flow,
        auto_rows,
        auto_columns,
        area,
        column,
        row,
    };
    let style = Signal::derive(move || with_sx(options.to_style(), sx.get()));
    view! {
        <Box
            sx=style
            as_tag=as_tag.unwrap_or("div")
            layout_class=layout_class.unwrap_or("")
            ui_kind="grid"
        >
            {children()}
        </Box>
    }
}

/// `padding-bottom` percentage that gives a box the `ratio` (width / height) aspect.
///
/// Non-positive or non-finite ratios fall back to a square.
pub fn aspect_ratio_padding(ratio: f64) -> String {
    let ratio = if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    };
    let percent = (100.0 / ratio * 10_000.0).round() / 10_000.0;
    format!("{percent}%")
}

fn aspect_ratio_style(ratio: f64) -> StyleObject {
    let style = json!({
        "position": "relative",
        "&::before": {
            "height": 0,
            "content": "\"\"",
            "display": "block",
            "paddingBottom": aspect_ratio_padding(ratio)
        },
        "& > *": {
            "overflow": "hidden",
            "position": "absolute",
            "top": 0,
            "right": 0,
            "bottom": 0,
            "left": 0,
            "display": "flex",
            "justifyContent": "center",
            "alignItems": "center",
            "width": "100%",
            "height": "100%"
        },
        "& > img, & > video": { "objectFit": "cover" }
    });
    match style {
        Value::Object(map) => map,
        _ => StyleObject::new(),
    }
}

#[component]
/// Keeps its single child at a fixed width-to-height ratio.
pub fn AspectRatio(
    #[prop(default = 1.0)] ratio: f64,
    #[prop(optional, into)] max_w: Option<Value>,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let style = Signal::derive(move || {
        let mut style = aspect_ratio_style(ratio);
        if let Some(max_w) = max_w.clone() {
            style.insert("maxW".to_string(), max_w);
        }
        with_sx(style, sx.get())
    });
    view! {
        <Box sx=style layout_class=layout_class.unwrap_or("") ui_kind="aspect-ratio">
            {children()}
        </Box>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flex_options_emit_only_set_shorthands() {
        let options = FlexOptions {
            direction: Some(json!(["column", "row"])),
            justify: Some(json!("space-between")),
            grow: Some(json!(1)),
            ..FlexOptions::default()
        };
        assert_eq!(
            Value::Object(options.to_style()),
            json!({
                "display": "flex",
                "flexDirection": ["column", "row"],
                "justifyContent": "space-between",
                "flexGrow": 1
            })
        );
    }

    #[test]
    fn grid_options_map_to_grid_properties() {
        let options = GridOptions {
            template_columns: Some(json!("repeat(3, 1fr)")),
            gap: Some(json!(4)),
            auto_flow: Some(json!("row dense")),
            ..GridOptions::default()
        };
        assert_eq!(
            Value::Object(options.to_style()),
            json!({
                "display": "grid",
                "gridTemplateColumns": "repeat(3, 1fr)",
                "gridGap": 4,
                "gridAutoFlow": "row dense"
            })
        );
    }

    #[test]
    fn aspect_ratio_padding_inverts_ratio() {
        assert_eq!(aspect_ratio_padding(1.0), "100%");
        assert_eq!(aspect_ratio_padding(16.0 / 9.0), "56.25%");
        assert_eq!(aspect_ratio_padding(4.0 / 3.0), "75%");
        assert_eq!(aspect_ratio_padding(0.0), "100%");
        assert_eq!(aspect_ratio_padding(f64::NAN), "100%");
    }

    #[test]
    fn aspect_ratio_children_fill_the_box() {
        let style = aspect_ratio_style(2.0);
        assert_eq!(style["&::before"]["paddingBottom"], json!("50%"));
        assert_eq!(style["& > *"]["position"], json!("absolute"));
    }
}
