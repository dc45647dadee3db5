use serde_json::{json, Value};

use super::*;
use crate::style::{class_list, use_style_class};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One breadcrumb step.
pub struct BreadcrumbEntry {
    /// Visible text.
    pub label: String,
    /// Link target; the current page is never rendered as a link.
    pub href: Option<String>,
    /// Marks this step as the current page.
    pub is_current: bool,
}

impl BreadcrumbEntry {
    /// Step without a link target.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
            is_current: false,
        }
    }

    /// Current-page step, rendered as plain text with `aria-current="page"`.
    pub fn current(label: impl Into<String>) -> Self {
        Self {
            is_current: true,
            ..Self::new(label)
        }
    }

    /// Step linking to `href`.
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
            is_current: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Rendered breadcrumb node.
pub enum BreadcrumbNode {
    /// The item at `index`.
    Item {
        /// Position in the entry list.
        index: usize,
        /// Marks the current page (`aria-current="page"`).
        is_current: bool,
    },
    /// Separator following the item at `after`.
    Separator {
        /// Index of the preceding item.
        after: usize,
    },
}

/// Item and separator sequence for `count` entries.
///
/// Separators appear only between items. Only an in-range `current` marks a current page.
pub fn breadcrumb_layout(count: usize, current: Option<usize>) -> Vec<BreadcrumbNode> {
    let current = current.filter(|index| *index < count);
    let mut nodes = Vec::with_capacity(count.saturating_mul(2));
    for index in 0..count {
        if index > 0 {
            nodes.push(BreadcrumbNode::Separator { after: index - 1 });
        }
        nodes.push(BreadcrumbNode::Item {
            index,
            is_current: current == Some(index),
        });
    }
    nodes
}

/// The `current` override, or the first entry flagged current.
fn current_index(entries: &[BreadcrumbEntry], current: Option<usize>) -> Option<usize> {
    current.or_else(|| entries.iter().position(|entry| entry.is_current))
}

fn object(value: Value) -> StyleObject {
    match value {
        Value::Object(map) => map,
        _ => StyleObject::new(),
    }
}

#[component]
/// Ordered trail of links with separators between steps.
pub fn Breadcrumb(
    #[prop(into)] items: MaybeSignal<Vec<BreadcrumbEntry>>,
    #[prop(optional, into)] separator: Option<String>,
    #[prop(optional, into)] spacing: Option<Value>,
    /// Index of the current page; overrides [`BreadcrumbEntry::is_current`].
    #[prop(optional, into)]
    current: MaybeSignal<Option<usize>>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    #[prop(optional)] layout_class: Option<&'static str>,
) -> impl IntoView {
    let separator = separator.unwrap_or_else(|| "/".to_string());
    let spacing = spacing.unwrap_or_else(|| json!(2));
    let generated = use_style_class(move || sx.get());
    let list_class = use_style_class(|| object(json!({ "d": "flex", "alignItems": "center" })));
    let base = merge_layout_class("ui-breadcrumb", layout_class);

    view! {
        <nav
            class=move || class_list(&base, &generated.get())
            aria-label=aria_label.unwrap_or_else(|| "breadcrumb".to_string())
            data-ui-primitive="true"
            data-ui-kind="breadcrumb"
        >
            <ol class=move || list_class.get()>
                {move || {
                    let entries = items.get();
                    breadcrumb_layout(entries.len(), current_index(&entries, current.get()))
                        .into_iter()
                        .map(|node| match node {
                            BreadcrumbNode::Separator { .. } => {
                                let spacing = spacing.clone();
                                let separator = separator.clone();
                                view! {
                                    <BreadcrumbSeparator spacing=spacing>{separator}</BreadcrumbSeparator>
                                }
                                .into_view()
                            }
                            BreadcrumbNode::Item { index, is_current } => {
                                let entry = entries[index].clone();
                                view! {
                                    <BreadcrumbItem is_current=is_current>
                                        <BreadcrumbLink href=entry.href is_current=is_current>
                                            {entry.label}
                                        </BreadcrumbLink>
                                    </BreadcrumbItem>
                                }
                                .into_view()
                            }
                        })
                        .collect_view()
                }}
            </ol>
        </nav>
    }
}

#[component]
/// List item wrapping one breadcrumb step.
pub fn BreadcrumbItem(
    #[prop(optional)] is_current: bool,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    children: Children,
) -> impl IntoView {
    let generated = use_style_class(move || {
        with_sx(object(json!({ "d": "inline-flex", "alignItems": "center" })), sx.get())
    });
    view! {
        <li
            class=move || class_list("ui-breadcrumb-item", &generated.get())
            data-ui-primitive="true"
            data-ui-kind="breadcrumb-item"
            data-ui-current=bool_token(is_current)
        >
            {children()}
        </li>
    }
}

#[component]
/// Link for a breadcrumb step; the current page renders as plain text.
pub fn BreadcrumbLink(
    #[prop(default = None, into)] href: Option<String>,
    #[prop(optional)] is_current: bool,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    children: Children,
) -> impl IntoView {
    let generated = use_style_class(move || {
        with_sx(
            object(json!({
                "transition": "all 0.15s ease-out",
                "cursor": "pointer",
                "textDecoration": "none",
                "outline": "none",
                "color": "inherit",
                "_hover": { "textDecoration": "underline" },
                "_focus": { "shadow": "outline" }
            })),
            sx.get(),
        )
    });
    let class = move || class_list("ui-breadcrumb-link", &generated.get());
    if is_current {
        return view! {
            <span
                class=class
                aria-current="page"
                data-ui-primitive="true"
                data-ui-kind="breadcrumb-link"
            >
                {children()}
            </span>
        }
        .into_view();
    }
    view! {
        <a class=class href=href data-ui-primitive="true" data-ui-kind="breadcrumb-link">
            {children()}
        </a>
    }
    .into_view()
}

#[component]
/// Decorative divider between breadcrumb steps.
pub fn BreadcrumbSeparator(
    #[prop(optional, into)] spacing: Option<Value>,
    children: Children,
) -> impl IntoView {
    let spacing = spacing.unwrap_or_else(|| json!(2));
    let generated = use_style_class(move || object(json!({ "mx": spacing.clone() })));
    view! {
        <li
            class=move || class_list("ui-breadcrumb-separator", &generated.get())
            role="presentation"
            data-ui-primitive="true"
            data-ui-kind="breadcrumb-separator"
        >
            {children()}
        </li>
    }
}
