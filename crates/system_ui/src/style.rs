//! Generated-class injection for style objects.

use std::cell::RefCell;
use std::collections::HashSet;

use leptos::*;
use style_system::{StyleObject, StyledClass};

use crate::theme::use_theme;

#[derive(Debug, Default)]
/// Classes already emitted into the document, in insertion order.
pub struct StyleRegistry {
    seen: HashSet<String>,
    rules: Vec<String>,
}

impl StyleRegistry {
    /// Records a generated class. Returns `false` when it was already registered.
    pub fn register(&mut self, styled: &StyledClass) -> bool {
        if !self.seen.insert(styled.class_name.clone()) {
            return false;
        }
        self.rules.push(styled.css.clone());
        true
    }

    /// Whether `class_name` has been registered.
    pub fn contains(&self, class_name: &str) -> bool {
        self.seen.contains(class_name)
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Concatenated CSS of every registered class.
    pub fn stylesheet(&self) -> String {
        self.rules.concat()
    }
}

thread_local! {
    static REGISTRY: RefCell<StyleRegistry> = RefCell::new(StyleRegistry::default());
}

/// Emits `styled` into the document head once per class name.
pub fn inject_style(styled: &StyledClass) {
    let inserted = REGISTRY.with(|registry| registry.borrow_mut().register(styled));
    if inserted {
        append_style_element(styled);
    }
}

/// CSS of every class injected on this thread.
pub fn collected_styles() -> String {
    REGISTRY.with(|registry| registry.borrow().stylesheet())
}

#[cfg(target_arch = "wasm32")]
fn append_style_element(styled: &StyledClass) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Some(head) = document.head() else {
        return;
    };
    let Ok(element) = document.create_element("style") else {
        return;
    };
    let _ = element.set_attribute("data-ui-style", &styled.class_name);
    element.set_text_content(Some(&styled.css));
    if let Err(err) = head.append_child(&element) {
        logging::warn!("style injection failed: {err:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn append_style_element(_: &StyledClass) {}

/// Reactive class name for a style object resolved through the current theme.
///
/// The CSS is injected the first time each distinct class is produced.
pub fn use_style_class(style: impl Fn() -> StyleObject + 'static) -> Signal<String> {
    let engine = use_theme().engine;
    Signal::derive(move || {
        let props = style();
        let styled = engine.with_value(|engine| engine.css(&props));
        inject_style(&styled);
        styled.class_name
    })
}

/// Joins a component's base class with its generated class.
pub(crate) fn class_list(base: &str, generated: &str) -> String {
    if generated.is_empty() {
        base.to_string()
    } else {
        format!("{base} {generated}")
    }
}
