use style_system::{presets, Orientation, ThemeProps};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use super::*;
use crate::style::{class_list, use_style_class};
use crate::theme::use_theme;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Bounded, stepped slider value.
pub struct SliderValue {
    min: f64,
    max: f64,
    step: f64,
    value: f64,
}

fn step_decimals(step: f64) -> i32 {
    let text = step.to_string();
    text.split_once('.')
        .map(|(_, fraction)| fraction.len() as i32)
        .unwrap_or(0)
}

impl SliderValue {
    /// Range `[min, max]` moving in `step` increments, starting at `value` snapped into range.
    ///
    /// Inverted bounds are swapped; a non-positive or non-finite step becomes `1`.
    pub fn new(min: f64, max: f64, step: f64, value: f64) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            1.0
        };
        let mut model = Self {
            min,
            max,
            step,
            value: min,
        };
        model.value = model.snap(value);
        model
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Increment between selectable values.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Same range holding `value`, snapped.
    pub fn with_value(self, value: f64) -> Self {
        Self {
            value: self.snap(value),
            ..self
        }
    }

    /// Clamps `raw` into range and rounds it to the nearest step from `min`.
    pub fn snap(&self, raw: f64) -> f64 {
        if !raw.is_finite() {
            return self.min;
        }
        let clamped = raw.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        let factor = 10f64.powi(step_decimals(self.step));
        let snapped = ((self.min + steps * self.step) * factor).round() / factor;
        snapped.clamp(self.min, self.max)
    }

    /// Position of the value along the track, `0..=100`.
    pub fn percent(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        (self.value - self.min) / span * 100.0
    }

    /// PageUp/PageDown increment: a tenth of the range.
    pub fn page_step(&self) -> f64 {
        (self.max - self.min) / 10.0
    }

    /// Value a keyboard key moves to, or `None` for keys the slider ignores.
    pub fn key_target(&self, key: &str) -> Option<f64> {
        let target = match key {
            "ArrowRight" | "ArrowUp" => self.value + self.step,
            "ArrowLeft" | "ArrowDown" => self.value - self.step,
            "PageUp" => self.value + self.page_step(),
            "PageDown" => self.value - self.page_step(),
            "Home" => self.min,
            "End" => self.max,
            _ => return None,
        };
        Some(self.snap(target))
    }

    /// Snapped value at `fraction` (`0..=1`) of the track.
    pub fn from_fraction(&self, fraction: f64) -> f64 {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.snap(self.min + fraction * (self.max - self.min))
    }
}

/// Fraction of the track under the pointer.
///
/// Horizontal tracks measure from the left edge (`origin`); vertical tracks from the bottom edge,
/// so `origin` is the rect's bottom and values grow upward.
pub fn pointer_fraction(orientation: Orientation, origin: f64, length: f64, pointer: f64) -> f64 {
    if length <= 0.0 {
        return 0.0;
    }
    let offset = match orientation {
        Orientation::Horizontal => pointer - origin,
        Orientation::Vertical => origin - pointer,
    };
    (offset / length).clamp(0.0, 1.0)
}

fn thumb_offset(size: &str) -> f64 {
    match size {
        "sm" => 5.0,
        "lg" => 8.0,
        _ => 7.0,
    }
}

fn thumb_position(orientation: Orientation, percent: f64, offset: f64) -> String {
    let edge = match orientation {
        Orientation::Horizontal => "left",
        Orientation::Vertical => "bottom",
    };
    format!("{edge}: calc({percent}% - {offset}px);")
}

fn filled_track_position(orientation: Orientation, percent: f64) -> String {
    match orientation {
        Orientation::Horizontal => format!("left: 0; width: {percent}%;"),
        Orientation::Vertical => format!("bottom: 0; height: {percent}%;"),
    }
}

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

#[component]
/// Range input with a draggable, keyboard-operable thumb.
///
/// Pass `value` to control the slider; otherwise it keeps its own state seeded from
/// `default_value`.
pub fn Slider(
    #[prop(optional, into)] value: Option<Signal<f64>>,
    #[prop(optional)] default_value: Option<f64>,
    #[prop(default = 0.0)] min: f64,
    #[prop(default = 100.0)] max: f64,
    #[prop(default = 1.0)] step: f64,
    #[prop(optional)] orientation: Orientation,
    #[prop(optional, into)] is_disabled: MaybeSignal<bool>,
    #[prop(optional, into)] color_scheme: Option<String>,
    #[prop(optional, into)] size: Option<String>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] name: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] on_change: Option<Callback<f64>>,
    #[prop(optional)] on_change_end: Option<Callback<f64>>,
    #[prop(optional, into)] sx: MaybeSignal<StyleObject>,
    #[prop(optional)] layout_class: Option<&'static str>,
) -> impl IntoView {
    let is_disabled = Signal::derive(move || is_disabled.get());
    let theme = use_theme();
    let preset = presets::slider();
    let size = size.unwrap_or_else(|| preset.default_size.to_string());
    let offset = thumb_offset(&size);
    let props = store_value(ThemeProps {
        color_mode: theme.color_mode.get_untracked(),
        color_scheme: color_scheme.unwrap_or_else(|| "blue".to_string()),
        orientation,
        size: Some(size),
    });
    let part = move |name: &'static str| {
        move || {
            let mut props = props.get_value();
            props.color_mode = theme.color_mode.get();
            preset.part(&props, name)
        }
    };
    let root_class = use_style_class({
        let root = part("Root");
        move || with_sx(root(), sx.get())
    });
    let track_class = use_style_class(part("Track"));
    let filled_class = use_style_class(part("FilledTrack"));
    let thumb_class = use_style_class(part("Thumb"));

    let model = SliderValue::new(min, max, step, default_value.unwrap_or(min));
    let internal = create_rw_signal(model.value());
    let current = Signal::derive(move || {
        let raw = value.map(|value| value.get()).unwrap_or_else(|| internal.get());
        model.with_value(raw)
    });
    let dragging = create_rw_signal(false);
    let root_ref = create_node_ref::<html::Div>();
    let thumb_ref = create_node_ref::<html::Div>();

    let commit = move |raw: f64| {
        let next = model.snap(raw);
        if next == current.get_untracked().value() {
            return;
        }
        internal.set(next);
        if let Some(on_change) = on_change {
            on_change.call(next);
        }
    };
    let finish = move || {
        if let Some(on_change_end) = on_change_end {
            on_change_end.call(current.get_untracked().value());
        }
    };
    let track_pointer = move |ev: &web_sys::PointerEvent| {
        let Some(root) = root_ref.get_untracked() else {
            return;
        };
        let rect = root.get_bounding_client_rect();
        let fraction = match orientation {
            Orientation::Horizontal => pointer_fraction(
                orientation,
                rect.left(),
                rect.width(),
                f64::from(ev.client_x()),
            ),
            Orientation::Vertical => pointer_fraction(
                orientation,
                rect.bottom(),
                rect.height(),
                f64::from(ev.client_y()),
            ),
        };
        commit(model.from_fraction(fraction));
    };

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if is_disabled.get_untracked() || ev.button() != 0 {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        dragging.set(true);
        track_pointer(&ev);
        if let Some(thumb) = thumb_ref.get_untracked() {
            let _ = thumb.focus();
        }
    };
    let on_pointermove = move |ev: web_sys::PointerEvent| {
        if dragging.get_untracked() {
            track_pointer(&ev);
        }
    };
    let on_pointerup = move |_: web_sys::PointerEvent| {
        if dragging.get_untracked() {
            dragging.set(false);
            finish();
        }
    };
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if is_disabled.get_untracked() {
            return;
        }
        let Some(target) = current.get_untracked().key_target(&ev.key()) else {
            return;
        };
        ev.prevent_default();
        commit(target);
        finish();
    };

    let base = merge_layout_class("ui-slider", layout_class);
    let disabled_attr = move || is_disabled.get().then_some("");

    view! {
        <div
            node_ref=root_ref
            class=move || class_list(&base, &root_class.get())
            id=id
            data-ui-primitive="true"
            data-ui-kind="slider"
            data-ui-orientation=orientation.as_str()
            aria-disabled=move || bool_token(is_disabled.get())
            data-disabled=disabled_attr
            on:pointerdown=on_pointerdown
            on:pointermove=on_pointermove
            on:pointerup=on_pointerup
            on:pointercancel=on_pointerup
        >
            <input type="hidden" name=name value=move || current.get().value().to_string()/>
            <div
                class=move || class_list("ui-slider-track", &track_class.get())
                data-ui-slot="track"
                data-disabled=disabled_attr
            >
                <div
                    class=move || class_list("ui-slider-filled-track", &filled_class.get())
                    data-ui-slot="filled-track"
                    style=move || filled_track_position(orientation, current.get().percent())
                ></div>
            </div>
            <div
                node_ref=thumb_ref
                class=move || class_list("ui-slider-thumb", &thumb_class.get())
                data-ui-slot="thumb"
                role="slider"
                tabindex=move || if is_disabled.get() { "-1" } else { "0" }
                aria-label=aria_label
                aria-valuemin=model.min().to_string()
                aria-valuemax=model.max().to_string()
                aria-valuenow=move || current.get().value().to_string()
                aria-orientation=orientation.as_str()
                aria-disabled=move || bool_token(is_disabled.get())
                data-disabled=disabled_attr
                data-active=move || dragging.get().then_some("")
                style=move || thumb_position(orientation, current.get().percent(), offset)
                on:keydown=on_keydown
            ></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn disabled_slider_renders_disabled_and_unfocusable() {
        let runtime = create_runtime();
        let html = view! { <Slider default_value=5.0 is_disabled=true aria_label="Level" /> }
            .into_view()
            .render_to_string()
            .to_string();
        assert_eq!(html.matches(r#"aria-disabled="true""#).count(), 2);
        assert!(html.contains(r#"tabindex="-1""#));
        assert!(html.contains(r#"aria-valuenow="5""#));
        runtime.dispose();
    }

    #[test]
    fn construction_normalizes_bounds_and_step() {
        let model = SliderValue::new(10.0, 0.0, -2.0, 42.0);
        assert_eq!((model.min(), model.max(), model.step()), (0.0, 10.0, 1.0));
        assert_eq!(model.value(), 10.0);
    }

    #[test]
    fn snapping_rounds_to_nearest_step_from_min() {
        let model = SliderValue::new(0.0, 100.0, 5.0, 0.0);
        assert_eq!(model.snap(12.4), 10.0);
        assert_eq!(model.snap(12.6), 15.0);
        assert_eq!(model.snap(-3.0), 0.0);
        assert_eq!(model.snap(f64::NAN), 0.0);

        let odd = SliderValue::new(1.0, 10.0, 3.0, 0.0);
        assert_eq!(odd.snap(5.0), 4.0);
        assert_eq!(odd.snap(9.9), 10.0);
    }

    #[test]
    fn fractional_steps_keep_their_precision() {
        let model = SliderValue::new(0.0, 1.0, 0.1, 0.0);
        assert_eq!(model.snap(0.3), 0.3);
        assert_eq!(model.with_value(0.26).value(), 0.3);
        assert_eq!(model.with_value(0.7).key_target("ArrowUp"), Some(0.8));
    }

    #[test]
    fn keyboard_moves_by_step_page_and_to_bounds() {
        let model = SliderValue::new(0.0, 100.0, 1.0, 50.0);
        assert_eq!(model.key_target("ArrowRight"), Some(51.0));
        assert_eq!(model.key_target("ArrowDown"), Some(49.0));
        assert_eq!(model.key_target("PageUp"), Some(60.0));
        assert_eq!(model.key_target("PageDown"), Some(40.0));
        assert_eq!(model.key_target("Home"), Some(0.0));
        assert_eq!(model.key_target("End"), Some(100.0));
        assert_eq!(model.key_target("Enter"), None);
        assert_eq!(model.with_value(100.0).key_target("ArrowUp"), Some(100.0));
    }

    #[test]
    fn percent_tracks_position_in_range() {
        let model = SliderValue::new(20.0, 60.0, 1.0, 30.0);
        assert_eq!(model.percent(), 25.0);
        assert_eq!(SliderValue::new(5.0, 5.0, 1.0, 5.0).percent(), 0.0);
    }

    #[test]
    fn pointer_fraction_measures_vertical_from_bottom() {
        assert_eq!(pointer_fraction(Orientation::Horizontal, 100.0, 200.0, 150.0), 0.25);
        assert_eq!(pointer_fraction(Orientation::Vertical, 300.0, 200.0, 250.0), 0.25);
        assert_eq!(pointer_fraction(Orientation::Horizontal, 0.0, 100.0, 500.0), 1.0);
        assert_eq!(pointer_fraction(Orientation::Horizontal, 0.0, 0.0, 5.0), 0.0);

        let model = SliderValue::new(0.0, 100.0, 10.0, 0.0);
        assert_eq!(model.from_fraction(0.26), 30.0);
    }

    #[test]
    fn thumb_is_centered_on_the_value() {
        assert_eq!(
            thumb_position(Orientation::Horizontal, 50.0, thumb_offset("md")),
            "left: calc(50% - 7px);"
        );
        assert_eq!(
            thumb_position(Orientation::Vertical, 10.0, thumb_offset("sm")),
            "bottom: calc(10% - 5px);"
        );
        assert_eq!(
            filled_track_position(Orientation::Vertical, 10.0),
            "bottom: 0; height: 10%;"
        );
    }
}
