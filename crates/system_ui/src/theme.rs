//! Theme provider, color-mode context, and color-mode persistence.

use leptos::*;
use overlay_runtime::PortalManager;
use style_system::{ColorMode, StyleEngine, Theme, TokenConfig};

/// `localStorage` key holding the chosen color mode.
pub const COLOR_MODE_KEY: &str = "ui-color-mode";

#[derive(Debug, Clone, Copy, Default)]
/// Color-mode preference store backed by `window.localStorage`.
pub struct ColorModeStore;

impl ColorModeStore {
    /// Loads the persisted color mode, if one was saved and parses.
    pub fn load(self) -> Option<ColorMode> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            let raw = storage.get_item(COLOR_MODE_KEY).ok().flatten()?;
            raw.parse().ok()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    /// Persists a color mode.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails.
    pub fn save(self, mode: ColorMode) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(COLOR_MODE_KEY, mode.as_str())
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = mode;
            Ok(())
        }
    }
}

#[derive(Clone, Copy)]
/// Leptos context carrying the style engine, color mode, and portal layers.
pub struct ThemeContext {
    /// Explicitly constructed style pipeline.
    pub engine: StoredValue<StyleEngine>,
    /// Active color mode.
    pub color_mode: RwSignal<ColorMode>,
    /// Stacking for nested portals and modals.
    pub portals: StoredValue<PortalManager>,
}

impl ThemeContext {
    fn new(engine: StyleEngine, color_mode: ColorMode) -> Self {
        Self {
            engine: store_value(engine),
            color_mode: create_rw_signal(color_mode),
            portals: store_value(PortalManager::default()),
        }
    }
}

#[component]
/// Provides [`ThemeContext`] to descendants and restores the persisted color mode.
pub fn ThemeProvider(
    /// Theme scales and breakpoints; the default theme when omitted.
    #[prop(optional)]
    theme: Option<Theme>,
    /// Shorthand registry; the standard registry when omitted.
    #[prop(optional)]
    config: Option<TokenConfig>,
    /// Skip reading and writing the stored color mode.
    #[prop(optional)]
    ephemeral: bool,
    children: Children,
) -> impl IntoView {
    let theme = theme.unwrap_or_default();
    let initial = if ephemeral {
        theme.initial_color_mode
    } else {
        ColorModeStore.load().unwrap_or(theme.initial_color_mode)
    };
    let engine = StyleEngine::new(theme, config.unwrap_or_else(TokenConfig::standard));
    let context = ThemeContext::new(engine, initial);
    provide_context(context);

    if !ephemeral {
        create_effect(move |_| {
            let mode = context.color_mode.get();
            if let Err(err) = ColorModeStore.save(mode) {
                logging::warn!("color mode persist failed: {err}");
            }
        });
    }

    view! {
        <div
            class="ui-theme-root"
            data-ui-primitive="true"
            data-ui-kind="theme-root"
            data-ui-color-mode=move || context.color_mode.get().as_str()
        >
            {children()}
        </div>
    }
}

/// Returns the nearest [`ThemeContext`], or a default-theme context when no provider is mounted.
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().unwrap_or_else(|| {
        let context = ThemeContext::new(StyleEngine::default(), ColorMode::default());
        provide_context(context);
        context
    })
}

#[derive(Clone, Copy)]
/// Read/write access to the active color mode.
pub struct ColorModeContext {
    mode: RwSignal<ColorMode>,
}

impl ColorModeContext {
    /// Current mode (tracked).
    pub fn get(&self) -> ColorMode {
        self.mode.get()
    }

    /// Reactive view of the mode.
    pub fn signal(&self) -> Signal<ColorMode> {
        self.mode.into()
    }

    /// Sets the mode.
    pub fn set(&self, mode: ColorMode) {
        self.mode.set(mode);
    }

    /// Switches between light and dark.
    pub fn toggle(&self) {
        self.mode.update(|mode| *mode = mode.toggle());
    }
}

/// Color-mode accessor for the nearest [`ThemeProvider`].
pub fn use_color_mode() -> ColorModeContext {
    ColorModeContext {
        mode: use_theme().color_mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_store_has_nothing_persisted() {
        assert_eq!(ColorModeStore.load(), None);
        assert!(ColorModeStore.save(ColorMode::Dark).is_ok());
    }

    #[test]
    fn toggle_flips_context_mode() {
        let runtime = create_runtime();
        let context = use_color_mode();
        assert_eq!(context.get(), ColorMode::Light);
        context.toggle();
        assert_eq!(context.get(), ColorMode::Dark);
        context.set(ColorMode::Light);
        assert_eq!(context.signal().get_untracked(), ColorMode::Light);
        runtime.dispose();
    }
}
