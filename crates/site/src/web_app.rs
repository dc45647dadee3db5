use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use serde_json::{json, Value};
use system_ui::prelude::*;
use system_ui::Portal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Layout,
    Breadcrumb,
    Slider,
    Modal,
    Portal,
}

impl Section {
    const ALL: [Section; 5] = [
        Section::Layout,
        Section::Breadcrumb,
        Section::Slider,
        Section::Modal,
        Section::Portal,
    ];

    fn slug(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Breadcrumb => "breadcrumb",
            Self::Slider => "slider",
            Self::Modal => "modal",
            Self::Portal => "portal",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Layout => "Box, Flex, Grid, AspectRatio",
            Self::Breadcrumb => "Breadcrumb",
            Self::Slider => "Slider",
            Self::Modal => "Modal",
            Self::Portal => "Portal",
        }
    }

    fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.slug() == slug)
    }
}

fn sx(value: Value) -> StyleObject {
    match value {
        Value::Object(map) => map,
        _ => StyleObject::new(),
    }
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Component Showcase" />
        <Meta name="description" content="Live examples of the themeable component library." />

        <Router>
            <ThemeProvider>
                <main class="site-root">
                    <ShowcaseHeader />
                    <Routes>
                        <Route path="" view=ShowcaseHome />
                        <Route path="/components/:section" view=ComponentRoute />
                    </Routes>
                </main>
            </ThemeProvider>
        </Router>
    }
}

#[component]
fn ShowcaseHeader() -> impl IntoView {
    let color_mode = use_color_mode();
    view! {
        <Flex
            justify="space-between"
            align="center"
            sx=sx(json!({ "px": 6, "py": 4, "borderBottom": "1px solid", "borderColor": "gray.200" }))
        >
            <A href="/">"Components"</A>
            <button type="button" on:click=move |_| color_mode.toggle()>
                {move || match color_mode.get() {
                    ColorMode::Light => "Dark mode",
                    ColorMode::Dark => "Light mode",
                }}
            </button>
        </Flex>
    }
}

#[component]
pub fn ShowcaseHome() -> impl IntoView {
    view! {
        <Box sx=sx(json!({ "p": [4, 8] }))>
            {Section::ALL
                .into_iter()
                .map(|section| view! { <SectionView section=section /> })
                .collect_view()}
        </Box>
    }
}

#[component]
pub fn ComponentRoute() -> impl IntoView {
    let params = use_params_map();
    let section = move || {
        params.with(|map| map.get("section").and_then(|slug| Section::from_slug(slug)))
    };

    view! {
        <Box sx=sx(json!({ "p": [4, 8] }))>
            {move || match section() {
                Some(section) => view! { <SectionView section=section /> }.into_view(),
                None => view! { <p>"Unknown component."</p> }.into_view(),
            }}
        </Box>
    }
}

#[component]
fn SectionView(section: Section) -> impl IntoView {
    let body = match section {
        Section::Layout => view! { <LayoutDemo /> }.into_view(),
        Section::Breadcrumb => view! { <BreadcrumbDemo /> }.into_view(),
        Section::Slider => view! { <SliderDemo /> }.into_view(),
        Section::Modal => view! { <ModalDemo /> }.into_view(),
        Section::Portal => view! { <PortalDemo /> }.into_view(),
    };
    view! {
        <Box as_tag="section" sx=sx(json!({ "mb": 10 }))>
            <h2>
                <A href=format!("/components/{}", section.slug())>{section.title()}</A>
            </h2>
            {body}
        </Box>
    }
}

#[component]
fn LayoutDemo() -> impl IntoView {
    let tile = sx(json!({ "bg": "teal.100", "p": 4, "rounded": "md" }));
    let grid_tile = tile.clone();
    view! {
        <Flex direction=json!(["column", "row"]) justify="space-between" sx=sx(json!({ "mb": 4 }))>
            <Box sx=tile.clone()>"One"</Box>
            <Box sx=tile.clone()>"Two"</Box>
            <Box sx=tile.clone()>"Three"</Box>
        </Flex>
        <Grid template_columns="repeat(3, 1fr)" gap=4 sx=sx(json!({ "mb": 4 }))>
            {(1..=6)
                .map(|n| view! { <Box sx=grid_tile.clone()>{n}</Box> })
                .collect_view()}
        </Grid>
        <AspectRatio ratio={16.0 / 9.0} max_w="560px">
            <Box sx=sx(json!({ "bg": "gray.200" }))>"16:9"</Box>
        </AspectRatio>
    }
}

#[component]
fn BreadcrumbDemo() -> impl IntoView {
    let items = vec![
        BreadcrumbEntry::link("Home", "/"),
        BreadcrumbEntry::link("Components", "/components/layout"),
        BreadcrumbEntry::current("Breadcrumb"),
    ];
    view! {
        <Breadcrumb items=items.clone() />
        <Breadcrumb items=items separator="›" spacing=json!("8px") />
    }
}

#[component]
fn SliderDemo() -> impl IntoView {
    let value = create_rw_signal(30.0);
    view! {
        <Slider
            value=value
            aria_label="Volume"
            on_change=Callback::new(move |next| value.set(next))
        />
        <p>{move || format!("Value: {}", value.get())}</p>
        <Slider default_value=5.0 min=0.0 max=10.0 step=0.5 size="sm" color_scheme="teal" />
        <Box sx=sx(json!({ "h": "160px", "mt": 4 }))>
            <Slider orientation=Orientation::Vertical default_value=60.0 size="lg" />
        </Box>
        <Slider default_value=50.0 is_disabled=true />
    }
}

#[component]
fn ModalDemo() -> impl IntoView {
    let open = create_rw_signal(false);
    let last_reason = create_rw_signal(None::<CloseReason>);
    let on_close = Callback::new(move |reason: CloseReason| {
        last_reason.set(Some(reason));
        open.set(false);
    });

    view! {
        <button type="button" id="open-modal" on:click=move |_| open.set(true)>
            "Open modal"
        </button>
        <p>
            {move || {
                last_reason
                    .get()
                    .map(|reason| format!("Closed by: {}", reason.token()))
                    .unwrap_or_default()
            }}
        </p>
        <Modal
            is_open=open
            on_close=on_close
            id="demo-modal"
            initial_focus="demo-modal-name"
            is_centered=true
            size="md"
            transition=ModalTransition::Scale
            let:modal
        >
            <ModalOverlay handle=modal />
            <ModalContent handle=modal>
                <ModalHeader handle=modal>"Edit profile"</ModalHeader>
                <ModalCloseButton handle=modal />
                <ModalBody handle=modal>
                    <label for="demo-modal-name">"Name"</label>
                    <input id="demo-modal-name" type="text" />
                    <Slider aria_label="Opacity" default_value=80.0 />
                </ModalBody>
                <ModalFooter handle=modal>
                    <button type="button" on:click=move |_| modal.close()>"Done"</button>
                </ModalFooter>
            </ModalContent>
        </Modal>
    }
}

#[component]
fn PortalDemo() -> impl IntoView {
    view! {
        <Box sx=sx(json!({ "overflow": "hidden", "h": "40px", "border": "1px dashed" }))>
            "Clipped container"
            <Portal>
                <Box sx=sx(json!({ "pos": "fixed", "bottom": 4, "right": 4, "p": 3, "bg": "blue.100" }))>
                    "Rendered at the end of the document body"
                </Box>
            </Portal>
        </Box>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn section_slugs_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_slug(section.slug()), Some(section));
        }
        assert_eq!(Section::from_slug("unknown"), None);
    }
}
