use crate::app::Handle;
use crate::components::header::Header;
use crate::pages::biome::BiomePage;
use crate::pages::dex_list::DexListPage;
use crate::pages::drops::DropsPage;
use crate::pages::mon::{MonPage, WebCache};
use crate::pages::not_found::NotFound;
use crate::pages::preset::PresetPage;
use crate::pages::status::StatusPage;
use dexview_core::route::back_target;
use dexview_core::{AppView, Datasets, LoadState, Route};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct ShellViewProps {
    pub load_state: LoadState,
    pub datasets: Handle<Datasets>,
    pub cache: Handle<WebCache>,
    pub route: Route,
    #[prop_or_default]
    pub on_toggle_no_spawns: Callback<()>,
}

/// Header plus the page the current route selects. Nothing but the status screen
/// renders until the index has loaded.
#[function_component(ShellView)]
pub fn shell_view(props: &ShellViewProps) -> Html {
    let main = if props.load_state == LoadState::Ready {
        render_route(props)
    } else {
        html! { <StatusPage state={props.load_state.clone()} /> }
    };
    html! {
        <>
            <Header view={props.route.view.clone()} />
            <main id="main" class="container mx-auto p-4">
                { main }
            </main>
        </>
    }
}

fn render_route(props: &ShellViewProps) -> Html {
    let datasets = props.datasets.clone();
    match props.route.app_view() {
        AppView::Dex { no_spawns } => html! {
            <DexListPage
                datasets={datasets}
                no_spawns={no_spawns}
                on_toggle_no_spawns={props.on_toggle_no_spawns.clone()}
            />
        },
        AppView::Mon { id } if id.is_empty() => html! {
            <NotFound kind="Mon" name="" back_href={back_target("dex")} />
        },
        AppView::Mon { id } => html! {
            <MonPage
                key={id.clone()}
                id={id.clone()}
                datasets={datasets}
                cache={props.cache.clone()}
                on_back={back_callback(&props.route)}
            />
        },
        AppView::Presets { name } => html! {
            <PresetPage datasets={datasets} name={name.unwrap_or_default()} />
        },
        AppView::Biomes { tag } => html! {
            <BiomePage datasets={datasets} tag={tag.unwrap_or_default()} />
        },
        AppView::Drops => html! {
            <DropsPage
                datasets={datasets}
                initial_query={props.route.query("q").unwrap_or_default().to_string()}
            />
        },
    }
}

/// History back, or the section listing when this session has no earlier entry.
fn back_callback(route: &Route) -> Callback<()> {
    let fallback = back_target(&route.view);
    Callback::from(move |()| {
        #[cfg(target_arch = "wasm32")]
        crate::dom::back_or(fallback);
        #[cfg(not(target_arch = "wasm32"))]
        log::debug!("back -> {fallback}");
    })
}
