use crate::app::Handle;
use crate::pages::not_found::NotFound;
use crate::pages::preset::used_by_list;
use dexview_core::route::back_target;
use dexview_core::{BiomeListing, Datasets, Route, biome_listing};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct BiomePageProps {
    pub datasets: Handle<Datasets>,
    /// Empty for the tag listing.
    #[prop_or_default]
    pub tag: AttrValue,
}

#[function_component(BiomePage)]
pub fn biome_page(props: &BiomePageProps) -> Html {
    let data = &props.datasets;
    match biome_listing(&data.biomes, &data.index, &props.tag) {
        BiomeListing::All { tags } => html! {
            <section class="panel biomes" aria-labelledby="biomes-title" data-testid="biome-list">
                <h2 id="biomes-title">{ format!("Biome tags ({})", tags.len()) }</h2>
                <ul>
                    { for tags.iter().map(|tag| html! {
                        <li key={tag.clone()}><a class="link" href={Route::href_biome(tag)}>{ tag.clone() }</a></li>
                    })}
                </ul>
            </section>
        },
        BiomeListing::Tag(view) if !view.known => html! {
            <NotFound kind="Biome tag" name={view.tag} back_href={back_target("biome")} />
        },
        BiomeListing::Tag(view) => html! {
            <section class="panel biome" aria-labelledby="biome-title" data-testid="biome-detail">
                <a class="btn btn-ghost btn-sm" href={back_target("biome")}>{ "← Biome tags" }</a>
                <h2 id="biome-title">{ view.tag.clone() }</h2>
                if !view.raw_values.is_empty() {
                    <section aria-label="Declared as">
                        <h3>{ "Declared as" }</h3>
                        <ul class="raw-values">
                            { for view.raw_values.iter().map(|v| html! { <li><code>{ v.clone() }</code></li> }) }
                        </ul>
                    </section>
                }
                <section aria-label="Resolved biomes">
                    <h3>{ format!("Resolves to {} biomes", view.resolved.len()) }</h3>
                    <ul class="resolved">
                        { for view.resolved.iter().map(|b| html! { <li>{ b.clone() }</li> }) }
                    </ul>
                </section>
                { used_by_list(&view.used_by) }
            </section>
        },
    }
}
