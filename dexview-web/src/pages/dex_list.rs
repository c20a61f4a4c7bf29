use crate::app::Handle;
use crate::components::daisy_ui::{Chip, ChipKind};
use crate::components::mon_link::dex_number;
use crate::paths::asset_path;
use dexview_core::{Datasets, DexFilter, Route, available_types, filter_dex};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::TargetCast;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct DexListPageProps {
    pub datasets: Handle<Datasets>,
    /// Hidden flag from `?nos=1`.
    pub no_spawns: bool,
    pub on_toggle_no_spawns: Callback<()>,
}

#[function_component(DexListPage)]
pub fn dex_list_page(props: &DexListPageProps) -> Html {
    let query = use_state(String::new);
    let type_filter = use_state(String::new);
    let data = &props.datasets;

    let filter = DexFilter {
        query: (*query).clone(),
        type_filter: (*type_filter).clone(),
        no_spawns: props.no_spawns,
    };
    let rows = filter_dex(&data.index, &filter);
    let types = available_types(&data.index);

    let on_query = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            query.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_type = {
        let type_filter = type_filter.clone();
        Callback::from(move |e: Event| {
            type_filter.set(e.target_unchecked_into::<HtmlSelectElement>().value());
        })
    };
    let on_counter_click = {
        let toggle = props.on_toggle_no_spawns.clone();
        Callback::from(move |e: MouseEvent| {
            if e.alt_key() {
                e.prevent_default();
                toggle.emit(());
            }
        })
    };

    html! {
        <section class="panel dex-list" aria-labelledby="dex-title" data-testid="dex-list">
            <h2 id="dex-title">{ "Dex" }</h2>
            <div class="filters flex flex-wrap gap-2 items-center">
                <input
                    class="input input-bordered"
                    type="search"
                    placeholder="Search name or id"
                    aria-label="Search"
                    value={(*query).clone()}
                    oninput={on_query}
                />
                <select class="select select-bordered" aria-label="Type" onchange={on_type}>
                    <option value="" selected={type_filter.is_empty()}>{ "All types" }</option>
                    { for types.iter().map(|t| html! {
                        <option value={t.clone()} selected={*t == *type_filter}>{ t.clone() }</option>
                    })}
                </select>
                <span class="counter muted" data-testid="dex-counter" onclick={on_counter_click}>
                    { format!("{} / {} shown", rows.len(), data.index.len()) }
                </span>
                if props.no_spawns {
                    <Chip label="No spawns" kind={ChipKind::Filter} title="Press n to clear" />
                }
            </div>
            <ul class="dex-rows">
                { for rows.iter().map(|mon| {
                    let sprite = data.sprites.sprite_for(&mon.id, false).map(asset_path);
                    let types = [mon.primary_type.as_deref(), mon.secondary_type.as_deref()]
                        .into_iter()
                        .flatten()
                        .map(|t| html! { <Chip label={t.to_string()} /> })
                        .collect::<Html>();
                    html! {
                        <li class="dex-row" key={mon.id.clone()}>
                            <a class="flex items-center gap-2" href={Route::href_mon(&mon.id)}>
                                if let Some(src) = sprite {
                                    <img class="sprite" src={src} alt="" loading="lazy" />
                                }
                                <span class="dexnum">{ dex_number(mon.dexnum) }</span>
                                <span class="name">{ mon.display_name().to_string() }</span>
                            </a>
                            <span class="types">{ types }</span>
                            <span class="spawn-count muted">{ format!("{} spawns", mon.spawn_count) }</span>
                        </li>
                    }
                })}
            </ul>
            if rows.is_empty() {
                <p class="muted">{ "No mons match these filters." }</p>
            }
        </section>
    }
}
