use crate::app::Handle;
use crate::components::daisy_ui::{Chip, ChipKind, ErrorNotice, LoadingNotice};
use crate::components::mon_link::dex_number;
use crate::paths::asset_path;
use dexview_core::data::value_text;
use dexview_core::normalize::item_display_name;
use dexview_core::{
    Datasets, DetailCache, DetailSlot, DetailState, EvolutionCard, JsonFetcher, LoadError,
    MonDetail, MoveCategory, RequirementChip, Route, SpawnDescriptor, flatten_spawns, group_moves,
    resolve_evolutions,
};
use std::rc::Rc;
use yew::prelude::*;

pub type WebCache = DetailCache<dyn JsonFetcher>;

#[derive(Properties, Clone, PartialEq)]
pub struct MonPageProps {
    pub id: AttrValue,
    pub datasets: Handle<Datasets>,
    pub cache: Handle<WebCache>,
    pub on_back: Callback<()>,
}

#[derive(Clone, PartialEq, Default)]
struct SlotState(DetailSlot);

enum SlotAction {
    Request(String),
    Commit(String, Result<Rc<MonDetail>, LoadError>),
}

impl Reducible for SlotState {
    type Action = SlotAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut slot = self.0.clone();
        match action {
            SlotAction::Request(id) => {
                if slot.requested == id && !matches!(slot.state, DetailState::Failed(_)) {
                    return self;
                }
                slot.request(&id);
            }
            SlotAction::Commit(id, result) => {
                if !slot.commit(&id, result) {
                    return self;
                }
            }
        }
        Rc::new(Self(slot))
    }
}

/// Initial slot for `id`, already loaded when the cache holds it.
fn initial_slot(id: &str, cache: &WebCache) -> SlotState {
    let mut slot = DetailSlot::default();
    slot.request(id);
    if let Some(detail) = cache.peek(id) {
        slot.commit(id, Ok(detail));
    }
    SlotState(slot)
}

#[function_component(MonPage)]
pub fn mon_page(props: &MonPageProps) -> Html {
    let slot = use_reducer({
        let id = props.id.to_string();
        let cache = props.cache.clone();
        move || initial_slot(&id, &cache)
    });
    let retry = use_state(|| 0_u32);

    {
        let slot = slot.dispatcher();
        let cache = props.cache.clone();
        use_effect_with((props.id.clone(), *retry), move |(id, _)| {
            let id = id.to_string();
            match cache.peek(&id) {
                Some(detail) => {
                    slot.dispatch(SlotAction::Request(id.clone()));
                    slot.dispatch(SlotAction::Commit(id, Ok(detail)));
                }
                None => {
                    slot.dispatch(SlotAction::Request(id.clone()));
                    #[cfg(target_arch = "wasm32")]
                    wasm_bindgen_futures::spawn_local(async move {
                        let result = cache.get(&id).await;
                        slot.dispatch(SlotAction::Commit(id, result));
                    });
                }
            }
        });
    }

    let on_retry = {
        let retry = retry.clone();
        Callback::from(move |_: MouseEvent| retry.set(*retry + 1))
    };
    let on_back = {
        let cb = props.on_back.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let body = match &slot.0.state_for(&props.id) {
        DetailState::Loading => html! { <LoadingNotice subject={props.id.clone()} /> },
        DetailState::NotFound => html! { <p class="muted">{ "No mon selected." }</p> },
        DetailState::Failed(message) => html! {
            <ErrorNotice title="Failed to load" message={message.clone()} on_retry={on_retry} />
        },
        DetailState::Loaded(detail) => render_detail(detail, &props.datasets),
    };

    html! {
        <section class="panel mon-detail" aria-labelledby="mon-title" data-testid="mon-detail">
            <button class="btn btn-ghost btn-sm" onclick={on_back}>{ "← Back" }</button>
            { body }
        </section>
    }
}

fn render_detail(detail: &MonDetail, data: &Datasets) -> Html {
    let sprite = data.sprites.sprite_for(&detail.id, false).map(asset_path);
    let shiny = data.sprites.sprite_for(&detail.id, true).map(asset_path);
    let types = [detail.primary_type.as_deref(), detail.secondary_type.as_deref()]
        .into_iter()
        .flatten()
        .map(|t| html! { <Chip label={t.to_string()} /> })
        .collect::<Html>();
    let cards = resolve_evolutions(detail, &data.index, &data.sprites);

    html! {
        <article>
            <header class="flex items-center gap-4">
                if let Some(src) = sprite {
                    <img class="sprite" src={src} alt={detail.display_name().to_string()} />
                }
                if let Some(src) = shiny {
                    <img class="sprite shiny" src={src} alt="shiny" />
                }
                <div>
                    <h2 id="mon-title">
                        <span class="dexnum">{ dex_number(detail.dexnum) }</span>
                        { " " }
                        { detail.display_name().to_string() }
                    </h2>
                    <div class="types">{ types }</div>
                </div>
            </header>
            { render_facts(detail) }
            { render_stats(detail) }
            { render_evolutions(&cards) }
            { render_moves(detail) }
            { render_spawns(detail) }
            { render_drops(detail) }
        </article>
    }
}

fn render_facts(detail: &MonDetail) -> Html {
    let mut facts: Vec<(&str, String)> = Vec::new();
    if !detail.abilities.is_empty() {
        facts.push(("Abilities", detail.abilities.join(", ")));
    }
    if !detail.egg_groups.is_empty() {
        facts.push(("Egg groups", detail.egg_groups.join(", ")));
    }
    if let Some(ratio) = detail.male_ratio {
        let text = if ratio < 0.0 {
            "Genderless".to_string()
        } else {
            format!("{:.1}% male", ratio * 100.0)
        };
        facts.push(("Gender", text));
    }
    if let Some(rate) = detail.catch_rate {
        facts.push(("Catch rate", rate.to_string()));
    }
    if let Some(group) = &detail.experience_group {
        facts.push(("Experience", group.clone()));
    }
    if !detail.labels.is_empty() {
        facts.push(("Labels", detail.labels.join(", ")));
    }
    if facts.is_empty() {
        return Html::default();
    }
    html! {
        <dl class="facts">
            { for facts.into_iter().map(|(label, value)| html! {
                <>
                    <dt>{ label }</dt>
                    <dd>{ value }</dd>
                </>
            })}
        </dl>
    }
}

fn render_stats(detail: &MonDetail) -> Html {
    if detail.base_stats.is_empty() {
        return Html::default();
    }
    html! {
        <section aria-label="Base stats">
            <h3>{ "Base stats" }</h3>
            <table class="table table-sm">
                <tbody>
                    { for detail.base_stats.iter().map(|(name, value)| html! {
                        <tr>
                            <th scope="row">{ name.clone() }</th>
                            <td>{ value_text(value) }</td>
                        </tr>
                    })}
                </tbody>
            </table>
        </section>
    }
}

fn render_evolutions(cards: &[EvolutionCard]) -> Html {
    if cards.is_empty() {
        return Html::default();
    }
    html! {
        <section aria-label="Evolutions">
            <h3>{ "Evolutions" }</h3>
            <ul class="evolutions flex flex-wrap gap-2">
                { for cards.iter().map(render_card) }
            </ul>
        </section>
    }
}

fn render_card(card: &EvolutionCard) -> Html {
    let sprite = card.sprite.as_deref().map(asset_path);
    let chips = card
        .chips
        .iter()
        .map(|chip| match chip {
            RequirementChip::Text(text) => html! { <Chip label={text.clone()} /> },
            RequirementChip::Biome(biome) => html! {
                <Chip
                    label={format!("{} {}", biome.prefix, biome.label)}
                    kind={if biome.negated { ChipKind::ExcludedBiome } else { ChipKind::Biome }}
                    href={biome.href.clone()}
                    title={biome.tag.clone()}
                />
            },
        })
        .collect::<Html>();
    let context = card.evolution.required_context_label();
    let inner = html! {
        <>
            if let Some(src) = sprite {
                <img class="sprite" src={src} alt="" />
            }
            <strong class="title">{ card.title().to_string() }</strong>
            if !card.evolution.variant.is_empty() {
                <span class="muted variant">{ card.evolution.variant.replace('_', " ") }</span>
            }
        </>
    };
    html! {
        <li class="card evolution-card p-2" data-target={card.target_id.clone()}>
            { match card.href() {
                Some(href) => html! { <a class="link" href={href}>{ inner }</a> },
                None => html! { <span class="unlinked" title="Not in this dataset">{ inner }</span> },
            }}
            <div class="chips flex flex-wrap gap-1">
                { chips }
                if let Some(context) = context {
                    <Chip label={format!("Uses {context}")} />
                }
            </div>
        </li>
    }
}

fn render_moves(detail: &MonDetail) -> Html {
    let groups = group_moves(&detail.moves);
    if groups.is_empty() {
        return Html::default();
    }
    html! {
        <section aria-label="Moves">
            <h3>{ "Moves" }</h3>
            { for MoveCategory::ALL.into_iter().filter(|c| !groups.get(*c).is_empty()).map(|category| html! {
                <div class="move-group">
                    <h4>{ category.label() }</h4>
                    <ul class="move-list">
                        { for groups.get(category).iter().map(|name| html! { <li>{ name.clone() }</li> }) }
                    </ul>
                </div>
            })}
        </section>
    }
}

fn render_spawns(detail: &MonDetail) -> Html {
    let spawns = flatten_spawns(detail.spawns.as_ref());
    html! {
        <section aria-label="Spawns">
            <h3>{ format!("Spawns ({})", spawns.len()) }</h3>
            if spawns.is_empty() {
                <p class="muted">{ "This mon does not spawn naturally." }</p>
            } else {
                <ul class="spawns">
                    { for spawns.into_iter().map(render_spawn) }
                </ul>
            }
        </section>
    }
}

fn render_spawn(spawn: &SpawnDescriptor) -> Html {
    let presets = spawn
        .presets
        .iter()
        .map(|name| html! { <Chip label={name.clone()} kind={ChipKind::Preset} href={Route::href_preset(name)} /> })
        .collect::<Html>();
    let biome_link = |tag: &String, negated: bool| {
        let (kind, label) = if negated {
            (ChipKind::ExcludedBiome, format!("not {tag}"))
        } else {
            (ChipKind::Biome, tag.clone())
        };
        html! { <Chip label={label} kind={kind} href={Route::href_biome(tag)} /> }
    };
    let mut facts = Vec::new();
    if let Some(rarity) = &spawn.rarity {
        facts.push(rarity.clone());
    }
    if !spawn.contexts.is_empty() {
        facts.push(spawn.contexts.join(", "));
    }
    if !spawn.times.is_empty() {
        facts.push(spawn.times.join(", "));
    }
    if let Some(item) = &spawn.key_item {
        facts.push(format!("needs {}", item_display_name(item)));
    }
    html! {
        <li class="spawn">
            if let Some(source) = &spawn.source {
                <span class="source">{ source.clone() }</span>
            }
            <span class="facts muted">{ facts.join(" · ") }</span>
            <div class="flex flex-wrap gap-1">
                { presets }
                { for spawn.biome_tags.include.iter().map(|tag| biome_link(tag, false)) }
                { for spawn.biome_tags.exclude.iter().map(|tag| biome_link(tag, true)) }
            </div>
        </li>
    }
}

fn render_drops(detail: &MonDetail) -> Html {
    let Some(table) = detail.drops.as_ref().filter(|t| !t.entries.is_empty()) else {
        return Html::default();
    };
    html! {
        <section aria-label="Drops">
            <h3>{ "Drops" }</h3>
            if let Some(amount) = table.amount {
                <p class="muted">{ format!("Rolls: {amount}") }</p>
            }
            <table class="table table-sm">
                <tbody>
                    { for table.entries.iter().map(|entry| html! {
                        <tr>
                            <td>{ item_display_name(&entry.item) }</td>
                            <td>{ entry.percentage.map(|p| format!("{p}%")).unwrap_or_default() }</td>
                            <td>{ entry.quantity_range.clone().unwrap_or_default() }</td>
                        </tr>
                    })}
                </tbody>
            </table>
        </section>
    }
}
