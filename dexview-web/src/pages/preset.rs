use crate::app::Handle;
use crate::components::daisy_ui::Chip;
use crate::components::mon_link::MonLink;
use crate::pages::not_found::NotFound;
use dexview_core::route::back_target;
use dexview_core::{Datasets, IndexRecord, PresetListing, Route, preset_listing};
use serde_json::Value;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct PresetPageProps {
    pub datasets: Handle<Datasets>,
    /// Empty for the preset listing.
    #[prop_or_default]
    pub name: AttrValue,
}

/// Pretty JSON for a condition block, `None` when it is empty.
pub(crate) fn condition_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        other => serde_json::to_string_pretty(other).ok(),
    }
}

pub(crate) fn used_by_list(used_by: &[&IndexRecord]) -> Html {
    html! {
        <section aria-label="Used by">
            <h3>{ format!("Used by {} mons", used_by.len()) }</h3>
            if used_by.is_empty() {
                <p class="muted">{ "No mon spawns with this." }</p>
            } else {
                <ul class="used-by">
                    { for used_by.iter().map(|mon| html! {
                        <li key={mon.id.clone()}><MonLink mon={(*mon).clone()} /></li>
                    })}
                </ul>
            }
        </section>
    }
}

#[function_component(PresetPage)]
pub fn preset_page(props: &PresetPageProps) -> Html {
    let data = &props.datasets;
    match preset_listing(&data.presets, &data.index, &props.name) {
        PresetListing::All { names } => html! {
            <section class="panel presets" aria-labelledby="presets-title" data-testid="preset-list">
                <h2 id="presets-title">{ format!("Presets ({})", names.len()) }</h2>
                <ul>
                    { for names.iter().map(|name| html! {
                        <li key={name.clone()}><a class="link" href={Route::href_preset(name)}>{ name.clone() }</a></li>
                    })}
                </ul>
            </section>
        },
        PresetListing::Preset(view) => {
            let Some(preset) = view.preset else {
                return html! {
                    <NotFound kind="Preset" name={view.name} back_href={back_target("preset")} />
                };
            };
            let blocks = [
                ("Conditions", condition_text(&preset.conditions)),
                ("Anticonditions", condition_text(&preset.anticonditions)),
                ("Resolved", preset.resolved.as_ref().and_then(condition_text)),
            ];
            html! {
                <section class="panel preset" aria-labelledby="preset-title" data-testid="preset-detail">
                    <a class="btn btn-ghost btn-sm" href={back_target("preset")}>{ "← Presets" }</a>
                    <h2 id="preset-title">{ view.name.clone() }</h2>
                    <div class="contexts flex gap-1">
                        { for preset.contexts.iter().map(|c| html! { <Chip label={c.clone()} /> }) }
                    </div>
                    { for blocks.into_iter().filter_map(|(label, text)| text.map(|text| html! {
                        <details class="conditions" open=true>
                            <summary>{ label }</summary>
                            <pre>{ text }</pre>
                        </details>
                    }))}
                    { used_by_list(&view.used_by) }
                </section>
            }
        }
    }
}
