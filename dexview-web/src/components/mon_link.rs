use dexview_core::{IndexRecord, Route};
use yew::prelude::*;

/// `#001`-style label, blank without a dex number.
#[must_use]
pub fn dex_number(dexnum: Option<u32>) -> String {
    dexnum.map(|n| format!("#{n:03}")).unwrap_or_default()
}

#[derive(Properties, PartialEq, Clone)]
pub struct MonLinkProps {
    pub mon: IndexRecord,
}

/// Inline link to a detail page, used by every cross-reference list.
#[function_component(MonLink)]
pub fn mon_link(props: &MonLinkProps) -> Html {
    let mon = &props.mon;
    html! {
        <a class="link mon-link" href={Route::href_mon(&mon.id)}>
            <span class="dexnum">{ dex_number(mon.dexnum) }</span>
            { " " }
            <span class="name">{ mon.display_name().to_string() }</span>
        </a>
    }
}
