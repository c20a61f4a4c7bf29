use crate::app::Handle;
use crate::components::daisy_ui::Pagination as Pager;
use dexview_core::{Datasets, DropItemView, PageSize, Pagination, Route, drops_listing};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::TargetCast;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct DropsPageProps {
    pub datasets: Handle<Datasets>,
    #[prop_or_default]
    pub initial_query: AttrValue,
}

#[function_component(DropsPage)]
pub fn drops_page(props: &DropsPageProps) -> Html {
    let query = use_state({
        let initial = props.initial_query.to_string();
        move || initial
    });
    let pagination = use_state(Pagination::default);
    let listing = drops_listing(&props.datasets.drops, &query, &pagination);
    let total = listing.total_matches;

    let on_query = {
        let query = query.clone();
        let pagination = pagination.clone();
        Callback::from(move |e: InputEvent| {
            query.set(e.target_unchecked_into::<HtmlInputElement>().value());
            let mut next = *pagination;
            next.restart();
            pagination.set(next);
        })
    };
    let on_size = {
        let pagination = pagination.clone();
        Callback::from(move |e: Event| {
            let raw = e.target_unchecked_into::<HtmlSelectElement>().value();
            if let Some(size) = raw.parse::<usize>().ok().and_then(|n| PageSize::try_from(n).ok()) {
                let mut next = *pagination;
                next.resize(size);
                pagination.set(next);
            }
        })
    };
    let on_page = {
        let pagination = pagination.clone();
        Callback::from(move |page: usize| {
            let mut next = *pagination;
            if next.go_to(page, total) {
                pagination.set(next);
            }
        })
    };

    html! {
        <section class="panel drops" aria-labelledby="drops-title" data-testid="drops">
            <h2 id="drops-title">{ "Drops" }</h2>
            <div class="filters flex flex-wrap gap-2 items-center">
                <input
                    class="input input-bordered"
                    type="search"
                    placeholder="Search items"
                    aria-label="Search items"
                    value={(*query).clone()}
                    oninput={on_query}
                />
                <select class="select select-bordered" aria-label="Page size" onchange={on_size}>
                    { for PageSize::ALL.iter().map(|size| html! {
                        <option value={size.get().to_string()} selected={*size == pagination.size}>
                            { format!("{} per page", size.get()) }
                        </option>
                    })}
                </select>
                <span class="muted" data-testid="drops-count">{ format!("{total} items") }</span>
            </div>
            <ul class="drop-items">
                { for listing.items.iter().map(render_item) }
            </ul>
            <Pager total_pages={listing.total_pages} current_page={listing.page} on_change={on_page} />
        </section>
    }
}

fn render_item(view: &DropItemView) -> Html {
    html! {
        <li class="drop-item" key={view.item.clone()}>
            <h3 title={view.item.clone()}>{ view.display_name.clone() }</h3>
            <table class="table table-sm">
                <tbody>
                    { for view.mons.iter().map(|mon| html! {
                        <tr>
                            <td><a class="link" href={Route::href_mon(&mon.id)}>{ mon.display_name().to_string() }</a></td>
                            <td>{ mon.percentage.map(|p| format!("{p}%")).unwrap_or_default() }</td>
                            <td>{ mon.quantity_range.clone().unwrap_or_default() }</td>
                            if view.has_biome_info {
                                <td class="muted">{ mon.biome_note() }</td>
                            }
                        </tr>
                    })}
                </tbody>
            </table>
        </li>
    }
}
