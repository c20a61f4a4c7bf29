use yew::prelude::*;

/// Explicit "not found" state for ids, tags and presets that the dataset lacks.
#[derive(Properties, PartialEq)]
pub struct Props {
    /// What was looked up, e.g. `Biome tag`.
    pub kind: AttrValue,
    pub name: AttrValue,
    /// Section listing to return to.
    pub back_href: AttrValue,
}

#[function_component(NotFound)]
pub fn not_found(props: &Props) -> Html {
    html! {
        <section class="panel not-found" aria-live="assertive" data-testid="not-found">
            <h2>{ format!("{} not found", props.kind) }</h2>
            <p>{ format!("Nothing in the dataset is called \"{}\".", props.name) }</p>
            <a class="btn" href={props.back_href.clone()}>{ "Back to the list" }</a>
        </section>
    }
}
