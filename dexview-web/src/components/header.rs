use yew::prelude::*;

const SECTIONS: [(&str, &str, &str); 4] = [
    ("dex", "#/", "Dex"),
    ("preset", "#/preset", "Presets"),
    ("biome", "#/biome", "Biomes"),
    ("drops", "#/drops", "Drops"),
];

/// Section a route view belongs to, for highlighting the navigation.
#[must_use]
pub fn section_for(view: &str) -> &'static str {
    match view {
        "preset" | "presets" => "preset",
        "biome" | "biomes" => "biome",
        "drops" => "drops",
        _ => "dex",
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub view: AttrValue,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let active = section_for(&p.view);
    html! {
        <header role="banner" class="navbar bg-base-200">
            <a href="#main" class="sr-only">{ "Skip to content" }</a>
            <a class="btn btn-ghost text-xl" href="#/">{ "Dexview" }</a>
            <nav aria-label="Sections" class="header-right">
                <ul class="menu menu-horizontal">
                    { for SECTIONS.iter().map(|(key, href, label)| {
                        let current = (*key == active).then(|| AttrValue::from("page"));
                        html! {
                            <li><a href={*href} aria-current={current}>{ *label }</a></li>
                        }
                    })}
                </ul>
            </nav>
        </header>
    }
}
