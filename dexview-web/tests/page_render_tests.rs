use async_trait::async_trait;
use dexview_core::{
    DataPaths, Datasets, DetailCache, JsonFetcher, LoadError, LoadState, parse_route,
};
use dexview_web::app::{Handle, ShellView, ShellViewProps};
use dexview_web::pages::{
    biome::{BiomePage, BiomePageProps},
    dex_list::{DexListPage, DexListPageProps},
    drops::{DropsPage, DropsPageProps},
    mon::{MonPage, MonPageProps, WebCache},
    preset::{PresetPage, PresetPageProps},
    status::{StatusPage, StatusPageProps},
};
use futures::executor::block_on;
use std::collections::HashMap;
use std::rc::Rc;
use yew::{Callback, LocalServerRenderer};

const INDEX: &str = r##"[
    {"id":"eevee","dexnum":133,"name":"Eevee","primaryType":"normal","spawnCount":1,
     "spawns":[{"presets":["natural"],"biomeTags":{"include":["#cobblemon:is_forest"]}}]},
    {"id":"bulbasaur","dexnum":1,"name":"Bulbasaur","primaryType":"grass","secondaryType":"poison","spawnCount":1,
     "spawns":{"presets":["natural","foliage"],"biomeTags":{"include":["#cobblemon:is_jungle"]}}},
    {"id":"raichu","dexnum":26,"name":"Raichu","primaryType":"electric","spawnCount":0},
    {"id":"raichu_alola","dexnum":26,"name":"Raichu (Alola)","primaryType":"electric","secondaryType":"psychic","spawnCount":0}
]"##;

const PRESETS: &str = r#"{
    "natural": {"contexts":["grounded"],"conditions":{"canSeeSky":true}},
    "foliage": {"contexts":["grounded"]}
}"#;

const BIOMES: &str = r##"{
    "tags": {"#cobblemon:is_forest": ["#minecraft:is_forest"]},
    "resolved": {"#cobblemon:is_forest": ["minecraft:forest","minecraft:birch_forest"]}
}"##;

const SPRITES: &str = r#"{"images":{"raichu_alola":{"normal":["sprites/raichu_alola.png"]}}}"#;

const DROPS: &str = r#"{"items":[
    {"item":"cobblemon:miracle_seed","mons":[
        {"id":"eevee","percentage":5},
        {"id":"bulbasaur","name":"Bulbasaur","percentage":12.5,"quantityRange":"1-2","biomes":["minecraft:jungle"]}
    ]},
    {"item":"minecraft:string","mons":[{"id":"eevee"}]}
]}"#;

const RAICHU: &str = r##"{
    "id":"raichu","dexnum":26,"name":"Raichu","primaryType":"electric",
    "abilities":["static"],
    "baseStats":{"hp":60,"attack":90,"defence":55,"special_attack":90,"special_defence":80,"speed":110},
    "moves":["tm:Thunderbolt","5:Thunder Shock","1:Tail Whip","egg:Wish"],
    "evolutions":[{"variant":"level_up","result":"Raichu-Alola",
        "requirements":[{"variant":"biome","biomeCondition":"#cobblemon:overworld/is_island"}]}],
    "drops":{"amount":1,"entries":[{"item":"cobblemon:charcoal_stick","percentage":10}]}
}"##;

struct MemoryFetcher(HashMap<String, String>);

#[async_trait(?Send)]
impl JsonFetcher for MemoryFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, LoadError> {
        self.0.get(path).cloned().ok_or_else(|| LoadError::Status {
            path: path.to_string(),
            status: 404,
        })
    }
}

fn datasets() -> Handle<Datasets> {
    Handle::new(Rc::new(Datasets {
        index: serde_json::from_str(INDEX).unwrap(),
        presets: serde_json::from_str(PRESETS).unwrap(),
        biomes: serde_json::from_str(BIOMES).unwrap(),
        sprites: serde_json::from_str(SPRITES).unwrap(),
        drops: serde_json::from_str(DROPS).unwrap(),
    }))
}

/// Cache over the in-memory detail files, with `warm` ids fetched up front.
fn cache(warm: &[&str]) -> Handle<WebCache> {
    let mut files = HashMap::new();
    files.insert("out/mons/raichu.json".to_string(), RAICHU.to_string());
    let fetcher: Rc<dyn JsonFetcher> = Rc::new(MemoryFetcher(files));
    let cache: Rc<WebCache> = Rc::new(DetailCache::new(fetcher, DataPaths::rooted("out")));
    for id in warm {
        block_on(cache.get(id)).unwrap();
    }
    Handle::new(cache)
}

fn render_dex(no_spawns: bool) -> String {
    let props = DexListPageProps {
        datasets: datasets(),
        no_spawns,
        on_toggle_no_spawns: Callback::noop(),
    };
    block_on(LocalServerRenderer::<DexListPage>::with_props(props).render())
}

#[test]
fn dex_listing_sorts_by_dexnum_and_counts_rows() {
    let html = render_dex(false);
    assert!(html.contains("4 / 4 shown"));
    let bulbasaur = html.find("Bulbasaur").unwrap();
    let raichu = html.find("Raichu").unwrap();
    let eevee = html.find("Eevee").unwrap();
    assert!(bulbasaur < raichu && raichu < eevee);
    assert!(html.contains("#001"));
    assert!(html.contains(r##"href="#/mon/raichu_alola""##));
    assert!(html.contains("./out/sprites/raichu_alola.png"));
    assert!(html.contains(r#"<option value="psychic""#));
    assert!(!html.contains("No spawns"));
}

#[test]
fn hidden_flag_keeps_only_mons_without_spawns() {
    let html = render_dex(true);
    assert!(html.contains("2 / 4 shown"));
    assert!(html.contains("No spawns"));
    assert!(!html.contains("Bulbasaur"));
    assert!(html.contains("Raichu (Alola)"));
}

#[test]
fn cached_detail_renders_moves_evolutions_and_drops() {
    let props = MonPageProps {
        id: "raichu".into(),
        datasets: datasets(),
        cache: cache(&["raichu"]),
        on_back: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<MonPage>::with_props(props).render());
    assert!(html.contains("#026"));
    assert!(html.contains("Level-up"));
    let tail_whip = html.find("1 Tail Whip").unwrap();
    let shock = html.find("5 Thunder Shock").unwrap();
    assert!(tail_whip < shock);
    assert!(html.contains("Thunderbolt"));
    assert!(html.contains("Wish"));
    assert!(html.contains(r##"href="#/mon/raichu_alola""##));
    assert!(html.contains(r##"href="#/biome/%23cobblemon%3Ais_island""##));
    assert!(html.contains("In overworld/is_island"));
    assert!(html.contains("charcoal stick"));
    assert!(html.contains("does not spawn naturally"));
}

#[test]
fn uncached_detail_starts_loading() {
    let props = MonPageProps {
        id: "eevee".into(),
        datasets: datasets(),
        cache: cache(&[]),
        on_back: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<MonPage>::with_props(props).render());
    assert!(html.contains("Loading eevee"));
    assert!(html.contains("Back"));
}

#[test]
fn preset_page_lists_users_and_conditions() {
    let props = PresetPageProps {
        datasets: datasets(),
        name: "natural".into(),
    };
    let html = block_on(LocalServerRenderer::<PresetPage>::with_props(props).render());
    assert!(html.contains("Used by 2 mons"));
    assert!(html.contains("canSeeSky"));
    assert!(html.contains(r##"href="#/mon/bulbasaur""##));
    assert!(html.contains(r##"href="#/mon/eevee""##));

    let all = PresetPageProps {
        datasets: datasets(),
        name: "".into(),
    };
    let html = block_on(LocalServerRenderer::<PresetPage>::with_props(all).render());
    assert!(html.contains("Presets (2)"));
    assert!(html.contains(r##"href="#/preset/foliage""##));
}

#[test]
fn unknown_names_render_not_found() {
    let props = PresetPageProps {
        datasets: datasets(),
        name: "volcanic".into(),
    };
    let html = block_on(LocalServerRenderer::<PresetPage>::with_props(props).render());
    assert!(html.contains("Preset not found"));
    assert!(html.contains(r##"href="#/preset""##));

    let props = BiomePageProps {
        datasets: datasets(),
        tag: "#cobblemon:is_moon".into(),
    };
    let html = block_on(LocalServerRenderer::<BiomePage>::with_props(props).render());
    assert!(html.contains("Biome tag not found"));
}

#[test]
fn biome_page_shows_resolution_and_users() {
    let props = BiomePageProps {
        datasets: datasets(),
        tag: "#cobblemon:is_forest".into(),
    };
    let html = block_on(LocalServerRenderer::<BiomePage>::with_props(props).render());
    assert!(html.contains("Resolves to 2 biomes"));
    assert!(html.contains("minecraft:birch_forest"));
    assert!(html.contains("Used by 1 mons"));
    assert!(html.contains(r##"href="#/mon/eevee""##));
}

#[test]
fn drops_page_sorts_rows_and_disables_bounds() {
    let props = DropsPageProps {
        datasets: datasets(),
        initial_query: "seed".into(),
    };
    let html = block_on(LocalServerRenderer::<DropsPage>::with_props(props).render());
    assert!(html.contains("1 items"));
    assert!(html.contains("miracle seed"));
    assert!(!html.contains("string"));
    let bulbasaur = html.find("Bulbasaur").unwrap();
    let eevee = html.find(r##"href="#/mon/eevee""##).unwrap();
    assert!(bulbasaur < eevee, "higher percentage first");
    assert!(html.contains("in minecraft:jungle"));
    assert!(html.contains("Page 1 of 1"));
    assert!(opening_tag(&html, r#"aria-label="Previous page""#).contains("disabled"));
    assert!(opening_tag(&html, r#"aria-label="Next page""#).contains("disabled"));
    assert!(!opening_tag(&html, r#"aria-current="page""#).contains("disabled"));
}

/// The whole `<tag ...>` that carries `marker`, whatever the attribute order.
fn opening_tag<'a>(html: &'a str, marker: &str) -> &'a str {
    let at = html.find(marker).unwrap_or_else(|| panic!("{marker} not rendered"));
    let start = html[..at].rfind('<').expect("tag start");
    let end = at + html[at..].find('>').expect("tag end");
    &html[start..=end]
}

#[test]
fn status_page_distinguishes_loading_from_failure() {
    let loading = block_on(
        LocalServerRenderer::<StatusPage>::with_props(StatusPageProps {
            state: LoadState::Loading,
        })
        .render(),
    );
    assert!(loading.contains("Loading dex"));
    assert!(loading.contains("loading-lg"));

    let failed = block_on(
        LocalServerRenderer::<StatusPage>::with_props(StatusPageProps {
            state: LoadState::Failed("Failed to load out/dex.json: HTTP 404".into()),
        })
        .render(),
    );
    assert!(failed.contains("could not be loaded"));
    assert!(failed.contains("HTTP 404"));
    assert!(failed.contains(r#"role="alert""#));
    assert!(!failed.contains("Retry"), "startup failures are not retried");
    assert!(!failed.contains("Loading dex"));
}

fn render_shell(load_state: LoadState, fragment: &str) -> String {
    let props = ShellViewProps {
        load_state,
        datasets: datasets(),
        cache: cache(&["raichu"]),
        route: parse_route(fragment),
        on_toggle_no_spawns: Callback::noop(),
    };
    block_on(LocalServerRenderer::<ShellView>::with_props(props).render())
}

#[test]
fn shell_dispatches_on_the_route() {
    assert!(render_shell(LoadState::Ready, "#/").contains("dex-list"));
    assert!(render_shell(LoadState::Ready, "#/nowhere").contains("dex-list"));
    assert!(render_shell(LoadState::Ready, "#/mon/raichu").contains("mon-detail"));
    assert!(render_shell(LoadState::Ready, "#/mon").contains("Mon not found"));
    assert!(render_shell(LoadState::Ready, "#/preset").contains("preset-list"));
    assert!(render_shell(LoadState::Ready, "#/biome").contains("biome-list"));
    assert!(render_shell(LoadState::Ready, "#/drops?q=string").contains("minecraft:string"));
}

#[test]
fn shell_renders_no_listing_until_ready() {
    let html = render_shell(LoadState::Loading, "#/drops");
    assert!(html.contains("status-loading"));
    assert!(!html.contains(r#"data-testid="drops""#));

    let html = render_shell(LoadState::Failed("boom".into()), "#/");
    assert!(html.contains("status-failed"));
    assert!(!html.contains("dex-list"));
}
