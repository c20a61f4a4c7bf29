use std::path::PathBuf;
use std::rc::Rc;

use dexview_core::bst::bst_rows;
use dexview_core::moves::group_moves;
use dexview_core::route::{NO_SPAWNS_PARAM, with_hash_param};
use dexview_core::{
    AppView, BiomeListing, DataPaths, DexFilter, DetailSlot, DetailState, JsonFetcher, LoadError,
    LoadState, PageSize, Pagination, PresetListing, RequirementChip, Shell, biome_listing,
    drops_listing, filter_dex, flatten_spawns, preset_listing, resolve_evolutions, tier_report,
};
use futures::executor::block_on;

/// Serves the sample dataset shipped in `site/out`.
struct SampleFetcher;

#[async_trait::async_trait(?Send)]
impl JsonFetcher for SampleFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, LoadError> {
        let full = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join(path);
        std::fs::read_to_string(&full).map_err(|_| LoadError::Status {
            path: path.to_string(),
            status: 404,
        })
    }
}

fn loaded_shell(fragment: &str) -> Shell<SampleFetcher> {
    let shell = Shell::new(
        Rc::new(SampleFetcher),
        DataPaths::rooted("site/out"),
        fragment,
    );
    assert_eq!(block_on(shell.load()), LoadState::Ready);
    shell
}

#[test]
fn startup_loads_every_dataset() {
    let shell = loaded_shell("#/");
    let data = shell.datasets();
    assert_eq!(data.index.len(), 8);
    assert_eq!(data.presets.len(), 3);
    assert_eq!(data.biomes.tags.len(), 4);
    assert_eq!(data.sprites.sprite_for("bulbasaur", true), Some("sprites/bulbasaur_shiny.png"));
    assert_eq!(data.drops.items.len(), 3);
}

#[test]
fn missing_index_is_reported_distinctly_from_loading() {
    let shell = Shell::new(
        Rc::new(SampleFetcher),
        DataPaths::rooted("site/nowhere"),
        "#/",
    );
    assert_eq!(*shell.load_state.borrow(), LoadState::Loading);
    let state = block_on(shell.load());
    assert!(matches!(state, LoadState::Failed(ref msg) if msg.contains("dex.json")));
}

#[test]
fn dex_listing_follows_the_hidden_flag_in_the_fragment() {
    let shell = loaded_shell("#/dex");
    let data = shell.datasets();

    let all = filter_dex(&data.index, &DexFilter::default());
    assert_eq!(all.first().map(|m| m.id.as_str()), Some("bulbasaur"));
    assert_eq!(all.last().map(|m| m.id.as_str()), Some("missingno"));
    let raichus: Vec<&str> = all
        .iter()
        .filter(|m| m.dexnum == Some(26))
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(raichus, ["raichu", "raichu_alola"]);

    let toggled = with_hash_param("#/dex", NO_SPAWNS_PARAM, true);
    shell.navigate(&toggled);
    let AppView::Dex { no_spawns } = shell.current_view() else {
        panic!("expected dex view");
    };
    assert!(no_spawns);
    let filter = DexFilter {
        no_spawns,
        ..DexFilter::default()
    };
    let hidden: Vec<&str> = filter_dex(&data.index, &filter)
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(hidden, ["ivysaur", "raichu", "raichu_alola", "missingno"]);

    shell.navigate("#/dex?nos=0");
    assert_eq!(shell.current_view(), AppView::Dex { no_spawns: false });
}

#[test]
fn detail_navigation_resolves_evolutions() {
    let shell = loaded_shell("#/");
    let data = shell.datasets();

    let prefetch = shell.navigate("#/mon/raichu");
    assert_eq!(prefetch.as_deref(), Some("raichu"));
    let raichu = block_on(shell.cache.get("raichu")).unwrap();
    let cards = resolve_evolutions(&raichu, &data.index, &data.sprites);
    assert_eq!(cards[0].target_id, "raichu_alola");
    assert_eq!(cards[0].sprite.as_deref(), Some("sprites/raichu_alola.png"));
    let RequirementChip::Biome(chip) = &cards[0].chips[0] else {
        panic!("expected biome chip");
    };
    assert_eq!(chip.tag, "#cobblemon:is_island");
    assert_eq!(chip.prefix, "In");

    let charizard = block_on(shell.cache.get("charizard")).unwrap();
    let cards = resolve_evolutions(&charizard, &data.index, &data.sprites);
    assert_eq!(cards[0].target_id, "charizard");
    assert_eq!(cards[0].chips[0].text(), "Hold cobblemon:charizardite_x");

    let ivysaur = block_on(shell.cache.get("ivysaur")).unwrap();
    let cards = resolve_evolutions(&ivysaur, &data.index, &data.sprites);
    assert_eq!(cards[0].target_id, "venusaur");
    assert!(cards[0].target.is_none());

    assert_eq!(shell.navigate("#/mon/raichu"), None);
}

#[test]
fn detail_pages_group_moves_and_flatten_spawns() {
    let shell = loaded_shell("#/mon/bulbasaur");
    let bulbasaur = block_on(shell.cache.get("bulbasaur")).unwrap();
    let moves = group_moves(&bulbasaur.moves);
    assert_eq!(moves.level, ["1 Tackle", "3 Growl", "9 Vine Whip"]);
    assert_eq!(moves.tm, ["Solar Beam"]);
    assert_eq!(moves.other, ["Struggle"]);
    assert_eq!(flatten_spawns(bulbasaur.spawns.as_ref()).len(), 1);
}

#[test]
fn stale_detail_results_do_not_replace_the_current_view() {
    let shell = loaded_shell("#/");
    let mut slot = DetailSlot::default();

    shell.navigate("#/mon/bulbasaur");
    slot.request("bulbasaur");
    shell.navigate("#/mon/eevee");
    slot.request("eevee");

    let eevee = block_on(shell.cache.get("eevee"));
    assert!(slot.commit("eevee", eevee));
    let late = block_on(shell.cache.get("bulbasaur"));
    assert!(!slot.commit("bulbasaur", late));
    let DetailState::Loaded(shown) = &slot.state else {
        panic!("expected loaded state");
    };
    assert_eq!(shown.id, "eevee");
    assert!(shell.cache.contains("bulbasaur"));
}

#[test]
fn unknown_detail_ids_fail_without_poisoning_the_cache() {
    let shell = loaded_shell("#/");
    let mut slot = DetailSlot::default();
    slot.request("pikachu");
    let result = block_on(shell.cache.get("pikachu"));
    assert!(slot.commit("pikachu", result));
    assert_eq!(
        slot.state,
        DetailState::Failed("Failed to load site/out/mons/pikachu.json: HTTP 404".into())
    );
    assert!(!shell.cache.contains("pikachu"));
}

#[test]
fn cross_references_cover_biomes_and_presets() {
    let shell = loaded_shell("#/biome/%23cobblemon%3Ais_forest");
    let data = shell.datasets();
    let AppView::Biomes { tag: Some(tag) } = shell.current_view() else {
        panic!("expected biome view");
    };
    let BiomeListing::Tag(view) = biome_listing(&data.biomes, &data.index, &tag) else {
        panic!("expected tag view");
    };
    let users: Vec<&str> = view.used_by.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(users, ["bulbasaur", "eevee"]);
    assert_eq!(view.resolved.len(), 3);

    let PresetListing::Preset(natural) = preset_listing(&data.presets, &data.index, "natural")
    else {
        panic!("expected preset view");
    };
    let users: Vec<&str> = natural.used_by.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(users, ["bulbasaur", "charizard", "eevee"]);
}

#[test]
fn drops_listing_sorts_rows_and_pages() {
    let shell = loaded_shell("#/drops");
    let data = shell.datasets();
    let pagination = Pagination {
        page: 1,
        size: PageSize::Ten,
    };
    let listing = drops_listing(&data.drops, "seed", &pagination);
    assert_eq!(listing.total_matches, 1);
    let seed = &listing.items[0];
    assert_eq!(seed.display_name, "miracle seed");
    assert_eq!(seed.mons[0].id, "bulbasaur");
    assert_eq!(seed.mons[0].biome_note(), "in minecraft:jungle");

    let listing = drops_listing(&data.drops, "charcoal", &pagination);
    let charcoal = &listing.items[0];
    assert_eq!(charcoal.mons[0].id, "raichu");
    assert_eq!(charcoal.mons[0].biome_note(), "not in minecraft:desert");
}

#[test]
fn bst_tiers_over_sample_details() {
    let shell = loaded_shell("#/");
    let ids = ["bulbasaur", "ivysaur", "charizard", "raichu", "eevee", "ditto"];
    let details: Vec<_> = ids
        .iter()
        .map(|id| block_on(shell.cache.get(id)).unwrap())
        .collect();
    let rows = bst_rows(details.iter().map(|d| &**d));
    assert_eq!(rows.len(), 5, "ditto has an incomplete stat line");
    assert_eq!(rows[0].id, "bulbasaur");
    assert_eq!(rows[0].bst, 318);
    assert_eq!(rows[4].id, "charizard");
    let report = tier_report(rows, 3).unwrap();
    assert_eq!(report.tiers.iter().map(|t| t.members.len()).sum::<usize>(), 5);
    assert_eq!(report.tier_of("bulbasaur"), Some(1));
    assert_eq!(report.tier_of("charizard"), Some(3));
}
