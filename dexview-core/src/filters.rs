//! Derived listing state: pure functions from the loaded datasets plus user inputs to
//! the ordered rows each listing screen displays.

use crate::data::{BiomeIndex, DropItem, DropMon, DropsIndex, IndexRecord, Preset};
use crate::normalize::item_display_name;
use crate::xref::{mons_using_biome_tag, mons_using_preset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Inputs of the dex listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DexFilter {
    pub query: String,
    /// Exact type to require; empty means any type.
    pub type_filter: String,
    /// Hidden flag: only keep mons that never spawn.
    pub no_spawns: bool,
}

impl DexFilter {
    #[must_use]
    pub fn matches(&self, mon: &IndexRecord) -> bool {
        let needle = self.query.trim().to_lowercase();
        let text_ok = needle.is_empty()
            || mon.name.to_lowercase().contains(&needle)
            || mon.id.to_lowercase().contains(&needle);
        let type_ok = self.type_filter.is_empty() || mon.has_type(&self.type_filter);
        let spawn_ok = !self.no_spawns || mon.spawn_count == 0;
        text_ok && type_ok && spawn_ok
    }
}

/// Filter the index and sort by dex number, entries without one last.
///
/// The sort is stable, so equal dex numbers keep index order.
#[must_use]
pub fn filter_dex<'a>(index: &'a [IndexRecord], filter: &DexFilter) -> Vec<&'a IndexRecord> {
    let mut rows: Vec<&IndexRecord> = index.iter().filter(|mon| filter.matches(mon)).collect();
    rows.sort_by_key(|mon| (mon.dexnum.is_none(), mon.dexnum));
    rows
}

/// Every primary or secondary type present in the index, sorted.
#[must_use]
pub fn available_types(index: &[IndexRecord]) -> BTreeSet<String> {
    index
        .iter()
        .flat_map(|mon| [mon.primary_type.as_ref(), mon.secondary_type.as_ref()])
        .flatten()
        .cloned()
        .collect()
}

/// Selectable page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    Ten,
    #[default]
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [Self; 4] = [Self::Ten, Self::TwentyFive, Self::Fifty, Self::Hundred];

    #[must_use]
    pub const fn get(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| format!("page size must be one of 10, 25, 50, 100 (got {value})"))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

/// 1-based page cursor over a filtered list.
///
/// Moving past either end is refused and leaves the cursor unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub size: PageSize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            size: PageSize::default(),
        }
    }
}

impl Pagination {
    /// `ceil(total / size)`, at least 1.
    #[must_use]
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.size.get()).max(1)
    }

    #[must_use]
    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn can_next(&self, total: usize) -> bool {
        self.page < self.total_pages(total)
    }

    pub fn prev(&mut self) -> bool {
        let moved = self.can_prev();
        if moved {
            self.page -= 1;
        }
        moved
    }

    pub fn next(&mut self, total: usize) -> bool {
        let moved = self.can_next(total);
        if moved {
            self.page += 1;
        }
        moved
    }

    /// Jump to `page`; returns `false` without moving when it is out of range.
    pub fn go_to(&mut self, page: usize, total: usize) -> bool {
        let ok = (1..=self.total_pages(total)).contains(&page);
        if ok {
            self.page = page;
        }
        ok
    }

    /// Back to the first page, keeping the size.
    pub fn restart(&mut self) {
        self.page = 1;
    }

    /// Change the page size and return to the first page.
    pub fn resize(&mut self, size: PageSize) {
        self.size = size;
        self.restart();
    }

    /// The same size with the page pulled back into `1..=total_pages(total)`.
    #[must_use]
    pub fn clamped(&self, total: usize) -> Self {
        Self {
            page: self.page.clamp(1, self.total_pages(total)),
            size: self.size,
        }
    }

    /// Slice of `rows` shown on the current page.
    #[must_use]
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = self.page.saturating_sub(1).saturating_mul(self.size.get());
        let start = start.min(rows.len());
        let end = start.saturating_add(self.size.get()).min(rows.len());
        &rows[start..end]
    }
}

/// One drop item prepared for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropItemView {
    pub item: String,
    pub display_name: String,
    /// Consuming mons, highest drop chance first.
    pub mons: Vec<DropMon>,
    pub has_biome_info: bool,
}

fn compare_drop_rows(a: &DropMon, b: &DropMon) -> Ordering {
    let pa = a.percentage.unwrap_or(-1.0);
    let pb = b.percentage.unwrap_or(-1.0);
    pb.total_cmp(&pa)
        .then_with(|| a.display_name().cmp(b.display_name()))
}

impl DropItemView {
    fn new(item: &DropItem) -> Self {
        let mut mons = item.mons.clone();
        mons.sort_by(compare_drop_rows);
        Self {
            display_name: item_display_name(&item.item),
            has_biome_info: mons.iter().any(DropMon::has_biome_info),
            item: item.item.clone(),
            mons,
        }
    }
}

/// Drop items whose id or display name contains `query` (case-insensitive).
#[must_use]
pub fn filter_drops(drops: &DropsIndex, query: &str) -> Vec<DropItemView> {
    let needle = query.trim().to_lowercase();
    drops
        .items
        .iter()
        .filter(|it| {
            needle.is_empty()
                || it.item.to_lowercase().contains(&needle)
                || item_display_name(&it.item).to_lowercase().contains(&needle)
        })
        .map(DropItemView::new)
        .collect()
}

/// One page of the drops listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropsListing {
    pub items: Vec<DropItemView>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

#[must_use]
pub fn drops_listing(drops: &DropsIndex, query: &str, pagination: &Pagination) -> DropsListing {
    let matches = filter_drops(drops, query);
    let current = pagination.clamped(matches.len());
    DropsListing {
        items: current.slice(&matches).to_vec(),
        page: current.page,
        total_pages: current.total_pages(matches.len()),
        total_matches: matches.len(),
    }
}

/// A single biome tag with its declaration, resolution and users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiomeTagView<'a> {
    pub tag: String,
    pub raw_values: Vec<String>,
    pub resolved: Vec<String>,
    pub used_by: Vec<&'a IndexRecord>,
    /// Whether the biome index declares the tag at all.
    pub known: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BiomeListing<'a> {
    All { tags: Vec<String> },
    Tag(BiomeTagView<'a>),
}

fn raw_values(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().map(crate::data::value_text).collect(),
        other => vec![crate::data::value_text(other)],
    }
}

/// Tag listing when `tag` is empty, otherwise the single-tag view.
#[must_use]
pub fn biome_listing<'a>(biomes: &BiomeIndex, index: &'a [IndexRecord], tag: &str) -> BiomeListing<'a> {
    if tag.is_empty() {
        return BiomeListing::All {
            tags: biomes.tags.keys().cloned().collect(),
        };
    }
    let raw = biomes.tags.get(tag);
    let resolved = biomes.resolved.get(tag);
    BiomeListing::Tag(BiomeTagView {
        tag: tag.to_string(),
        raw_values: raw.map(raw_values).unwrap_or_default(),
        resolved: resolved.cloned().unwrap_or_default(),
        used_by: mons_using_biome_tag(index, tag),
        known: raw.is_some() || resolved.is_some(),
    })
}

/// A single preset with its users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetView<'a> {
    pub name: String,
    /// `None` when no preset of that name exists.
    pub preset: Option<Preset>,
    pub used_by: Vec<&'a IndexRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresetListing<'a> {
    All { names: Vec<String> },
    Preset(PresetView<'a>),
}

/// Preset name listing when `name` is empty, otherwise the single-preset view.
#[must_use]
pub fn preset_listing<'a>(
    presets: &BTreeMap<String, Preset>,
    index: &'a [IndexRecord],
    name: &str,
) -> PresetListing<'a> {
    if name.is_empty() {
        return PresetListing::All {
            names: presets.keys().cloned().collect(),
        };
    }
    PresetListing::Preset(PresetView {
        name: name.to_string(),
        preset: presets.get(name).cloned(),
        used_by: mons_using_preset(index, name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mon(id: &str, dexnum: Option<u32>, primary: &str, spawn_count: u32) -> IndexRecord {
        IndexRecord {
            id: id.to_string(),
            name: id.to_uppercase(),
            dexnum,
            primary_type: (!primary.is_empty()).then(|| primary.to_string()),
            spawn_count,
            ..IndexRecord::default()
        }
    }

    fn ids(rows: &[&IndexRecord]) -> Vec<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn missing_dexnums_sort_last_and_ties_stay_stable() {
        let index = vec![
            mon("zeta", None, "", 1),
            mon("b", Some(2), "", 1),
            mon("alpha", None, "", 1),
            mon("a", Some(2), "", 1),
            mon("first", Some(1), "", 1),
        ];
        let rows = filter_dex(&index, &DexFilter::default());
        assert_eq!(ids(&rows), ["first", "b", "a", "zeta", "alpha"]);
    }

    #[test]
    fn dex_filter_combines_query_type_and_hidden_flag() {
        let index = vec![
            mon("pikachu", Some(25), "electric", 3),
            mon("raichu", Some(26), "electric", 0),
            mon("pichu", Some(172), "electric", 0),
            mon("ditto", Some(132), "normal", 0),
        ];
        let by_query = DexFilter {
            query: " CHU ".into(),
            ..DexFilter::default()
        };
        assert_eq!(ids(&filter_dex(&index, &by_query)), ["pikachu", "raichu", "pichu"]);

        let by_type = DexFilter {
            type_filter: "normal".into(),
            ..DexFilter::default()
        };
        assert_eq!(ids(&filter_dex(&index, &by_type)), ["ditto"]);

        let hidden = DexFilter {
            query: "chu".into(),
            no_spawns: true,
            ..DexFilter::default()
        };
        assert_eq!(ids(&filter_dex(&index, &hidden)), ["raichu", "pichu"]);
        assert_eq!(
            available_types(&index).into_iter().collect::<Vec<_>>(),
            ["electric", "normal"]
        );
    }

    fn drops_of(count: usize) -> DropsIndex {
        DropsIndex {
            items: (1..=count)
                .map(|i| DropItem {
                    item: format!("cobblemon:item_{i:02}"),
                    mons: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn drops_pagination_over_thirty_items() {
        let drops = drops_of(30);
        let mut pagination = Pagination {
            page: 1,
            size: PageSize::Ten,
        };
        assert_eq!(pagination.total_pages(30), 3);
        assert!(pagination.go_to(3, 30));
        let listing = drops_listing(&drops, "", &pagination);
        assert_eq!(listing.total_pages, 3);
        assert_eq!(listing.items.len(), 10);
        assert_eq!(listing.items[0].item, "cobblemon:item_21");
        assert_eq!(listing.items[9].item, "cobblemon:item_30");

        assert!(!pagination.can_next(30));
        assert!(!pagination.next(30));
        assert!(!pagination.go_to(4, 30));
        assert_eq!(pagination.page, 3);
        assert!(pagination.prev());
        assert_eq!(pagination.page, 2);
    }

    #[test]
    fn narrowing_the_query_pulls_the_page_back_in_range() {
        let drops = drops_of(30);
        let mut pagination = Pagination {
            page: 1,
            size: PageSize::Ten,
        };
        assert!(pagination.go_to(3, 30));

        let listing = drops_listing(&drops, "item_05", &pagination);
        assert_eq!(listing.total_matches, 1);
        assert_eq!(listing.total_pages, 1);
        assert_eq!(listing.page, 1);
        assert!(listing.page <= listing.total_pages);
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.items[0].item, "cobblemon:item_05");

        let twelve = drops_listing(&drops, "item_1", &pagination);
        assert_eq!(twelve.total_matches, 10);
        assert_eq!((twelve.page, twelve.items.len()), (1, 10));
        assert_eq!(pagination.clamped(12).page, 2);
        assert_eq!(pagination.clamped(30).page, 3);

        pagination.restart();
        assert_eq!((pagination.page, pagination.size), (1, PageSize::Ten));
    }

    #[test]
    fn empty_results_still_have_one_page() {
        let pagination = Pagination::default();
        assert_eq!(pagination.total_pages(0), 1);
        assert!(!pagination.can_prev());
        assert!(!pagination.can_next(0));
        let listing = drops_listing(&DropsIndex::default(), "x", &pagination);
        assert!(listing.items.is_empty());
        assert_eq!(listing.total_pages, 1);
    }

    #[test]
    fn page_sizes_are_restricted() {
        assert_eq!(PageSize::try_from(50), Ok(PageSize::Fifty));
        assert!(PageSize::try_from(20).is_err());
        assert_eq!(PageSize::default().get(), 25);
        let size: PageSize = serde_json::from_str("100").unwrap();
        assert_eq!(size, PageSize::Hundred);
    }

    #[test]
    fn drop_query_matches_raw_or_display_name() {
        let drops: DropsIndex = serde_json::from_str(
            r#"{"items":[
                {"item":"cobblemon:oval_stone","mons":[]},
                {"item":"minecraft:string","mons":[]}
            ]}"#,
        )
        .unwrap();
        let names = |q: &str| -> Vec<String> {
            filter_drops(&drops, q).into_iter().map(|v| v.display_name).collect()
        };
        assert_eq!(names("oval stone"), ["oval stone"]);
        assert_eq!(names("MINECRAFT"), ["string"]);
        assert_eq!(names("oval_"), ["oval stone"]);
        assert_eq!(names("").len(), 2);
    }

    #[test]
    fn drop_rows_sort_by_percentage_then_name() {
        let drops: DropsIndex = serde_json::from_str(
            r#"{"items":[{"item":"cobblemon:leek","mons":[
                {"id":"zz","percentage":null},
                {"id":"farfetchd","name":"Farfetch'd","percentage":5},
                {"id":"sirfetchd","percentage":50,"biomes":["plains"]},
                {"id":"aa"},
                {"id":"doduo","name":"Doduo","percentage":5}
            ]}]}"#,
        )
        .unwrap();
        let view = &filter_drops(&drops, "leek")[0];
        let order: Vec<&str> = view.mons.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(order, ["sirfetchd", "doduo", "farfetchd", "aa", "zz"]);
        assert!(view.has_biome_info);
    }

    fn spawning_index() -> Vec<IndexRecord> {
        serde_json::from_str(
            r##"[
              {"id":"oddish","spawns":[{"presets":["natural"],"biomeTags":{"include":["#c:is_forest"]}}]},
              {"id":"zubat","spawns":[[{"presets":["cave"]}]]}
            ]"##,
        )
        .unwrap()
    }

    #[test]
    fn biome_listing_lists_or_details() {
        let biomes: BiomeIndex = serde_json::from_str(
            r##"{"tags":{"#c:is_forest":["#minecraft:forest"],"#c:is_cave":"#minecraft:lush_caves"},
                "resolved":{"#c:is_forest":["minecraft:forest","minecraft:birch_forest"],
                            "#c:is_derived":["minecraft:plains"]},
                "all_biomes":["minecraft:forest"]}"##,
        )
        .unwrap();
        let index = spawning_index();

        assert_eq!(
            biome_listing(&biomes, &index, ""),
            BiomeListing::All {
                tags: vec!["#c:is_cave".into(), "#c:is_forest".into()]
            }
        );
        let BiomeListing::Tag(view) = biome_listing(&biomes, &index, "#c:is_forest") else {
            panic!("expected tag view");
        };
        assert!(view.known);
        assert_eq!(view.raw_values, ["#minecraft:forest"]);
        assert_eq!(view.resolved.len(), 2);
        assert_eq!(ids(&view.used_by), ["oddish"]);

        let BiomeListing::Tag(cave) = biome_listing(&biomes, &index, "#c:is_cave") else {
            panic!("expected tag view");
        };
        assert_eq!(cave.raw_values, ["#minecraft:lush_caves"]);
        assert!(cave.used_by.is_empty());

        let BiomeListing::Tag(unknown) = biome_listing(&biomes, &index, "#c:nope") else {
            panic!("expected tag view");
        };
        assert!(!unknown.known);

        let BiomeListing::Tag(derived) = biome_listing(&biomes, &index, "#c:is_derived") else {
            panic!("expected tag view");
        };
        assert!(derived.known);
        assert!(derived.raw_values.is_empty());
        assert_eq!(derived.resolved, ["minecraft:plains"]);
    }

    #[test]
    fn preset_listing_lists_or_details() {
        let presets: BTreeMap<String, Preset> = serde_json::from_str(
            r#"{"natural":{"contexts":["grounded"],"conditions":{"canSeeSky":true}},"cave":{}}"#,
        )
        .unwrap();
        let index = spawning_index();
        assert_eq!(
            preset_listing(&presets, &index, ""),
            PresetListing::All {
                names: vec!["cave".into(), "natural".into()]
            }
        );
        let PresetListing::Preset(view) = preset_listing(&presets, &index, "cave") else {
            panic!("expected preset view");
        };
        assert!(view.preset.is_some());
        assert_eq!(ids(&view.used_by), ["zubat"]);
        let PresetListing::Preset(missing) = preset_listing(&presets, &index, "urban") else {
            panic!("expected preset view");
        };
        assert!(missing.preset.is_none());
    }
}
