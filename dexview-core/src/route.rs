//! Hash-fragment routing.
//!
//! Fragments look like `#/<view>/<param>?<query>`. The parser never fails; anything
//! it cannot make sense of ends up on the dex listing.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Characters `encodeURIComponent` leaves untouched are everything else in here.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Query parameter carrying the hidden "no spawns" flag.
pub const NO_SPAWNS_PARAM: &str = "nos";

/// Parsed URL fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Route {
    pub view: String,
    pub param: String,
    pub params: BTreeMap<String, String>,
}

/// The screen a route selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum AppView {
    Dex { no_spawns: bool },
    Mon { id: String },
    Presets { name: Option<String> },
    Biomes { tag: Option<String> },
    Drops,
}

/// Parse a URL fragment such as `#/mon/Raichu%20Alola`.
#[must_use]
pub fn parse_route(fragment: &str) -> Route {
    let trimmed = fragment.trim();
    let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);

    let (path, query) = match trimmed.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (trimmed, None),
    };

    let mut pieces = path.splitn(3, '/');
    let view = pieces.next().unwrap_or_default().trim().to_lowercase();
    let param = pieces.next().map(decode).unwrap_or_default();

    Route {
        view: if view.is_empty() { "dex".to_string() } else { view },
        param,
        params: query.map(parse_query).unwrap_or_default(),
    }
}

fn decode(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

fn parse_query(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(&key.replace('+', " ")), decode(&value.replace('+', " ")))
        })
        .collect()
}

/// `1`, `true` and `yes` (any case) are truthy; everything else is not.
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

impl Route {
    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Hidden "no spawns" flag mirrored in `?nos=1`.
    #[must_use]
    pub fn no_spawns(&self) -> bool {
        self.query(NO_SPAWNS_PARAM).is_some_and(is_truthy)
    }

    /// Screen selected by this route. Unknown views fall back to the dex listing.
    #[must_use]
    pub fn app_view(&self) -> AppView {
        let param = (!self.param.is_empty()).then(|| self.param.clone());
        match self.view.as_str() {
            "mon" => AppView::Mon {
                id: self.param.clone(),
            },
            "preset" | "presets" => AppView::Presets { name: param },
            "biome" | "biomes" => AppView::Biomes { tag: param },
            "drops" => AppView::Drops,
            _ => AppView::Dex {
                no_spawns: self.no_spawns(),
            },
        }
    }

    /// Id of the detail record this route displays, if any.
    #[must_use]
    pub fn detail_id(&self) -> Option<&str> {
        (self.view == "mon" && !self.param.is_empty()).then_some(self.param.as_str())
    }

    #[must_use]
    pub fn href_mon(id: &str) -> String {
        format!("#/mon/{}", encode(id))
    }

    #[must_use]
    pub fn href_preset(name: &str) -> String {
        format!("#/preset/{}", encode(name))
    }

    #[must_use]
    pub fn href_biome(tag: &str) -> String {
        format!("#/biome/{}", encode(tag))
    }
}

fn encode(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Rewrite `fragment` so that query flag `key` is `1` when `on` and absent otherwise.
///
/// Other query parameters keep their original order.
#[must_use]
pub fn with_hash_param(fragment: &str, key: &str, on: bool) -> String {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let (path, query) = fragment.split_once('?').unwrap_or((fragment, ""));
    let path = if path.is_empty() { "/" } else { path };

    let mut pairs: Vec<String> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some(key))
        .map(str::to_string)
        .collect();
    if on {
        pairs.push(format!("{key}=1"));
    }

    if pairs.is_empty() {
        format!("#{path}")
    } else {
        format!("#{path}?{}", pairs.join("&"))
    }
}

/// Section listing to fall back to when "back" has no history entry to return to.
#[must_use]
pub fn back_target(view: &str) -> &'static str {
    match view {
        "preset" | "presets" => "#/preset",
        "biome" | "biomes" => "#/biome",
        "drops" => "#/drops",
        _ => "#/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_fragment_decodes_param() {
        let route = parse_route("#/mon/Raichu%20Alola");
        assert_eq!(route.view, "mon");
        assert_eq!(route.param, "Raichu Alola");
        assert_eq!(
            route.app_view(),
            AppView::Mon {
                id: "Raichu Alola".into()
            }
        );
    }

    #[test]
    fn empty_and_unknown_fragments_land_on_dex() {
        for fragment in ["", "#", "#/", "#/dex", "#/nonsense/x", "#/DEX"] {
            assert!(
                matches!(parse_route(fragment).app_view(), AppView::Dex { .. }),
                "{fragment}"
            );
        }
        assert_eq!(parse_route("#/").view, "dex");
        assert_eq!(parse_route("#/MON/pikachu").view, "mon");
    }

    #[test]
    fn section_aliases_select_the_same_view() {
        assert_eq!(parse_route("#/biomes").app_view(), AppView::Biomes { tag: None });
        assert_eq!(
            parse_route("#/biome/%23cobblemon%3Ais_forest").app_view(),
            AppView::Biomes {
                tag: Some("#cobblemon:is_forest".into())
            }
        );
        assert_eq!(
            parse_route("#/presets/natural").app_view(),
            AppView::Presets {
                name: Some("natural".into())
            }
        );
        assert_eq!(parse_route("#/drops").app_view(), AppView::Drops);
    }

    #[test]
    fn no_spawns_flag_reads_truthy_values() {
        assert!(parse_route("#/dex?nos=1").no_spawns());
        assert!(parse_route("#/dex?nos=YES").no_spawns());
        assert!(parse_route("#/?page=2&nos=true").no_spawns());
        assert!(!parse_route("#/dex?nos=0").no_spawns());
        assert!(!parse_route("#/dex").no_spawns());
        assert_eq!(
            parse_route("#/dex?nos=1").app_view(),
            AppView::Dex { no_spawns: true }
        );
    }

    #[test]
    fn toggling_the_flag_rewrites_only_that_param() {
        let on = with_hash_param("#/dex", NO_SPAWNS_PARAM, true);
        assert_eq!(on, "#/dex?nos=1");
        assert!(parse_route(&on).no_spawns());
        let off = with_hash_param("#/dex?a=b&nos=1", NO_SPAWNS_PARAM, false);
        assert_eq!(off, "#/dex?a=b");
        assert_eq!(with_hash_param("", NO_SPAWNS_PARAM, false), "#/");
    }

    #[test]
    fn hrefs_roundtrip_through_the_parser() {
        let href = Route::href_mon("Mr. Mime / Galar");
        assert_eq!(parse_route(&href).param, "Mr. Mime / Galar");
        assert_eq!(Route::href_biome("#minecraft:is_ocean"), "#/biome/%23minecraft%3Ais_ocean");
        assert_eq!(parse_route(&Route::href_preset("foo bar")).param, "foo bar");
    }

    #[test]
    fn detail_id_requires_mon_view_and_param() {
        assert_eq!(parse_route("#/mon/eevee").detail_id(), Some("eevee"));
        assert_eq!(parse_route("#/mon/").detail_id(), None);
        assert_eq!(parse_route("#/biome/eevee").detail_id(), None);
        assert_eq!(back_target("mon"), "#/");
        assert_eq!(back_target("biomes"), "#/biome");
    }
}
