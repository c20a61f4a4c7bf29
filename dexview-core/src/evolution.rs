//! Evolution target resolution.
//!
//! Evolution `result` fields are free text: sometimes a canonical id, sometimes a
//! display name, sometimes an annotated form such as `Mega Charizard X (mega = true)`.
//! [`resolve_evolution_target`] maps them onto index ids with a fixed fallback chain.

use crate::data::{Evolution, EvolutionRequirement, IndexRecord, MonDetail, SpriteIndex};
use crate::normalize::{
    biome_short_label, canonical_biome_tag, compact_key, region_for, strip_annotations, tokens,
};
use crate::route::Route;
use serde::Serialize;

/// Resolve an evolution `result` string to an index id.
///
/// First success wins:
/// 1. a region-aware candidate (`raichu_alola` for `Raichu-Alola`) that exists in the index,
/// 2. an entry whose compacted display name equals the compacted input,
/// 3. an entry whose id is the first token or starts with `<first token>_`,
/// 4. otherwise the candidate itself, which may not exist in the index.
///
/// Returns an empty string when the input has no usable tokens.
#[must_use]
pub fn resolve_evolution_target(result: &str, index: &[IndexRecord]) -> String {
    if result.trim().is_empty() {
        return String::new();
    }
    let mut words: Vec<String> = tokens(&strip_annotations(result))
        .into_iter()
        .map(|t| region_for(&t).map_or(t, str::to_string))
        .collect();
    // A leading "mega" names the form, not the species.
    if words.len() > 1 && words[0] == "mega" {
        words.remove(0);
    }
    let (Some(base), Some(last)) = (words.first(), words.last()) else {
        return String::new();
    };

    let candidate = match region_for(last) {
        Some(region) => format!("{base}_{region}"),
        None => base.clone(),
    };
    if index.iter().any(|mon| mon.id == candidate) {
        return candidate;
    }

    let wanted = compact_key(result);
    if let Some(hit) = index.iter().find(|mon| compact_key(&mon.name) == wanted) {
        return hit.id.clone();
    }

    let prefix = format!("{base}_");
    if let Some(hit) = index
        .iter()
        .find(|mon| mon.id == *base || mon.id.starts_with(&prefix))
    {
        return hit.id.clone();
    }

    candidate
}

/// Plain-text label for a requirement; biome requirements also render as chips.
#[must_use]
pub fn requirement_label(requirement: &EvolutionRequirement) -> String {
    match requirement {
        EvolutionRequirement::Level {
            min_level,
            time_range,
        } => {
            let min = min_level.as_deref().unwrap_or("?");
            match time_range {
                Some(range) => format!("Level {min} @ {range}"),
                None => format!("Level {min}"),
            }
        }
        EvolutionRequirement::HasMove { name } => {
            format!("Know {}", name.as_deref().unwrap_or("a move"))
        }
        EvolutionRequirement::HasMoveType { move_type } => {
            format!("Know {} move", move_type.as_deref().unwrap_or("a type"))
        }
        EvolutionRequirement::HeldItem { item } => {
            format!("Hold {}", item.as_deref().unwrap_or("item"))
        }
        EvolutionRequirement::Weather { weather } => {
            weather.clone().unwrap_or_else(|| "weather".to_string())
        }
        EvolutionRequirement::Friendship { amount } => {
            format!("Friendship {}", amount.as_deref().unwrap_or_default())
                .trim_end()
                .to_string()
        }
        EvolutionRequirement::TimeRange { range } => {
            format!("Time {}", range.as_deref().unwrap_or_default())
                .trim_end()
                .to_string()
        }
        EvolutionRequirement::Biome { .. } => "biome".to_string(),
        EvolutionRequirement::Other { variant } => variant.replace('_', " "),
    }
}

/// Navigable biome reference inside an evolution card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BiomeChip {
    /// `In` or `Not in`.
    pub prefix: &'static str,
    pub label: String,
    pub tag: String,
    pub href: String,
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "chip", content = "value", rename_all = "snake_case")]
pub enum RequirementChip {
    Text(String),
    Biome(BiomeChip),
}

impl RequirementChip {
    #[must_use]
    pub fn from_requirement(requirement: &EvolutionRequirement) -> Self {
        match requirement {
            EvolutionRequirement::Biome { key, negated } => {
                let tag = canonical_biome_tag(key);
                Self::Biome(BiomeChip {
                    prefix: if *negated { "Not in" } else { "In" },
                    label: biome_short_label(key).to_string(),
                    href: Route::href_biome(&tag),
                    tag,
                    negated: *negated,
                })
            }
            other => Self::Text(requirement_label(other)),
        }
    }

    /// Flat text form, used by non-interactive renderers.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Biome(chip) => format!("{} {}", chip.prefix, chip.label),
        }
    }
}

/// One evolution with its target resolved against the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionCard {
    pub evolution: Evolution,
    pub target_id: String,
    /// Index record for `target_id`; `None` when the resolver only produced a guess.
    pub target: Option<IndexRecord>,
    pub sprite: Option<String>,
    pub chips: Vec<RequirementChip>,
}

impl EvolutionCard {
    /// Cards only link somewhere when the target exists in the index.
    #[must_use]
    pub fn href(&self) -> Option<String> {
        self.target.as_ref().map(|t| Route::href_mon(&t.id))
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match &self.target {
            Some(target) => target.display_name(),
            None if !self.evolution.result.is_empty() => &self.evolution.result,
            None => &self.target_id,
        }
    }
}

/// Resolve every evolution of `detail` into a display card.
#[must_use]
pub fn resolve_evolutions(
    detail: &MonDetail,
    index: &[IndexRecord],
    sprites: &SpriteIndex,
) -> Vec<EvolutionCard> {
    detail
        .evolutions
        .iter()
        .map(|evolution| {
            let target_id = resolve_evolution_target(&evolution.result, index);
            let target = index.iter().find(|mon| mon.id == target_id).cloned();
            let sprite = if target_id.is_empty() {
                None
            } else {
                sprites.sprite_for(&target_id, false).map(str::to_string)
            };
            EvolutionCard {
                chips: evolution
                    .requirements
                    .iter()
                    .map(RequirementChip::from_requirement)
                    .collect(),
                evolution: evolution.clone(),
                target_id,
                target,
                sprite,
            }
        })
        .collect()
}
