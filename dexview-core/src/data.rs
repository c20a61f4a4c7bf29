//! Shapes of the static dataset documents.
//!
//! The dataset is produced by an external build step and is not schema-guaranteed, so
//! most fields deserialize leniently: `null` becomes the default, lists also accept a
//! single scalar, and numeric fields accept numeric strings.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Lightweight per-mon summary from the dex index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IndexRecord {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub dexnum: Option<u32>,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub primary_type: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub secondary_type: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub spawn_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawns: Option<SpawnsField>,
}

impl IndexRecord {
    /// Name shown in listings; falls back to the id for unnamed records.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    #[must_use]
    pub fn has_type(&self, wanted: &str) -> bool {
        self.primary_type.as_deref() == Some(wanted)
            || self.secondary_type.as_deref() == Some(wanted)
    }
}

/// Raw `spawns` field: a single descriptor or a list whose elements may themselves be
/// lists of descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpawnsField {
    List(Vec<SpawnEntry>),
    Single(SpawnDescriptor),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpawnEntry {
    Group(Vec<SpawnDescriptor>),
    One(SpawnDescriptor),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BiomeTagSelectors {
    #[serde(default, deserialize_with = "string_list")]
    pub include: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub exclude: Vec<String>,
}

/// One rule describing where, when and how a mon appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SpawnDescriptor {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub presets: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub contexts: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub times: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub rarity: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub key_item: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub biome_tags: BiomeTagSelectors,
}

impl SpawnDescriptor {
    #[must_use]
    pub fn mentions_biome_tag(&self, tag: &str) -> bool {
        self.biome_tags.include.iter().any(|t| t == tag)
            || self.biome_tags.exclude.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn uses_preset(&self, name: &str) -> bool {
        self.presets.iter().any(|p| p == name)
    }
}

/// Full per-mon record fetched on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MonDetail {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub dexnum: Option<u32>,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub primary_type: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub secondary_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub male_ratio: Option<f64>,
    #[serde(default, deserialize_with = "string_list")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub abilities: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub egg_groups: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub base_stats: Map<String, Value>,
    #[serde(default, deserialize_with = "null_default")]
    pub ev_yield: Map<String, Value>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub experience_group: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub catch_rate: Option<u32>,
    #[serde(default)]
    pub drops: Option<DropTable>,
    #[serde(default, deserialize_with = "string_list")]
    pub moves: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub evolutions: Vec<Evolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawns: Option<SpawnsField>,
    #[serde(default, deserialize_with = "string_list")]
    pub species_sources: Vec<String>,
}

impl MonDetail {
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DropTable {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "null_default")]
    pub entries: Vec<DropEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DropEntry {
    #[serde(default, deserialize_with = "null_default")]
    pub item: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub quantity_range: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentage: Option<f64>,
    #[serde(default, deserialize_with = "string_list")]
    pub biomes: Vec<String>,
    #[serde(default, alias = "exclusiveBiomes", deserialize_with = "string_list")]
    pub exclude_biomes: Vec<String>,
}

/// One evolution edge. `result` is free text and must go through the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Evolution {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub variant: String,
    #[serde(default, deserialize_with = "null_default")]
    pub result: String,
    #[serde(default)]
    pub required_context: Option<Value>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub requirements: Vec<EvolutionRequirement>,
}

impl Evolution {
    #[must_use]
    pub fn required_context_label(&self) -> Option<String> {
        self.required_context
            .as_ref()
            .map(value_text)
            .filter(|s| !s.is_empty())
    }
}

/// Tagged evolution requirement, decoded from the loose `variant`-keyed object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "RawRequirement",
    tag = "kind",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum EvolutionRequirement {
    Level {
        min_level: Option<String>,
        time_range: Option<String>,
    },
    HasMove {
        name: Option<String>,
    },
    HasMoveType {
        move_type: Option<String>,
    },
    HeldItem {
        item: Option<String>,
    },
    Weather {
        weather: Option<String>,
    },
    Friendship {
        amount: Option<String>,
    },
    TimeRange {
        range: Option<String>,
    },
    Biome {
        key: String,
        negated: bool,
    },
    Other {
        variant: String,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequirement {
    #[serde(default, deserialize_with = "null_default")]
    variant: String,
    min_level: Option<Value>,
    level: Option<Value>,
    time_range: Option<Value>,
    #[serde(rename = "move")]
    move_name: Option<Value>,
    #[serde(rename = "type", alias = "moveType")]
    move_type: Option<Value>,
    item: Option<Value>,
    item_condition: Option<Value>,
    weather: Option<Value>,
    min: Option<Value>,
    amount: Option<Value>,
    range: Option<Value>,
    biome: Option<Value>,
    biome_condition: Option<Value>,
    biome_anticondition: Option<Value>,
    // Tagged form written back by `Serialize`.
    kind: Option<String>,
    name: Option<Value>,
    key: Option<Value>,
    negated: Option<bool>,
}

fn present(value: Option<&Value>) -> Option<String> {
    value.map(value_text).filter(|s| !s.is_empty())
}

impl From<RawRequirement> for EvolutionRequirement {
    fn from(raw: RawRequirement) -> Self {
        let variant = match raw.kind.as_deref() {
            Some(kind) if kind != "other" => kind.to_string(),
            _ => raw.variant.clone(),
        };
        match variant.as_str() {
            "level" => Self::Level {
                min_level: present(raw.min_level.as_ref()).or_else(|| present(raw.level.as_ref())),
                time_range: present(raw.time_range.as_ref()),
            },
            "has_move" => Self::HasMove {
                name: present(raw.move_name.as_ref()).or_else(|| present(raw.name.as_ref())),
            },
            "has_move_type" => Self::HasMoveType {
                move_type: present(raw.move_type.as_ref()),
            },
            "held_item" => Self::HeldItem {
                item: present(raw.item.as_ref()).or_else(|| present(raw.item_condition.as_ref())),
            },
            "weather" => Self::Weather {
                weather: present(raw.weather.as_ref()),
            },
            "friendship" => Self::Friendship {
                amount: present(raw.min.as_ref()).or_else(|| present(raw.amount.as_ref())),
            },
            "time_range" => Self::TimeRange {
                range: present(raw.range.as_ref()),
            },
            "biome" => {
                let condition = present(raw.biome.as_ref())
                    .or_else(|| present(raw.biome_condition.as_ref()))
                    .or_else(|| present(raw.key.as_ref()));
                let anticondition = present(raw.biome_anticondition.as_ref());
                match (condition, anticondition) {
                    (Some(key), _) => Self::Biome {
                        key,
                        negated: raw.negated.unwrap_or(false),
                    },
                    (None, Some(key)) => Self::Biome { key, negated: true },
                    (None, None) => Self::Other { variant },
                }
            }
            _ => Self::Other { variant },
        }
    }
}

/// Named spawn preset; the name is the key of the presets document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Preset {
    #[serde(default, deserialize_with = "string_list")]
    pub contexts: Vec<String>,
    #[serde(default)]
    pub conditions: Value,
    #[serde(default)]
    pub anticonditions: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BiomeIndex {
    #[serde(default, deserialize_with = "null_default")]
    pub tags: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "null_default")]
    pub resolved: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "string_list")]
    pub all_biomes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SpriteSet {
    #[serde(default, deserialize_with = "string_list")]
    pub normal: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub shiny: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SpriteIndex {
    #[serde(default, deserialize_with = "null_default")]
    pub images: HashMap<String, SpriteSet>,
}

impl SpriteIndex {
    /// First sprite URL for `id`, if any.
    #[must_use]
    pub fn sprite_for(&self, id: &str, shiny: bool) -> Option<&str> {
        let set = self.images.get(id)?;
        let list = if shiny { &set.shiny } else { &set.normal };
        list.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DropMon {
    #[serde(default, deserialize_with = "null_default")]
    pub id: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentage: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub quantity_range: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub biomes: Vec<String>,
    #[serde(default, alias = "exclusiveBiomes", deserialize_with = "string_list")]
    pub exclude_biomes: Vec<String>,
}

impl DropMon {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    #[must_use]
    pub fn has_biome_info(&self) -> bool {
        !self.biomes.is_empty() || !self.exclude_biomes.is_empty()
    }

    /// `in a, b — not in c` summary, empty without biome constraints.
    #[must_use]
    pub fn biome_note(&self) -> String {
        let mut parts = Vec::new();
        if !self.biomes.is_empty() {
            parts.push(format!("in {}", self.biomes.join(", ")));
        }
        if !self.exclude_biomes.is_empty() {
            parts.push(format!("not in {}", self.exclude_biomes.join(", ")));
        }
        parts.join(" — ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DropItem {
    #[serde(default, deserialize_with = "null_default")]
    pub item: String,
    #[serde(default, deserialize_with = "null_default")]
    pub mons: Vec<DropMon>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DropsIndex {
    #[serde(default, deserialize_with = "null_default")]
    pub items: Vec<DropItem>,
}

/// Render a loose JSON value as display text.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .map(value_text)
        .filter(|s| !s.trim().is_empty()))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_u32))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(value_text)
            .filter(|s| !s.is_empty())
            .collect(),
        Some(other) => vec![value_text(&other)],
    })
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<EvolutionRequirement>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value::<RawRequirement>(item).ok())
        .map(EvolutionRequirement::from)
        .collect())
}
