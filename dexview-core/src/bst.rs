//! Base stat totals and quantile tiers over detail records.

use crate::data::MonDetail;
use serde::Serialize;
use serde_json::{Map, Value};

/// Canonical stat name and the keys it may appear under.
const STAT_ALIASES: [(&str, &[&str]); 6] = [
    ("hp", &["hp"]),
    ("attack", &["attack", "atk"]),
    ("defense", &["defence", "defense", "def"]),
    (
        "special_attack",
        &["special_attack", "sp_attack", "spattack", "sp_atk", "spatk", "spa"],
    ),
    (
        "special_defense",
        &[
            "special_defence",
            "special_defense",
            "sp_defence",
            "sp_defense",
            "spdef",
            "sp_def",
            "spd",
        ],
    ),
    ("speed", &["speed", "spe"]),
];

/// The six base stats of one mon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatLine {
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub special_attack: i64,
    pub special_defense: i64,
    pub speed: i64,
}

impl StatLine {
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.hp
            + self.attack
            + self.defense
            + self.special_attack
            + self.special_defense
            + self.speed
    }

    /// Read a stat map, accepting the usual abbreviations. `None` if any stat is
    /// missing or not numeric.
    #[must_use]
    pub fn from_map(stats: &Map<String, Value>) -> Option<Self> {
        let mut values = [0_i64; 6];
        for (slot, (_, aliases)) in values.iter_mut().zip(STAT_ALIASES.iter()) {
            let raw = aliases.iter().find_map(|key| stats.get(*key))?;
            *slot = coerce_int(raw)?;
        }
        let [hp, attack, defense, special_attack, special_defense, speed] = values;
        Some(Self {
            hp,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
        })
    }
}

/// Integer view of a loose JSON value; floats truncate toward zero.
#[must_use]
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BstRow {
    pub id: String,
    pub bst: i64,
    pub stats: StatLine,
}

impl BstRow {
    #[must_use]
    pub fn from_detail(detail: &MonDetail) -> Option<Self> {
        let stats = StatLine::from_map(&detail.base_stats)?;
        Some(Self {
            id: detail.id.clone(),
            bst: stats.total(),
            stats,
        })
    }
}

/// Rows for every detail with a complete stat line, sorted by `(bst, lowercase id)`.
#[must_use]
pub fn bst_rows<'a>(details: impl IntoIterator<Item = &'a MonDetail>) -> Vec<BstRow> {
    let mut rows: Vec<BstRow> = details.into_iter().filter_map(BstRow::from_detail).collect();
    rows.sort_by(|a, b| {
        a.bst
            .cmp(&b.bst)
            .then_with(|| a.id.to_lowercase().cmp(&b.id.to_lowercase()))
    });
    rows
}

/// `k - 1` cutpoints splitting sorted `values` into `k` quantile bins, using linear
/// interpolation between neighbours.
#[must_use]
pub fn quantile_cutpoints(values: &[i64], k: usize) -> Vec<f64> {
    if k <= 1 || values.is_empty() {
        return Vec::new();
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let last = (sorted.len() - 1) as f64;
    (1..k)
        .map(|i| {
            let pos = last * (i as f64 / k as f64);
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let (a, b) = (sorted[lo] as f64, sorted[hi] as f64);
            a + (pos - lo as f64) * (b - a)
        })
        .collect()
}

/// 1-based tier: the first cut at or above `bst`, or the last tier.
#[must_use]
pub fn assign_tier(bst: i64, cuts: &[f64]) -> usize {
    cuts.iter()
        .position(|cut| bst as f64 <= *cut)
        .map_or(cuts.len() + 1, |idx| idx + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BstSummary {
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub stdev: f64,
}

impl BstSummary {
    /// `None` for an empty slice.
    #[must_use]
    pub fn of(values: &[i64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        let (&min, &max) = (sorted.first()?, sorted.last()?);
        let n = sorted.len();
        let mean = sorted.iter().sum::<i64>() as f64 / n as f64;
        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
        };
        let variance = sorted
            .iter()
            .map(|v| (*v as f64 - mean).powi(2))
            .sum::<f64>()
            / n as f64;
        Some(Self {
            count: n,
            min,
            max,
            mean,
            median,
            stdev: variance.sqrt(),
        })
    }
}

/// One tier with its bounds and members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tier {
    pub tier: usize,
    /// Inclusive lower bound for tier 1, exclusive otherwise.
    pub low: i64,
    pub high: i64,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierReport {
    pub summary: BstSummary,
    pub cuts: Vec<f64>,
    pub tiers: Vec<Tier>,
    /// Rows in ascending `(bst, id)` order.
    pub rows: Vec<BstRow>,
}

impl TierReport {
    #[must_use]
    pub fn tier_of(&self, id: &str) -> Option<usize> {
        self.tiers
            .iter()
            .find(|t| t.members.iter().any(|m| m == id))
            .map(|t| t.tier)
    }
}

/// Split sorted `rows` into `k` quantile tiers (at least one).
#[must_use]
pub fn tier_report(rows: Vec<BstRow>, k: usize) -> Option<TierReport> {
    let k = k.max(1);
    let values: Vec<i64> = rows.iter().map(|r| r.bst).collect();
    let summary = BstSummary::of(&values)?;
    let cuts = quantile_cutpoints(&values, k);

    let mut bounds = Vec::with_capacity(k + 1);
    bounds.push(summary.min);
    bounds.extend(cuts.iter().map(|c| c.round() as i64));
    bounds.push(summary.max);

    let mut tiers: Vec<Tier> = (1..=k)
        .map(|tier| Tier {
            tier,
            low: bounds[tier - 1],
            high: bounds[tier],
            members: Vec::new(),
        })
        .collect();
    for row in &rows {
        let tier = assign_tier(row.bst, &cuts);
        tiers[tier - 1].members.push(row.id.clone());
    }
    for tier in &mut tiers {
        tier.members.sort();
    }

    Some(TierReport {
        summary,
        cuts,
        tiers,
        rows,
    })
}
