//! Dexview Core
//!
//! Platform-agnostic view-model, routing and data-resolution logic for the Dexview
//! mon browser. This crate knows nothing about browsers or filesystems: every load
//! goes through the [`JsonFetcher`] trait, which the web and CLI front ends implement.

pub mod bst;
pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod evolution;
pub mod filters;
pub mod moves;
pub mod normalize;
pub mod route;
pub mod shell;
pub mod spawns;
pub mod xref;

// Re-export commonly used types
pub use bst::{BstRow, BstSummary, StatLine, Tier, TierReport, tier_report};
pub use cache::DetailCache;
pub use config::DataPaths;
pub use data::{
    BiomeIndex, BiomeTagSelectors, DropEntry, DropItem, DropMon, DropTable, DropsIndex,
    Evolution, EvolutionRequirement, IndexRecord, MonDetail, Preset, SpawnDescriptor,
    SpawnEntry, SpawnsField, SpriteIndex, SpriteSet,
};
pub use error::LoadError;
pub use evolution::{
    BiomeChip, EvolutionCard, RequirementChip, resolve_evolution_target, resolve_evolutions,
};
pub use filters::{
    BiomeListing, BiomeTagView, DexFilter, DropItemView, DropsListing, PageSize, Pagination,
    PresetListing, PresetView, available_types, biome_listing, drops_listing, filter_dex,
    filter_drops, preset_listing,
};
pub use moves::{MoveCategory, MoveEntry, MoveGroups, group_moves};
pub use normalize::{canonical_biome_tag, compact_key, item_display_name, region_for};
pub use route::{AppView, Route, parse_route};
pub use shell::{
    CurrentRoute, Datasets, DetailSlot, DetailState, LoadState, Shell, load_datasets,
};
pub use spawns::flatten_spawns;
pub use xref::{mons_using_biome_tag, mons_using_preset};

use serde::de::DeserializeOwned;

/// Trait for abstracting resource fetches.
/// Platform-specific implementations should provide this
#[async_trait::async_trait(?Send)]
pub trait JsonFetcher {
    /// Fetch the raw body stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Status`] when the source reports a non-success status and
    /// [`LoadError::Network`] when the resource cannot be reached at all.
    async fn fetch_text(&self, path: &str) -> Result<String, LoadError>;
}

/// Fetch `path` and parse the body as `T`.
///
/// # Errors
///
/// Propagates fetch failures and maps malformed bodies to [`LoadError::Parse`].
pub async fn fetch_json<T, F>(fetcher: &F, path: &str) -> Result<T, LoadError>
where
    T: DeserializeOwned,
    F: JsonFetcher + ?Sized,
{
    let body = fetcher.fetch_text(path).await?;
    serde_json::from_str(&body).map_err(|err| LoadError::parse(path, &err))
}
