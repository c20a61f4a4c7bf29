//! One function per subcommand: load what it needs, then hand the result to the
//! console renderer or the JSON writer.

use crate::OutputFormat;
use crate::fs_fetcher::FsFetcher;
use crate::reports;
use anyhow::{Context, Result, bail};
use dexview_core::bst::bst_rows;
use dexview_core::{
    AppView, DataPaths, DexFilter, EvolutionCard, IndexRecord, LoadState, MonDetail, MoveGroups,
    PageSize, Pagination, Route, Shell, SpawnDescriptor, StatLine, TierReport, biome_listing,
    drops_listing, filter_dex, flatten_spawns, group_moves, parse_route, preset_listing,
    resolve_evolution_target, resolve_evolutions, tier_report,
};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

pub type CliShell = Shell<FsFetcher>;

/// Load the startup datasets from `data`. A missing or broken index is fatal.
pub async fn open(data: &Path) -> Result<CliShell> {
    let root = data
        .to_str()
        .with_context(|| format!("data directory {} is not valid UTF-8", data.display()))?;
    let shell = Shell::new(Rc::new(FsFetcher), DataPaths::rooted(root), "#/");
    match shell.load().await {
        LoadState::Ready => Ok(shell),
        LoadState::Failed(message) => bail!("{message}"),
        LoadState::Loading => bail!("dataset load did not complete"),
    }
}

fn emit<T: Serialize>(
    format: OutputFormat,
    out: &mut dyn Write,
    value: &T,
    console: impl FnOnce(&mut dyn Write, &T) -> std::io::Result<()>,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputFormat::Console => console(out, value)?,
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DexListing<'a> {
    pub shown: usize,
    pub total: usize,
    pub no_spawns: bool,
    pub mons: Vec<&'a IndexRecord>,
}

pub fn list(
    shell: &CliShell,
    filter: DexFilter,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let data = shell.datasets();
    let mons = filter_dex(&data.index, &filter);
    let listing = DexListing {
        shown: mons.len(),
        total: data.index.len(),
        no_spawns: filter.no_spawns,
        mons,
    };
    emit(format, out, &listing, reports::write_dex_listing)
}

#[derive(Debug, Serialize)]
pub struct MonReport<'a> {
    pub detail: &'a MonDetail,
    pub moves: MoveGroups,
    pub evolutions: Vec<EvolutionCard>,
    pub spawns: Vec<&'a SpawnDescriptor>,
    pub stats: Option<StatLine>,
}

pub async fn mon(
    shell: &CliShell,
    id: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(pending) = shell.navigate(&Route::href_mon(id)) {
        log::debug!("fetching detail for {pending}");
    }
    let detail = shell
        .cache
        .get(id)
        .await
        .with_context(|| format!("could not show {id}"))?;
    let data = shell.datasets();
    let report = MonReport {
        detail: &*detail,
        moves: group_moves(&detail.moves),
        evolutions: resolve_evolutions(&detail, &data.index, &data.sprites),
        spawns: flatten_spawns(detail.spawns.as_ref()),
        stats: StatLine::from_map(&detail.base_stats),
    };
    emit(format, out, &report, reports::write_mon)
}

#[derive(Debug, Serialize)]
pub struct Resolution {
    pub input: String,
    pub id: String,
    /// Whether `id` names an index entry or is only a best guess.
    pub known: bool,
}

pub fn resolve(
    shell: &CliShell,
    text: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let data = shell.datasets();
    let id = resolve_evolution_target(text, &data.index);
    let resolution = Resolution {
        known: data.index.iter().any(|mon| mon.id == id),
        input: text.to_string(),
        id,
    };
    emit(format, out, &resolution, reports::write_resolution)
}

pub fn drops(
    shell: &CliShell,
    query: &str,
    page: usize,
    size: PageSize,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let data = shell.datasets();
    let mut pagination = Pagination::default();
    pagination.resize(size);
    let total = drops_listing(&data.drops, query, &pagination).total_matches;
    if !pagination.go_to(page, total) {
        log::warn!(
            "page {page} is out of range 1..={}; showing page {}",
            pagination.total_pages(total),
            pagination.page
        );
    }
    let listing = drops_listing(&data.drops, query, &pagination);
    emit(format, out, &listing, reports::write_drops)
}

pub fn biome(shell: &CliShell, tag: &str, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let data = shell.datasets();
    let listing = biome_listing(&data.biomes, &data.index, tag);
    emit(format, out, &listing, reports::write_biome)
}

pub fn preset(
    shell: &CliShell,
    name: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let data = shell.datasets();
    let listing = preset_listing(&data.presets, &data.index, name);
    emit(format, out, &listing, reports::write_preset)
}

#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub route: Route,
    pub view: AppView,
    pub detail_id: Option<String>,
}

/// Parse a fragment without touching the dataset.
pub fn route(fragment: &str, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let route = parse_route(fragment);
    let report = RouteReport {
        view: route.app_view(),
        detail_id: route.detail_id().map(str::to_string),
        route,
    };
    emit(format, out, &report, reports::write_route)
}

#[derive(Debug, Serialize)]
pub struct BstListing {
    #[serde(flatten)]
    pub report: TierReport,
    pub skipped: Vec<String>,
    #[serde(skip)]
    pub top: Option<usize>,
}

/// Fetch every detail record in the index and tier their base stat totals.
pub async fn bst(
    shell: &CliShell,
    tiers: usize,
    top: Option<usize>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let data = shell.datasets();
    let ids: Vec<&str> = data.index.iter().map(|mon| mon.id.as_str()).collect();
    let results = futures::future::join_all(ids.iter().map(|id| shell.cache.get(id))).await;

    let mut details = Vec::with_capacity(ids.len());
    let mut skipped = Vec::new();
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(detail) => details.push(detail),
            Err(err) => {
                log::warn!("skipping {id}: {err}");
                skipped.push((*id).to_string());
            }
        }
    }

    let rows = bst_rows(details.iter().map(|detail| &**detail));
    let report = tier_report(rows, tiers).context("no detail record has a complete stat line")?;
    let listing = BstListing {
        report,
        skipped,
        top,
    };
    emit(format, out, &listing, reports::write_bst)
}
