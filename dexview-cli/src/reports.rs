use crate::commands::{BstListing, DexListing, MonReport, Resolution, RouteReport};
use colored::Colorize;
use dexview_core::data::value_text;
use dexview_core::{
    AppView, BiomeListing, DropsListing, IndexRecord, MoveCategory, PresetListing, item_display_name,
};
use std::io::{Result, Write};

fn dex_number(dexnum: Option<u32>) -> String {
    dexnum.map(|n| format!("#{n:03}")).unwrap_or_default()
}

fn types_of(primary: Option<&String>, secondary: Option<&String>) -> String {
    [primary, secondary]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("/")
}

fn heading(out: &mut dyn Write, title: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title.bright_cyan().bold())?;
    Ok(())
}

fn mon_line(out: &mut dyn Write, mon: &IndexRecord) -> Result<()> {
    writeln!(
        out,
        "  {:>5}  {:<20} {:<16} {} spawns",
        dex_number(mon.dexnum),
        mon.display_name().bold(),
        types_of(mon.primary_type.as_ref(), mon.secondary_type.as_ref()),
        mon.spawn_count
    )
}

fn used_by(out: &mut dyn Write, mons: &[&IndexRecord]) -> Result<()> {
    heading(out, &format!("Used by {} mons", mons.len()))?;
    if mons.is_empty() {
        writeln!(out, "  {}", "No mon spawns with this.".dimmed())?;
    }
    for mon in mons {
        mon_line(out, mon)?;
    }
    Ok(())
}

pub fn write_dex_listing(out: &mut dyn Write, listing: &DexListing<'_>) -> Result<()> {
    write!(out, "{}", format!("{} / {} shown", listing.shown, listing.total).bold())?;
    if listing.no_spawns {
        write!(out, "  {}", "No spawns".yellow())?;
    }
    writeln!(out)?;
    for mon in &listing.mons {
        mon_line(out, mon)?;
    }
    Ok(())
}

pub fn write_mon(out: &mut dyn Write, report: &MonReport<'_>) -> Result<()> {
    let detail = report.detail;
    writeln!(
        out,
        "{} {}",
        detail.display_name().bright_cyan().bold(),
        dex_number(detail.dexnum)
    )?;
    let types = types_of(detail.primary_type.as_ref(), detail.secondary_type.as_ref());
    if !types.is_empty() {
        writeln!(out, "Types: {types}")?;
    }
    if !detail.abilities.is_empty() {
        writeln!(out, "Abilities: {}", detail.abilities.join(", "))?;
    }
    if !detail.egg_groups.is_empty() {
        writeln!(out, "Egg groups: {}", detail.egg_groups.join(", "))?;
    }
    match detail.male_ratio {
        Some(ratio) if ratio < 0.0 => writeln!(out, "Gender: genderless")?,
        Some(ratio) => writeln!(out, "Gender: {:.1}% male", ratio * 100.0)?,
        None => {}
    }
    if let Some(rate) = detail.catch_rate {
        writeln!(out, "Catch rate: {rate}")?;
    }
    if let Some(group) = &detail.experience_group {
        writeln!(out, "Experience: {group}")?;
    }

    if let Some(stats) = &report.stats {
        heading(out, "Base stats")?;
        for (name, value) in [
            ("HP", stats.hp),
            ("Attack", stats.attack),
            ("Defense", stats.defense),
            ("Sp. Atk", stats.special_attack),
            ("Sp. Def", stats.special_defense),
            ("Speed", stats.speed),
        ] {
            writeln!(out, "  {name:<8} {value:>4}")?;
        }
        writeln!(out, "  {:<8} {:>4}", "Total".bold(), stats.total())?;
    }

    if !report.evolutions.is_empty() {
        heading(out, "Evolutions")?;
        for card in &report.evolutions {
            let chips: Vec<String> = card.chips.iter().map(|chip| chip.text()).collect();
            let marker = if card.target.is_some() {
                card.target_id.green()
            } else {
                card.target_id.yellow()
            };
            write!(out, "  {} ({marker})", card.title())?;
            if !chips.is_empty() {
                write!(out, ": {}", chips.join(", "))?;
            }
            writeln!(out)?;
        }
    }

    if !report.moves.is_empty() {
        heading(out, "Moves")?;
        for category in MoveCategory::ALL {
            let moves = report.moves.get(category);
            if !moves.is_empty() {
                writeln!(out, "  {}: {}", category.label().bold(), moves.join(", "))?;
            }
        }
    }

    heading(out, "Spawns")?;
    if report.spawns.is_empty() {
        writeln!(out, "  {}", "This mon does not spawn naturally.".dimmed())?;
    }
    for spawn in &report.spawns {
        let mut parts = Vec::new();
        if let Some(rarity) = &spawn.rarity {
            parts.push(rarity.clone());
        }
        if !spawn.presets.is_empty() {
            parts.push(format!("presets {}", spawn.presets.join(", ")));
        }
        if !spawn.contexts.is_empty() {
            parts.push(spawn.contexts.join(", "));
        }
        if !spawn.times.is_empty() {
            parts.push(format!("at {}", spawn.times.join(", ")));
        }
        if !spawn.biome_tags.include.is_empty() {
            parts.push(format!("in {}", spawn.biome_tags.include.join(", ")));
        }
        if !spawn.biome_tags.exclude.is_empty() {
            parts.push(format!("not in {}", spawn.biome_tags.exclude.join(", ")));
        }
        if let Some(item) = &spawn.key_item {
            parts.push(format!("needs {item}"));
        }
        writeln!(out, "  - {}", parts.join("; "))?;
    }

    if let Some(table) = detail.drops.as_ref().filter(|t| !t.entries.is_empty()) {
        heading(out, "Drops")?;
        for entry in &table.entries {
            let chance = entry.percentage.map(|p| format!("{p}%")).unwrap_or_default();
            let quantity = entry.quantity_range.as_deref().unwrap_or_default();
            writeln!(
                out,
                "  {:<24} {chance:>6} {quantity}",
                item_display_name(&entry.item)
            )?;
        }
    }
    Ok(())
}

pub fn write_resolution(out: &mut dyn Write, resolution: &Resolution) -> Result<()> {
    if resolution.id.is_empty() {
        return writeln!(out, "{} resolves to nothing", resolution.input.bold());
    }
    let note = if resolution.known {
        "in index".green()
    } else {
        "guess, not in index".yellow()
    };
    writeln!(out, "{} -> {} ({note})", resolution.input.bold(), resolution.id)
}

pub fn write_drops(out: &mut dyn Write, listing: &DropsListing) -> Result<()> {
    writeln!(
        out,
        "{}  Page {} of {}",
        format!("{} items", listing.total_matches).bold(),
        listing.page,
        listing.total_pages
    )?;
    for item in &listing.items {
        heading(out, &item.display_name)?;
        if item.mons.is_empty() {
            writeln!(out, "  {}", "No mon drops this.".dimmed())?;
        }
        for mon in &item.mons {
            let chance = mon.percentage.map(|p| format!("{p}%")).unwrap_or_default();
            write!(out, "  {:<20} {chance:>6}", mon.display_name())?;
            if let Some(quantity) = &mon.quantity_range {
                write!(out, " x{quantity}")?;
            }
            if item.has_biome_info && mon.has_biome_info() {
                write!(out, "  {}", mon.biome_note().dimmed())?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn write_biome(out: &mut dyn Write, listing: &BiomeListing<'_>) -> Result<()> {
    match listing {
        BiomeListing::All { tags } => {
            writeln!(out, "{}", format!("{} biome tags", tags.len()).bold())?;
            for tag in tags {
                writeln!(out, "  {tag}")?;
            }
        }
        BiomeListing::Tag(view) if !view.known && view.used_by.is_empty() => {
            writeln!(out, "{} {}", "Biome tag not found:".red(), view.tag)?;
        }
        BiomeListing::Tag(view) => {
            writeln!(out, "{}", view.tag.bright_cyan().bold())?;
            if !view.raw_values.is_empty() {
                writeln!(out, "Declared as: {}", view.raw_values.join(", "))?;
            }
            writeln!(out, "Resolves to {} biomes", view.resolved.len())?;
            for biome in &view.resolved {
                writeln!(out, "  {biome}")?;
            }
            used_by(out, &view.used_by)?;
        }
    }
    Ok(())
}

pub fn write_preset(out: &mut dyn Write, listing: &PresetListing<'_>) -> Result<()> {
    match listing {
        PresetListing::All { names } => {
            writeln!(out, "{}", format!("{} presets", names.len()).bold())?;
            for name in names {
                writeln!(out, "  {name}")?;
            }
        }
        PresetListing::Preset(view) => {
            let Some(preset) = &view.preset else {
                return writeln!(out, "{} {}", "Preset not found:".red(), view.name);
            };
            writeln!(out, "{}", view.name.bright_cyan().bold())?;
            if !preset.contexts.is_empty() {
                writeln!(out, "Contexts: {}", preset.contexts.join(", "))?;
            }
            for (label, value) in [
                ("Conditions", &preset.conditions),
                ("Anticonditions", &preset.anticonditions),
            ] {
                let text = value_text(value);
                if !text.is_empty() && text != "{}" && text != "[]" {
                    writeln!(out, "{label}: {text}")?;
                }
            }
            used_by(out, &view.used_by)?;
        }
    }
    Ok(())
}

pub fn write_route(out: &mut dyn Write, report: &RouteReport) -> Result<()> {
    let view = match &report.view {
        AppView::Dex { no_spawns: true } => "dex (no spawns)".to_string(),
        AppView::Dex { .. } => "dex".to_string(),
        AppView::Mon { id } if id.is_empty() => "mon (not found)".to_string(),
        AppView::Mon { id } => format!("mon {id}"),
        AppView::Presets { name: Some(name) } => format!("preset {name}"),
        AppView::Presets { name: None } => "presets".to_string(),
        AppView::Biomes { tag: Some(tag) } => format!("biome {tag}"),
        AppView::Biomes { tag: None } => "biomes".to_string(),
        AppView::Drops => "drops".to_string(),
    };
    writeln!(out, "View: {}", view.bold())?;
    writeln!(out, "Param: {}", report.route.param)?;
    for (key, value) in &report.route.params {
        writeln!(out, "  {key}={value}")?;
    }
    if let Some(id) = &report.detail_id {
        writeln!(out, "Detail: {id}")?;
    }
    Ok(())
}

pub fn write_bst(out: &mut dyn Write, listing: &BstListing) -> Result<()> {
    let report = &listing.report;
    let summary = &report.summary;
    writeln!(out, "{}", "Base stat totals".bright_cyan().bold())?;
    writeln!(
        out,
        "{} mons  min {}  max {}  mean {:.1}  median {:.1}  stdev {:.1}",
        summary.count, summary.min, summary.max, summary.mean, summary.median, summary.stdev
    )?;
    for tier in &report.tiers {
        writeln!(
            out,
            "  {} {:>4}-{:<4} ({}) {}",
            format!("Tier {}", tier.tier).bold(),
            tier.low,
            tier.high,
            tier.members.len(),
            tier.members.join(", ")
        )?;
    }
    if let Some(top) = listing.top {
        heading(out, &format!("Top {top}"))?;
        for row in report.rows.iter().rev().take(top) {
            writeln!(out, "  {:<20} {:>4}", row.id, row.bst)?;
        }
    }
    if !listing.skipped.is_empty() {
        writeln!(out)?;
        writeln!(out, "{} {}", "Skipped:".yellow(), listing.skipped.join(", "))?;
    }
    Ok(())
}
