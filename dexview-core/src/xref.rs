//! Reverse lookups from a biome tag or preset name to the mons whose spawns use it.

use crate::data::IndexRecord;
use crate::spawns::flatten_spawns;

/// Index entries whose spawns include or exclude `tag`, in index order.
#[must_use]
pub fn mons_using_biome_tag<'a>(index: &'a [IndexRecord], tag: &str) -> Vec<&'a IndexRecord> {
    if tag.is_empty() {
        return Vec::new();
    }
    index
        .iter()
        .filter(|mon| {
            flatten_spawns(mon.spawns.as_ref())
                .iter()
                .any(|spawn| spawn.mentions_biome_tag(tag))
        })
        .collect()
}

/// Index entries with at least one spawn referencing preset `name`, in index order.
#[must_use]
pub fn mons_using_preset<'a>(index: &'a [IndexRecord], name: &str) -> Vec<&'a IndexRecord> {
    if name.is_empty() {
        return Vec::new();
    }
    index
        .iter()
        .filter(|mon| {
            flatten_spawns(mon.spawns.as_ref())
                .iter()
                .any(|spawn| spawn.uses_preset(name))
        })
        .collect()
}
