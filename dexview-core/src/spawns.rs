use crate::data::{SpawnDescriptor, SpawnEntry, SpawnsField};

/// Flatten a raw `spawns` field into one ordered list of descriptors.
///
/// Nested groups are spliced in place, single descriptors become one-element
/// sequences and an absent field yields nothing.
#[must_use]
pub fn flatten_spawns(spawns: Option<&SpawnsField>) -> Vec<&SpawnDescriptor> {
    match spawns {
        None => Vec::new(),
        Some(SpawnsField::Single(descriptor)) => vec![descriptor],
        Some(SpawnsField::List(entries)) => entries
            .iter()
            .flat_map(|entry| match entry {
                SpawnEntry::Group(group) => group.iter().collect::<Vec<_>>(),
                SpawnEntry::One(descriptor) => vec![descriptor],
            })
            .collect(),
    }
}
