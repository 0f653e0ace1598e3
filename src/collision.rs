use crate::distance::DistanceIndex;
use crate::entity::{Entity, EntityId};
use log::debug;
use std::collections::HashSet;

/// Every unordered pair of rows `(i, j)`, `i < j`, whose distance is at most
/// the sum of their radii.
pub fn colliding_pairs(index: &DistanceIndex<'_>) -> Vec<(usize, usize)> {
    let entities = index.entities();
    let mut pairs = Vec::new();
    for i in 0..index.len() {
        for j in (i + 1)..index.len() {
            let threshold = entities[i].radius() + entities[j].radius();
            if index.distance(i, j) <= threshold {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Ids of every entity that appears in at least one colliding pair, in the
/// entity set's iteration order. Each entity is listed once no matter how many
/// pairs it belongs to, and there is no survivor rule: whole clusters go.
pub fn find_collisions(index: &DistanceIndex<'_>) -> Vec<EntityId> {
    let mut flags = vec![false; index.len()];
    for (i, j) in colliding_pairs(index) {
        flags[i] = true;
        flags[j] = true;
    }
    index
        .entities()
        .iter()
        .zip(flags)
        .filter_map(|(entity, hit)| hit.then(|| entity.id()))
        .collect()
}

/// Removes the given ids in one batch, preserving the order of the survivors.
/// Returns how many entities were removed.
pub fn remove_entities(entities: &mut Vec<Entity>, removed: &[EntityId]) -> usize {
    if removed.is_empty() {
        return 0;
    }
    let dead: HashSet<EntityId> = removed.iter().copied().collect();
    let before = entities.len();
    entities.retain(|entity| !dead.contains(&entity.id()));
    let count = before - entities.len();
    debug!("Collision pass removed {} entities: {:?}", count, removed);
    count
}
