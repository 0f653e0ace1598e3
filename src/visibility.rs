use crate::distance::DistanceIndex;
use crate::entity::EntityId;
use creeps_common::{Arena, EntityKind, Vec2};

/// Another entity as seen from the observer during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Sighting {
    pub id: EntityId,
    pub kind: EntityKind,
    pub radius: f32,
    pub position: Vec2,
    /// Distance from the observer, taken from the tick's distance index.
    pub distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// One entry of a view: either a visible entity or the trailing arena bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    Entity(Sighting),
    Bounds(Bounds),
}

/// Everything one entity perceives in one tick.
///
/// Entity observations come first, in the entity set's iteration order (not
/// sorted by distance), followed by exactly one `Observation::Bounds`.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    observations: Vec<Observation>,
}

impl View {
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Visible entities only, without the bounds sentinel.
    pub fn sightings(&self) -> impl Iterator<Item = &Sighting> + '_ {
        self.observations.iter().filter_map(|obs| match obs {
            Observation::Entity(sighting) => Some(sighting),
            Observation::Bounds(_) => None,
        })
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.observations.iter().rev().find_map(|obs| match obs {
            Observation::Bounds(bounds) => Some(*bounds),
            Observation::Entity(_) => None,
        })
    }

    /// Number of visible entities.
    pub fn len(&self) -> usize {
        self.observations.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the view of the entity at row `observer` of `index`.
pub fn observe(index: &DistanceIndex<'_>, observer: usize, arena: &Arena) -> View {
    let entities = index.entities();
    let mut observations: Vec<Observation> = index
        .neighbors_within(observer, arena.visibility_radius)
        .map(|(row, distance)| {
            let seen = &entities[row];
            Observation::Entity(Sighting {
                id: seen.id(),
                kind: seen.kind(),
                radius: seen.radius(),
                position: seen.position(),
                distance,
            })
        })
        .collect();
    observations.push(Observation::Bounds(Bounds { width: arena.width, height: arena.height }));
    View { observations }
}
