//! Per-creep behaviour for one tick: wrap the heading, bounce off the arena
//! walls, turn away from creeps that are too close, then move.

use crate::entity::Entity;
use crate::visibility::{Bounds, View};
use creeps_common::{clamp, heading_to_vec, normalize_heading, Vec2};
use log::trace;

/// Extra distance beyond the creep's own radius at which it starts turning away.
pub const AVOIDANCE_MARGIN: f32 = 20.0;

/// Heading changes tried for each threatening neighbour, in tie-break order.
pub const CANDIDATE_DELTAS: [f32; 2] = [-45.0, 45.0];

/// Which wall rule fired during bounds handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reflection {
    None,
    Horizontal,
    Vertical,
}

/// Reflects the heading off the arena walls and clamps the position back inside.
///
/// The left/right check runs first and the top/bottom check only runs when it
/// did not fire, so a creep in a corner is reflected horizontally only.
pub fn reflect_off_bounds(position: &mut Vec2, heading: &mut f32, radius: f32, bounds: Bounds) -> Reflection {
    let max_x = bounds.width - radius;
    let max_y = bounds.height - radius;
    if position.x <= radius || position.x >= max_x {
        *heading = 180.0 - *heading;
        position.x = clamp(position.x, radius, max_x);
        Reflection::Horizontal
    } else if position.y <= radius || position.y >= max_y {
        *heading = -*heading;
        position.y = clamp(position.y, radius, max_y);
        Reflection::Vertical
    } else {
        Reflection::None
    }
}

/// Picks the heading delta that opens the most distance to a neighbour after one step.
///
/// Each candidate is scored by how much one `speed` step along `heading + delta`
/// increases the distance to `neighbor` compared with `known_distance`. The first
/// candidate wins exact ties, so -45° is preferred.
pub fn avoidance_delta(position: Vec2, heading: f32, speed: f32, neighbor: Vec2, known_distance: f32) -> f32 {
    let mut best_delta = CANDIDATE_DELTAS[0];
    let mut best_gain = f32::NEG_INFINITY;
    for delta in CANDIDATE_DELTAS {
        let next = position + heading_to_vec(heading + delta) * speed;
        let gain = next.distance(neighbor) - known_distance;
        if gain > best_gain {
            best_gain = gain;
            best_delta = delta;
        }
    }
    best_delta
}

/// Runs the full creep update against `view`.
pub(crate) fn steer(entity: &mut Entity, view: &View) {
    let radius = entity.radius();
    let speed = entity.speed();
    let mut position = entity.position;
    let mut heading = normalize_heading(entity.heading);

    if let Some(bounds) = view.bounds() {
        let reflection = reflect_off_bounds(&mut position, &mut heading, radius, bounds);
        if reflection != Reflection::None {
            trace!("{} reflected {:?} at ({:.1}, {:.1})", entity.id(), reflection, position.x, position.y);
        }
    }

    // Each threatening creep nudges the heading in turn, compounding on the last nudge.
    let trigger = radius + AVOIDANCE_MARGIN;
    for sighting in view.sightings() {
        if !sighting.kind.is_mobile() || sighting.distance >= trigger {
            continue;
        }
        let delta = avoidance_delta(position, heading, speed, sighting.position, sighting.distance);
        trace!("{} turns {:+} away from {} at {:.1}", entity.id(), delta, sighting.id, sighting.distance);
        heading += delta;
    }

    position = position + heading_to_vec(heading) * speed;

    entity.position = position;
    entity.heading = normalize_heading(heading);
}
