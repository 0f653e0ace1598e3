use crate::collision::{find_collisions, remove_entities};
use crate::distance::DistanceIndex;
use crate::entity::{Entity, EntityId, EntitySpec};
use crate::population::place_initial_population;
use crate::visibility::{observe, View};
use anyhow::Result;
use creeps_common::{Arena, ConfigError, EntityKind, SimulationConfig, Snapshot};
use log::{debug, info, warn};
use rand::prelude::*;

const MAX_EXPECTED_NEIGHBORS: usize = 20; // Histogram size for neighbor counts

/// Outcome of one call to [`CreepSimulation::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Ticks completed, including this one.
    pub tick: u64,
    /// Entities removed by this tick's collision pass, in iteration order.
    pub removed: Vec<EntityId>,
    /// Entities left after the tick.
    pub survivors: usize,
}

/// Owns the entity set and advances it one tick at a time.
#[derive(Debug)]
pub struct CreepSimulation {
    arena: Arena,
    entities: Vec<Entity>,
    current_tick: u64,
    removed_total: u32,
    /// Whether snapshots carry the full entity list.
    record_entities: bool,
    recorded_snapshots: Vec<Snapshot>,
}

impl CreepSimulation {
    /// Builds a simulation from explicit entities. Ids are assigned in list order.
    pub fn new(arena: Arena, specs: Vec<EntitySpec>) -> Result<Self, ConfigError> {
        for (index, spec) in specs.iter().enumerate() {
            spec.validate(index)?;
            if spec.kind.is_mobile() && !arena.fits(spec.radius) {
                return Err(ConfigError::RadiusExceedsArena { index, radius: spec.radius });
            }
        }
        let entities = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| Entity::from_spec(index as u32, spec))
            .collect();
        Ok(Self {
            arena,
            entities,
            current_tick: 0,
            removed_total: 0,
            record_entities: true,
            recorded_snapshots: Vec::new(),
        })
    }

    /// Builds a simulation with a seeded random population as described by `config`.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let arena = config.arena()?;
        let mut rng = StdRng::seed_from_u64(config.population.placement_seed);
        let specs = place_initial_population(config, &mut rng)?;
        let mut sim = Self::new(arena, specs)?;
        sim.record_entities = config.output.save_entities_in_snapshot;
        info!(
            "Placed {} creeps and {} bases (seed {}).",
            config.population.num_creeps,
            config.bases.len(),
            config.population.placement_seed
        );
        Ok(sim)
    }

    /// Advances the simulation by one tick.
    ///
    /// Order: distances, collision removal, views for every survivor against a
    /// fresh index, then every update. Views are all taken before anyone moves,
    /// so no entity sees another's post-move position within the same tick.
    pub fn tick(&mut self) -> TickReport {
        // --- 1. Collisions, judged on this tick's starting positions ---
        let removed = {
            let index = DistanceIndex::build(&self.entities);
            find_collisions(&index)
        };
        let removed_count = remove_entities(&mut self.entities, &removed);
        self.removed_total += removed_count as u32;

        // --- 2. Views from the post-removal snapshot ---
        let views: Vec<View> = {
            let index = DistanceIndex::build(&self.entities);
            let views = (0..index.len()).map(|row| observe(&index, row, &self.arena)).collect();
            views
        };

        // --- 3. Steering and motion ---
        for (entity, view) in self.entities.iter_mut().zip(&views) {
            entity.update(view);
        }

        self.current_tick += 1;
        if !removed.is_empty() {
            debug!(
                "Tick {}: {} removed, {} remaining",
                self.current_tick,
                removed.len(),
                self.entities.len()
            );
        }
        TickReport {
            tick: self.current_tick,
            removed,
            survivors: self.entities.len(),
        }
    }

    /// Current entities in iteration order, reflecting the last completed tick.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id() == id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn creep_count(&self) -> usize {
        self.entities.iter().filter(|e| e.kind() == EntityKind::Creep).count()
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    pub fn removed_total(&self) -> u32 {
        self.removed_total
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The view `id` would receive if a tick started now.
    pub fn view_of(&self, id: EntityId) -> Option<View> {
        let row = self.entities.iter().position(|entity| entity.id() == id)?;
        let index = DistanceIndex::build(&self.entities);
        Some(observe(&index, row, &self.arena))
    }

    /// Number of other entities each entity can currently see, in iteration order.
    fn calculate_neighbor_counts(&self) -> Vec<u32> {
        let index = DistanceIndex::build(&self.entities);
        let counts = (0..index.len())
            .map(|row| index.neighbors_within(row, self.arena.visibility_radius).count() as u32)
            .collect();
        counts
    }

    /// Collects the current metrics and stores them as a Snapshot.
    pub fn record_snapshot(&mut self) {
        debug!("Recording snapshot at tick {}...", self.current_tick);

        let particle_neighbor_counts = self.calculate_neighbor_counts();
        let mut neighbor_counts_distribution = vec![0u32; MAX_EXPECTED_NEIGHBORS];
        for &count in &particle_neighbor_counts {
            let bin = count as usize;
            if bin < MAX_EXPECTED_NEIGHBORS {
                neighbor_counts_distribution[bin] += 1;
            } else {
                warn!(
                    "Entity sees {} neighbors, exceeding MAX_EXPECTED_NEIGHBORS {}. Incrementing last bin.",
                    count,
                    MAX_EXPECTED_NEIGHBORS - 1
                );
                neighbor_counts_distribution[MAX_EXPECTED_NEIGHBORS - 1] += 1;
            }
        }

        let entities = if self.record_entities {
            Some(self.entities.iter().map(Entity::record).collect())
        } else {
            None
        };

        self.recorded_snapshots.push(Snapshot {
            tick: self.current_tick,
            entity_count: self.entities.len() as u32,
            creep_count: self.creep_count() as u32,
            removed_total: self.removed_total,
            neighbor_counts_distribution,
            entities,
        });
    }

    /// Provides access to the recorded snapshots.
    pub fn recorded_snapshots(&self) -> &[Snapshot] {
        &self.recorded_snapshots
    }
}
