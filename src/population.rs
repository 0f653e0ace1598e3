use crate::entity::EntitySpec;
use anyhow::Result;
use creeps_common::{SimulationConfig, Vec2};
use rand::distr::Uniform;
use rand::prelude::*;

/// Builds the initial entity list from the configuration.
///
/// Configured bases come first, in file order, followed by `num_creeps` creeps
/// scattered uniformly over the whole arena (edges included) with a uniform
/// random heading. Creeps may land on top of each other; the first tick's
/// collision pass removes them.
pub fn place_initial_population(config: &SimulationConfig, rng: &mut StdRng) -> Result<Vec<EntitySpec>> {
    let arena = config.arena()?;
    let population = &config.population;
    let count = population.num_creeps as usize;

    let mut specs = Vec::with_capacity(config.bases.len() + count);
    specs.extend(
        config
            .bases
            .iter()
            .map(|base| EntitySpec::base(Vec2::new(base.x, base.y), base.radius)),
    );

    let x_dist = Uniform::new_inclusive(0.0f32, arena.width)?;
    let y_dist = Uniform::new_inclusive(0.0f32, arena.height)?;
    let heading_dist = Uniform::new(0.0f32, 360.0f32)?;
    for _ in 0..count {
        let position = Vec2::new(rng.sample(x_dist), rng.sample(y_dist));
        let heading = rng.sample(heading_dist);
        specs.push(EntitySpec::creep(
            position,
            heading,
            population.creep_radius,
            population.creep_speed,
        ));
    }
    Ok(specs)
}
