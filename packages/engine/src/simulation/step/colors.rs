#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::vec2::Vec2;

use super::{split_shared, WorldCore};

/// Bucket = normalized distance from the spawn point, scaled onto
/// `0..color_count`. Clamped so the renderer's index contract always holds.
pub(super) fn assign_colors(world: &mut WorldCore) {
    let n = world.particle_count;
    let spawn = world.spawn;
    let radius = world.boundary_radius;
    let last = world.color_count.saturating_sub(1);
    let (positions, indices) = split_shared(&mut world.memory, n);

    let bucket = |pos: &Vec2| -> u32 {
        let t = (*pos - spawn).length() / radius;
        let step = (t * last as f32).floor();
        if step > 0.0 { (step as u32).min(last) } else { 0 }
    };

    #[cfg(feature = "parallel")]
    indices
        .par_iter_mut()
        .zip(positions.par_iter())
        .for_each(|(idx, pos)| *idx = bucket(pos));

    #[cfg(not(feature = "parallel"))]
    for (idx, pos) in indices.iter_mut().zip(positions.iter()) {
        *idx = bucket(pos);
    }
}
