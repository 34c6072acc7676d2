#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{split_shared, WorldCore};

pub(super) fn update_overlays(world: &mut WorldCore, dt: f32) {
    for t in world.overlay_out.iter_mut() {
        *t += dt;
    }
    for t in world.overlay_in.iter_mut() {
        *t += dt;
    }
}

/// `pos += dir * vel * dt` for every particle.
pub(super) fn update_positions(world: &mut WorldCore, dt: f32) {
    let n = world.particle_count;
    let (positions, _) = split_shared(&mut world.memory, n);
    let dir = &world.dir;
    let vel = &world.vel;

    #[cfg(feature = "parallel")]
    positions
        .par_iter_mut()
        .zip(dir.par_iter())
        .zip(vel.par_iter())
        .for_each(|((pos, &d), &v)| *pos += d * (v * dt));

    #[cfg(not(feature = "parallel"))]
    for ((pos, &d), &v) in positions.iter_mut().zip(dir.iter()).zip(vel.iter()) {
        *pos += d * (v * dt);
    }
}

/// Center crossing resets the inward timer. Leaving the boundary resets the
/// outward timer, pins the particle onto the circle and reverses its speed.
pub(super) fn border_check(world: &mut WorldCore) {
    let n = world.particle_count;
    let spawn = world.spawn;
    let radius = world.boundary_radius;
    let radius_sq = radius * radius;
    let (positions, _) = split_shared(&mut world.memory, n);

    let particles = positions
        .iter_mut()
        .zip(world.overlay_in.iter_mut())
        .zip(world.overlay_out.iter_mut())
        .zip(world.vel.iter_mut())
        .zip(world.dir.iter());

    for ((((pos, overlay_in), overlay_out), vel), &dir) in particles {
        let lsq = (*pos - spawn).length_squared();
        if lsq < 1.0 {
            *overlay_in = 0.0;
        }
        if lsq > radius_sq {
            *overlay_out = 0.0;
            let sign = vel.signum();
            *pos = spawn + dir * (sign * radius);
            *vel *= -1.0;
        }
    }
}
