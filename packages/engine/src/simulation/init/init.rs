use std::f32::consts::PI;

use tracing::debug;

use crate::domain::vec2::Vec2;
use crate::error::FlowerResult;
use crate::render::memory_view::{ViewAnchor, ViewLayout};

use super::palette::Palette;
use super::{split_shared, WorldCore};

pub(super) fn create_world_core(
    particle_count: u32,
    boundary_radius: f32,
    ball_radius: f32,
    spawn_x: f32,
    spawn_y: f32,
    dt: f32,
) -> FlowerResult<WorldCore> {
    let n = particle_count as usize;
    let spawn = Vec2::new(spawn_x, spawn_y);

    let layout = ViewLayout::packed(n);
    let mut memory = vec![0u32; layout.total_bytes() / 4].into_boxed_slice();
    split_shared(&mut memory, n).0.fill(spawn);
    let anchor = ViewAnchor::anchor(bytemuck::cast_slice(&memory), layout)?;

    // Speed falls off linearly with index: 100 down to 100/N.
    let vel: Box<[f32]> = (0..n)
        .map(|i| 100.0 - (100.0 * i as f32 / n as f32))
        .collect();
    // Directions fan out evenly around the circle.
    let dir: Box<[Vec2]> = (0..n)
        .map(|i| Vec2::from_angle(2.0 * PI * (i as f32 / n as f32)))
        .collect();

    let color_count = Palette::bucket_count(boundary_radius, particle_count, dt) as u32;

    debug!(
        particle_count,
        boundary_radius,
        color_count,
        shared_bytes = layout.total_bytes(),
        "world created"
    );

    Ok(WorldCore {
        boundary_radius,
        ball_radius,
        spawn,
        particle_count: n,
        color_count,
        memory,
        anchor,
        dir,
        vel,
        overlay_in: vec![100.0f32; n].into_boxed_slice(),
        overlay_out: vec![100.0f32; n].into_boxed_slice(),
        frame: 0,
    })
}
