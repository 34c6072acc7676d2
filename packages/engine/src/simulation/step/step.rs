use super::WorldCore;

/// One logical step: timers, motion, boundary bounce, then color buckets.
///
/// Color assignment runs last so the indices always match the positions the
/// renderer is about to read.
pub(super) fn step(world: &mut WorldCore, dt: f32) {
    super::motion::update_overlays(world, dt);
    super::motion::update_positions(world, dt);
    super::motion::border_check(world);
    super::colors::assign_colors(world);
    world.frame += 1;
}
