mod plugin;
mod systems;
#[cfg(test)]
mod tests;
mod types;

pub use plugin::OverlapPlugin;
pub use systems::{evaluate_overlaps, init_candidates, spheres_overlap};
pub use types::{Collidable, CollideEvent, OverlapTracker};
