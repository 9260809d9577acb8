//! Shared primitives used across systems.

pub mod easing;
pub mod rng;
pub mod vec2;

pub use rng::Rng32;
pub use vec2::Vec2;
