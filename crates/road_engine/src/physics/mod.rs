//! Physics module for collision detection
//!
//! Provides axis-aligned bounding volumes and the overlap test used to detect
//! contacts between the player and placed scenery.

pub mod collision;

pub use collision::Aabb;
