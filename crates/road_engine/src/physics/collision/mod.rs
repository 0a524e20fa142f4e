//! Collision volumes and intersection tests
//!
//! # Key Types
//!
//! - [`Aabb`] - Axis-aligned bounding box built from a center/size pair or
//!   from the vertices of a mesh

pub mod aabb;

pub use aabb::Aabb;
