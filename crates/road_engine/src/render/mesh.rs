//! Mesh representation for 3D models
//!
//! A mesh is a list of positions plus a triangle index list. Meshes carry no
//! normals or colours: the renderer derives a face normal per triangle and
//! the caller supplies the colour at draw time.
//!
//! Primitive generators follow the conventions of the classic GLUT/GLU
//! shapes so scene code can be written in the same units:
//! - [`Mesh::cube`]: unit cube centred on the origin
//! - [`Mesh::uv_sphere`]: sphere centred on the origin
//! - [`Mesh::torus`]: ring in the XY plane around the Z axis
//! - [`Mesh::disk`]: filled circle in the XY plane
//! - [`Mesh::quad`]: square in the XZ plane facing +Y

use std::f32::consts::TAU;

use crate::foundation::math::{Transform, Vec3};
use crate::physics::collision::Aabb;

/// Triangle mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    bounds: Option<Aabb>,
    revision: u64,
}

impl Mesh {
    /// Create a mesh from positions and triangle indices
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let bounds = Aabb::from_points(&positions);
        Self {
            positions,
            indices,
            bounds,
            revision: 0,
        }
    }

    /// Vertex positions
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle indices, three per triangle
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of complete triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as position triples
    ///
    /// Triangles referencing a missing vertex are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            let a = *self.positions.get(tri[0] as usize)?;
            let b = *self.positions.get(tri[1] as usize)?;
            let c = *self.positions.get(tri[2] as usize)?;
            Some([a, b, c])
        })
    }

    /// Bounding box of all vertices, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Counter bumped every time the vertex data changes
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Copy of this mesh with `transform` applied to every vertex
    #[must_use]
    pub fn transformed(&self, transform: &Transform) -> Self {
        let positions = self.positions.iter().map(|p| transform.apply_to_point(*p)).collect();
        Self::new(positions, self.indices.clone())
    }

    /// Apply `transform` to every vertex in place
    pub fn apply_transform(&mut self, transform: &Transform) {
        for position in &mut self.positions {
            *position = transform.apply_to_point(*position);
        }
        self.bounds = Aabb::from_points(&self.positions);
        self.revision += 1;
    }

    /// Unit cube centred on the origin (side length 1)
    pub fn cube() -> Self {
        let positions = vec![
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
        ];
        #[rustfmt::skip]
        let indices = vec![
            4, 5, 6, 4, 6, 7, // +Z
            1, 0, 3, 1, 3, 2, // -Z
            5, 1, 2, 5, 2, 6, // +X
            0, 4, 7, 0, 7, 3, // -X
            7, 6, 2, 7, 2, 3, // +Y
            0, 1, 5, 0, 5, 4, // -Y
        ];
        Self::new(positions, indices)
    }

    /// Sphere centred on the origin
    ///
    /// `slices` divide the equator, `stacks` divide pole to pole.
    pub fn uv_sphere(radius: f32, slices: u32, stacks: u32) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(2);
        let mut positions = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);

        for stack in 0..=stacks {
            let polar = std::f32::consts::PI * stack as f32 / stacks as f32;
            let (ring, y) = (polar.sin() * radius, polar.cos() * radius);
            for slice in 0..=slices {
                let azimuth = TAU * slice as f32 / slices as f32;
                positions.push(Vec3::new(ring * azimuth.cos(), y, ring * azimuth.sin()));
            }
        }

        Self::new(positions, grid_indices(slices, stacks))
    }

    /// Torus lying in the XY plane around the Z axis
    ///
    /// `tube_radius` is the radius of the tube, `ring_radius` the distance from
    /// the centre to the middle of the tube.
    pub fn torus(tube_radius: f32, ring_radius: f32, sides: u32, rings: u32) -> Self {
        let sides = sides.max(3);
        let rings = rings.max(3);
        let mut positions = Vec::with_capacity(((sides + 1) * (rings + 1)) as usize);

        for ring in 0..=rings {
            let around = TAU * ring as f32 / rings as f32;
            let (sin_a, cos_a) = around.sin_cos();
            for side in 0..=sides {
                let tube = TAU * side as f32 / sides as f32;
                let (sin_t, cos_t) = tube.sin_cos();
                let distance = ring_radius + tube_radius * cos_t;
                positions.push(Vec3::new(distance * cos_a, distance * sin_a, tube_radius * sin_t));
            }
        }

        Self::new(positions, grid_indices(sides, rings))
    }

    /// Filled disk of `radius` in the XY plane
    pub fn disk(radius: f32, slices: u32) -> Self {
        let slices = slices.max(3);
        let mut positions = Vec::with_capacity(slices as usize + 1);
        positions.push(Vec3::zeros());
        for slice in 0..slices {
            let angle = TAU * slice as f32 / slices as f32;
            positions.push(Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0));
        }

        let indices = (0..slices)
            .flat_map(|slice| [0, slice + 1, (slice + 1) % slices + 1])
            .collect();
        Self::new(positions, indices)
    }

    /// Square of side `2 * half_extent` in the XZ plane, facing +Y
    pub fn quad(half_extent: f32) -> Self {
        let h = half_extent;
        let positions = vec![
            Vec3::new(-h, 0.0, -h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(h, 0.0, h),
            Vec3::new(-h, 0.0, h),
        ];
        Self::new(positions, vec![0, 2, 1, 0, 3, 2])
    }
}

/// Two triangles per cell of a `(columns + 1) x (rows + 1)` vertex grid
fn grid_indices(columns: u32, rows: u32) -> Vec<u32> {
    let stride = columns + 1;
    let mut indices = Vec::with_capacity((columns * rows * 6) as usize);
    for row in 0..rows {
        for column in 0..columns {
            let a = row * stride + column;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Rotation;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_transform_leaves_vertices_unchanged() {
        let mesh = Mesh::cube();
        let moved = mesh.transformed(&Transform::identity());
        assert_eq!(moved.positions(), mesh.positions());
    }

    #[test]
    fn test_transformed_is_pure() {
        let mesh = Mesh::cube();
        let original = mesh.positions().to_vec();
        let _ = mesh.transformed(&Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(mesh.positions(), original.as_slice());
        assert_eq!(mesh.revision(), 0);
    }

    #[test]
    fn test_apply_transform_bumps_revision_and_bounds() {
        let mut mesh = Mesh::cube();
        let transform = Transform::from_translation(Vec3::new(0.0, 5.0, -50.0))
            .with_scale(Vec3::new(2.0, 2.0, 2.0))
            .with_rotation(Rotation::about_y(90.0));

        mesh.apply_transform(&transform);

        assert_eq!(mesh.revision(), 1);
        let bounds = mesh.bounds().unwrap();
        assert_relative_eq!(bounds.center(), Vec3::new(0.0, 5.0, -50.0), epsilon = 1e-5);
        assert_relative_eq!(bounds.size(), Vec3::repeat(2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_cube_is_closed_unit_box() {
        let cube = Mesh::cube();
        assert_eq!(cube.triangle_count(), 12);
        let bounds = cube.bounds().unwrap();
        assert_relative_eq!(bounds.min, Vec3::repeat(-0.5));
        assert_relative_eq!(bounds.max, Vec3::repeat(0.5));
    }

    #[test]
    fn test_sphere_vertices_lie_on_radius() {
        let sphere = Mesh::uv_sphere(3.0, 12, 8);
        for position in sphere.positions() {
            assert_relative_eq!(position.norm(), 3.0, epsilon = 1e-4);
        }
        assert_eq!(sphere.triangle_count(), 12 * 8 * 2);
    }

    #[test]
    fn test_torus_extent() {
        let torus = Mesh::torus(1.0, 2.0, 16, 24);
        let bounds = torus.bounds().unwrap();
        assert_relative_eq!(bounds.max.x, 3.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.max.z, 1.0, epsilon = 1e-2);
        assert_relative_eq!(bounds.min.z, -1.0, epsilon = 1e-2);
    }

    #[test]
    fn test_disk_and_quad_are_flat() {
        assert!(Mesh::disk(2.0, 16).positions().iter().all(|p| p.z == 0.0));
        assert!(Mesh::quad(500.0).positions().iter().all(|p| p.y == 0.0));
        assert_eq!(Mesh::disk(2.0, 16).triangle_count(), 16);
    }

    #[test]
    fn test_triangles_skip_bad_indices() {
        let mesh = Mesh::new(vec![Vec3::zeros(), Vec3::x(), Vec3::y()], vec![0, 1, 2, 0, 1, 7]);
        assert_eq!(mesh.triangles().count(), 1);
    }
}
