//! Obstacles placed along the course
//!
//! An [`ObstacleSet`] holds one template mesh and a record per placed
//! instance. Each record keeps its placement, its placed mesh and the
//! bounding box derived from that mesh, so removing a record removes all
//! three together.

use std::path::Path;

use rand::Rng;
use road_engine::assets::AssetError;
use road_engine::foundation::math::{utils, Mat4, Mat4Ext, Transform, Vec3};
use road_engine::physics::collision::Aabb;
use road_engine::render::{Color, Mesh, Renderer};

use crate::assets::ModelKind;

/// One placed obstacle
#[derive(Debug, Clone)]
pub struct ObstacleRecord {
    /// Where the template was placed
    pub position: Vec3,
    /// Template mesh translated to `position`
    pub mesh: Mesh,
    /// Bounds of `mesh`
    pub bounds: Aabb,
}

impl ObstacleRecord {
    fn place(template: &Mesh, position: Vec3) -> Self {
        let mesh = template.transformed(&Transform::from_translation(position));
        let bounds = mesh.bounds().unwrap_or_else(|| Aabb::new(position, position));
        Self { position, mesh, bounds }
    }
}

/// A collection of identical obstacles
#[derive(Debug, Clone)]
pub struct ObstacleSet {
    template: Mesh,
    records: Vec<ObstacleRecord>,
    spinning: bool,
    spin_step: f32,
    angle: f32,
    color: Color,
}

impl ObstacleSet {
    /// Place `template` at every position
    pub fn new(template: Mesh, placements: &[Vec3], spinning: bool, spin_step: f32) -> Self {
        let records = placements
            .iter()
            .map(|position| ObstacleRecord::place(&template, *position))
            .collect();
        Self {
            template,
            records,
            spinning,
            spin_step,
            angle: 0.0,
            color: Color::WHITE,
        }
    }

    /// Load the template for `kind` from `model_dir` and place it
    pub fn load(
        kind: ModelKind,
        model_dir: &Path,
        placements: &[Vec3],
        spinning: bool,
        spin_step: f32,
    ) -> Result<Self, AssetError> {
        let template = kind.load(model_dir)?;
        log::debug!("Placed {} x {:?}", placements.len(), kind);
        Ok(Self::new(template, placements, spinning, spin_step))
    }

    /// Draw colour for every instance
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Remove the first obstacle touching the probe box
    ///
    /// The probe is a cube of edge `size` centred on `center`. Returns
    /// whether something was hit; at most one obstacle is removed per call.
    pub fn collision(&mut self, center: Vec3, size: f32) -> bool {
        let probe = Aabb::from_uniform_extent(center, size);
        match self.records.iter().position(|record| record.bounds.overlaps(&probe)) {
            Some(index) => {
                let record = self.records.remove(index);
                log::trace!("Obstacle at {:?} hit", record.position);
                true
            }
            None => false,
        }
    }

    /// Draw every remaining obstacle
    ///
    /// A spinning set advances its shared angle once per call.
    pub fn render_all(&mut self, renderer: &mut Renderer) {
        if self.spinning {
            self.angle = utils::wrap_degrees(self.angle + self.spin_step);
        }

        let spin = Mat4::rotation_y(utils::deg_to_rad(self.angle));
        for record in &self.records {
            let model = Mat4::new_translation(&record.position) * spin;
            renderer.draw_mesh(&self.template, &model, self.color);
        }
    }

    /// Draw each obstacle's bounding box as a wireframe
    pub fn render_bounds(&self, renderer: &mut Renderer, color: Color) {
        for record in &self.records {
            crate::scene::draw_box_outline(renderer, &record.bounds, color);
        }
    }

    /// Remaining obstacles
    pub fn records(&self) -> &[ObstacleRecord] {
        &self.records
    }

    /// Positions of the remaining obstacles
    pub fn placements(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.records.iter().map(|record| record.position)
    }

    /// Current spin angle in degrees
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Number of remaining obstacles
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether every obstacle has been removed
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Random course placements
///
/// Lanes are drawn from `-lane_limit..=lane_limit` and depths from whole
/// numbers in `[-finish_distance, 0)`.
pub fn scatter<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    lane_limit: i32,
    lane_width: f32,
    height: f32,
    finish_distance: f32,
) -> Vec<Vec3> {
    let lane_limit = lane_limit.max(0);
    let depth = (finish_distance as i32).max(1);
    (0..count)
        .map(|_| {
            let lane = rng.gen_range(-lane_limit..=lane_limit);
            let z = rng.gen_range(-depth..0);
            Vec3::new(lane as f32 * lane_width, height, z as f32)
        })
        .collect()
}
