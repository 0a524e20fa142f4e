//! Immediate-mode renderer
//!
//! Draw calls transform geometry to clip space, clip it against the near
//! plane, light it once per triangle and rasterize it into the framebuffer.
//! Faces are two-sided: the normal used for lighting is flipped towards the
//! viewer when needed.

use super::{Camera, Color, Framebuffer, LightingEnvironment, Mesh};
use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Per-frame draw counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles passed to `draw_mesh`
    pub triangles_submitted: usize,
    /// Triangles that survived clipping
    pub triangles_drawn: usize,
    /// Lines that survived clipping
    pub lines_drawn: usize,
}

/// Software renderer owning the framebuffer
pub struct Renderer {
    framebuffer: Framebuffer,
    camera: Camera,
    view_projection: Mat4,
    lighting: LightingEnvironment,
    stats: FrameStats,
}

impl Renderer {
    /// Create a renderer with a framebuffer of the given pixel size
    pub fn new(width: usize, height: usize) -> Self {
        let camera = Camera::default();
        Self {
            framebuffer: Framebuffer::new(width, height),
            view_projection: camera.view_projection_matrix(),
            camera,
            lighting: LightingEnvironment::unlit(),
            stats: FrameStats::default(),
        }
    }

    /// Start a frame: clear to `clear`, adopt `camera` and reset lighting
    ///
    /// The camera's aspect ratio is replaced by the framebuffer's.
    pub fn begin_frame(&mut self, camera: &Camera, clear: Color) {
        let mut camera = camera.clone();
        camera.aspect = self.framebuffer.aspect();
        self.view_projection = camera.view_projection_matrix();
        self.camera = camera;
        self.lighting = LightingEnvironment::unlit();
        self.stats = FrameStats::default();
        self.framebuffer.clear(clear);
    }

    /// Replace the lights used by subsequent draws
    pub fn set_lighting(&mut self, lighting: LightingEnvironment) {
        self.lighting = lighting;
    }

    /// Camera of the current frame
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Draw a mesh placed by `model` in a flat colour, lit per triangle
    pub fn draw_mesh(&mut self, mesh: &Mesh, model: &Mat4, color: Color) {
        for [a, b, c] in mesh.triangles() {
            self.stats.triangles_submitted += 1;

            let world = [transform_point(model, a), transform_point(model, b), transform_point(model, c)];
            let Some(mut normal) = (world[1] - world[0]).cross(&(world[2] - world[0])).try_normalize(f32::EPSILON)
            else {
                continue;
            };
            let centroid = (world[0] + world[1] + world[2]) / 3.0;
            if normal.dot(&(self.camera.position - centroid)) < 0.0 {
                normal = -normal;
            }
            let shaded = color.scaled(self.lighting.intensity(centroid, normal));

            let clip: Vec<Vec4> = world.iter().map(|p| self.view_projection * p.push(1.0)).collect();
            let polygon = clip_polygon_near(&clip);
            if polygon.len() < 3 {
                continue;
            }

            let screen: Vec<Vec3> = polygon.iter().map(|v| self.to_screen(v)).collect();
            for i in 1..(screen.len() - 1) {
                self.framebuffer.fill_triangle([screen[0], screen[i], screen[i + 1]], shaded);
            }
            self.stats.triangles_drawn += 1;
        }
    }

    /// Draw an unlit world-space line segment
    pub fn draw_line(&mut self, from: Vec3, to: Vec3, color: Color) {
        let from = self.view_projection * from.push(1.0);
        let to = self.view_projection * to.push(1.0);
        let Some((from, to)) = clip_segment_near(from, to) else {
            return;
        };

        let (from, to) = (self.to_screen(&from), self.to_screen(&to));
        self.framebuffer.draw_line(from, to, color);
        self.stats.lines_drawn += 1;
    }

    /// Perspective divide and viewport mapping
    fn to_screen(&self, clip: &Vec4) -> Vec3 {
        let ndc = clip.xyz() / clip.w;
        Vec3::new(
            (ndc.x + 1.0) * 0.5 * self.framebuffer.width() as f32,
            (1.0 - ndc.y) * 0.5 * self.framebuffer.height() as f32,
            ndc.z,
        )
    }

    /// Resize the framebuffer (contents are cleared)
    pub fn resize(&mut self, width: usize, height: usize) {
        self.framebuffer.resize(width, height);
    }

    /// The framebuffer drawn into
    pub const fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Draw counters for the current frame
    pub const fn stats(&self) -> FrameStats {
        self.stats
    }
}

fn transform_point(model: &Mat4, point: Vec3) -> Vec3 {
    let p = model * point.push(1.0);
    p.xyz() / p.w
}

/// Signed distance to the near plane in clip space; inside when `>= 0`
fn near_distance(v: &Vec4) -> f32 {
    v.z + v.w
}

/// Sutherland-Hodgman clip of a convex polygon against the near plane
fn clip_polygon_near(polygon: &[Vec4]) -> Vec<Vec4> {
    let mut output = Vec::with_capacity(polygon.len() + 1);
    for (i, current) in polygon.iter().enumerate() {
        let next = &polygon[(i + 1) % polygon.len()];
        let (d_current, d_next) = (near_distance(current), near_distance(next));

        if d_current >= 0.0 {
            output.push(*current);
        }
        if (d_current >= 0.0) != (d_next >= 0.0) {
            let t = d_current / (d_current - d_next);
            output.push(current + (next - current) * t);
        }
    }
    output
}

/// Clip a clip-space segment against the near plane
fn clip_segment_near(from: Vec4, to: Vec4) -> Option<(Vec4, Vec4)> {
    let (d_from, d_to) = (near_distance(&from), near_distance(&to));
    match (d_from >= 0.0, d_to >= 0.0) {
        (true, true) => Some((from, to)),
        (false, false) => None,
        _ => {
            let crossing = from + (to - from) * (d_from / (d_from - d_to));
            if d_from >= 0.0 {
                Some((from, crossing))
            } else {
                Some((crossing, to))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Light;

    const RED: Color = Color::new(200, 0, 0);

    fn looking_down_negative_z() -> Camera {
        let mut camera = Camera::perspective(Vec3::new(0.0, 0.0, 10.0), 60.0, 1.0, 0.1, 100.0);
        camera.set_target(Vec3::zeros());
        camera
    }

    fn count(renderer: &Renderer, predicate: impl Fn(Color) -> bool) -> usize {
        renderer.framebuffer().pixels().iter().filter(|c| predicate(**c)).count()
    }

    #[test]
    fn test_cube_in_front_is_drawn_at_center() {
        let mut renderer = Renderer::new(40, 40);
        renderer.begin_frame(&looking_down_negative_z(), Color::BLACK);
        renderer.draw_mesh(&Mesh::cube(), &Mat4::new_scaling(4.0), RED);

        assert_eq!(renderer.framebuffer().pixel(20, 20), Some(RED));
        assert_eq!(renderer.framebuffer().pixel(0, 0), Some(Color::BLACK));
        assert_eq!(renderer.stats().triangles_submitted, 12);
    }

    #[test]
    fn test_geometry_behind_camera_is_culled() {
        let mut renderer = Renderer::new(40, 40);
        renderer.begin_frame(&looking_down_negative_z(), Color::BLACK);
        renderer.draw_mesh(&Mesh::cube(), &Mat4::new_translation(&Vec3::new(0.0, 0.0, 30.0)), RED);

        assert_eq!(count(&renderer, |c| c != Color::BLACK), 0);
        assert_eq!(renderer.stats().triangles_drawn, 0);
    }

    #[test]
    fn test_ground_plane_crossing_near_plane_is_clipped() {
        let mut camera = Camera::perspective(Vec3::new(0.0, 5.0, 0.0), 60.0, 1.0, 0.1, 1000.0);
        camera.set_target(Vec3::new(0.0, 5.0, -10.0));

        let mut renderer = Renderer::new(32, 32);
        renderer.begin_frame(&camera, Color::BLACK);
        renderer.draw_mesh(&Mesh::quad(500.0), &Mat4::identity(), RED);

        // Ground fills the lower half, sky stays clear
        assert_eq!(renderer.framebuffer().pixel(16, 31), Some(RED));
        assert_eq!(renderer.framebuffer().pixel(16, 2), Some(Color::BLACK));
    }

    #[test]
    fn test_line_running_behind_camera_is_clipped() {
        let mut camera = Camera::perspective(Vec3::new(0.0, 20.0, 50.0), 45.0, 1.0, 0.1, 1000.0);
        camera.set_target(Vec3::new(0.0, 10.0, 0.0));

        let mut renderer = Renderer::new(32, 32);
        renderer.begin_frame(&camera, Color::BLACK);
        renderer.draw_line(Vec3::new(5.0, 0.0, 100.0), Vec3::new(5.0, 0.0, -600.0), Color::WHITE);

        assert_eq!(renderer.stats().lines_drawn, 1);
        assert!(count(&renderer, |c| c == Color::WHITE) > 0);
    }

    #[test]
    fn test_segment_fully_behind_is_rejected() {
        let camera = looking_down_negative_z();
        let mut renderer = Renderer::new(16, 16);
        renderer.begin_frame(&camera, Color::BLACK);
        renderer.draw_line(Vec3::new(0.0, 0.0, 20.0), Vec3::new(1.0, 0.0, 30.0), Color::WHITE);
        assert_eq!(renderer.stats().lines_drawn, 0);
    }

    #[test]
    fn test_lighting_darkens_faces() {
        let mut renderer = Renderer::new(40, 40);
        renderer.begin_frame(&looking_down_negative_z(), Color::BLACK);
        renderer.set_lighting(LightingEnvironment::new().with_ambient(0.2).add_light(Light::point(
            Vec3::new(0.0, 0.0, 100.0),
            0.5,
        )));
        renderer.draw_mesh(&Mesh::cube(), &Mat4::new_scaling(4.0), Color::new(0, 0, 250));

        let center = renderer.framebuffer().pixel(20, 20).unwrap();
        assert!(center.b > 0 && center.b < 250, "front face shade {center:?}");
    }

    #[test]
    fn test_clip_polygon_keeps_inside_polygon() {
        let inside = [
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
        ];
        assert_eq!(clip_polygon_near(&inside), inside.to_vec());
    }

    #[test]
    fn test_clip_polygon_one_vertex_outside_gives_quad() {
        let polygon = [
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, -3.0, 1.0),
        ];
        let clipped = clip_polygon_near(&polygon);
        assert_eq!(clipped.len(), 4);
        assert!(clipped.iter().all(|v| near_distance(v) >= -1e-6));
    }
}
