//! Software rasterizer
//!
//! Screen-space primitives are given as `Vec3(x, y, depth)` where `x`/`y` are
//! pixel coordinates (origin top-left, y down) and `depth` is the NDC depth
//! in `[-1, 1]`. Smaller depth is nearer; the depth buffer keeps the nearest
//! fragment per pixel.

use super::Color;
use crate::foundation::math::Vec3;

/// Lines win depth ties against the surfaces they are drawn over
const LINE_DEPTH_BIAS: f32 = 1e-4;

/// Colour buffer plus depth buffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    color: Vec<Color>,
    depth: Vec<f32>,
}

impl Framebuffer {
    /// Create a black framebuffer with an empty depth buffer
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color: vec![Color::BLACK; size],
            depth: vec![f32::INFINITY; size],
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Width over height, 1.0 for an empty buffer
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Reallocate for a new size; contents are cleared
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }

    /// Fill with `color` and reset the depth buffer
    pub fn clear(&mut self, color: Color) {
        self.color.fill(color);
        self.depth.fill(f32::INFINITY);
    }

    /// Colour at a pixel
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.index(x, y).map(|i| self.color[i])
    }

    /// Depth at a pixel (`INFINITY` where nothing was drawn)
    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Row-major colour data
    pub fn pixels(&self) -> &[Color] {
        &self.color
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Write a fragment if it passes the depth test; returns whether it was written
    pub fn plot(&mut self, x: usize, y: usize, depth: f32, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) if depth < self.depth[i] => {
                self.depth[i] = depth;
                self.color[i] = color;
                true
            }
            _ => false,
        }
    }

    /// Fill a triangle with a flat colour, either winding
    ///
    /// Pixel centres inside or on an edge are covered.
    pub fn fill_triangle(&mut self, vertices: [Vec3; 3], color: Color) {
        let [v0, mut v1, mut v2] = vertices;
        let mut area = edge_function(&v0, &v1, &v2);
        if area.abs() < f32::EPSILON || !area.is_finite() {
            return;
        }
        if area < 0.0 {
            std::mem::swap(&mut v1, &mut v2);
            area = -area;
        }

        if self.width == 0 || self.height == 0 {
            return;
        }
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let min_px = v0.x.min(v1.x).min(v2.x).floor().max(0.0);
        let max_px = v0.x.max(v1.x).max(v2.x).ceil().min(max_x);
        let min_py = v0.y.min(v1.y).min(v2.y).floor().max(0.0);
        let max_py = v0.y.max(v1.y).max(v2.y).ceil().min(max_y);
        if min_px > max_px || min_py > max_py {
            return;
        }

        for y in (min_py as usize)..=(max_py as usize) {
            for x in (min_px as usize)..=(max_px as usize) {
                let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);

                let w0 = edge_function(&v1, &v2, &p);
                let w1 = edge_function(&v2, &v0, &p);
                let w2 = edge_function(&v0, &v1, &p);

                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    let depth = (v0.z * w0 + v1.z * w1 + v2.z * w2) / area;
                    self.plot(x, y, depth, color);
                }
            }
        }
    }

    /// Draw a one-pixel line with interpolated depth (Bresenham)
    pub fn draw_line(&mut self, from: Vec3, to: Vec3, color: Color) {
        let Some((from, to)) = self.clip_to_viewport(from, to) else {
            return;
        };

        let (mut x0, mut y0) = (from.x.round() as isize, from.y.round() as isize);
        let (x1, y1) = (to.x.round() as isize, to.y.round() as isize);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let steps = dx.max(-dy).max(1) as f32;
        let mut step = 0.0;

        loop {
            if x0 >= 0 && y0 >= 0 {
                let t = (step / steps).min(1.0);
                let depth = from.z + (to.z - from.z) * t - LINE_DEPTH_BIAS;
                self.plot(x0 as usize, y0 as usize, depth, color);
            }

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
            step += 1.0;
        }
    }

    /// Liang-Barsky clip of a screen-space segment to the pixel rectangle
    fn clip_to_viewport(&self, from: Vec3, to: Vec3) -> Option<(Vec3, Vec3)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let delta = to - from;
        let bounds = [
            (-delta.x, from.x),
            (delta.x, (self.width - 1) as f32 - from.x),
            (-delta.y, from.y),
            (delta.y, (self.height - 1) as f32 - from.y),
        ];

        let (mut t_enter, mut t_exit) = (0.0_f32, 1.0_f32);
        for (p, q) in bounds {
            if p.abs() < f32::EPSILON {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t_enter = t_enter.max(t);
            } else {
                t_exit = t_exit.min(t);
            }
            if t_enter > t_exit {
                return None;
            }
        }

        Some((from + delta * t_enter, from + delta * t_exit))
    }
}

/// Twice the signed area of triangle `(a, b, c)` in screen space
pub fn edge_function(a: &Vec3, b: &Vec3, c: &Vec3) -> f32 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    fn covered(framebuffer: &Framebuffer, color: Color) -> usize {
        framebuffer.pixels().iter().filter(|c| **c == color).count()
    }

    #[test]
    fn test_clear_resets_color_and_depth() {
        let mut framebuffer = Framebuffer::new(4, 3);
        framebuffer.plot(1, 1, 0.5, RED);
        framebuffer.clear(BLUE);

        assert_eq!(covered(&framebuffer, BLUE), 12);
        assert_eq!(framebuffer.depth(1, 1), Some(f32::INFINITY));
    }

    #[test]
    fn test_fill_triangle_either_winding() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(8.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 8.0, 0.0);

        let mut clockwise = Framebuffer::new(8, 8);
        clockwise.fill_triangle([a, b, c], RED);
        let mut counter = Framebuffer::new(8, 8);
        counter.fill_triangle([a, c, b], RED);

        let count = covered(&clockwise, RED);
        assert!(count > 20 && count < 64, "covered {count}");
        assert_eq!(count, covered(&counter, RED));
        assert_eq!(clockwise.pixel(0, 0), Some(RED));
        assert_eq!(clockwise.pixel(7, 7), Some(Color::BLACK));
    }

    #[test]
    fn test_depth_test_keeps_nearer_triangle() {
        let full = |depth| {
            [
                Vec3::new(-10.0, -10.0, depth),
                Vec3::new(30.0, -10.0, depth),
                Vec3::new(-10.0, 30.0, depth),
            ]
        };

        let mut framebuffer = Framebuffer::new(4, 4);
        framebuffer.fill_triangle(full(0.2), RED);
        framebuffer.fill_triangle(full(0.6), BLUE);
        assert_eq!(framebuffer.pixel(1, 1), Some(RED));

        framebuffer.fill_triangle(full(-0.5), BLUE);
        assert_eq!(framebuffer.pixel(1, 1), Some(BLUE));
    }

    #[test]
    fn test_degenerate_triangle_draws_nothing() {
        let mut framebuffer = Framebuffer::new(4, 4);
        framebuffer.fill_triangle([Vec3::zeros(), Vec3::new(2.0, 2.0, 0.0), Vec3::new(4.0, 4.0, 0.0)], RED);
        assert_eq!(covered(&framebuffer, RED), 0);
    }

    #[test]
    fn test_draw_line_is_clipped_to_viewport() {
        let mut framebuffer = Framebuffer::new(10, 5);
        framebuffer.draw_line(Vec3::new(-1000.0, 2.0, 0.0), Vec3::new(1000.0, 2.0, 0.0), RED);

        assert_eq!(covered(&framebuffer, RED), 10);
        for x in 0..10 {
            assert_eq!(framebuffer.pixel(x, 2), Some(RED));
        }
    }

    #[test]
    fn test_line_outside_viewport_draws_nothing() {
        let mut framebuffer = Framebuffer::new(10, 5);
        framebuffer.draw_line(Vec3::new(-5.0, -5.0, 0.0), Vec3::new(-1.0, 20.0, 0.0), RED);
        assert_eq!(covered(&framebuffer, RED), 0);
    }

    #[test]
    fn test_line_respects_depth() {
        let mut framebuffer = Framebuffer::new(10, 1);
        framebuffer.plot(5, 0, -0.9, BLUE);
        framebuffer.draw_line(Vec3::new(0.0, 0.0, 0.5), Vec3::new(9.0, 0.0, 0.5), RED);

        assert_eq!(framebuffer.pixel(5, 0), Some(BLUE));
        assert_eq!(framebuffer.pixel(4, 0), Some(RED));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut framebuffer = Framebuffer::new(2, 2);
        framebuffer.resize(3, 5);
        assert_eq!((framebuffer.width(), framebuffer.height()), (3, 5));
        assert_eq!(framebuffer.pixels().len(), 15);
    }
}
