// One freehand gesture: an ordered point path with a fixed color and brush radius.
// Rendered as the union of filled discs (one per point), blended once per pixel.

use crate::types::{Color, Point, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    color: Color,
    radius: u32,
}

impl Stroke {
    /// An empty stroke. `radius` below 1 is raised to 1.
    pub fn new(color: Color, radius: u32) -> Self {
        Self { points: Vec::new(), color, radius: radius.max(1) }
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    #[cfg(test)]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Blend this stroke onto `surface`.
    /// Every covered pixel is touched exactly once, so overlapping discs of the
    /// same stroke never stack up, and point order inside the stroke is irrelevant.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some(area) = self.coverage(surface.width(), surface.height()) else {
            return;
        };
        for (i, covered) in area.mask.iter().enumerate() {
            if *covered {
                let x = area.x0 + i % area.w;
                let y = area.y0 + i / area.w;
                surface.blend_pixel(x, y, self.color);
            }
        }
    }

    /// Rasterise the disc union into a mask over the stroke's clipped bounding box.
    fn coverage(&self, width: usize, height: usize) -> Option<Coverage> {
        if self.points.is_empty() || width == 0 || height == 0 {
            return None;
        }
        let r = self.radius as i64;

        // Bounding box of all discs, clipped to the surface.
        let (mut min_x, mut min_y) = (i64::MAX, i64::MAX);
        let (mut max_x, mut max_y) = (i64::MIN, i64::MIN);
        for p in &self.points {
            min_x = min_x.min(p.x as i64 - r);
            min_y = min_y.min(p.y as i64 - r);
            max_x = max_x.max(p.x as i64 + r);
            max_y = max_y.max(p.y as i64 + r);
        }
        let x0 = min_x.max(0);
        let y0 = min_y.max(0);
        let x1 = max_x.min(width as i64 - 1);
        let y1 = max_y.min(height as i64 - 1);
        if x0 > x1 || y0 > y1 {
            return None; // entirely off-surface
        }

        let w = (x1 - x0 + 1) as usize;
        let h = (y1 - y0 + 1) as usize;
        let mut mask = vec![false; w * h];

        for p in &self.points {
            for_each_disc_pixel(*p, r, (x0, y0, x1, y1), |x, y| {
                mask[(y - y0) as usize * w + (x - x0) as usize] = true;
            });
        }

        Some(Coverage { x0: x0 as usize, y0: y0 as usize, w, mask })
    }
}

struct Coverage {
    x0: usize,
    y0: usize,
    w: usize,
    mask: Vec<bool>, // w * h, row-major, true = inside some disc
}

/// Calls `f(x, y)` for each pixel of the disc of radius `r` around `c`
/// that falls inside the inclusive clip box `(x0, y0, x1, y1)`.
fn for_each_disc_pixel(
    c: Point,
    r: i64,
    clip: (i64, i64, i64, i64),
    mut f: impl FnMut(i64, i64),
) {
    let (x0, y0, x1, y1) = clip;
    let (cx, cy) = (c.x as i64, c.y as i64);
    let r2 = r * r;
    for y in (cy - r).max(y0)..=(cy + r).min(y1) {
        let dy = y - cy;
        for x in (cx - r).max(x0)..=(cx + r).min(x1) {
            let dx = x - cx;
            if dx * dx + dy * dy <= r2 {
                f(x, y);
            }
        }
    }
}

/// Disc union of the stroke being drawn, grown one point at a time.
/// Rendering walks only the covered pixels, and the buffers are reused
/// from one stroke to the next, so a frame never re-rasterises the path.
pub struct StrokeCoverage {
    width: usize,
    height: usize,
    mask: Vec<bool>,   // width * height, true = already in `covered`
    covered: Vec<u32>, // pixel indices in first-covered order
}

impl StrokeCoverage {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, mask: vec![false; width * height], covered: Vec::new() }
    }

    /// Add the disc of radius `radius` around `p`.
    pub fn add(&mut self, p: Point, radius: u32) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let clip = (0, 0, self.width as i64 - 1, self.height as i64 - 1);
        let (mask, covered, width) = (&mut self.mask, &mut self.covered, self.width);
        for_each_disc_pixel(p, radius.max(1) as i64, clip, |x, y| {
            let idx = y as usize * width + x as usize;
            if !mask[idx] {
                mask[idx] = true;
                covered.push(idx as u32);
            }
        });
    }

    /// Forget everything; only the pixels set so far are touched.
    pub fn reset(&mut self) {
        for &idx in &self.covered {
            self.mask[idx as usize] = false;
        }
        self.covered.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.covered.len()
    }

    /// Blend every covered pixel once with `color`. Pixels outside `surface` are skipped.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, color: Color) {
        let (sw, sh) = (surface.width(), surface.height());
        for &idx in &self.covered {
            let (x, y) = (idx as usize % self.width, idx as usize / self.width);
            if x < sw && y < sh {
                surface.blend_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FrameBuffer;

    #[test]
    fn test_stroke_creation() {
        let stroke = Stroke::new(Color::RED, 4);
        assert!(stroke.is_empty());
        assert_eq!(stroke.radius(), 4);
        assert_eq!(stroke.color(), Color::RED);
    }

    #[test]
    fn test_zero_radius_raised_to_one() {
        assert_eq!(Stroke::new(Color::RED, 0).radius(), 1);
    }

    #[test]
    fn test_push_keeps_order() {
        let mut stroke = Stroke::new(Color::BLUE, 2);
        stroke.push(Point::new(5, 5));
        stroke.push(Point::new(1, 1));
        stroke.push(Point::new(3, 3));
        assert_eq!(stroke.points(), &[Point::new(5, 5), Point::new(1, 1), Point::new(3, 3)]);
        assert_eq!(stroke.last(), Some(Point::new(3, 3)));
    }

    #[test]
    fn test_render_single_disc() {
        let mut fb = FrameBuffer::new(20, 20);
        let mut stroke = Stroke::new(Color::RED, 3);
        stroke.push(Point::new(10, 10));
        stroke.render(&mut fb);

        assert_eq!(fb.pixel(10, 10), 0x00FF0000);
        assert_eq!(fb.pixel(13, 10), 0x00FF0000); // on the rim
        assert_eq!(fb.pixel(10, 7), 0x00FF0000);
        assert_eq!(fb.pixel(14, 10), 0); // just outside
        assert_eq!(fb.pixel(13, 13), 0); // corner of the box, outside the disc
    }

    #[test]
    fn test_render_clips_at_edges() {
        let mut fb = FrameBuffer::new(8, 8);
        let mut stroke = Stroke::new(Color::GREEN, 4);
        stroke.push(Point::new(0, 0));
        stroke.push(Point::new(-50, -50)); // fully off-surface
        stroke.render(&mut fb);
        assert_eq!(fb.pixel(0, 0), 0x0000FF00);
        assert_eq!(fb.pixel(4, 0), 0x0000FF00);
        assert_eq!(fb.pixel(7, 7), 0);
    }

    #[test]
    fn test_render_offscreen_stroke_is_noop() {
        let mut fb = FrameBuffer::new(8, 8);
        let mut stroke = Stroke::new(Color::GREEN, 2);
        stroke.push(Point::new(100, 100));
        stroke.render(&mut fb);
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_overlapping_discs_blend_once() {
        let half = Color::WHITE.with_alpha(128);

        let mut once = FrameBuffer::new(16, 16);
        let mut single = Stroke::new(half, 3);
        single.push(Point::new(8, 8));
        single.render(&mut once);

        let mut many = FrameBuffer::new(16, 16);
        let mut repeated = Stroke::new(half, 3);
        for _ in 0..5 {
            repeated.push(Point::new(8, 8));
        }
        repeated.render(&mut many);

        assert_eq!(once.pixels, many.pixels);
    }

    fn stroke_with(color: Color, radius: u32, pts: &[(i32, i32)]) -> Stroke {
        let mut s = Stroke::new(color, radius);
        pts.iter().for_each(|&(x, y)| s.push(Point::new(x, y)));
        s
    }

    #[test]
    fn test_incremental_coverage_matches_full_render() {
        let pts = [(2, 2), (5, 3), (9, 7), (14, 14), (14, 14), (-3, 20), (30, 30)];
        let stroke = stroke_with(Color::GREEN.with_alpha(100), 3, &pts);

        let mut full = FrameBuffer::new(24, 24);
        full.pixels.fill(0x00_20_30_40);
        stroke.render(&mut full);

        let mut live = StrokeCoverage::new(24, 24);
        for &(x, y) in &pts {
            live.add(Point::new(x, y), 3);
        }
        let mut incremental = FrameBuffer::new(24, 24);
        incremental.pixels.fill(0x00_20_30_40);
        live.render(&mut incremental, stroke.color());

        assert_eq!(full.pixels, incremental.pixels);
    }

    #[test]
    fn test_coverage_counts_each_pixel_once() {
        let mut live = StrokeCoverage::new(16, 16);
        live.add(Point::new(8, 8), 2);
        let once = live.len();
        live.add(Point::new(8, 8), 2);
        assert_eq!(live.len(), once);
        assert_eq!(once, 13); // radius-2 disc
    }

    #[test]
    fn test_coverage_reset_reuses_buffers() {
        let mut live = StrokeCoverage::new(16, 16);
        live.add(Point::new(4, 4), 3);
        live.reset();
        assert_eq!(live.len(), 0);
        assert!(live.mask.iter().all(|m| !m));

        let mut fb = FrameBuffer::new(16, 16);
        live.render(&mut fb, Color::RED);
        assert!(fb.pixels.iter().all(|&p| p == 0));

        // a fresh disc after reset is fully recorded again
        live.add(Point::new(4, 4), 3);
        live.render(&mut fb, Color::RED);
        assert_eq!(fb.pixel(4, 4), 0x00FF0000);
    }

    #[test]
    fn test_point_order_does_not_change_pixels() {
        let color = Color::BLUE.with_alpha(90);
        let pts = [Point::new(3, 3), Point::new(6, 4), Point::new(9, 8)];

        let mut forward = Stroke::new(color, 2);
        pts.iter().for_each(|p| forward.push(*p));
        let mut backward = Stroke::new(color, 2);
        pts.iter().rev().for_each(|p| backward.push(*p));

        let mut a = FrameBuffer::new(12, 12);
        let mut b = FrameBuffer::new(12, 12);
        forward.render(&mut a);
        backward.render(&mut b);
        assert_eq!(a.pixels, b.pixels);
    }
}
