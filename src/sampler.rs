// Turns sparse pointer samples into an evenly spaced point path.
// Fast swipes at a low poll rate would otherwise leave holes between discs.

use crate::types::Point;

/// Default step as a fraction of the brush radius.
pub const DEFAULT_STEP_FACTOR: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct StrokeSampler {
    last: Point,
    step: f32, // interpolation interval in pixels, > 0
}

impl StrokeSampler {
    /// Start sampling at `origin` for a brush of `radius` pixels.
    /// The step is `radius * step_factor`, never below a hundredth of a pixel.
    pub fn new(origin: Point, radius: u32, step_factor: f32) -> Self {
        let step = (radius.max(1) as f32 * step_factor).max(0.01);
        Self { last: origin, step }
    }

    #[cfg(test)]
    pub fn last(&self) -> Point {
        self.last
    }

    #[cfg(test)]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// How many points a move of `dist` pixels produces: `max(1, floor(dist / step))`.
    pub fn steps_for(&self, dist: f32) -> usize {
        ((dist / self.step).floor() as usize).max(1)
    }

    /// Feed the next raw position; calls `emit` for every point to append.
    /// A zero-length move emits the position once. Otherwise points are placed
    /// at `t = i/steps` for `i = 1..=steps`, so the last one is `to` itself.
    pub fn feed(&mut self, to: Point, mut emit: impl FnMut(Point)) {
        let from = self.last;
        let dist = from.distance(to);

        if dist == 0.0 {
            emit(to);
        } else {
            let steps = self.steps_for(dist);
            for i in 1..=steps {
                let t = i as f32 / steps as f32;
                emit(Point::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t)));
            }
        }

        self.last = to;
    }

    /// Convenience wrapper collecting `feed` output.
    #[cfg(test)]
    pub fn feed_collect(&mut self, to: Point) -> Vec<Point> {
        let mut out = Vec::new();
        self.feed(to, |p| out.push(p));
        out
    }
}

#[inline]
fn lerp(a: i32, b: i32, t: f32) -> i32 {
    (a as f32 + (b - a) as f32 * t).round() as i32
}
