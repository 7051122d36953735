//! Golden-angle spiral packing.
//!
//! Point `i` of `n` sits at angle `i * π(3 - √5)` and radius
//! `inner + √(i/n) * spread` around the centre. The same primitive lays out
//! stars inside a constellation and constellation centres on the canvas.

use std::f64::consts::PI;

/// The golden angle in radians, `π(3 - √5)`.
pub fn golden_angle() -> f64 {
    PI * (3.0 - 5.0_f64.sqrt())
}

/// Radii and clamp bounds for one application of the spiral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralLayout {
    pub center: (f64, f64),
    /// Radius of point 0.
    pub inner: f64,
    /// Radius added between point 0 and point n.
    pub spread: f64,
    pub x_bounds: (f64, f64),
    pub y_bounds: (f64, f64),
}

impl SpiralLayout {
    /// Star placement inside a constellation's unit circle.
    pub const STARS: SpiralLayout = SpiralLayout {
        center: (0.5, 0.5),
        inner: 0.0,
        spread: 0.4,
        x_bounds: (0.05, 0.95),
        y_bounds: (0.05, 0.95),
    };

    /// Constellation centres on the canvas.
    pub const CANVAS: SpiralLayout = SpiralLayout {
        center: (0.5, 0.5),
        inner: 0.15,
        spread: 0.3,
        x_bounds: (0.12, 0.88),
        y_bounds: (0.15, 0.85),
    };

    /// Unclamped radius for point `i` of `n`.
    pub fn radius(&self, i: usize, n: usize) -> f64 {
        if n == 0 {
            return self.inner;
        }
        self.inner + (i as f64 / n as f64).sqrt() * self.spread
    }

    /// Position of point `i` of `n`, clamped into the layout's bounds.
    pub fn point(&self, i: usize, n: usize) -> (f64, f64) {
        let angle = i as f64 * golden_angle();
        let r = self.radius(i, n);
        let x = self.center.0 + r * angle.cos();
        let y = self.center.1 + r * angle.sin();
        (
            x.clamp(self.x_bounds.0, self.x_bounds.1),
            y.clamp(self.y_bounds.0, self.y_bounds.1),
        )
    }

    /// Positions for all `n` points.
    pub fn points(&self, n: usize) -> Vec<(f64, f64)> {
        (0..n).map(|i| self.point(i, n)).collect()
    }
}
