use kurbo::{BezPath, Point};

use crate::{
    core::Canvas,
    error::{BetamotionError, BetamotionResult},
};

/// Sample count used when tracing the density curve across the x-domain.
pub const CURVE_SAMPLES: usize = 256;

/// One data-space axis: `[min, max]` with a tick interval.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub tick: f64,
}

impl AxisRange {
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    fn validate(self, name: &str) -> BetamotionResult<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
            return Err(BetamotionError::validation(format!(
                "{name} axis must have finite min < max"
            )));
        }
        if !(self.tick.is_finite() && self.tick > 0.0) {
            return Err(BetamotionError::validation(format!(
                "{name} axis tick must be positive and finite"
            )));
        }
        Ok(())
    }
}

/// Data-space extent of the plot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxesSpec {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl AxesSpec {
    pub fn validate(&self) -> BetamotionResult<()> {
        self.x.validate("x")?;
        self.y.validate("y")
    }
}

/// Pixel-space placement of the axes on a canvas.
///
/// The plot rectangle is inset from the canvas edges by a margin proportional
/// to the smaller canvas dimension; y grows upward in data space and downward
/// in pixel space.
#[derive(Clone, Copy, Debug)]
pub struct PlotArea {
    spec: AxesSpec,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    tick_px: f64,
}

impl PlotArea {
    const MARGIN_FRACTION: f64 = 0.08;

    pub fn new(spec: AxesSpec, canvas: Canvas) -> BetamotionResult<Self> {
        spec.validate()?;
        if canvas.width == 0 || canvas.height == 0 {
            return Err(BetamotionError::validation(
                "canvas width/height must be > 0",
            ));
        }

        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let margin = (w.min(h) * Self::MARGIN_FRACTION).max(4.0);

        Ok(Self {
            spec,
            left: margin,
            top: margin,
            width: w - 2.0 * margin,
            height: h - 2.0 * margin,
            tick_px: (margin * 0.25).max(2.0),
        })
    }

    pub fn spec(&self) -> AxesSpec {
        self.spec
    }

    /// Map a data-space point to pixel coordinates.
    pub fn to_px(&self, x: f64, y: f64) -> Point {
        let fx = (x - self.spec.x.min) / self.spec.x.span();
        let fy = (y - self.spec.y.min) / self.spec.y.span();
        Point::new(
            self.left + fx * self.width,
            self.top + (1.0 - fy) * self.height,
        )
    }

    /// Axis lines plus tick marks. Numeric labels are not drawn; text
    /// typesetting is delegated and out of scope.
    pub fn axes_path(&self) -> BezPath {
        let mut path = BezPath::new();

        let origin = self.to_px(self.spec.x.min, self.spec.y.min);
        let x_end = self.to_px(self.spec.x.max, self.spec.y.min);
        let y_end = self.to_px(self.spec.x.min, self.spec.y.max);

        path.move_to(origin);
        path.line_to(x_end);
        path.move_to(origin);
        path.line_to(y_end);

        let mut x = self.spec.x.min;
        while x <= self.spec.x.max + self.spec.x.tick * 1e-6 {
            let p = self.to_px(x, self.spec.y.min);
            path.move_to(Point::new(p.x, p.y - self.tick_px));
            path.line_to(Point::new(p.x, p.y + self.tick_px));
            x += self.spec.x.tick;
        }

        let mut y = self.spec.y.min;
        while y <= self.spec.y.max + self.spec.y.tick * 1e-6 {
            let p = self.to_px(self.spec.x.min, y);
            path.move_to(Point::new(p.x - self.tick_px, p.y));
            path.line_to(Point::new(p.x + self.tick_px, p.y));
            y += self.spec.y.tick;
        }

        path
    }

    /// Trace the curve `y = f(x)` across the full x-domain.
    ///
    /// `f` is invoked afresh for every sample on every call; nothing is cached
    /// between frames. `progress` in 0..1 truncates the polyline from the
    /// left, which implements draw-on/draw-off. Out-of-range values clamp to
    /// the y-range.
    pub fn curve_path(&self, samples: usize, progress: f64, f: impl Fn(f64) -> f64) -> BezPath {
        let mut path = BezPath::new();
        if samples < 2 {
            return path;
        }

        let progress = progress.clamp(0.0, 1.0);
        let drawn = ((samples as f64) * progress).round() as usize;
        if drawn < 2 {
            return path;
        }

        for i in 0..drawn {
            let fx = (i as f64) / ((samples - 1) as f64);
            let x = self.spec.x.min + fx * self.spec.x.span();
            let y = f(x).clamp(self.spec.y.min, self.spec.y.max);
            let p = self.to_px(x, y);
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path
    }
}
