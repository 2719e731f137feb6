use kurbo::BezPath;

use crate::{
    core::Canvas,
    error::{BetamotionError, BetamotionResult},
};

/// One rendered frame, premultiplied RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRgba {
    /// Flatten onto an opaque background, returning straight RGBA8 with full
    /// alpha. This is what PNG output and the MP4 encoder consume.
    pub fn to_opaque_rgba(&self, bg_rgba: [u8; 4]) -> Vec<u8> {
        let bg_r = u16::from(bg_rgba[0]);
        let bg_g = u16::from(bg_rgba[1]);
        let bg_b = u16::from(bg_rgba[2]);

        let mut out = vec![0u8; self.data.len()];
        for (d, s) in out.chunks_exact_mut(4).zip(self.data.chunks_exact(4)) {
            let a = u16::from(s[3]);
            if a == 255 {
                d.copy_from_slice(s);
                d[3] = 255;
                continue;
            }
            let inv = 255 - a;

            let (r, g, b) = if self.premultiplied {
                (
                    u16::from(s[0]) + mul_div255(bg_r, inv),
                    u16::from(s[1]) + mul_div255(bg_g, inv),
                    u16::from(s[2]) + mul_div255(bg_b, inv),
                )
            } else {
                (
                    mul_div255(u16::from(s[0]), a) + mul_div255(bg_r, inv),
                    mul_div255(u16::from(s[1]), a) + mul_div255(bg_g, inv),
                    mul_div255(u16::from(s[2]), a) + mul_div255(bg_b, inv),
                )
            };

            d[0] = r.min(255) as u8;
            d[1] = g.min(255) as u8;
            d[2] = b.min(255) as u8;
            d[3] = 255;
        }
        out
    }
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Colors and stroke widths for a rendered scene.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub clear_rgba: [u8; 4],
    pub axes_rgba: [u8; 4],
    pub curve_rgba: [u8; 4],
    pub axes_stroke_px: f64,
    pub curve_stroke_px: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_rgba: [18, 20, 28, 255],
            axes_rgba: [255, 255, 255, 255],
            curve_rgba: [255, 255, 0, 255],
            axes_stroke_px: 2.0,
            curve_stroke_px: 4.0,
        }
    }
}

/// CPU rasterizer for one scene's frames.
pub struct CpuRenderer {
    settings: RenderSettings,
    width: u16,
    height: u16,
}

impl CpuRenderer {
    pub fn new(canvas: Canvas, settings: RenderSettings) -> BetamotionResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| BetamotionError::validation("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| BetamotionError::validation("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(BetamotionError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self {
            settings,
            width,
            height,
        })
    }

    /// Rasterize the axes and (when present) the curve over the clear color.
    #[tracing::instrument(skip_all)]
    pub fn render(&mut self, axes: &BezPath, curve: Option<&BezPath>) -> BetamotionResult<FrameRgba> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        let [r, g, b, a] = self.settings.clear_rgba;
        clear_pixmap(&mut pixmap, premul_rgba8(r, g, b, a));

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let [r, g, b, a] = self.settings.axes_rgba;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_path(&bezpath_to_cpu(&stroke_outline(
            axes,
            self.settings.axes_stroke_px,
        )));

        if let Some(curve) = curve {
            if !curve.elements().is_empty() {
                let [r, g, b, a] = self.settings.curve_rgba;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                ctx.fill_path(&bezpath_to_cpu(&stroke_outline(
                    curve,
                    self.settings.curve_stroke_px,
                )));
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRgba {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

// The backend fills paths only, so strokes are expanded to fill outlines
// before rasterization.
fn stroke_outline(path: &BezPath, width_px: f64) -> BezPath {
    let style = kurbo::Stroke::new(width_px)
        .with_caps(kurbo::Cap::Round)
        .with_join(kurbo::Join::Round);
    kurbo::stroke(
        path.elements().iter().copied(),
        &style,
        &kurbo::StrokeOpts::default(),
        0.25,
    )
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = u16::from(a) + 1;
    let premul = |c: u8| -> u8 { ((u16::from(c) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
