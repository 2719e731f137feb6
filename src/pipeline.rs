use std::path::Path;

use crate::{
    core::{Canvas, Fps, FrameIndex},
    encode::{EncodeConfig, FfmpegEncoder},
    error::BetamotionResult,
    plot::{self, PlotArea},
    render::{CpuRenderer, FrameRgba, RenderSettings},
    scene::Scene,
    timeline::{CurveState, Timeline},
};

/// Everything needed to turn one scene into frames: the compiled timeline,
/// the pixel-space plot layout, and the rasterizer.
pub struct ScenePipeline {
    scene: Scene,
    canvas: Canvas,
    timeline: Timeline,
    area: PlotArea,
    renderer: CpuRenderer,
    clear_rgba: [u8; 4],
}

impl ScenePipeline {
    pub fn new(
        scene: Scene,
        canvas: Canvas,
        fps: Fps,
        settings: RenderSettings,
    ) -> BetamotionResult<Self> {
        scene.validate()?;
        let timeline = Timeline::compile(&scene.script, fps)?;
        let area = PlotArea::new(scene.axes, canvas)?;
        let clear_rgba = settings.clear_rgba;
        let renderer = CpuRenderer::new(canvas, settings)?;
        Ok(Self {
            scene,
            canvas,
            timeline,
            area,
            renderer,
            clear_rgba,
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn duration(&self) -> FrameIndex {
        self.timeline.duration()
    }

    /// Render one frame: sample the timeline, rebuild the curve from fresh
    /// density samples, rasterize.
    #[tracing::instrument(skip(self))]
    pub fn render_frame(&mut self, frame: FrameIndex) -> BetamotionResult<FrameRgba> {
        let state = self.timeline.sample(frame)?;

        let visible = match state.curve {
            CurveState::DrawOn(p) => p,
            CurveState::Shown => 1.0,
            CurveState::DrawOff(p) => 1.0 - p,
        };

        let axes = self.area.axes_path();
        let curve = if visible > 0.0 {
            let scene = &self.scene;
            let values = &state.values;
            Some(
                self.area
                    .curve_path(plot::CURVE_SAMPLES, visible, |x| scene.density_at(x, values)),
            )
        } else {
            None
        };

        self.renderer.render(&axes, curve.as_ref())
    }

    /// Render every frame in order and pipe them through ffmpeg.
    #[tracing::instrument(skip(self, out_path), fields(frames = self.duration().0))]
    pub fn render_to_mp4(&mut self, out_path: &Path, overwrite: bool) -> BetamotionResult<()> {
        let cfg = EncodeConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            fps: self.timeline.fps().as_f64().round().max(1.0) as u32,
            out_path: out_path.to_path_buf(),
            overwrite,
        };
        let mut encoder = FfmpegEncoder::new(cfg, self.clear_rgba)?;

        let total = self.duration().0;
        for f in 0..total {
            let frame = self.render_frame(FrameIndex(f))?;
            encoder.encode_frame(&frame)?;
        }
        encoder.finish()?;

        tracing::info!(frames = total, out = %out_path.display(), "encoded scene");
        Ok(())
    }
}
