use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use betamotion::{Canvas, Fps, FrameIndex, RenderSettings, SceneKind, ScenePipeline};

#[derive(Parser, Debug)]
#[command(name = "betamotion", version, about = "Animated Beta-distribution density scenes")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the compiled scene timeline as JSON.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scene to render.
    #[arg(long, value_enum)]
    scene: SceneChoice,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas/frame-rate preset.
    #[arg(long, value_enum, default_value_t = QualityChoice::Preview)]
    quality: QualityChoice,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Scene to render.
    #[arg(long, value_enum)]
    scene: SceneChoice,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas/frame-rate preset.
    #[arg(long, value_enum, default_value_t = QualityChoice::Preview)]
    quality: QualityChoice,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Scene to compile.
    #[arg(long, value_enum)]
    scene: SceneChoice,

    /// Canvas/frame-rate preset.
    #[arg(long, value_enum, default_value_t = QualityChoice::Preview)]
    quality: QualityChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SceneChoice {
    AdjustAlpha,
    AdjustAlphaBeta,
}

impl SceneChoice {
    fn kind(self) -> SceneKind {
        match self {
            SceneChoice::AdjustAlpha => SceneKind::AdjustAlpha,
            SceneChoice::AdjustAlphaBeta => SceneKind::AdjustAlphaBeta,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QualityChoice {
    /// 854x480 at 15 fps.
    Preview,
    /// 1920x1080 at 60 fps.
    High,
}

impl QualityChoice {
    fn canvas_fps(self) -> anyhow::Result<(Canvas, Fps)> {
        let (canvas, fps) = match self {
            QualityChoice::Preview => (
                Canvas {
                    width: 854,
                    height: 480,
                },
                Fps::new(15, 1)?,
            ),
            QualityChoice::High => (
                Canvas {
                    width: 1920,
                    height: 1080,
                },
                Fps::new(60, 1)?,
            ),
        };
        Ok((canvas, fps))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn make_pipeline(scene: SceneChoice, quality: QualityChoice) -> anyhow::Result<ScenePipeline> {
    let (canvas, fps) = quality.canvas_fps()?;
    let pipeline = ScenePipeline::new(scene.kind().scene(), canvas, fps, RenderSettings::default())
        .with_context(|| format!("build pipeline for scene '{}'", scene.kind().name()))?;
    Ok(pipeline)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut pipeline = make_pipeline(args.scene, args.quality)?;
    let frame = pipeline
        .render_frame(FrameIndex(args.frame))
        .with_context(|| format!("render frame {}", args.frame))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let flat = frame.to_opaque_rgba(RenderSettings::default().clear_rgba);
    image::save_buffer_with_format(
        &args.out,
        &flat,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut pipeline = make_pipeline(args.scene, args.quality)?;
    pipeline
        .render_to_mp4(&args.out, true)
        .with_context(|| format!("render mp4 '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let pipeline = make_pipeline(args.scene, args.quality)?;
    let json = serde_json::to_string_pretty(pipeline.timeline())
        .with_context(|| "serialize timeline JSON")?;
    println!("{json}");
    Ok(())
}
