#![forbid(unsafe_code)]

pub mod core;
pub mod density;
pub mod ease;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod render;
pub mod scene;
pub mod timeline;
pub mod tracker;

pub use self::core::{Canvas, Fps, FrameIndex, FrameRange};
pub use density::beta_pdf;
pub use ease::Ease;
pub use error::{BetamotionError, BetamotionResult};
pub use pipeline::ScenePipeline;
pub use plot::{AxesSpec, AxisRange, PlotArea};
pub use render::{CpuRenderer, FrameRgba, RenderSettings};
pub use scene::{ParamBinding, Scene, SceneKind};
pub use timeline::{CurveState, Script, Step, Timeline, TimelineState};
pub use tracker::{Lerp, ValueTracker};
