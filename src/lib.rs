#![forbid(unsafe_code)]

pub mod animation;
pub mod app;
pub mod config;
pub mod foundation;
pub mod history;
pub mod input;
pub mod pages;
pub mod render;
pub mod routes;
pub mod script;

pub use animation::{Animation, AnimationLoop, FrameHandle, FrameScheduler, LoopControl};
pub use app::App;
pub use config::{
    BounceMode, ControllableBoxConfig, MovingBoxConfig, PainterConfig, PlaygroundConfig,
    RacingCarConfig, TransformingConfig,
};
pub use foundation::core::{Affine, BezPath, CanvasSize, FrameIndex, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{PlaygroundError, PlaygroundResult};
pub use history::{History, Step};
pub use input::{ArrowKey, ArrowKeyMap, ControlKind, ControlState, InputEvent};
pub use pages::{Page, PageCtx};
pub use render::{
    cpu::CpuSurface,
    snapshot::Snapshot,
    surface::{DrawState, LineCap, LineJoin, Surface},
};
pub use routes::{APP_TITLE, MenuItem, Route};
pub use script::{InputScript, ScriptedEvent};
