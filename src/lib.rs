//! Hand-drawn digit recognition.
//!
//! A fixed-size canvas turns pointer strokes into a bitmap; the exporter turns
//! that bitmap into the `[1, 28, 28, 1]` tensor a digit classifier expects; the
//! shell ties both to a classifier and keeps the latest prediction for display.
//! The window itself (minifb) lives in `draw`, with layout/routing in `ui`.

pub mod classifier;
pub mod config;
pub mod draw;
pub mod error;
pub mod export;
pub mod input;
pub mod shell;
pub mod stroke;
pub mod types;
pub mod ui;

pub use classifier::{Classifier, DenseNetwork};
pub use error::Error;
pub use export::export;
pub use input::PointerEvent;
pub use shell::{RecognizerShell, ShellState};
pub use stroke::{Pen, StrokeSurface};
pub use types::{FrameBuffer, Point, Prediction};
