//! Terminal presentation layer: framebuffer, renderer and quiz views.

pub mod fb;
pub mod quiz_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use quiz_view::{Flash, QuizView, Screen, Viewport};
pub use renderer::TerminalRenderer;
