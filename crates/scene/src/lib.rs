#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::suboptimal_flops)]

//! # Scene
//!
//! A small plotting model for animations: a static [`SceneStyle`] (figure,
//! axes, grid, palette, annotations) plus a set of lines whose data is
//! replaced wholesale every frame.
//!
//! A scene can be drawn two ways:
//! - [`TerminalCanvas`] renders Braille characters with ANSI colors for
//!   interactive playback.
//! - [`Rasterizer`] renders `rgb24` pixel frames for video export.
//!
//! ## Example
//!
//! ```rust
//! use scene::{Axis, Color, SceneBuilder, SceneStyle};
//!
//! let style = SceneStyle {
//!     x_axis: Axis::new(-2.0, 2.0),
//!     y_axis: Axis::new(-2.0, 2.0),
//!     palette: vec![Color::new(0, 0xb0, 0)],
//!     ..SceneStyle::default()
//! };
//!
//! let mut builder = SceneBuilder::new(style);
//! let curve = builder.add_line();
//! let mut scene = builder.build();
//!
//! scene.set_data(curve, &[0.0, 1.0], &[1.0, 0.0]);
//! assert_eq!(scene.line(curve).unwrap().len(), 2);
//! assert_eq!(scene.line(curve).unwrap().color(), Color::new(0, 0xb0, 0));
//! ```

mod color;
mod error;
pub mod layout;
mod raster;
mod scene;
mod style;
mod terminal;

pub use color::{Color, ParseColorError};
pub use error::RenderError;
pub use raster::{Rasterizer, font_loaded, frame_dimensions, load_font, registered_font};
pub use scene::{Line, LineHandle, Scene, SceneBuilder};
pub use style::{Annotation, Axis, FigureSize, GridLine, InvalidStyle, SceneStyle, Ticks};
pub use terminal::TerminalCanvas;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::raster::Rasterizer;
    pub use crate::scene::{LineHandle, Scene, SceneBuilder};
    pub use crate::style::{Annotation, Axis, FigureSize, GridLine, SceneStyle, Ticks};
    pub use crate::terminal::TerminalCanvas;
}
