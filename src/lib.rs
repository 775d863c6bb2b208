//! Scrolling strip chart: a lock-free sample ring written by one producer,
//! rendered each frame with gradient-colored bars.

pub mod chart;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod gradient;
pub mod persist;
pub mod render;
pub mod ring;
pub mod surface;

pub use chart::{ChartTheme, Labels, LiveChart, StaticChart};
pub use color::Color;
pub use error::{ChartError, ConfigError, PersistError};
pub use frame::{DrawSurface, Frame, Primitive, TextAlign};
pub use gradient::{ColorStop, Domain, GradientMapper};
pub use render::ChartRenderer;
pub use ring::{RingSnapshot, SampleRing};
