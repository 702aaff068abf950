//! Life-like cellular automata drawn to the terminal.
//!
//! A [`Grid`] evolves under a [`RuleSet`] of birth and survival counts, on
//! either a toroidal or a bounded board. The [`Driver`] steps it at a fixed
//! interval and hands each generation to a [`Renderer`] running on the
//! blocking pool, so drawing one generation overlaps computing the next.

pub mod config;
pub mod driver;
pub mod grid;
pub mod render;
pub mod rules;

pub use config::{Config, ConfigError, Settings, MAX_DIMENSION};
pub use driver::Driver;
pub use grid::{EdgePolicy, Grid, ParseEdgePolicyError};
pub use render::{Palette, PendingRender, RenderError, Renderer};
pub use rules::{RuleParseError, RuleSet};
