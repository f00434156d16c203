pub mod mode;

pub use mode::{DetailDepth, DisplayConfig, DisplayMode, SkillLevel};
