pub const REFERENCE: &'static str = include_str!("../reference.toml");

pub mod config;
pub mod error;
pub mod ext;
pub mod failure_detector;
pub mod util;
