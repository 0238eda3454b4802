pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{engine::ViewEngine, layers::MapOptions, pipeline::LivePipeline};
pub use utils::error::{MapError, Result};
