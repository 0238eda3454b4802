pub mod classify;
pub mod document;
pub mod engine;
pub mod layers;
pub mod legend;
pub mod markers;
pub mod pipeline;

pub use crate::domain::model::{EventLayer, FeatureCollection, MapView, RetrievedFeeds};
pub use crate::domain::ports::{MapConfig, MapPipeline, Storage};
pub use crate::utils::error::Result;
