use crate::core::MapPipeline;
use crate::utils::error::Result;

/// Drives the three pipeline stages and narrates progress.
pub struct ViewEngine<P: MapPipeline> {
    pipeline: P,
}

impl<P: MapPipeline> ViewEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Retrieving feeds...");
        let feeds = self.pipeline.retrieve().await?;
        let event_count = feeds.events.as_ref().map(|c| c.features.len()).unwrap_or(0);
        let path_count = feeds.boundaries.as_ref().map(|b| b.paths.len()).unwrap_or(0);
        tracing::info!(
            "Retrieved {} events and {} boundary paths",
            event_count,
            path_count
        );

        tracing::info!("Composing view...");
        let view = self.pipeline.compose(feeds)?;
        if let Some(layer) = &view.events {
            tracing::info!(
                "Rendered {} markers ({} skipped)",
                layer.markers.len(),
                layer.skipped
            );
        }

        tracing::info!("Publishing document...");
        let output_path = self.pipeline.publish(view).await?;
        tracing::info!("Map saved to: {}", output_path);

        Ok(output_path)
    }
}
