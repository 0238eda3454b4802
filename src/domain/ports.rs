use crate::domain::model::{MapView, RetrievedFeeds};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait MapConfig: Send + Sync {
    fn events_url(&self) -> &str;
    fn boundaries_url(&self) -> &str;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait MapPipeline: Send + Sync {
    /// Issue both feed retrievals concurrently and join on the pair.
    async fn retrieve(&self) -> Result<RetrievedFeeds>;
    /// Classify, render, and assemble the view. Synchronous once data is in.
    fn compose(&self, feeds: RetrievedFeeds) -> Result<MapView>;
    /// Publish the view as a document and return where it landed.
    async fn publish(&self, view: MapView) -> Result<String>;
}
