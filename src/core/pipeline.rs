use reqwest::Client;
use serde_json::Value;

use crate::core::document::render_document;
use crate::core::layers::{compose_from_feeds, MapOptions};
use crate::domain::model::{BoundarySet, FeatureCollection, MapView, RetrievedFeeds};
use crate::domain::ports::{MapConfig, MapPipeline, Storage};
use crate::utils::error::Result;

pub const DOCUMENT_NAME: &str = "map.html";

/// The production pipeline: two HTTP feeds in, one HTML document out.
pub struct LivePipeline<S: Storage, C: MapConfig> {
    storage: S,
    config: C,
    options: MapOptions,
    client: Client,
}

impl<S: Storage, C: MapConfig> LivePipeline<S, C> {
    pub fn new(storage: S, config: C, options: MapOptions) -> Self {
        Self {
            storage,
            config,
            options,
            client: Client::new(),
        }
    }

    async fn fetch_events(&self) -> Result<FeatureCollection> {
        tracing::debug!("Requesting event feed: {}", self.config.events_url());
        let response = self
            .client
            .get(self.config.events_url())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<FeatureCollection>().await?)
    }

    async fn fetch_boundaries(&self) -> Result<BoundarySet> {
        tracing::debug!("Requesting boundary feed: {}", self.config.boundaries_url());
        let response = self
            .client
            .get(self.config.boundaries_url())
            .send()
            .await?
            .error_for_status()?;

        let document = response.json::<Value>().await?;
        Ok(BoundarySet {
            paths: boundary_paths(&document),
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: MapConfig> MapPipeline for LivePipeline<S, C> {
    async fn retrieve(&self) -> Result<RetrievedFeeds> {
        // Both requests in flight at once; the join is the barrier the
        // composition stage waits behind.
        let (events, boundaries) = tokio::join!(self.fetch_events(), self.fetch_boundaries());

        let events = match events {
            Ok(collection) => Some(collection),
            Err(e) => {
                tracing::warn!("Event feed unavailable, overlay will be absent: {}", e);
                None
            }
        };
        let boundaries = match boundaries {
            Ok(set) => Some(set),
            Err(e) => {
                tracing::warn!("Boundary feed unavailable, overlay will be absent: {}", e);
                None
            }
        };

        Ok(RetrievedFeeds { events, boundaries })
    }

    fn compose(&self, feeds: RetrievedFeeds) -> Result<MapView> {
        Ok(compose_from_feeds(&self.options, feeds))
    }

    async fn publish(&self, view: MapView) -> Result<String> {
        let page = render_document(&view)?;
        self.storage
            .write_file(DOCUMENT_NAME, page.as_bytes())
            .await?;

        Ok(format!("{}/{}", self.config.output_path(), DOCUMENT_NAME))
    }
}

/// Collect every LineString / MultiLineString path in the boundary
/// document. GeoJSON orders vertices [lon, lat]; paths come out (lat, lon).
fn boundary_paths(document: &Value) -> Vec<Vec<(f64, f64)>> {
    let mut paths = Vec::new();
    let Some(features) = document["features"].as_array() else {
        return paths;
    };

    for feature in features {
        let geometry = &feature["geometry"];
        match geometry["type"].as_str().unwrap_or("") {
            "LineString" => {
                if let Some(line) = geometry["coordinates"].as_array() {
                    push_path(&mut paths, line);
                }
            }
            "MultiLineString" => {
                if let Some(lines) = geometry["coordinates"].as_array() {
                    for line in lines {
                        if let Some(line) = line.as_array() {
                            push_path(&mut paths, line);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    paths
}

fn push_path(paths: &mut Vec<Vec<(f64, f64)>>, line: &[Value]) {
    let mut path = Vec::with_capacity(line.len());
    for vertex in line {
        let Some(pair) = vertex.as_array() else {
            continue;
        };
        let lon = pair.first().and_then(Value::as_f64);
        let lat = pair.get(1).and_then(Value::as_f64);
        if let (Some(lon), Some(lat)) = (lon, lat) {
            path.push((lat, lon));
        }
    }
    // A polyline needs at least two vertices to draw.
    if path.len() >= 2 {
        paths.push(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        events_url: String,
        boundaries_url: String,
        output_path: String,
    }

    impl MapConfig for MockConfig {
        fn events_url(&self) -> &str {
            &self.events_url
        }

        fn boundaries_url(&self) -> &str {
            &self.boundaries_url
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }
    }

    fn event_feed_body() -> serde_json::Value {
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"mag": 2.5, "place": "X", "time": 1_700_000_000_000_i64},
                    "geometry": {"type": "Point", "coordinates": [-96.8, 32.8, 5.0]}
                },
                {
                    "type": "Feature",
                    "properties": {"mag": null, "place": "Y", "time": 0},
                    "geometry": {"type": "Point", "coordinates": [10.0, 20.0, 1.0]}
                }
            ]
        })
    }

    fn boundary_feed_body() -> serde_json::Value {
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[0.0, 1.0], [2.0, 3.0]]
                    }
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "MultiLineString",
                        "coordinates": [[[4.0, 5.0], [6.0, 7.0]], [[8.0, 9.0], [10.0, 11.0]]]
                    }
                }
            ]
        })
    }

    fn pipeline_for(server: &MockServer) -> LivePipeline<MockStorage, MockConfig> {
        let config = MockConfig {
            events_url: server.url("/events"),
            boundaries_url: server.url("/boundaries"),
            output_path: "test_output".to_string(),
        };
        LivePipeline::new(MockStorage::new(), config, MapOptions::default())
    }

    #[tokio::test]
    async fn test_retrieve_joins_both_feeds() {
        let server = MockServer::start();
        let events_mock = server.mock(|when, then| {
            when.method(GET).path("/events");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(event_feed_body());
        });
        let boundaries_mock = server.mock(|when, then| {
            when.method(GET).path("/boundaries");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(boundary_feed_body());
        });

        let pipeline = pipeline_for(&server);
        let feeds = pipeline.retrieve().await.unwrap();

        events_mock.assert();
        boundaries_mock.assert();

        let events = feeds.events.unwrap();
        assert_eq!(events.features.len(), 2);
        assert_eq!(events.features[0].properties.mag, Some(2.5));
        assert_eq!(events.features[1].properties.mag, None);

        // One LineString path plus two from the MultiLineString.
        let boundaries = feeds.boundaries.unwrap();
        assert_eq!(boundaries.paths.len(), 3);
        assert_eq!(boundaries.paths[0], vec![(1.0, 0.0), (3.0, 2.0)]);
    }

    #[tokio::test]
    async fn test_boundary_failure_leaves_events_intact() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/events");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(event_feed_body());
        });
        server.mock(|when, then| {
            when.method(GET).path("/boundaries");
            then.status(500);
        });

        let pipeline = pipeline_for(&server);
        let feeds = pipeline.retrieve().await.unwrap();

        assert!(feeds.events.is_some());
        assert!(feeds.boundaries.is_none());

        // The partial view still composes and keeps the event overlay.
        let view = pipeline.compose(feeds).unwrap();
        assert!(view.events.is_some());
        assert!(view.boundaries.is_none());
        assert_eq!(view.base_layers.len(), 4);
    }

    #[tokio::test]
    async fn test_event_failure_leaves_boundaries_intact() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/events");
            then.status(500);
        });
        server.mock(|when, then| {
            when.method(GET).path("/boundaries");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(boundary_feed_body());
        });

        let pipeline = pipeline_for(&server);
        let feeds = pipeline.retrieve().await.unwrap();

        assert!(feeds.events.is_none());
        assert!(feeds.boundaries.is_some());
    }

    #[tokio::test]
    async fn test_compose_classifies_retrieved_events() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/events");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(event_feed_body());
        });
        server.mock(|when, then| {
            when.method(GET).path("/boundaries");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(boundary_feed_body());
        });

        let pipeline = pipeline_for(&server);
        let feeds = pipeline.retrieve().await.unwrap();
        let view = pipeline.compose(feeds).unwrap();

        let events = view.events.as_ref().unwrap();
        assert_eq!(events.markers.len(), 2);
        assert_eq!(events.markers[0].radius, 12.5);
        assert_eq!(events.markers[0].fill_color, "#f7db11");
        assert_eq!(events.markers[1].fill_color, "#a2f600");
    }

    #[tokio::test]
    async fn test_publish_writes_document_to_storage() {
        let server = MockServer::start();
        let storage = MockStorage::new();
        let config = MockConfig {
            events_url: server.url("/events"),
            boundaries_url: server.url("/boundaries"),
            output_path: "test_output".to_string(),
        };
        let pipeline = LivePipeline::new(storage.clone(), config, MapOptions::default());

        let view = pipeline.compose(RetrievedFeeds::default()).unwrap();
        let output_path = pipeline.publish(view).await.unwrap();

        assert_eq!(output_path, "test_output/map.html");
        let page = storage.get_file(DOCUMENT_NAME).await.unwrap();
        assert!(!page.is_empty());
        assert!(String::from_utf8(page).unwrap().contains("L.map"));
    }

    #[test]
    fn test_boundary_paths_skips_degenerate_geometry() {
        let document = serde_json::json!({
            "features": [
                {"geometry": {"type": "LineString", "coordinates": [[0.0, 1.0]]}},
                {"geometry": {"type": "Point", "coordinates": [1.0, 2.0]}},
                {"geometry": {"type": "LineString", "coordinates": [[0.0, 1.0], [2.0, 3.0]]}}
            ]
        });

        let paths = boundary_paths(&document);
        assert_eq!(paths.len(), 1);
    }
}
