//! View composition: background catalog, overlays, and the layer control.

use crate::core::legend::build_legend;
use crate::core::markers::build_event_layer;
use crate::domain::model::{
    BoundaryLayer, BoundarySet, EventLayer, MapView, RetrievedFeeds, TileSource,
};

/// Display labels of the two thematic overlays in the layer control.
pub const EVENTS_OVERLAY_NAME: &str = "Earthquakes";
pub const BOUNDARIES_OVERLAY_NAME: &str = "Fault Lines";

const OSM_ATTRIB: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;
const CARTO_ATTRIB: &str = r#"&copy; <a href="http://openstreetmap.org">OpenStreetMap</a> &copy; <a href="http://cartodb.com/attributions">CartoDB</a>"#;
const STAMEN_ATTRIB: &str = r#"Map tiles by <a href="http://stamen.com">Stamen Design</a>, <a href="http://creativecommons.org/licenses/by/3.0">CC BY 3.0</a> &mdash; Map data &copy; <a href="http://www.openstreetmap.org/copyright">OpenStreetMap</a>"#;
const TOPO_ATTRIB: &str = r#"Map data: &copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors, <a href="http://viewfinderpanoramas.org">SRTM</a> | Map style: &copy; <a href="https://opentopomap.org">OpenTopoMap</a> (<a href="https://creativecommons.org/licenses/by-sa/3.0/">CC-BY-SA</a>)"#;

/// The four background tile services offered by the layer control. The
/// first entry is the initially active base layer.
pub fn default_tile_sources() -> Vec<TileSource> {
    vec![
        TileSource {
            name: "Satellite",
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            attribution: OSM_ATTRIB,
            max_zoom: None,
            subdomains: None,
            ext: None,
        },
        TileSource {
            name: "Carto DarkMatter",
            url_template: "http://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png",
            attribution: CARTO_ATTRIB,
            max_zoom: None,
            subdomains: None,
            ext: None,
        },
        TileSource {
            name: "Stamen Toner",
            url_template: "http://stamen-tiles-{s}.a.ssl.fastly.net/toner/{z}/{x}/{y}.{ext}",
            attribution: STAMEN_ATTRIB,
            max_zoom: Some(20),
            subdomains: Some("abcd"),
            ext: Some("png"),
        },
        TileSource {
            name: "Topography",
            url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
            attribution: TOPO_ATTRIB,
            max_zoom: Some(17),
            subdomains: None,
            ext: None,
        },
    ]
}

/// Fixed parameters of the composed view, passed explicitly into the
/// pipeline. `Default` carries the catalog the map ships with.
#[derive(Debug, Clone)]
pub struct MapOptions {
    pub container_id: String,
    pub center: (f64, f64),
    pub zoom: u8,
    pub tile_sources: Vec<TileSource>,
    pub boundary_color: &'static str,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            container_id: "map".to_string(),
            center: (32.7824, -96.7974),
            zoom: 5,
            tile_sources: default_tile_sources(),
            boundary_color: "#fda101",
        }
    }
}

/// Assemble the final view: every base layer with exactly the first one
/// active, both thematic overlays when their feed arrived, a
/// non-collapsed layer control, and the magnitude legend. Runs only after
/// both retrievals have settled.
pub fn compose(
    options: &MapOptions,
    events: Option<EventLayer>,
    boundaries: Option<BoundarySet>,
) -> MapView {
    let boundaries = boundaries.map(|set| BoundaryLayer {
        paths: set.paths,
        color: options.boundary_color,
    });

    MapView {
        container_id: options.container_id.clone(),
        center: options.center,
        zoom: options.zoom,
        base_layers: options.tile_sources.clone(),
        active_base: 0,
        events,
        boundaries,
        legend: build_legend(),
        control_collapsed: false,
    }
}

/// Convenience over [`compose`] for the pipeline seam: renders the event
/// layer from the retrieved feeds before assembling.
pub fn compose_from_feeds(options: &MapOptions, feeds: RetrievedFeeds) -> MapView {
    let events = feeds.events.as_ref().map(build_event_layer);
    compose(options, events, feeds.boundaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_with_both_overlays() {
        let options = MapOptions::default();
        let events = EventLayer::default();
        let boundaries = BoundarySet {
            paths: vec![vec![(0.0, 0.0), (1.0, 1.0)]],
        };

        let view = compose(&options, Some(events), Some(boundaries));

        assert_eq!(view.base_layers.len(), 4);
        assert_eq!(view.active_base, 0);
        assert_eq!(view.base_layers[0].name, "Satellite");
        assert!(view.events.is_some());
        assert!(view.boundaries.is_some());
        assert!(!view.control_collapsed);
        assert_eq!(view.center, (32.7824, -96.7974));
        assert_eq!(view.zoom, 5);
        assert_eq!(view.legend.len(), 6);
    }

    #[test]
    fn test_compose_tolerates_absent_overlays() {
        let options = MapOptions::default();

        let view = compose(&options, Some(EventLayer::default()), None);
        assert!(view.events.is_some());
        assert!(view.boundaries.is_none());

        let view = compose(&options, None, None);
        assert!(view.events.is_none());
        assert_eq!(view.base_layers.len(), 4);
        assert_eq!(view.legend.len(), 6);
    }

    #[test]
    fn test_boundary_layer_takes_constant_style() {
        let options = MapOptions::default();
        let boundaries = BoundarySet {
            paths: vec![vec![(10.0, 20.0)]],
        };

        let view = compose(&options, None, Some(boundaries));
        let layer = view.boundaries.expect("boundary layer present");
        assert_eq!(layer.color, "#fda101");
        assert_eq!(layer.paths.len(), 1);
    }
}
