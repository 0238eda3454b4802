use serde::Deserialize;

/// One record of the primary (seismic event) feed, as delivered by the
/// USGS GeoJSON summary endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoFeature {
    #[serde(default)]
    pub properties: FeatureProperties,
    pub geometry: Option<PointGeometry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    pub time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl GeoFeature {
    /// (lat, lon) of the event, when the geometry carries at least
    /// longitude and latitude. GeoJSON orders coordinates [lon, lat, depth].
    pub fn position(&self) -> Option<(f64, f64)> {
        let geometry = self.geometry.as_ref()?;
        match geometry.coordinates.as_slice() {
            [lon, lat, ..] => Some((*lat, *lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<GeoFeature>,
}

/// Boundary polylines from the secondary feed. Only geometry is consumed;
/// each path is a sequence of (lat, lon) vertices.
#[derive(Debug, Clone, Default)]
pub struct BoundarySet {
    pub paths: Vec<Vec<(f64, f64)>>,
}

/// Join result of the two feed retrievals. `None` records a failed
/// retrieval: the corresponding overlay is left off the map.
#[derive(Debug, Default)]
pub struct RetrievedFeeds {
    pub events: Option<FeatureCollection>,
    pub boundaries: Option<BoundarySet>,
}

/// One rendered event: a circle marker with a bound popup.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMarker {
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
    pub fill_color: &'static str,
    pub stroke_color: &'static str,
    pub stroke_weight: f64,
    pub stroke_opacity: f64,
    pub fill_opacity: f64,
    pub popup: String,
}

/// The composite event overlay. Markers keep feed order (draw order);
/// `skipped` counts features excluded for missing geometry.
#[derive(Debug, Clone, Default)]
pub struct EventLayer {
    pub markers: Vec<CircleMarker>,
    pub skipped: usize,
}

/// The boundary overlay: one constant style, no classification.
#[derive(Debug, Clone)]
pub struct BoundaryLayer {
    pub paths: Vec<Vec<(f64, f64)>>,
    pub color: &'static str,
}

/// A background tile service entry for the layer control.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    pub name: &'static str,
    pub url_template: &'static str,
    pub attribution: &'static str,
    pub max_zoom: Option<u8>,
    pub subdomains: Option<&'static str>,
    pub ext: Option<&'static str>,
}

/// One legend row, ascending by magnitude. `upper` is `None` for the
/// open-ended top tier (rendered as `{lower}+`).
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub lower: u32,
    pub upper: Option<u32>,
    pub color: &'static str,
}

/// The assembled interactive view. Written exactly once by composition;
/// overlays are `None` when their feed retrieval failed.
#[derive(Debug, Clone)]
pub struct MapView {
    pub container_id: String,
    pub center: (f64, f64),
    pub zoom: u8,
    pub base_layers: Vec<TileSource>,
    /// Index into `base_layers`; exactly one base is active.
    pub active_base: usize,
    pub events: Option<EventLayer>,
    pub boundaries: Option<BoundaryLayer>,
    pub legend: Vec<LegendEntry>,
    pub control_collapsed: bool,
}
