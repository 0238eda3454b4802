//! Per-feature marker rendering: classification plus popup binding.

use chrono::{TimeZone, Utc};

use crate::core::classify::{color_for, size_for};
use crate::domain::model::{CircleMarker, EventLayer, FeatureCollection, GeoFeature};

const STROKE_COLOR: &str = "black";
const STROKE_WEIGHT: f64 = 0.6;
const STROKE_OPACITY: f64 = 0.8;
const FILL_OPACITY: f64 = 1.0;

const POPUP_TIME_FORMAT: &str = "%d-%b-%Y at %H:%M";

/// Build the event overlay. One marker per feature, feed order preserved.
/// A missing magnitude is a recoverable data-quality issue (lowest tier,
/// zero radius); a feature without point geometry is skipped and counted.
pub fn build_event_layer(collection: &FeatureCollection) -> EventLayer {
    let mut layer = EventLayer::default();

    for feature in &collection.features {
        let Some((lat, lon)) = feature.position() else {
            layer.skipped += 1;
            tracing::warn!(
                "Skipping feature without point geometry (place: {:?})",
                feature.properties.place
            );
            continue;
        };

        let magnitude = feature.properties.mag.unwrap_or(0.0);
        layer.markers.push(CircleMarker {
            lat,
            lon,
            radius: size_for(magnitude),
            fill_color: color_for(magnitude),
            stroke_color: STROKE_COLOR,
            stroke_weight: STROKE_WEIGHT,
            stroke_opacity: STROKE_OPACITY,
            fill_opacity: FILL_OPACITY,
            popup: popup_text(feature),
        });
    }

    layer
}

/// Three fixed lines: place, timestamp, magnitude. Timestamps are epoch
/// milliseconds formatted in UTC on a 24-hour clock.
fn popup_text(feature: &GeoFeature) -> String {
    let place = feature.properties.place.as_deref().unwrap_or("unknown");

    let when = feature
        .properties
        .time
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|t| t.format(POPUP_TIME_FORMAT).to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let magnitude = feature
        .properties
        .mag
        .map(|m| m.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "Place: {}\nDate and Time: {}\nMagnitude: {}",
        place, when, magnitude
    )
}
