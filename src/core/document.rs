//! Renders a composed [`MapView`] into a self-contained Leaflet HTML
//! document. The emitted page is the map widget collaborator: tile
//! layers, circle markers, popups, the layer control, and the legend all
//! become Leaflet calls against the named container element.

use crate::core::layers::{BOUNDARIES_OVERLAY_NAME, EVENTS_OVERLAY_NAME};
use crate::core::legend::LEGEND_TITLE;
use crate::domain::model::{LegendEntry, MapView, TileSource};
use crate::utils::error::Result;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const STYLE_BLOCK: &str = "<style>
  html, body { height: 100%; margin: 0; }
  #map { height: 100%; }
  .info.legend { background: #fff; padding: 6px 10px; border-radius: 4px; box-shadow: 0 0 8px rgba(0,0,0,0.25); }
  .info.legend h5 { margin: 0 0 4px 0; }
  .info.legend ul { margin: 0; padding: 0; list-style: none; }
  .info.legend li { padding: 2px 6px; }
</style>
";

pub fn render_document(view: &MapView) -> Result<String> {
    let mut page = String::with_capacity(64 * 1024);

    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<title>Earthquake Map</title>\n");
    page.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        LEAFLET_CSS
    ));
    page.push_str(&format!("<script src=\"{}\"></script>\n", LEAFLET_JS));
    page.push_str(STYLE_BLOCK);
    page.push_str("</head>\n<body>\n");
    page.push_str(&format!(
        "<div id=\"{}\"></div>\n",
        html_escape(&view.container_id)
    ));
    page.push_str("<script>\n");

    render_base_layers(&mut page, &view.base_layers)?;
    page.push_str(&format!(
        "var map = L.map({}, {{center: [{}, {}], zoom: {}, layers: [base{}]}});\n",
        js_string(&view.container_id)?,
        view.center.0,
        view.center.1,
        view.zoom,
        view.active_base
    ));
    page.push_str("var overlays = {};\n");
    render_event_overlay(&mut page, view)?;
    render_boundary_overlay(&mut page, view)?;
    page.push_str("L.control.layers(baseLayers, overlays, {collapsed: false}).addTo(map);\n");
    render_legend(&mut page, &view.legend)?;

    page.push_str("</script>\n</body>\n</html>\n");
    Ok(page)
}

fn render_base_layers(page: &mut String, sources: &[TileSource]) -> Result<()> {
    page.push_str("var baseLayers = {};\n");
    for (i, source) in sources.iter().enumerate() {
        let mut opts = format!("attribution: {}", js_string(source.attribution)?);
        if let Some(max_zoom) = source.max_zoom {
            opts.push_str(&format!(", maxZoom: {}", max_zoom));
        }
        if let Some(subdomains) = source.subdomains {
            opts.push_str(&format!(", subdomains: {}", js_string(subdomains)?));
        }
        if let Some(ext) = source.ext {
            opts.push_str(&format!(", ext: {}", js_string(ext)?));
        }
        page.push_str(&format!(
            "var base{} = L.tileLayer({}, {{{}}});\n",
            i,
            js_string(source.url_template)?,
            opts
        ));
        page.push_str(&format!(
            "baseLayers[{}] = base{};\n",
            js_string(source.name)?,
            i
        ));
    }
    Ok(())
}

fn render_event_overlay(page: &mut String, view: &MapView) -> Result<()> {
    let Some(events) = &view.events else {
        return Ok(());
    };

    page.push_str("var earthquakes = L.layerGroup();\n");
    for marker in &events.markers {
        page.push_str(&format!(
            "L.circleMarker([{}, {}], {{radius: {}, fillColor: {}, color: {}, weight: {}, \
             opacity: {}, fillOpacity: {}}}).bindPopup({}).addTo(earthquakes);\n",
            marker.lat,
            marker.lon,
            marker.radius,
            js_string(marker.fill_color)?,
            js_string(marker.stroke_color)?,
            marker.stroke_weight,
            marker.stroke_opacity,
            marker.fill_opacity,
            js_string(&popup_html(&marker.popup))?
        ));
    }
    page.push_str(&format!(
        "overlays[{}] = earthquakes;\nearthquakes.addTo(map);\n",
        js_string(EVENTS_OVERLAY_NAME)?
    ));
    Ok(())
}

fn render_boundary_overlay(page: &mut String, view: &MapView) -> Result<()> {
    let Some(boundaries) = &view.boundaries else {
        return Ok(());
    };

    page.push_str("var faultLines = L.layerGroup();\n");
    for path in &boundaries.paths {
        let vertices: Vec<String> = path
            .iter()
            .map(|(lat, lon)| format!("[{}, {}]", lat, lon))
            .collect();
        page.push_str(&format!(
            "L.polyline([{}], {{color: {}}}).addTo(faultLines);\n",
            vertices.join(", "),
            js_string(boundaries.color)?
        ));
    }
    page.push_str(&format!(
        "overlays[{}] = faultLines;\nfaultLines.addTo(map);\n",
        js_string(BOUNDARIES_OVERLAY_NAME)?
    ));
    Ok(())
}

fn render_legend(page: &mut String, entries: &[LegendEntry]) -> Result<()> {
    let mut inner = format!("<h5>{}</h5><ul>", LEGEND_TITLE);
    for entry in entries {
        let label = match entry.upper {
            Some(upper) => format!("{}&ndash;{}", entry.lower, upper),
            None => format!("{}+", entry.lower),
        };
        inner.push_str(&format!(
            "<li style=\"background-color:{}\"><span>{}</span></li>",
            entry.color, label
        ));
    }
    inner.push_str("</ul>");

    page.push_str("var legend = L.control({position: \"bottomright\"});\n");
    page.push_str("legend.onAdd = function() {\n");
    page.push_str("  var div = L.DomUtil.create(\"div\", \"info legend\");\n");
    page.push_str(&format!("  div.innerHTML = {};\n", js_string(&inner)?));
    page.push_str("  return div;\n};\nlegend.addTo(map);\n");
    Ok(())
}

/// Popup text is stored as plain lines; the widget wants HTML with bold
/// labels. User-controlled values (place names) are escaped.
fn popup_html(popup: &str) -> String {
    popup
        .lines()
        .map(|line| match line.split_once(": ") {
            Some((label, value)) => {
                format!("<strong>{}: </strong>{}", label, html_escape(value))
            }
            None => html_escape(line),
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Quote a string for embedding in the emitted script. JSON string syntax
/// is valid JavaScript, so serde_json does the escaping.
fn js_string(text: &str) -> Result<String> {
    Ok(serde_json::to_string(text)?)
}
