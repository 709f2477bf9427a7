//! Overpass QL rendering for bounding searches.

use tsudoi_core::models::LatLng;
use tsudoi_core::rules::{TagMatch, TagSelector};

/// Render a complete Overpass QL query: a union of node/way/relation
/// `around:` clauses, one per selector, with `out center;` so area
/// features carry a representative coordinate.
pub fn build_query(
    center: LatLng,
    radius_m: u32,
    selectors: &[TagSelector],
    timeout_secs: u64,
) -> String {
    let mut query = format!("[out:json][timeout:{}];\n(\n", timeout_secs);

    for selector in selectors {
        let filter = render_filter(selector);
        for element in ["node", "way", "relation"] {
            query.push_str(&format!(
                "  {}(around:{},{},{}){};\n",
                element, radius_m, center.lat, center.lon, filter
            ));
        }
    }

    query.push_str(");\nout center;\n");
    query
}

/// Render one tag selector as an Overpass tag filter.
fn render_filter(selector: &TagSelector) -> String {
    match &selector.value {
        TagMatch::Present => format!("[\"{}\"]", selector.key),
        TagMatch::Equals(value) => format!("[\"{}\"=\"{}\"]", selector.key, value),
        TagMatch::OneOf(values) => {
            format!("[\"{}\"~\"^({})$\"]", selector.key, values.join("|"))
        }
    }
}
