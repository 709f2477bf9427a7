//! Terminal rendering of centroids and recommendation tables.

use console::style;
use tabled::{Table, Tabled};
use tsudoi_core::models::{CentroidPair, RecommendationSet};

#[derive(Tabled)]
struct PoiRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "Location")]
    location: String,
}

pub fn print_centroids(pair: &CentroidPair) {
    println!(
        "{} {}",
        style("Weighted centroid:").bold().red(),
        pair.weighted
    );
    println!(
        "{} {}",
        style("Unweighted centroid:").bold().green(),
        pair.unweighted
    );
}

pub fn print_recommendations(set: &RecommendationSet) {
    if set.is_empty() {
        println!("{}", style("No points of interest found.").dim());
        return;
    }

    for (category, records) in set {
        println!();
        println!("{}", style(category.label()).bold().underlined());

        let rows: Vec<PoiRow> = records
            .iter()
            .map(|r| PoiRow {
                name: r.name.clone(),
                distance: format!("{:.1} km", r.distance_km),
                location: r.location.to_string(),
            })
            .collect();

        println!("{}", Table::new(rows));
    }
}
