//! Overpass adapter for the Tsudoi POI source port
//!
//! Talks to the Overpass API (OpenStreetMap) over HTTP, trying each
//! configured mirror in order until one answers.

pub mod query;
pub mod response;
pub mod source;

pub use source::OverpassSource;
