//! Tsudoi core - weighted meeting-point computation and POI recommendation
//!
//! This crate contains the domain logic: spherical geodesy math, the
//! weighted point store, the centroid engine, the POI recommender, the
//! recommendation cache, and the port definitions adapters implement.

pub mod cache;
pub mod centroid;
pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod ports;
pub mod recommend;
pub mod rules;
pub mod store;

pub use error::{Result, TsudoiError};
