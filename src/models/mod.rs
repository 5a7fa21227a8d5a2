//! Data models for the TourGuide assistant
//!
//! All models are request-scoped values:
//! - Place: geocoded coordinates and display name
//! - Weather: current temperature and rain probability
//! - Attraction: ordered attraction names near a place

pub mod attraction;
pub mod place;
pub mod weather;

// Re-export all public types for convenient access
pub use attraction::AttractionList;
pub use place::ResolvedPlace;
pub use weather::WeatherSnapshot;
