//! Attraction search module
//!
//! Queries map data for tourism-tagged features near a point and filters
//! out lodging, food and retail noise.

pub mod filter;
pub mod overpass;

use async_trait::async_trait;

use crate::Result;
use crate::models::AttractionList;

pub use filter::{AttractionFilter, Tags};
pub use overpass::OverpassClient;

/// Finds named tourist attractions around coordinates
#[async_trait]
pub trait AttractionFinder: Send + Sync {
    /// At most `limit` names, in the source's order
    async fn find_attractions(
        &self,
        latitude: f64,
        longitude: f64,
        limit: usize,
    ) -> Result<AttractionList>;
}
