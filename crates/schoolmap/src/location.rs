//! Device-side collaborators: position fetch, reverse geocoding, photo picking.
//!
//! The core only defines what it needs from them. Platform glue implements
//! these traits.

use crate::model::Coordinates;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    Unavailable(String),

    #[error("Location request timed out")]
    Timeout,
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask for foreground permission and fetch one position.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse(&self, coords: Coordinates) -> Result<Place, LocationError>;
}

#[async_trait]
pub trait PhotoPicker: Send + Sync {
    /// Returns a local resource reference, or None if the user cancelled.
    async fn pick_image(&self) -> Option<String>;
}

/// Reverse-geocoding result. Any part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Place {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl Place {
    /// Non-empty parts joined with ", ", most specific first.
    pub fn formatted(&self) -> String {
        [
            &self.name,
            &self.street,
            &self.city,
            &self.region,
            &self.country,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Address used when reverse geocoding gives nothing: "lat, lon" to 4 places.
pub fn fallback_address(coords: Coordinates) -> String {
    format!("{:.4}, {:.4}", coords.latitude(), coords.longitude())
}

/// Resolve a display address, falling back to numeric coordinates on any
/// failure, on timeout, or when the geocoder returns nothing usable.
pub async fn resolve_address<G>(geocoder: &G, coords: Coordinates, timeout: Duration) -> String
where
    G: Geocoder + ?Sized,
{
    let result = match tokio::time::timeout(timeout, geocoder.reverse(coords)).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout),
    };

    match result {
        Ok(place) => {
            let formatted = place.formatted();
            // An all-empty place counts as a failed lookup: a resolved
            // address is never blank.
            if formatted.is_empty() {
                debug!("Geocoder returned an empty place, using coordinates");
                fallback_address(coords)
            } else {
                formatted
            }
        }
        Err(e) => {
            debug!(error = %e, "Reverse geocoding failed, using coordinates");
            fallback_address(coords)
        }
    }
}
