use async_trait::async_trait;
use schoolmap::location::{Geocoder, LocationError, LocationProvider, Place};
use schoolmap::{Category, Coordinates, School};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn coords(lat: f64, lon: f64) -> Coordinates {
    Coordinates::new(lat, lon).unwrap()
}

pub fn school(id: &str, name: &str, category: Category, lat: f64, lon: f64) -> School {
    School::with_id(id, name, category, coords(lat, lon))
}

/// Location provider that either refuses permission or reports a fixed point.
pub struct FakeLocation {
    pub position: Option<Coordinates>,
}

#[async_trait]
impl LocationProvider for FakeLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.position.ok_or(LocationError::PermissionDenied)
    }
}

/// Geocoder that counts calls and fails when `place` is None.
#[derive(Default)]
pub struct FakeGeocoder {
    pub place: Option<Place>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn reverse(&self, _coords: Coordinates) -> Result<Place, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.place
            .clone()
            .ok_or_else(|| LocationError::Unavailable("geocoder offline".into()))
    }
}
