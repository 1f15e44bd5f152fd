use crate::model::{Coordinates, School};

/// Visible map area: a center plus the span shown in each direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Default for MapRegion {
    /// Almaty, zoomed to a few kilometres.
    fn default() -> Self {
        Self {
            latitude: 43.2078848,
            longitude: 76.6509056,
            latitude_delta: 0.05,
            longitude_delta: 0.05,
        }
    }
}

impl MapRegion {
    pub fn centered_on(self, coords: Coordinates) -> Self {
        Self {
            latitude: coords.latitude(),
            longitude: coords.longitude(),
            ..self
        }
    }
}

/// Center on the most recently added school, keeping the zoom.
pub fn focus_region(base: MapRegion, schools: &[School]) -> MapRegion {
    match schools.last() {
        Some(school) => base.centered_on(school.location),
        None => base,
    }
}
