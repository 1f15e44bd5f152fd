//! # Add flow
//!
//! A [`SchoolDraft`] collects form input until it can become a [`School`].
//!
//! Rules at submission:
//! - the trimmed name must be non-empty and coordinates must be captured,
//!   otherwise nothing is created;
//! - website and phone are trimmed, and blank values are dropped;
//! - an address that was never resolved is stored as `""`;
//! - the id is generated here, never by the collection.
//!
//! Coordinates come from the device ([`SchoolDraft::capture_current_location`])
//! or from a map tap ([`SchoolDraft::pick_on_map`]). A permission refusal
//! leaves the draft usable but unsubmittable.

use crate::collection::CollectionManager;
use crate::error::{DirectoryError, Result};
use crate::location::{self, Geocoder, LocationError, LocationProvider, PhotoPicker};
use crate::model::{Category, Coordinates, School, SchoolId};
use crate::store::SaveHandle;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchoolDraft {
    pub name: String,
    pub website: String,
    pub phone: String,
    pub category: Category,
    coordinates: Option<Coordinates>,
    address: Option<String>,
    photo_uri: Option<String>,
}

impl SchoolDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn photo_uri(&self) -> Option<&str> {
        self.photo_uri.as_deref()
    }

    /// Fetch the device position. On error the coordinates are left as they were.
    pub async fn capture_current_location<P>(
        &mut self,
        provider: &P,
    ) -> std::result::Result<Coordinates, LocationError>
    where
        P: LocationProvider + ?Sized,
    {
        match provider.current_position().await {
            Ok(coords) => {
                self.set_coordinates(coords);
                Ok(coords)
            }
            Err(e) => {
                info!(error = %e, "Could not capture current location");
                Err(e)
            }
        }
    }

    /// Use a point chosen on the map.
    pub fn pick_on_map(&mut self, coords: Coordinates) {
        self.set_coordinates(coords);
    }

    /// Reverse-geocode the captured coordinates into the draft's address.
    /// Does nothing until coordinates are set.
    pub async fn resolve_address<G>(&mut self, geocoder: &G, timeout: Duration)
    where
        G: Geocoder + ?Sized,
    {
        if let Some(coords) = self.coordinates {
            self.address = Some(location::resolve_address(geocoder, coords, timeout).await);
        }
    }

    /// Returns true if a photo was attached.
    pub async fn attach_photo<P>(&mut self, picker: &P) -> bool
    where
        P: PhotoPicker + ?Sized,
    {
        match picker.pick_image().await {
            Some(uri) => {
                self.photo_uri = Some(uri);
                true
            }
            None => false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.coordinates.is_none() {
            return Err(DirectoryError::Validation(
                "Please enter name and select location.".to_string(),
            ));
        }
        Ok(())
    }

    /// Turn the draft into a school with a fresh id.
    pub fn build(&self) -> Result<School> {
        self.validate()?;
        let location = self
            .coordinates
            .ok_or_else(|| DirectoryError::Validation("Location is required".to_string()))?;

        Ok(School {
            id: SchoolId::generate(),
            name: self.name.trim().to_string(),
            category: self.category,
            location,
            address: Some(self.address.clone().unwrap_or_default()),
            photo_uri: self.photo_uri.clone(),
            website: non_blank(&self.website),
            phone: non_blank(&self.phone),
        })
    }

    /// Build the school and add it to the collection.
    pub fn submit(&self, collection: &mut CollectionManager) -> Result<(School, SaveHandle)> {
        let school = self.build()?;
        debug!(id = %school.id, "Submitting new school");
        let handle = collection.add_school(school.clone());
        Ok((school, handle))
    }

    fn set_coordinates(&mut self, coords: Coordinates) {
        if self.coordinates != Some(coords) {
            // A stale address would describe the previous point.
            self.address = None;
        }
        self.coordinates = Some(coords);
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
