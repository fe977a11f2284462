use tracing::info;

use crate::domain::weather::LocationRecord;

/// Active location plus the country code used to bias searches.
///
/// Each location change bumps a generation counter; fetch results tagged
/// with an older generation belong to a location that is no longer shown.
#[derive(Debug, Clone, Default)]
pub struct LocationSession {
    active: Option<LocationRecord>,
    country_code: Option<String>,
    generation: u64,
}

impl LocationSession {
    #[must_use]
    pub fn new(country_code: Option<String>) -> Self {
        Self {
            active: None,
            country_code: country_code.map(|code| code.to_ascii_lowercase()),
            generation: 0,
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&LocationRecord> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Replaces the active location and returns the new generation.
    pub fn set_location(&mut self, location: LocationRecord) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        info!(
            name = %location.display_name,
            provenance = location.provenance.label(),
            generation = self.generation,
            "location changed"
        );
        self.active = Some(location);
        self.generation
    }

    #[must_use]
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    /// Keeps an explicitly configured code over a detected one.
    pub fn remember_detected_country(&mut self, code: &str) {
        if self.country_code.is_none() && !code.trim().is_empty() {
            self.country_code = Some(code.trim().to_ascii_lowercase());
        }
    }
}
