//! Clock and time zone adapter.
//!
//! [`Clock`] abstracts "now" so handlers can be tested against fixed
//! instants. [`ZonedClock`] layers a named IANA zone on top and owns the
//! display format shared by both endpoints.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::ServiceError;

/// Zone used when none is configured.
pub const DEFAULT_TIME_ZONE: &str = "America/Toronto";

/// Source of the current instant.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current UTC instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A [`Clock`] paired with the named zone timestamps are rendered in.
///
/// The zone name is resolved on every call rather than at construction,
/// so an unknown zone fails individual requests instead of startup.
#[derive(Debug, Clone)]
pub struct ZonedClock {
    clock: Arc<dyn Clock>,
    zone_name: String,
}

impl ZonedClock {
    /// Creates a zoned clock for the given IANA zone name.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, zone_name: impl Into<String>) -> Self {
        Self {
            clock,
            zone_name: zone_name.into(),
        }
    }

    /// The configured zone name.
    #[must_use]
    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    /// Loads the configured zone from the compiled-in tz database.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::TimeZoneResolution`] if the name is not a
    /// known IANA zone.
    pub fn zone(&self) -> Result<Tz, ServiceError> {
        self.zone_name
            .parse::<Tz>()
            .map_err(|e| ServiceError::TimeZoneResolution(format!("{}: {e}", self.zone_name)))
    }

    /// Current instant in the configured zone.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::TimeZoneResolution`] if the zone cannot be
    /// loaded.
    pub fn now(&self) -> Result<DateTime<Tz>, ServiceError> {
        let zone = self.zone()?;
        Ok(self.clock.now().with_timezone(&zone))
    }

    /// Renders an instant as `YYYY-MM-DD HH:MM:SS <abbrev> (<City> Time)`.
    ///
    /// The instant is converted into `zone` first, so the abbreviation
    /// reflects daylight saving at that instant (`EDT` vs `EST`).
    #[must_use]
    pub fn format(&self, instant: DateTime<Utc>, zone: Tz) -> String {
        format!(
            "{} ({} Time)",
            instant.with_timezone(&zone).format("%Y-%m-%d %H:%M:%S %Z"),
            city_label(&self.zone_name)
        )
    }
}

/// `"America/Toronto"` -> `"Toronto"`, `"America/New_York"` -> `"New York"`.
fn city_label(zone_name: &str) -> String {
    zone_name
        .rsplit('/')
        .next()
        .unwrap_or(zone_name)
        .replace('_', " ")
}
