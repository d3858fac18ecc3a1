//! Configuration schema definitions.
//!
//! This module defines the configuration table for innkeep: the file backing
//! each record type, the currency symbol used on bills, the expiry grace
//! period and the service charge.

use serde::{Deserialize, Serialize};

use crate::record::RecordKind;

/// Default currency symbol printed on bills.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "S$";

/// Default number of hours after check-in time before a reservation expires.
pub const DEFAULT_EXPIRY_GRACE_HOURS: u32 = 1;

/// Default service charge, in percent of the room and room-service totals.
pub const DEFAULT_SERVICE_CHARGE_PERCENT: u32 = 7;

/// Complete configuration structure.
///
/// Every field is optional so that configuration layers (built-in defaults,
/// `config.yaml`, environment, programmatic overrides) can be merged. The
/// accessor methods resolve unset fields to the built-in defaults.
///
/// # Examples
///
/// ```
/// use innkeep::config::Config;
/// use innkeep::record::RecordKind;
///
/// let config = Config {
///     currency_symbol: Some("EUR".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(config.currency_symbol(), "EUR");
/// assert_eq!(config.expiry_grace_hours(), 1);
/// assert_eq!(config.file_for(RecordKind::Room), "room.txt");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Filenames of the per-type record files.
    pub files: Option<FilesConfig>,

    /// Currency symbol used when printing amounts.
    pub currency_symbol: Option<String>,

    /// Hours after the check-in time before an unclaimed reservation expires.
    pub expiry_grace_hours: Option<u32>,

    /// Service charge in percent.
    pub service_charge_percent: Option<u32>,
}

impl Config {
    /// A configuration with every field set to its built-in default.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            files: Some(FilesConfig::with_defaults()),
            currency_symbol: Some(DEFAULT_CURRENCY_SYMBOL.to_string()),
            expiry_grace_hours: Some(DEFAULT_EXPIRY_GRACE_HOURS),
            service_charge_percent: Some(DEFAULT_SERVICE_CHARGE_PERCENT),
        }
    }

    /// The filename backing records of `kind`.
    #[must_use]
    pub fn file_for(&self, kind: RecordKind) -> &str {
        self.files
            .as_ref()
            .and_then(|files| files.get(kind))
            .unwrap_or_else(|| FilesConfig::default_for(kind))
    }

    /// The currency symbol.
    #[must_use]
    pub fn currency_symbol(&self) -> &str {
        self.currency_symbol
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }

    /// The expiry grace period in hours.
    #[must_use]
    pub fn expiry_grace_hours(&self) -> u32 {
        self.expiry_grace_hours
            .unwrap_or(DEFAULT_EXPIRY_GRACE_HOURS)
    }

    /// The service charge in percent.
    #[must_use]
    pub fn service_charge_percent(&self) -> u32 {
        self.service_charge_percent
            .unwrap_or(DEFAULT_SERVICE_CHARGE_PERCENT)
    }
}

/// Filenames of the record files, relative to the data directory.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
    /// Guest records.
    pub guest: Option<String>,
    /// Room records.
    pub room: Option<String>,
    /// Reservation records.
    pub reservation: Option<String>,
    /// Menu item records.
    pub menu_item: Option<String>,
    /// Ordered menu item records.
    pub order_menu_item: Option<String>,
    /// Room service order records.
    pub room_service: Option<String>,
}

impl FilesConfig {
    /// The built-in filename table.
    #[must_use]
    pub fn with_defaults() -> Self {
        let default = |kind| Some(Self::default_for(kind).to_string());
        Self {
            guest: default(RecordKind::Guest),
            room: default(RecordKind::Room),
            reservation: default(RecordKind::Reservation),
            menu_item: default(RecordKind::MenuItem),
            order_menu_item: default(RecordKind::OrderMenuItem),
            room_service: default(RecordKind::RoomService),
        }
    }

    /// The built-in filename for `kind`.
    #[must_use]
    pub const fn default_for(kind: RecordKind) -> &'static str {
        match kind {
            RecordKind::Guest => "guest.txt",
            RecordKind::Room => "room.txt",
            RecordKind::Reservation => "reservation.txt",
            RecordKind::MenuItem => "menuitem.txt",
            RecordKind::OrderMenuItem => "omenuitem.txt",
            RecordKind::RoomService => "roomservice.txt",
        }
    }

    /// The configured filename for `kind`, if set.
    #[must_use]
    pub fn get(&self, kind: RecordKind) -> Option<&str> {
        self.slot(kind).as_deref()
    }

    /// Mutable access to the filename slot for `kind`.
    pub fn slot_mut(&mut self, kind: RecordKind) -> &mut Option<String> {
        match kind {
            RecordKind::Guest => &mut self.guest,
            RecordKind::Room => &mut self.room,
            RecordKind::Reservation => &mut self.reservation,
            RecordKind::MenuItem => &mut self.menu_item,
            RecordKind::OrderMenuItem => &mut self.order_menu_item,
            RecordKind::RoomService => &mut self.room_service,
        }
    }

    fn slot(&self, kind: RecordKind) -> &Option<String> {
        match kind {
            RecordKind::Guest => &self.guest,
            RecordKind::Room => &self.room,
            RecordKind::Reservation => &self.reservation,
            RecordKind::MenuItem => &self.menu_item,
            RecordKind::OrderMenuItem => &self.order_menu_item,
            RecordKind::RoomService => &self.room_service,
        }
    }
}
