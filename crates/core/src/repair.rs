//! Repair ticket enumerations and field validators.
//!
//! The string values must match the `CHECK` constraints in the
//! `create_repairs` migration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_IN_PROGRESS: &str = "in-progress";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid repair statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

/// Lifecycle status of a repair ticket.
///
/// Transitions are unconstrained: any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepairStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl RepairStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Completed => STATUS_COMPLETED,
            Self::Cancelled => STATUS_CANCELLED,
        }
    }
}

impl FromStr for RepairStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_CANCELLED => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Invalid status: '{other}'. Allowed statuses are: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for RepairStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Device type
// ---------------------------------------------------------------------------

pub const DEVICE_SMARTPHONE: &str = "smartphone";
pub const DEVICE_LAPTOP: &str = "laptop";
pub const DEVICE_TABLET: &str = "tablet";
pub const DEVICE_DESKTOP: &str = "desktop";
pub const DEVICE_SMARTWATCH: &str = "smartwatch";
pub const DEVICE_OTHER: &str = "other";

/// All valid device types.
pub const VALID_DEVICE_TYPES: &[&str] = &[
    DEVICE_SMARTPHONE,
    DEVICE_LAPTOP,
    DEVICE_TABLET,
    DEVICE_DESKTOP,
    DEVICE_SMARTWATCH,
    DEVICE_OTHER,
];

/// Kind of device brought in for repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Smartphone,
    Laptop,
    Tablet,
    Desktop,
    Smartwatch,
    Other,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Smartphone => DEVICE_SMARTPHONE,
            Self::Laptop => DEVICE_LAPTOP,
            Self::Tablet => DEVICE_TABLET,
            Self::Desktop => DEVICE_DESKTOP,
            Self::Smartwatch => DEVICE_SMARTWATCH,
            Self::Other => DEVICE_OTHER,
        }
    }
}

impl FromStr for DeviceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            DEVICE_SMARTPHONE => Ok(Self::Smartphone),
            DEVICE_LAPTOP => Ok(Self::Laptop),
            DEVICE_TABLET => Ok(Self::Tablet),
            DEVICE_DESKTOP => Ok(Self::Desktop),
            DEVICE_SMARTWATCH => Ok(Self::Smartwatch),
            DEVICE_OTHER => Ok(Self::Other),
            other => Err(CoreError::Validation(format!(
                "Invalid device type: '{other}'. Allowed device types are: {}",
                VALID_DEVICE_TYPES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for DeviceType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Validate an estimated cost: finite and non-negative.
pub fn validate_estimated_cost(cost: f64) -> Result<(), CoreError> {
    if !cost.is_finite() {
        return Err(CoreError::Validation(
            "Estimated cost must be a finite number".to_string(),
        ));
    }
    if cost < 0.0 {
        return Err(CoreError::Validation(
            "Estimated cost must not be negative".to_string(),
        ));
    }
    Ok(())
}
