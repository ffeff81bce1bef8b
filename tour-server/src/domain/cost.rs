//! Non-negative cost values.
//!
//! Visit costs, travel costs and budgets share one representation: a finite,
//! non-negative `f64`. Because NaN and negative values are rejected at
//! construction, `Cost` can implement a total order.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A finite, non-negative amount (money or travel effort).
///
/// # Examples
///
/// ```
/// use tour_server::domain::Cost;
///
/// let twelve = Cost::new(12.0).unwrap();
/// let budget = Cost::new(100.0).unwrap();
/// assert!(twelve <= budget);
/// assert_eq!(budget.checked_sub(twelve), Some(Cost::new(88.0).unwrap()));
///
/// assert!(Cost::new(-1.0).is_err());
/// assert!(Cost::new(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Cost(f64);

impl Cost {
    /// Zero cost.
    pub const ZERO: Cost = Cost(0.0);

    /// The largest representable cost. Used as "no limit".
    pub const MAX: Cost = Cost(f64::MAX);

    /// Create a cost, rejecting negative and non-finite values.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if value.is_nan() {
            return Err(DomainError::InvalidCost {
                value,
                reason: "must be a number",
            });
        }
        if value.is_infinite() {
            return Err(DomainError::InvalidCost {
                value,
                reason: "must be finite",
            });
        }
        if value < 0.0 {
            return Err(DomainError::InvalidCost {
                value,
                reason: "must not be negative",
            });
        }
        // Normalise -0.0 so equal costs hash and display identically.
        Ok(Cost(value + 0.0))
    }

    /// Returns the raw value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Add two costs, clamping at [`Cost::MAX`].
    pub fn saturating_add(self, other: Cost) -> Cost {
        let sum = self.0 + other.0;
        if sum.is_finite() { Cost(sum) } else { Cost::MAX }
    }

    /// Subtract `other`, returning `None` if the result would be negative.
    pub fn checked_sub(self, other: Cost) -> Option<Cost> {
        if other.0 > self.0 {
            None
        } else {
            Some(Cost(self.0 - other.0))
        }
    }
}

impl TryFrom<f64> for Cost {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cost> for f64 {
    fn from(cost: Cost) -> Self {
        cost.0
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Debug for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cost({})", self.0)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
