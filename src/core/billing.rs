//! Billing rules
//!
//! Elapsed parking time is quantized into whole billing segments by rounding
//! up to the configured unit, and each segment costs a fixed share of the
//! hourly rate.
//!
//! # Quantization
//!
//! - `segments(0) = 0`
//! - `segments(d) = ceil(d / unit)` for `d > 0`
//! - `segments(unit) = 1` exactly
//!
//! # Pricing
//!
//! `charge = segments × hourly_rate × unit / 1h`, rounded to cents. With the
//! defaults (10.00 per hour, 15 minute unit) every segment costs 2.50.

use crate::types::Settlement;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::time::Duration;

const SECONDS_PER_HOUR: i64 = 3600;

/// Billing configuration
///
/// Controls the flat hourly rate and the duration unit time is rounded up to.
#[derive(Clone, Debug, PartialEq)]
pub struct BillingConfig {
    /// Charge for one hour of parking
    pub hourly_rate: Decimal,
    /// Length of one billing segment
    pub billing_unit: Duration,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            hourly_rate: Decimal::new(10, 0),
            billing_unit: Duration::from_secs(15 * 60),
        }
    }
}

impl BillingConfig {
    /// Create a new BillingConfig with custom values
    ///
    /// A negative rate or a zero-length unit is replaced by the default value.
    pub fn new(hourly_rate: Decimal, billing_unit: Duration) -> Self {
        let default = Self::default();

        let hourly_rate = if hourly_rate.is_sign_negative() {
            tracing::warn!(
                %hourly_rate,
                default = %default.hourly_rate,
                "invalid hourly rate, using default"
            );
            default.hourly_rate
        } else {
            hourly_rate
        };

        let billing_unit = if billing_unit.is_zero() {
            tracing::warn!(
                default_secs = default.billing_unit.as_secs(),
                "invalid billing unit, using default"
            );
            default.billing_unit
        } else {
            billing_unit
        };

        Self {
            hourly_rate,
            billing_unit,
        }
    }

    /// Number of whole billing segments in `parked`, rounding up
    pub fn segments(&self, parked: Duration) -> u64 {
        let unit = self.billing_unit.as_nanos().max(1);
        let segments = parked.as_nanos().div_ceil(unit);
        u64::try_from(segments).unwrap_or(u64::MAX)
    }

    /// Charge for a single billing segment
    pub fn charge_per_segment(&self) -> Decimal {
        let unit = Decimal::from(self.billing_unit.as_secs())
            + Decimal::new(i64::from(self.billing_unit.subsec_nanos()), 9);
        self.hourly_rate.saturating_mul(unit) / Decimal::from(SECONDS_PER_HOUR)
    }

    /// Charge for `parked`, rounded to two decimal places
    pub fn charge(&self, parked: Duration) -> Decimal {
        let segments = self.segments(parked);
        Decimal::from(segments)
            .saturating_mul(self.charge_per_segment())
            .round_dp(2)
    }

    /// Fix the final duration and charge for a ticket leaving at `now`
    pub fn settle(&self, entry_time: DateTime<Utc>, now: DateTime<Utc>) -> Settlement {
        let parked_duration = elapsed(entry_time, now);
        Settlement {
            parked_duration,
            charge: self.charge(parked_duration),
        }
    }
}

/// Time from `entry_time` to `now`, clamped to zero if `now` is earlier
pub fn elapsed(entry_time: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - entry_time).to_std().unwrap_or(Duration::ZERO)
}
