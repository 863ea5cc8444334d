//! Reservation Model
//!
//! A reservation is open while `checkout_time` is NULL and closed once set.
//! Cost is computed from the elapsed duration at the flat hourly rate,
//! rounded to two decimal places at each step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::util::MILLIS_PER_HOUR;

/// Flat parking rate per hour
pub const HOURLY_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub spot_id: i64,
    pub vehicle_number: String,
    /// Unix millis
    pub checkin_time: i64,
    /// Unix millis; NULL while the reservation is open
    pub checkout_time: Option<i64>,
}

/// Elapsed duration in hours between two Unix-milli timestamps,
/// rounded to two decimal places.
pub fn duration_hours(checkin_ms: i64, end_ms: i64) -> Decimal {
    let elapsed_ms = (end_ms - checkin_ms).max(0);
    (Decimal::from(elapsed_ms) / Decimal::from(MILLIS_PER_HOUR)).round_dp(2)
}

/// Parking cost at the flat hourly rate, two decimal places.
pub fn parking_cost(checkin_ms: i64, end_ms: i64) -> Decimal {
    (duration_hours(checkin_ms, end_ms) * HOURLY_RATE).round_dp(2)
}

impl Reservation {
    /// 是否仍在停放中
    pub fn is_open(&self) -> bool {
        self.checkout_time.is_none()
    }

    /// Elapsed duration in hours. For an open reservation `now_ms`
    /// supplies the end time.
    pub fn duration_hours(&self, now_ms: i64) -> Decimal {
        duration_hours(self.checkin_time, self.checkout_time.unwrap_or(now_ms))
    }

    /// Parking cost at the flat hourly rate
    pub fn cost(&self, now_ms: i64) -> Decimal {
        parking_cost(self.checkin_time, self.checkout_time.unwrap_or(now_ms))
    }
}

/// Reservation creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationCreate {
    pub spot_id: i64,
    pub vehicle_number: String,
}

/// Reservation joined with spot, lot and user info for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationWithDetails {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub spot_id: i64,
    pub spot_number: String,
    pub lot_name: String,
    pub vehicle_number: String,
    pub checkin_time: i64,
    pub checkout_time: Option<i64>,
}

impl ReservationWithDetails {
    pub fn is_open(&self) -> bool {
        self.checkout_time.is_none()
    }

    pub fn duration_hours(&self, now_ms: i64) -> Decimal {
        duration_hours(self.checkin_time, self.checkout_time.unwrap_or(now_ms))
    }

    pub fn cost(&self, now_ms: i64) -> Decimal {
        parking_cost(self.checkin_time, self.checkout_time.unwrap_or(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn reservation(checkin: i64, checkout: Option<i64>) -> Reservation {
        Reservation {
            id: 1,
            user_id: 1,
            spot_id: 1,
            vehicle_number: "KA-01-AB-1234".to_string(),
            checkin_time: checkin,
            checkout_time: checkout,
        }
    }

    #[test]
    fn test_duration_and_cost_closed() {
        // 2 hours 15 minutes
        let r = reservation(0, Some(2 * MILLIS_PER_HOUR + 15 * 60 * 1000));
        assert_eq!(r.duration_hours(0), Decimal::from_f64(2.25).unwrap());
        assert_eq!(r.cost(0), Decimal::from_f64(11.25).unwrap());
    }

    #[test]
    fn test_duration_open_uses_now() {
        let r = reservation(0, None);
        let now = MILLIS_PER_HOUR / 2;
        assert_eq!(r.duration_hours(now), Decimal::from_f64(0.5).unwrap());
        assert_eq!(r.cost(now), Decimal::from_f64(2.5).unwrap());
        assert!(r.is_open());
    }

    #[test]
    fn test_duration_never_negative() {
        let r = reservation(1000, Some(0));
        assert_eq!(r.duration_hours(0), Decimal::ZERO);
        assert_eq!(r.cost(0), Decimal::ZERO);
    }

    #[test]
    fn test_cost_rounds_to_cents() {
        // 10 minutes -> 0.17 h -> 0.85
        let r = reservation(0, Some(10 * 60 * 1000));
        assert_eq!(r.duration_hours(0), Decimal::from_f64(0.17).unwrap());
        assert_eq!(r.cost(0), Decimal::from_f64(0.85).unwrap());
    }
}
