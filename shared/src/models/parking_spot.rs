//! Parking Spot Model
//!
//! Occupancy is never stored: a spot is occupied iff an open reservation
//! references it. [`SpotWithStatus`] carries the derived flag for views.

use serde::{Deserialize, Serialize};

/// Parking spot with derived occupancy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SpotWithStatus {
    pub id: i64,
    pub lot_id: i64,
    pub spot_number: String,
    /// true iff an open reservation references this spot
    pub is_occupied: bool,
    pub created_at: i64,
}

/// Human-readable spot label: first three characters of the lot name,
/// upper-cased, plus a zero-padded index ("Lakeview", 1 → "LAK-001").
pub fn spot_label(lot_name: &str, index: i64) -> String {
    let prefix: String = lot_name.chars().take(3).collect::<String>().to_uppercase();
    format!("{}-{:03}", prefix, index)
}
