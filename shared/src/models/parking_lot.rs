//! Parking Lot Model

use serde::{Deserialize, Serialize};

/// Parking lot entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ParkingLot {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub total_spots: i64,
    pub created_at: i64,
}

/// Parking lot with derived availability (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LotWithAvailability {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub total_spots: i64,
    /// Spots with no open reservation
    pub available_spots: i64,
    pub created_at: i64,
}

/// Create lot payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotCreate {
    pub name: String,
    pub location: String,
    pub total_spots: i64,
}

/// Update lot payload
///
/// `total_spots` may only grow; new spots are appended after the current
/// count. Shrinking a lot is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub total_spots: Option<i64>,
}
