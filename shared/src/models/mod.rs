//! Data models
//!
//! Entity structs plus their create/update payloads. Database row mapping
//! (`sqlx::FromRow`) is behind the `db` feature so clients can use the same
//! types without pulling in sqlx.

pub mod parking_lot;
pub mod parking_spot;
pub mod reservation;
pub mod user;

pub use parking_lot::{LotCreate, LotUpdate, LotWithAvailability, ParkingLot};
pub use parking_spot::{SpotWithStatus, spot_label};
pub use reservation::{
    HOURLY_RATE, Reservation, ReservationCreate, ReservationWithDetails,
};
pub use user::{User, UserCreate, UserResponse};
