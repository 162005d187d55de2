//! Domain entities - the core business objects.

mod post;

mod reservation;

mod userinfo;

pub use post::{CampusLocation, Post};
pub use reservation::{Reservation, ReservationStatus};
pub use userinfo::UserInfo;
