//! Database entities module

pub mod reservation;
pub mod room;
pub mod user;

pub use reservation::Entity as Reservation;
pub use room::Entity as Room;
pub use user::Entity as User;
