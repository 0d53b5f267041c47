pub mod bookings;
pub mod courts;
pub mod tournaments;
pub mod users;

pub use bookings::Entity as Bookings;
pub use courts::Entity as Courts;
pub use tournaments::Entity as Tournaments;
pub use users::Entity as Users;
