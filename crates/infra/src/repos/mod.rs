pub mod bookings;
pub mod fields;
pub mod sessions;
pub mod users;

pub use bookings::CreateBooking;
pub use fields::CreateField;
pub use users::CreateUser;
