//! Postgres repositories for users and bookings.

pub mod db;

pub use db::bookings::BookingRepository;
pub use db::users::UserRepository;
