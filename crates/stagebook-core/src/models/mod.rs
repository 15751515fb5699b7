pub mod booking;
pub mod submission;
pub mod user;

pub use booking::{Booking, BookingOwner, BookingWithOwner};
pub use submission::SubmissionFields;
pub use user::{PublicUser, User};
