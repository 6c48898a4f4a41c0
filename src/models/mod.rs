pub mod booking;
pub mod event;
pub mod user;

pub use booking::{Booking, BookingHistoryEntry};
pub use event::{Event, EventAnalytics};
pub use user::User;
