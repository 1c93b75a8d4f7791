//! Database entities.

pub mod admin_user;
pub mod announcement;
pub mod booking;
pub mod donation;
pub mod holiday;
pub mod member;
pub mod message;
pub mod payment;
pub mod service;

pub use admin_user::Entity as AdminUser;
pub use announcement::Entity as Announcement;
pub use booking::Entity as Booking;
pub use donation::Entity as Donation;
pub use holiday::Entity as Holiday;
pub use member::Entity as Member;
pub use message::Entity as Message;
pub use payment::Entity as Payment;
pub use service::Entity as Service;
