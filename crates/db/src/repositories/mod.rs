//! Repositories for database access.

mod admin_user;
mod announcement;
mod booking;
mod donation;
mod holiday;
mod member;
mod message;
mod payment;
mod service;

pub use admin_user::AdminUserRepository;
pub use announcement::AnnouncementRepository;
pub use booking::BookingRepository;
pub use donation::DonationRepository;
pub use holiday::HolidayRepository;
pub use member::MemberRepository;
pub use message::MessageRepository;
pub use payment::PaymentRepository;
pub use service::ServiceRepository;
