//! Business logic services.

#![allow(missing_docs)]

pub mod account;
pub mod announcement;
pub mod booking;
pub mod catalog;
pub mod dashboard;
pub mod donation;
pub mod holiday;
pub mod member;
pub mod member_intake;
pub mod message;
pub mod payment;

pub use account::{
    AccountService, ChangePasswordInput, CreateAccountInput, PasswordChanged, SignInInput,
    SignInResult, UpdateProfileInput,
};
pub use announcement::{AnnouncementInput, AnnouncementService};
pub use booking::{BookingInput, BookingService};
pub use catalog::{CatalogService, ServiceInput};
pub use dashboard::DashboardService;
pub use donation::{DonationInput, DonationService};
pub use holiday::{HolidayInput, HolidayService};
pub use member::{CreateMemberInput, MemberService};
pub use member_intake::{IntakeOutcome, IntakeStep, IntakeView, MemberIntakeService};
pub use message::{MessageInput, MessageService, ReplyInput};
pub use payment::{PaymentInput, PaymentService};
