//! Cross-collection overview tiles.

use chrono::{NaiveDate, Utc};
use parish_common::AppResult;
use parish_db::entities::member::{self, MemberStatus};
use parish_db::entities::{
    announcement, booking as booking_entity, donation as donation_entity,
    holiday as holiday_entity, message as message_entity, payment as payment_entity, service,
};
use parish_db::repositories::{
    AnnouncementRepository, BookingRepository, DonationRepository, HolidayRepository,
    MemberRepository, MessageRepository, PaymentRepository, ServiceRepository,
};

use super::{booking, catalog, donation, holiday, message, payment};
use crate::listing::{self, SummaryTile};

/// Service computing the dashboard landing tiles.
#[derive(Clone)]
pub struct DashboardService {
    announcement_repo: AnnouncementRepository,
    member_repo: MemberRepository,
    booking_repo: BookingRepository,
    donation_repo: DonationRepository,
    payment_repo: PaymentRepository,
    holiday_repo: HolidayRepository,
    service_repo: ServiceRepository,
    message_repo: MessageRepository,
}

impl DashboardService {
    /// Create a new dashboard service.
    #[must_use]
    pub const fn new(
        announcement_repo: AnnouncementRepository,
        member_repo: MemberRepository,
        booking_repo: BookingRepository,
        donation_repo: DonationRepository,
        payment_repo: PaymentRepository,
        holiday_repo: HolidayRepository,
        service_repo: ServiceRepository,
        message_repo: MessageRepository,
    ) -> Self {
        Self {
            announcement_repo,
            member_repo,
            booking_repo,
            donation_repo,
            payment_repo,
            holiday_repo,
            service_repo,
            message_repo,
        }
    }

    /// Overview tiles as of today.
    pub async fn overview(&self) -> AppResult<Vec<SummaryTile>> {
        self.overview_on(Utc::now().date_naive()).await
    }

    /// Overview tiles as of `today`.
    pub async fn overview_on(&self, today: NaiveDate) -> AppResult<Vec<SummaryTile>> {
        let (announcements, members, bookings, donations, payments, holidays, services, messages) =
            tokio::try_join!(
                self.announcement_repo.find_all(),
                self.member_repo.find_all(),
                self.booking_repo.find_all(),
                self.donation_repo.find_all(),
                self.payment_repo.find_all(),
                self.holiday_repo.find_all(),
                self.service_repo.find_all(),
                self.message_repo.find_all(),
            )?;

        let snapshot = Snapshot {
            announcements,
            members,
            bookings,
            donations,
            payments,
            holidays,
            services,
            messages,
        };
        Ok(snapshot.tiles(today))
    }
}

/// Every collection, fetched at once.
#[derive(Debug, Default)]
struct Snapshot {
    announcements: Vec<announcement::Model>,
    members: Vec<member::Model>,
    bookings: Vec<booking_entity::Model>,
    donations: Vec<donation_entity::Model>,
    payments: Vec<payment_entity::Model>,
    holidays: Vec<holiday_entity::Model>,
    services: Vec<service::Model>,
    messages: Vec<message_entity::Model>,
}

impl Snapshot {
    fn tiles(&self, today: NaiveDate) -> Vec<SummaryTile> {
        vec![
            SummaryTile::count("announcements", "Announcements", self.announcements.len()),
            SummaryTile::count(
                "upcomingBookings",
                "Upcoming Bookings",
                booking::upcoming(&self.bookings, today),
            ),
            SummaryTile::count(
                "activeMembers",
                "Active Members",
                listing::count_where(&self.members, |m| m.status == MemberStatus::Active),
            ),
            SummaryTile::amount(
                "donationTotal",
                "Total Donations",
                donation::total_amount(&self.donations),
            ),
            SummaryTile::count(
                "pendingPayments",
                "Pending Payments",
                payment::pending(&self.payments),
            ),
            SummaryTile::count(
                "upcomingHolidays",
                "Upcoming Holidays",
                holiday::upcoming(&self.holidays),
            ),
            SummaryTile::count(
                "activeServices",
                "Active Services",
                catalog::active(&self.services),
            ),
            SummaryTile::count(
                "unreadMessages",
                "Unread Messages",
                message::unread(&self.messages),
            ),
        ]
    }
}
