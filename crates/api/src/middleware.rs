//! API middleware and shared state.

#![allow(missing_docs)]

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use parish_core::{
    AccountService, AnnouncementService, BookingService, CatalogService, DashboardService,
    DonationService, HolidayService, MemberIntakeService, MemberService, MessageService,
    PaymentService,
};
use parish_db::repositories::{
    AdminUserRepository, AnnouncementRepository, BookingRepository, DonationRepository,
    HolidayRepository, MemberRepository, MessageRepository, PaymentRepository, ServiceRepository,
};
use sea_orm::DatabaseConnection;
use tracing::debug;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub announcement_service: AnnouncementService,
    pub member_service: MemberService,
    pub member_intake_service: MemberIntakeService,
    pub booking_service: BookingService,
    pub donation_service: DonationService,
    pub payment_service: PaymentService,
    pub holiday_service: HolidayService,
    pub catalog_service: CatalogService,
    pub message_service: MessageService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    /// Wire every repository and service onto one connection pool.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let account_repo = AdminUserRepository::new(Arc::clone(&db));
        let announcement_repo = AnnouncementRepository::new(Arc::clone(&db));
        let member_repo = MemberRepository::new(Arc::clone(&db));
        let booking_repo = BookingRepository::new(Arc::clone(&db));
        let donation_repo = DonationRepository::new(Arc::clone(&db));
        let payment_repo = PaymentRepository::new(Arc::clone(&db));
        let holiday_repo = HolidayRepository::new(Arc::clone(&db));
        let service_repo = ServiceRepository::new(Arc::clone(&db));
        let message_repo = MessageRepository::new(db);

        let dashboard_service = DashboardService::new(
            announcement_repo.clone(),
            member_repo.clone(),
            booking_repo.clone(),
            donation_repo.clone(),
            payment_repo.clone(),
            holiday_repo.clone(),
            service_repo.clone(),
            message_repo.clone(),
        );
        let member_service = MemberService::new(member_repo);

        Self {
            account_service: AccountService::new(account_repo),
            announcement_service: AnnouncementService::new(announcement_repo),
            member_intake_service: MemberIntakeService::new(member_service.clone()),
            member_service,
            booking_service: BookingService::new(booking_repo),
            donation_service: DonationService::new(donation_repo),
            payment_service: PaymentService::new(payment_repo),
            holiday_service: HolidayService::new(holiday_repo),
            catalog_service: CatalogService::new(service_repo),
            message_service: MessageService::new(message_repo),
            dashboard_service,
        }
    }
}

/// Authentication middleware.
///
/// Attaches the account owning the bearer token to the request. Requests
/// without a valid token pass through unauthenticated; the extractors decide.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    if let Some(token) = token {
        match state.account_service.authenticate_by_token(&token).await {
            Ok(account) => {
                req.extensions_mut().insert(account);
            }
            Err(e) => debug!(error = %e, "Bearer token rejected"),
        }
    }

    next.run(req).await
}
