//! Member service.

use chrono::{NaiveDate, Utc};
use parish_common::{AppError, AppResult, IdGenerator};
use parish_db::entities::member::{self, MemberStatus, MembershipType};
use parish_db::repositories::MemberRepository;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::listing::{self, Searchable, SummaryTile, non_blank};

/// Service for managing the member register.
#[derive(Clone)]
pub struct MemberService {
    member_repo: MemberRepository,
    id_gen: IdGenerator,
}

/// Member registration form.
///
/// Also the shape the intake wizard assembles step by step, so every field
/// except the names and e-mail may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateMemberInput {
    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "non_blank"), length(max = 128))]
    pub first_name: String,

    #[validate(length(max = 128))]
    pub middle_name: String,

    #[validate(custom(function = "non_blank"), length(max = 128))]
    pub last_name: String,

    pub profile_image: String,
    pub member_category: String,
    pub marital_status: String,
    pub gender: String,
    pub membership_type: Option<MembershipType>,
    pub status: Option<MemberStatus>,

    pub christening_name: String,
    pub spiritual_father_name: String,
    pub fcm_token: String,

    pub date_of_birth: Option<NaiveDate>,
    pub nationality: String,
    pub address: String,
    pub postcode: String,
    pub mobile_number: String,

    pub emergency_contact_name: String,
    pub emergency_contact_relation: String,
    pub emergency_contact_phone: String,

    pub membership_commitment_confirmed: bool,
    pub consent_contact_church: bool,
    pub consent_data_use: bool,

    pub membership_application_signature: String,
    /// Defaults to today.
    pub membership_application_date: Option<NaiveDate>,
    /// Defaults to today.
    pub application_received_date: Option<NaiveDate>,
}

impl CreateMemberInput {
    fn write_to(self, active: &mut member::ActiveModel, today: NaiveDate) {
        active.email = Set(self.email);
        active.first_name = Set(self.first_name);
        active.middle_name = Set(self.middle_name);
        active.last_name = Set(self.last_name);
        active.profile_image = Set(self.profile_image);
        active.member_category = Set(self.member_category);
        active.marital_status = Set(self.marital_status);
        active.gender = Set(self.gender);
        active.membership_type = Set(self.membership_type.unwrap_or(MembershipType::Regular));
        active.status = Set(self.status.unwrap_or(MemberStatus::Active));
        active.christening_name = Set(self.christening_name);
        active.spiritual_father_name = Set(self.spiritual_father_name);
        active.fcm_token = Set(self.fcm_token);
        active.date_of_birth = Set(self.date_of_birth);
        active.nationality = Set(self.nationality);
        active.address = Set(self.address);
        active.postcode = Set(self.postcode);
        active.mobile_number = Set(self.mobile_number);
        active.emergency_contact_name = Set(self.emergency_contact_name);
        active.emergency_contact_relation = Set(self.emergency_contact_relation);
        active.emergency_contact_phone = Set(self.emergency_contact_phone);
        active.membership_commitment_confirmed = Set(self.membership_commitment_confirmed);
        active.consent_contact_church = Set(self.consent_contact_church);
        active.consent_data_use = Set(self.consent_data_use);
        active.membership_application_signature = Set(self.membership_application_signature);
        active.membership_application_date =
            Set(self.membership_application_date.unwrap_or(today));
        active.application_received_date = Set(self.application_received_date.unwrap_or(today));
    }
}

impl Searchable for member::Model {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.email.as_str()]
    }

    // Names are matched as one "first middle last" string.
    fn matches(&self, needle: &str) -> bool {
        self.full_name().to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

impl MemberService {
    /// Create a new member service.
    #[must_use]
    pub const fn new(member_repo: MemberRepository) -> Self {
        Self {
            member_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List members whose name or e-mail matches the query.
    pub async fn list(&self, query: Option<&str>) -> AppResult<Vec<member::Model>> {
        let all = self.member_repo.find_all().await?;
        debug!(total = all.len(), "Fetched member register");
        Ok(listing::filter(all, query))
    }

    /// Summary tiles over the register.
    pub async fn summary(&self) -> AppResult<Vec<SummaryTile>> {
        let all = self.member_repo.find_all().await?;
        Ok(tiles(&all))
    }

    /// Get a member by ID.
    pub async fn get(&self, id: &str) -> AppResult<member::Model> {
        self.member_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Member", id))
    }

    /// Register a new member.
    pub async fn create(&self, mut input: CreateMemberInput) -> AppResult<member::Model> {
        input.email = input.email.trim().to_string();
        input.validate()?;

        let now = Utc::now();
        let mut active = member::ActiveModel {
            id: Set(self.id_gen.generate()),
            created_at: Set(now),
            updated_at: Set(None),
            ..Default::default()
        };
        input.write_to(&mut active, now.date_naive());

        self.member_repo.create(active).await
    }

    /// Replace a member record.
    pub async fn replace(
        &self,
        id: &str,
        mut input: CreateMemberInput,
    ) -> AppResult<member::Model> {
        input.email = input.email.trim().to_string();
        input.validate()?;

        let existing = self.get(id).await?;
        let now = Utc::now();
        let mut active: member::ActiveModel = existing.into();
        input.write_to(&mut active, now.date_naive());
        active.updated_at = Set(Some(now));

        self.member_repo.update(active).await
    }

    /// Delete a member.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.member_repo.delete(id).await
    }
}

/// Member tiles.
pub fn tiles(all: &[member::Model]) -> Vec<SummaryTile> {
    vec![
        SummaryTile::count("total", "Total Members", all.len()),
        SummaryTile::count(
            "active",
            "Active Members",
            listing::count_where(all, |m| m.status == MemberStatus::Active),
        ),
        SummaryTile::count(
            "premium",
            "Premium Members",
            listing::count_where(all, |m| m.membership_type == MembershipType::Premium),
        ),
        SummaryTile::count(
            "student",
            "Students",
            listing::count_where(all, |m| m.membership_type == MembershipType::Student),
        ),
    ]
}
