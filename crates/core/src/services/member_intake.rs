//! Multi-step member intake.
//!
//! Drafts live in process memory only and are lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parish_common::{AppError, AppResult, IdGenerator};
use parish_db::entities::member;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::member::{CreateMemberInput, MemberService};

/// Number of wizard steps.
pub const TOTAL_STEPS: u8 = 6;

/// Drafts untouched for longer than this are dropped when a new one starts.
const MAX_DRAFT_AGE_HOURS: i64 = 24;

/// One page of the wizard.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IntakeStep {
    pub title: &'static str,
    pub fields: &'static [&'static str],
}

const STEPS: [IntakeStep; TOTAL_STEPS as usize] = [
    IntakeStep {
        title: "Personal Details",
        fields: &[
            "firstName",
            "middleName",
            "lastName",
            "email",
            "mobileNumber",
            "gender",
            "profileImage",
        ],
    },
    IntakeStep {
        title: "Background",
        fields: &[
            "maritalStatus",
            "nationality",
            "dateOfBirth",
            "memberCategory",
            "membershipType",
            "christeningName",
        ],
    },
    IntakeStep {
        title: "Emergency Contact",
        fields: &[
            "emergencyContactName",
            "emergencyContactRelation",
            "emergencyContactPhone",
            "spiritualFatherName",
            "fcmToken",
        ],
    },
    IntakeStep {
        title: "Address",
        fields: &["address", "postcode", "membershipCommitmentConfirmed"],
    },
    IntakeStep {
        title: "Consent",
        fields: &[
            "consentContactChurch",
            "consentDataUse",
            "membershipApplicationSignature",
        ],
    },
    IntakeStep {
        title: "Application",
        fields: &["membershipApplicationDate", "applicationReceivedDate", "status"],
    },
];

fn step_info(step: u8) -> IntakeStep {
    STEPS[usize::from(step.clamp(1, TOTAL_STEPS) - 1)]
}

fn is_known_field(name: &str) -> bool {
    STEPS.iter().any(|step| step.fields.contains(&name))
}

#[derive(Debug, Clone)]
struct IntakeDraft {
    step: u8,
    fields: Map<String, Value>,
    started_at: DateTime<Utc>,
}

/// Draft as returned to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeView {
    pub id: String,
    pub step: u8,
    pub total_steps: u8,
    #[serde(flatten)]
    pub current: IntakeStep,
    pub draft: Map<String, Value>,
    pub started_at: DateTime<Utc>,
}

/// Result of submitting a step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", content = "record", rename_all = "camelCase")]
pub enum IntakeOutcome {
    /// The wizard moved on (or stayed) and the draft is still open.
    InProgress(IntakeView),
    /// The final step was accepted and the member registered.
    Completed(Box<member::Model>),
}

/// In-memory member registration wizard.
#[derive(Clone)]
pub struct MemberIntakeService {
    member_service: MemberService,
    drafts: Arc<RwLock<HashMap<String, IntakeDraft>>>,
    id_gen: IdGenerator,
}

impl MemberIntakeService {
    /// Create a new intake service with an empty draft store.
    #[must_use]
    pub fn new(member_service: MemberService) -> Self {
        Self {
            member_service,
            drafts: Arc::new(RwLock::new(HashMap::new())),
            id_gen: IdGenerator::new(),
        }
    }

    /// Open a new draft at step 1, dropping abandoned ones.
    pub async fn start(&self) -> IntakeView {
        let now = Utc::now();
        let id = self.id_gen.generate();
        let draft = IntakeDraft {
            step: 1,
            fields: Map::new(),
            started_at: now,
        };
        let view = view(&id, &draft);

        let mut drafts = self.drafts.write().await;
        let evicted = evict_stale(&mut drafts, now);
        if evicted > 0 {
            debug!(evicted, "Dropped abandoned intake drafts");
        }
        drafts.insert(id, draft);
        view
    }

    /// Current state of a draft.
    pub async fn get(&self, id: &str) -> AppResult<IntakeView> {
        let drafts = self.drafts.read().await;
        drafts
            .get(id)
            .map(|draft| view(id, draft))
            .ok_or_else(|| AppError::not_found("Intake", id))
    }

    /// Merge `patch` into the draft and advance.
    ///
    /// On the last step the whole draft is validated and, if it passes, the
    /// member is created and the draft closed. A failing draft stays on the
    /// last step.
    pub async fn submit_step(
        &self,
        id: &str,
        patch: Map<String, Value>,
    ) -> AppResult<IntakeOutcome> {
        if let Some(unknown) = patch.keys().find(|key| !is_known_field(key)) {
            return Err(AppError::BadRequest(format!(
                "Unknown intake field: {unknown}"
            )));
        }

        let draft = {
            let mut drafts = self.drafts.write().await;
            let draft = drafts
                .get_mut(id)
                .ok_or_else(|| AppError::not_found("Intake", id))?;

            draft.fields.extend(patch);
            if draft.step < TOTAL_STEPS {
                draft.step += 1;
                debug!(intake_id = %id, step = draft.step, "Intake advanced");
                return Ok(IntakeOutcome::InProgress(view(id, draft)));
            }

            // Taken out under the lock so a second final submit cannot register it again.
            drafts
                .remove(id)
                .ok_or_else(|| AppError::not_found("Intake", id))?
        };

        match self.register(&draft).await {
            Ok(member) => {
                info!(intake_id = %id, member_id = %member.id, "Intake completed");
                Ok(IntakeOutcome::Completed(Box::new(member)))
            }
            Err(e) => {
                self.drafts.write().await.insert(id.to_string(), draft);
                Err(e)
            }
        }
    }

    async fn register(&self, draft: &IntakeDraft) -> AppResult<member::Model> {
        let input: CreateMemberInput = serde_json::from_value(Value::Object(draft.fields.clone()))
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.member_service.create(input).await
    }

    /// Go back one step. Never goes below step 1.
    pub async fn back(&self, id: &str) -> AppResult<IntakeView> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("Intake", id))?;

        draft.step = draft.step.saturating_sub(1).max(1);
        Ok(view(id, draft))
    }

    /// Throw a draft away.
    pub async fn discard(&self, id: &str) -> AppResult<()> {
        self.drafts
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Intake", id))
    }
}

/// Remove drafts started more than `MAX_DRAFT_AGE_HOURS` before `now`.
fn evict_stale(drafts: &mut HashMap<String, IntakeDraft>, now: DateTime<Utc>) -> usize {
    let before = drafts.len();
    let max_age = Duration::hours(MAX_DRAFT_AGE_HOURS);
    drafts.retain(|_, draft| now - draft.started_at < max_age);
    before - drafts.len()
}

fn view(id: &str, draft: &IntakeDraft) -> IntakeView {
    IntakeView {
        id: id.to_string(),
        step: draft.step,
        total_steps: TOTAL_STEPS,
        current: step_info(draft.step),
        draft: draft.fields.clone(),
        started_at: draft.started_at,
    }
}
