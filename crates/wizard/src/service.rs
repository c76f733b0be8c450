//! The wizard service: load, decide, locate, reduce, persist.

use crate::error::{Result, WizardError};
use crate::machine::{decide, Decision};
use crate::reducer::{reduce, WizardEvent};
use crate::state::WizardState;
use crate::store::{CommunityStore, StoredCommunity};
use crate::submission::{Rejection, Submission, WizardLimits};
use fifthworld_geo::{CoastlineProbe, Coordinate};
use fifthworld_telemetry::{metrics, Event, Timer};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// What became of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The record changed and was saved
    Advanced { id: i64, state: WizardState },
    /// The member has to correct the form; nothing was saved
    Rejected { id: Option<i64>, rejection: Rejection },
    /// The submission did not fit the record's state; nothing was saved
    Stale { id: Option<i64>, state: Option<WizardState> },
}

impl Outcome {
    fn label(&self) -> &'static str {
        match self {
            Outcome::Advanced { .. } => "advanced",
            Outcome::Rejected { .. } => "rejected",
            Outcome::Stale { .. } => "stale",
        }
    }
}

/// Runs submissions against a store, consulting the coastline for new
/// centers.
pub struct Wizard {
    store: Arc<dyn CommunityStore>,
    coastline: Arc<dyn CoastlineProbe>,
    limits: WizardLimits,
}

impl Wizard {
    pub fn new(
        store: Arc<dyn CommunityStore>,
        coastline: Arc<dyn CoastlineProbe>,
        limits: WizardLimits,
    ) -> Self {
        Self {
            store,
            coastline,
            limits,
        }
    }

    pub fn limits(&self) -> &WizardLimits {
        &self.limits
    }

    /// Fetch one community.
    pub async fn show(&self, id: i64) -> Result<StoredCommunity> {
        self.store.load(id).await?.ok_or(WizardError::NotFound(id))
    }

    /// Apply one form submission to community `id`, or start a new
    /// community when `id` is `None`.
    #[instrument(skip(self, submission), fields(community_id = ?id, kind = submission.kind()))]
    pub async fn submit(&self, id: Option<i64>, submission: Submission) -> Result<Outcome> {
        metrics().increment("wizard.submissions");

        let current = match id {
            Some(id) => Some(self.show(id).await?),
            None => None,
        };

        let decision = decide(
            current.as_ref().map(|stored| (stored.state, &stored.community)),
            &submission,
            &self.limits,
        );

        let outcome = match decision {
            Decision::Reject(rejection) => {
                info!(
                    step = rejection.step.number(),
                    error = rejection.reason.code(),
                    "Submission rejected"
                );
                metrics().increment(&format!("wizard.rejected.{}", rejection.reason.code()));
                Outcome::Rejected { id, rejection }
            }
            Decision::Stale => {
                debug!("Stale submission ignored");
                Outcome::Stale {
                    id,
                    state: current.as_ref().map(|stored| stored.state),
                }
            }
            Decision::Locate { center } => {
                let coastal = self.probe(center).await?;
                let event = if current.is_some() {
                    WizardEvent::Recentered { center, coastal }
                } else {
                    WizardEvent::Created { center, coastal }
                };
                self.commit(current, &event).await?
            }
            Decision::Apply(event) => self.commit(current, &event).await?,
        };

        metrics().increment(&format!("wizard.outcome.{}", outcome.label()));
        Ok(outcome)
    }

    async fn probe(&self, center: Coordinate) -> Result<bool> {
        let timer = Timer::start("coastline.probe_ms");
        let coastal = self.coastline.is_coastal(center).await?;
        let elapsed = timer.stop();
        debug!(
            lat = center.latitude,
            lon = center.longitude,
            coastal,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Coastline checked"
        );
        Ok(coastal)
    }

    /// Reduce, check, and persist one event.
    async fn commit(
        &self,
        current: Option<StoredCommunity>,
        event: &WizardEvent,
    ) -> Result<Outcome> {
        let existing = current.as_ref().map(|stored| stored.id);
        let community = reduce(current.map(|stored| stored.community), event)
            .ok_or_else(|| WizardError::Inconsistent(format!("{} left no record", event.kind())))?;
        let state = WizardState::of(&community).map_err(WizardError::Inconsistent)?;

        let id = match existing {
            Some(id) => {
                self.store.update(id, state, &community).await?;
                id
            }
            None => self.store.insert(state, &community).await?,
        };

        info!(
            community_id = id,
            step = state.step().number(),
            %state,
            event = event.kind(),
            "Community saved"
        );
        Event::new(
            format!("wizard.{}", event.kind()),
            serde_json::json!({ "community_id": id, "state": state.as_str() }),
        )
        .log();

        Ok(Outcome::Advanced { id, state })
    }
}
