//! The Fifth World community-creation wizard.
//!
//! A member places a settlement, chooses its specialties, answers one prompt
//! per specialty, and places the community's landmarks. Each form post is a
//! [`Submission`]; [`Wizard::submit`] checks it against the stored record and
//! its explicit [`WizardState`], and either saves the next record or explains
//! what to correct.
//!
//! The transition rules are pure: [`decide`] picks an event and [`reduce`]
//! applies it. Storage and coastline data are injected, so the same wizard
//! runs against SQLite in production and memory in tests.
//!
//! # Example
//!
//! ```
//! use fifthworld_wizard::{decide, Decision, Submission, WizardLimits};
//!
//! let submission = Submission::Center {
//!     lat: "200".into(),
//!     lon: "-80".into(),
//! };
//! let decision = decide(None, &submission, &WizardLimits::default());
//! assert!(matches!(decision, Decision::Reject(r) if r.reason.code() == "lat"));
//! ```

mod error;
mod machine;
pub mod record;
pub mod reducer;
mod service;
pub mod specialty;
mod state;
pub mod store;
mod submission;

pub use error::{Result, WizardError};
pub use machine::{decide, Decision};
pub use record::{Community, Place, PlaceSlot, Specialties, Territory, Traditions};
pub use reducer::{reduce, WizardEvent};
pub use service::{Outcome, Wizard};
pub use state::{Step, WizardState};
pub use store::{CommunityStore, MemoryStore, SqliteStore, StoredCommunity};
pub use submission::{RejectReason, Rejection, Submission, WizardLimits};
