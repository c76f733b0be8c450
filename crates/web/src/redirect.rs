//! Where the browser goes after a submission.

use fifthworld_wizard::{Outcome, Step};

/// Base path of the wizard.
pub const WIZARD_PATH: &str = "/create-community";

/// Location for an outcome.
///
/// - saved: the community page
/// - rejected: the failing step, the error code, and the raw values to refill
/// - stale: the community's current step, no error
pub fn location(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Advanced { id, .. } => community_path(Some(*id)),
        Outcome::Rejected { id, rejection } => {
            let mut query: Vec<(&str, String)> = Vec::with_capacity(rejection.echo.len() + 2);
            query.push(("step", rejection.step.number().to_string()));
            query.push(("error", rejection.reason.code().to_string()));
            query.extend(rejection.echo.iter().map(|(key, value)| (*key, value.clone())));
            with_query(community_path(*id), &query)
        }
        Outcome::Stale { id, state } => {
            let step = state.map_or(Step::Center, |state| state.step());
            with_query(community_path(*id), &[("step", step.number().to_string())])
        }
    }
}

fn community_path(id: Option<i64>) -> String {
    match id {
        Some(id) => format!("{WIZARD_PATH}/{id}"),
        None => WIZARD_PATH.to_string(),
    }
}

fn with_query(path: String, query: &[(&str, String)]) -> String {
    match serde_urlencoded::to_string(query) {
        Ok(encoded) if !encoded.is_empty() => format!("{path}?{encoded}"),
        Ok(_) => path,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to encode redirect query");
            path
        }
    }
}
