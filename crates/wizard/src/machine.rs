//! The wizard's transition table.
//!
//! [`decide`] looks at the stored state, the record, and one submission and
//! says what should happen. It performs no I/O: a valid center still needs
//! the coastline probe, so it comes back as [`Decision::Locate`] and the
//! service finishes the event once the probe answers.

use crate::reducer::WizardEvent;
use crate::record::{Community, Place, PlaceSlot, Specialties};
use crate::specialty;
use crate::state::{Step, WizardState};
use crate::submission::{RejectReason, Rejection, Submission, WizardLimits};
use fifthworld_geo::{haversine_distance, normalize_str, Axis, Coordinate};

/// Outcome of checking one submission against the current record.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Apply this event and persist the result
    Apply(WizardEvent),
    /// Valid center; classify it as coastal or inland, then create or
    /// re-center the record
    Locate { center: Coordinate },
    /// Send the member back to correct the form
    Reject(Rejection),
    /// The submission does not fit the current state; change nothing
    Stale,
}

/// Decide what a submission does to the record currently stored, if any.
pub fn decide(
    current: Option<(WizardState, &Community)>,
    submission: &Submission,
    limits: &WizardLimits,
) -> Decision {
    let state = current.map(|(state, _)| state);

    match submission {
        Submission::Center { lat, lon } => {
            // Past the specialty step the center is fixed
            if !matches!(state, None | Some(WizardState::AwaitingSpecialties)) {
                return Decision::Stale;
            }
            match coordinates(lat, lon) {
                Ok(center) => Decision::Locate { center },
                Err(reason) => Decision::Reject(
                    Rejection::new(Step::Center, reason)
                        .echo("lat", lat.as_str())
                        .echo("lon", lon.as_str()),
                ),
            }
        }

        Submission::Specialties(raw) => {
            if state != Some(WizardState::AwaitingSpecialties) {
                return Decision::Stale;
            }
            choose_specialties(raw, limits)
        }

        Submission::Answer { specialty, response } => match current {
            Some((WizardState::AwaitingAnswers, community)) => {
                answer_specialty(community, specialty, response)
            }
            _ => Decision::Stale,
        },

        Submission::Place { card, lat, lon, name } => match current {
            Some((WizardState::AwaitingPlaces | WizardState::Complete, community)) => {
                set_place(community, card, lat, lon, name, limits)
            }
            _ => Decision::Stale,
        },
    }
}

/// Normalize a latitude/longitude pair from form input.
fn coordinates(lat: &str, lon: &str) -> Result<Coordinate, RejectReason> {
    match (normalize_str(lat, Axis::Latitude), normalize_str(lon, Axis::Longitude)) {
        (Some(latitude), Some(longitude)) => Ok(Coordinate::new(latitude, longitude)),
        (None, None) => Err(RejectReason::Both),
        (None, Some(_)) => Err(RejectReason::Lat),
        (Some(_), None) => Err(RejectReason::Lon),
    }
}

fn choose_specialties(raw: &[String], limits: &WizardLimits) -> Decision {
    let specialties = specialty::clean_selection(raw);

    let reason = if specialties.is_empty() {
        RejectReason::NoSpecialty
    } else if specialties.len() > limits.max_specialties {
        RejectReason::TooMany
    } else {
        return Decision::Apply(WizardEvent::SpecialtiesChosen { specialties });
    };

    let rejection = raw
        .iter()
        .fold(Rejection::new(Step::Specialties, reason), |rejection, name| {
            rejection.echo("specialty", name.as_str())
        });
    Decision::Reject(rejection)
}

fn answer_specialty(community: &Community, specialty: &str, response: &str) -> Decision {
    let Some(Specialties::Chosen(chosen)) = &community.traditions.specialties else {
        return Decision::Stale;
    };
    let wanted = specialty.trim();
    let Some(name) = chosen.iter().find(|name| name.eq_ignore_ascii_case(wanted)) else {
        return Decision::Stale;
    };

    let response = response.trim();
    if response.is_empty() {
        return Decision::Reject(
            Rejection::new(Step::Answers, RejectReason::NoIntro).echo("specialty", specialty),
        );
    }

    Decision::Apply(WizardEvent::SpecialtyAnswered {
        specialty: name.clone(),
        response: response.to_string(),
    })
}

fn set_place(
    community: &Community,
    card: &str,
    lat: &str,
    lon: &str,
    name: &str,
    limits: &WizardLimits,
) -> Decision {
    let Ok(slot) = card.parse::<PlaceSlot>() else {
        return Decision::Stale;
    };
    if !community.territory.places.contains_key(&slot) {
        return Decision::Stale;
    }

    let reject = |reason| {
        Decision::Reject(
            Rejection::new(Step::Places, reason)
                .echo("card", card)
                .echo("lat", lat)
                .echo("lon", lon)
                .echo("name", name),
        )
    };

    let center = match coordinates(lat, lon) {
        Ok(center) => center,
        Err(reason) => return reject(reason),
    };

    let name = name.trim();
    if name.is_empty() {
        return reject(RejectReason::NoName);
    }

    if haversine_distance(&community.territory.center, &center) > limits.walking_radius_km {
        return reject(RejectReason::TooFar);
    }

    Decision::Apply(WizardEvent::PlaceSet {
        slot,
        place: Place {
            name: name.to_string(),
            center,
        },
    })
}
