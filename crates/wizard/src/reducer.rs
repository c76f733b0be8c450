//! Pure record transitions.
//!
//! The server applies every decided [`WizardEvent`] through [`reduce`]; a
//! browser can replay the same events for optimistic display. Events that do
//! not fit the current record leave it unchanged.

use crate::record::{empty_places, Community, Place, PlaceSlot, Specialties};
use crate::specialty;
use fifthworld_geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A change to a community record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    /// First valid center: a new record
    Created { center: Coordinate, coastal: bool },
    /// Center moved before specialties were chosen
    Recentered { center: Coordinate, coastal: bool },
    /// Specialties set; village type and place slots follow from them
    SpecialtiesChosen { specialties: Vec<String> },
    /// One specialty prompt answered
    SpecialtyAnswered { specialty: String, response: String },
    /// One place slot filled
    PlaceSet { slot: PlaceSlot, place: Place },
    /// Replace the whole record, e.g. after fetching it
    Loaded { community: Community },
    /// Forget the record
    Reset,
}

impl WizardEvent {
    /// Short name used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            WizardEvent::Created { .. } => "created",
            WizardEvent::Recentered { .. } => "recentered",
            WizardEvent::SpecialtiesChosen { .. } => "specialties_chosen",
            WizardEvent::SpecialtyAnswered { .. } => "specialty_answered",
            WizardEvent::PlaceSet { .. } => "place_set",
            WizardEvent::Loaded { .. } => "loaded",
            WizardEvent::Reset => "reset",
        }
    }
}

/// Apply `event` to `state`.
pub fn reduce(state: Option<Community>, event: &WizardEvent) -> Option<Community> {
    match event {
        WizardEvent::Created { center, coastal } => Some(Community::new(*center, *coastal)),
        WizardEvent::Loaded { community } => Some(community.clone()),
        WizardEvent::Reset => None,
        _ => state.map(|community| apply(community, event)),
    }
}

fn apply(mut community: Community, event: &WizardEvent) -> Community {
    match event {
        WizardEvent::Recentered { center, coastal } => {
            if community.traditions.specialties.is_none() {
                community.territory.center = *center;
                community.territory.coastal = *coastal;
            }
        }
        WizardEvent::SpecialtiesChosen { specialties } => {
            if community.traditions.specialties.is_none() {
                let village = specialty::is_village(specialties);
                community.traditions.village = village;
                community.traditions.specialties = Some(Specialties::Chosen(specialties.clone()));
                community.traditions.answers = Some(BTreeMap::new());
                community.territory.places = empty_places(village);
            }
        }
        WizardEvent::SpecialtyAnswered { specialty, response } => {
            answer(&mut community, specialty, response);
        }
        WizardEvent::PlaceSet { slot, place } => {
            let answered = matches!(
                community.traditions.specialties,
                Some(Specialties::Answered(_))
            );
            if answered {
                if let Some(entry) = community.territory.places.get_mut(slot) {
                    *entry = Some(place.clone());
                }
            }
        }
        WizardEvent::Created { .. } | WizardEvent::Loaded { .. } | WizardEvent::Reset => {}
    }
    community
}

/// Record one answer; collapse into the specialties map once every chosen
/// specialty has one.
fn answer(community: &mut Community, specialty: &str, response: &str) {
    let traditions = &mut community.traditions;
    let Some(Specialties::Chosen(chosen)) = &traditions.specialties else {
        return;
    };
    if !chosen.iter().any(|s| s == specialty) {
        return;
    }
    let expected = chosen.len();

    let answers = traditions.answers.get_or_insert_with(BTreeMap::new);
    answers.insert(specialty.to_string(), response.to_string());

    if answers.len() == expected {
        if let Some(complete) = traditions.answers.take() {
            traditions.specialties = Some(Specialties::Answered(complete));
        }
    }
}
