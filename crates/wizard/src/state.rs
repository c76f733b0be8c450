//! Wizard states and steps.

use crate::record::{check_consistency, Community, Specialties};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a persisted community is in the wizard.
///
/// Stored next to the record and checked against the record's shape on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardState {
    AwaitingSpecialties,
    AwaitingAnswers,
    AwaitingPlaces,
    Complete,
}

impl WizardState {
    /// Derive the state from a record's shape, rejecting inconsistent records.
    pub fn of(community: &Community) -> Result<Self, String> {
        check_consistency(community)?;

        let state = match &community.traditions.specialties {
            None => WizardState::AwaitingSpecialties,
            Some(Specialties::Chosen(_)) => WizardState::AwaitingAnswers,
            Some(Specialties::Answered(_)) => {
                if community.territory.open_slots().next().is_some() {
                    WizardState::AwaitingPlaces
                } else {
                    WizardState::Complete
                }
            }
        };
        Ok(state)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardState::AwaitingSpecialties => "awaiting_specialties",
            WizardState::AwaitingAnswers => "awaiting_answers",
            WizardState::AwaitingPlaces => "awaiting_places",
            WizardState::Complete => "complete",
        }
    }

    /// Form step a member sees in this state.
    pub fn step(self) -> Step {
        match self {
            WizardState::AwaitingSpecialties => Step::Specialties,
            WizardState::AwaitingAnswers => Step::Answers,
            WizardState::AwaitingPlaces | WizardState::Complete => Step::Places,
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WizardState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "awaiting_specialties" => Ok(WizardState::AwaitingSpecialties),
            "awaiting_answers" => Ok(WizardState::AwaitingAnswers),
            "awaiting_places" => Ok(WizardState::AwaitingPlaces),
            "complete" => Ok(WizardState::Complete),
            other => Err(format!("unknown wizard state {other:?}")),
        }
    }
}

/// Numbered form steps, as used in redirect URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Center = 1,
    Specialties = 2,
    Answers = 3,
    Places = 4,
}

impl Step {
    pub fn number(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{empty_places, Place, PlaceSlot};
    use fifthworld_geo::Coordinate;
    use std::collections::BTreeMap;

    fn base() -> Community {
        Community::new(Coordinate::new(1.0, 2.0), true)
    }

    #[test]
    fn test_state_progression_by_shape() {
        let mut community = base();
        assert_eq!(WizardState::of(&community), Ok(WizardState::AwaitingSpecialties));

        community.traditions.specialties = Some(Specialties::Chosen(vec!["Fishing".into()]));
        community.traditions.answers = Some(BTreeMap::new());
        community.territory.places = empty_places(false);
        assert_eq!(WizardState::of(&community), Ok(WizardState::AwaitingAnswers));

        community.traditions.specialties = Some(Specialties::Answered(BTreeMap::from([(
            "Fishing".to_string(),
            "Weirs on the river".to_string(),
        )])));
        community.traditions.answers = None;
        assert_eq!(WizardState::of(&community), Ok(WizardState::AwaitingPlaces));

        for place in community.territory.places.values_mut() {
            *place = Some(Place {
                name: "Landing".into(),
                center: Coordinate::new(1.01, 2.01),
            });
        }
        assert_eq!(WizardState::of(&community), Ok(WizardState::Complete));
        assert!(community.territory.places.contains_key(&PlaceSlot::D5));
    }

    #[test]
    fn test_state_tag_round_trip() {
        for state in [
            WizardState::AwaitingSpecialties,
            WizardState::AwaitingAnswers,
            WizardState::AwaitingPlaces,
            WizardState::Complete,
        ] {
            assert_eq!(state.as_str().parse::<WizardState>(), Ok(state));
        }
        assert!("started".parse::<WizardState>().is_err());
    }

    #[test]
    fn test_step_numbers() {
        assert_eq!(Step::Center.number(), 1);
        assert_eq!(WizardState::AwaitingSpecialties.step().number(), 2);
        assert_eq!(WizardState::AwaitingAnswers.step().number(), 3);
        assert_eq!(WizardState::Complete.step().number(), 4);
    }
}
