//! Community record model.
//!
//! The record is stored as one JSON document per community:
//!
//! ```json
//! {
//!   "territory": { "center": [40.44181, -80.01277], "coastal": false,
//!                  "places": { "C10": null, "D5": null, "H7": null, "S7": null } },
//!   "traditions": { "village": false, "specialties": ["Fishing"], "answers": {} },
//!   "chronicle": [],
//!   "people": []
//! }
//! ```

use crate::specialty;
use fifthworld_geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A community being built by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub territory: Territory,
    #[serde(default)]
    pub traditions: Traditions,
    /// Historical events; carried through untouched
    #[serde(default)]
    pub chronicle: Vec<serde_json::Value>,
    /// Generated inhabitants; carried through untouched
    #[serde(default)]
    pub people: Vec<serde_json::Value>,
}

impl Community {
    /// A fresh record for a newly placed settlement.
    pub fn new(center: Coordinate, coastal: bool) -> Self {
        Self {
            territory: Territory {
                center,
                coastal,
                places: BTreeMap::new(),
            },
            traditions: Traditions::default(),
            chronicle: Vec::new(),
            people: Vec::new(),
        }
    }
}

/// Where the community lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub center: Coordinate,
    pub coastal: bool,
    /// One entry per place slot, `None` until that place is set
    #[serde(default)]
    pub places: BTreeMap<PlaceSlot, Option<Place>>,
}

impl Territory {
    /// Slots that still have no place.
    pub fn open_slots(&self) -> impl Iterator<Item = PlaceSlot> + '_ {
        self.places
            .iter()
            .filter(|(_, place)| place.is_none())
            .map(|(slot, _)| *slot)
    }
}

/// A named point of interest inside the territory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub center: Coordinate,
}

/// What the community does and whether it is a village.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Traditions {
    /// Derived once when specialties are chosen
    #[serde(default)]
    pub village: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Specialties>,
    /// Scratch space while specialty prompts are being answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<BTreeMap<String, String>>,
}

/// Chosen specialties: a list until every prompt is answered, then a map of
/// specialty to response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Specialties {
    Chosen(Vec<String>),
    Answered(BTreeMap<String, String>),
}

impl Specialties {
    pub fn len(&self) -> usize {
        match self {
            Specialties::Chosen(list) => list.len(),
            Specialties::Answered(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `name` was chosen; exact match.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Specialties::Chosen(list) => list.iter().any(|s| s == name),
            Specialties::Answered(map) => map.contains_key(name),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            Specialties::Chosen(list) => list.iter().map(String::as_str).collect(),
            Specialties::Answered(map) => map.keys().map(String::as_str).collect(),
        }
    }
}

/// Card codes identifying a community's place slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlaceSlot {
    C10,
    D5,
    D7,
    H7,
    S7,
}

impl PlaceSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            PlaceSlot::C10 => "C10",
            PlaceSlot::D5 => "D5",
            PlaceSlot::D7 => "D7",
            PlaceSlot::H7 => "H7",
            PlaceSlot::S7 => "S7",
        }
    }

    /// Slots a community of this type fills in.
    pub fn for_community(village: bool) -> [PlaceSlot; 4] {
        if village {
            [PlaceSlot::C10, PlaceSlot::D7, PlaceSlot::H7, PlaceSlot::S7]
        } else {
            [PlaceSlot::C10, PlaceSlot::D5, PlaceSlot::H7, PlaceSlot::S7]
        }
    }
}

impl fmt::Display for PlaceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C10" => Ok(PlaceSlot::C10),
            "D5" => Ok(PlaceSlot::D5),
            "D7" => Ok(PlaceSlot::D7),
            "H7" => Ok(PlaceSlot::H7),
            "S7" => Ok(PlaceSlot::S7),
            other => Err(format!("unknown place card {other:?}")),
        }
    }
}

/// Empty slot map for a community of the given type.
pub fn empty_places(village: bool) -> BTreeMap<PlaceSlot, Option<Place>> {
    PlaceSlot::for_community(village)
        .into_iter()
        .map(|slot| (slot, None))
        .collect()
}

/// Cross-field checks that the typed parse cannot express.
pub(crate) fn check_consistency(community: &Community) -> Result<(), String> {
    let territory = &community.territory;
    if !territory.center.is_valid() {
        return Err(format!(
            "territory center [{}, {}] is out of range",
            territory.center.latitude, territory.center.longitude
        ));
    }

    let traditions = &community.traditions;
    match &traditions.specialties {
        None => {
            if traditions.answers.is_some() {
                return Err("answers present before specialties were chosen".into());
            }
            if !territory.places.is_empty() {
                return Err("places present before specialties were chosen".into());
            }
            if traditions.village {
                return Err("village set before specialties were chosen".into());
            }
        }
        Some(specialties) => {
            if specialties.is_empty() {
                return Err("specialties is empty".into());
            }
            let names = specialties.names();
            if traditions.village != specialty::is_village(&names) {
                return Err("village flag does not match chosen specialties".into());
            }
            let expected: Vec<PlaceSlot> = PlaceSlot::for_community(traditions.village).to_vec();
            let actual: Vec<PlaceSlot> = territory.places.keys().copied().collect();
            if actual != expected {
                return Err(format!("place slots {actual:?} do not match {expected:?}"));
            }
            match (specialties, &traditions.answers) {
                (Specialties::Chosen(_), None) => {
                    return Err("answers missing while specialties are unanswered".into());
                }
                (Specialties::Chosen(list), Some(answers)) => {
                    if answers.len() >= list.len() {
                        return Err("answers are complete but were not collapsed".into());
                    }
                    if let Some(stray) = answers.keys().find(|k| !specialties.contains(k)) {
                        return Err(format!("answer for unchosen specialty {stray:?}"));
                    }
                    if territory.places.values().any(Option::is_some) {
                        return Err("places set before specialty answers were complete".into());
                    }
                }
                (Specialties::Answered(_), Some(_)) => {
                    return Err("answers left behind after collapsing".into());
                }
                (Specialties::Answered(_), None) => {}
            }
        }
    }

    for (slot, place) in &territory.places {
        if let Some(place) = place {
            if !place.center.is_valid() {
                return Err(format!("place {slot} has an out-of-range center"));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_community() -> Community {
        Community::new(Coordinate::new(40.44181, -80.01277), false)
    }

    #[test]
    fn test_new_community_json_shape() {
        let value = serde_json::to_value(new_community()).unwrap();
        assert_eq!(
            value,
            json!({
                "territory": { "center": [40.44181, -80.01277], "coastal": false, "places": {} },
                "traditions": { "village": false },
                "chronicle": [],
                "people": []
            })
        );
    }

    #[test]
    fn test_specialties_list_and_map_forms() {
        let chosen: Specialties = serde_json::from_value(json!(["Fishing", "Music"])).unwrap();
        assert_eq!(chosen, Specialties::Chosen(vec!["Fishing".into(), "Music".into()]));

        let answered: Specialties =
            serde_json::from_value(json!({ "Fishing": "Nets", "Music": "Drums" })).unwrap();
        assert!(matches!(answered, Specialties::Answered(ref m) if m.len() == 2));
        assert!(answered.contains("Music"));
    }

    #[test]
    fn test_place_slots_serialize_as_card_codes() {
        let mut community = new_community();
        community.territory.places = empty_places(true);
        let value = serde_json::to_value(&community).unwrap();
        assert_eq!(
            value["territory"]["places"],
            json!({ "C10": null, "D7": null, "H7": null, "S7": null })
        );
    }

    #[test]
    fn test_place_slot_from_str() {
        assert_eq!("d5".parse::<PlaceSlot>(), Ok(PlaceSlot::D5));
        assert_eq!(" C10 ".parse::<PlaceSlot>(), Ok(PlaceSlot::C10));
        assert!("X1".parse::<PlaceSlot>().is_err());
    }

    #[test]
    fn test_slots_per_community_type() {
        assert_eq!(
            PlaceSlot::for_community(true),
            [PlaceSlot::C10, PlaceSlot::D7, PlaceSlot::H7, PlaceSlot::S7]
        );
        assert_eq!(
            PlaceSlot::for_community(false),
            [PlaceSlot::C10, PlaceSlot::D5, PlaceSlot::H7, PlaceSlot::S7]
        );
    }

    #[test]
    fn test_consistency_rejects_stray_answers() {
        let mut community = new_community();
        community.traditions.answers = Some(BTreeMap::new());
        assert!(check_consistency(&community).is_err());
    }

    #[test]
    fn test_consistency_rejects_wrong_slots() {
        let mut community = new_community();
        community.traditions.specialties = Some(Specialties::Chosen(vec!["Pottery".into()]));
        community.traditions.village = true;
        community.traditions.answers = Some(BTreeMap::new());
        community.territory.places = empty_places(false);
        assert!(check_consistency(&community).is_err());

        community.territory.places = empty_places(true);
        assert!(check_consistency(&community).is_ok());
    }
}
