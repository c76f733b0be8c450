//! Decoding the wizard form.

use fifthworld_wizard::Submission;

/// Fields of a `POST /create-community` body.
///
/// Every value is kept as typed; `specialty` may repeat and is also accepted
/// as `specialty[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct FormFields {
    pub community: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub specialty: Vec<String>,
    pub response: Option<String>,
    pub card: Option<String>,
    pub name: Option<String>,
}

impl FormFields {
    /// Parse a form-urlencoded body. Unknown fields are ignored; for
    /// single-valued fields the last occurrence wins.
    pub fn parse(body: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body)?;
        Ok(Self::from_pairs(pairs))
    }

    /// Collect fields from decoded key/value pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut fields = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "community" => fields.community = Some(value),
                "lat" => fields.lat = Some(value),
                "lon" => fields.lon = Some(value),
                "specialty" | "specialty[]" => fields.specialty.push(value),
                "response" => fields.response = Some(value),
                "card" => fields.card = Some(value),
                "name" => fields.name = Some(value),
                _ => {}
            }
        }
        fields
    }

    /// The community id, if one was sent.
    ///
    /// A blank value counts as absent; anything else must be an integer.
    pub fn community_id(&self) -> Result<Option<i64>, String> {
        match self.community.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| format!("community id {raw:?} is not an integer")),
        }
    }

    /// Pick the submission these fields describe.
    ///
    /// A card means a place; a specialty with a response means an answer;
    /// any specialty field, even blank, means a specialty choice; anything
    /// else is a center.
    pub fn into_submission(self) -> Submission {
        let Self {
            lat,
            lon,
            mut specialty,
            response,
            card,
            name,
            ..
        } = self;

        if let Some(card) = card {
            return Submission::Place {
                card,
                lat: lat.unwrap_or_default(),
                lon: lon.unwrap_or_default(),
                name: name.unwrap_or_default(),
            };
        }

        match response {
            Some(response) if !specialty.is_empty() => Submission::Answer {
                specialty: specialty.swap_remove(0),
                response,
            },
            _ if !specialty.is_empty() => Submission::Specialties(specialty),
            _ => Submission::Center {
                lat: lat.unwrap_or_default(),
                lon: lon.unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_specialties() {
        let body = "community=3&specialty=Fishing&specialty%5B%5D=Music&specialty=Animal+husbandry";
        let fields = FormFields::parse(body).unwrap();
        assert_eq!(fields.community.as_deref(), Some("3"));
        assert_eq!(fields.specialty, vec!["Fishing", "Music", "Animal husbandry"]);
        assert_eq!(
            fields.into_submission(),
            Submission::Specialties(vec![
                "Fishing".into(),
                "Music".into(),
                "Animal husbandry".into(),
            ])
        );
    }

    #[test]
    fn test_dispatch_order() {
        let place =
            FormFields::parse("card=D5&specialty=Fishing&response=x&lat=1&lon=2&name=Dock")
                .unwrap();
        assert!(matches!(place.into_submission(), Submission::Place { card, .. } if card == "D5"));

        let answer = FormFields::parse("specialty=Fishing&response=Weirs").unwrap();
        assert_eq!(
            answer.into_submission(),
            Submission::Answer {
                specialty: "Fishing".into(),
                response: "Weirs".into()
            }
        );

        let center = FormFields::parse("lat=40.441810&lon=-80.012770").unwrap();
        assert_eq!(
            center.into_submission(),
            Submission::Center {
                lat: "40.441810".into(),
                lon: "-80.012770".into()
            }
        );

        let empty = FormFields::parse("").unwrap();
        assert_eq!(
            empty.into_submission(),
            Submission::Center {
                lat: String::new(),
                lon: String::new()
            }
        );
    }

    #[test]
    fn test_blank_specialty_is_still_a_choice() {
        let fields = FormFields::parse("community=2&specialty=").unwrap();
        assert_eq!(fields.into_submission(), Submission::Specialties(vec![String::new()]));
    }

    #[test]
    fn test_community_id() {
        let parse = |body: &str| FormFields::parse(body).unwrap().community_id();
        assert_eq!(parse("community=5"), Ok(Some(5)));
        assert_eq!(parse("community="), Ok(None));
        assert_eq!(parse("lat=1"), Ok(None));
        assert!(parse("community=five").is_err());
    }

    #[test]
    fn test_values_are_decoded() {
        let fields = FormFields::parse("lat=40%C2%B026%2730.5%22N&name=Old+Mill").unwrap();
        assert_eq!(fields.lat.as_deref(), Some("40°26'30.5\"N"));
        assert_eq!(fields.name.as_deref(), Some("Old Mill"));
    }
}
