//! Wizard form submissions and the ways they can be turned away.

use crate::state::Step;
use fifthworld_core::config::WizardConfig;
use std::fmt;

/// One decoded form post, with every value still as the member typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Place the settlement
    Center { lat: String, lon: String },
    /// Choose specialties
    Specialties(Vec<String>),
    /// Answer the prompt for one chosen specialty
    Answer { specialty: String, response: String },
    /// Set one place card
    Place {
        card: String,
        lat: String,
        lon: String,
        name: String,
    },
}

impl Submission {
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::Center { .. } => "center",
            Submission::Specialties(_) => "specialties",
            Submission::Answer { .. } => "answer",
            Submission::Place { .. } => "place",
        }
    }
}

/// Why a submission was sent back to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Neither coordinate is usable
    Both,
    /// Latitude is not usable
    Lat,
    /// Longitude is not usable
    Lon,
    /// More specialties than allowed
    TooMany,
    /// No specialty given
    NoSpecialty,
    /// Place is beyond walking distance of the territory center
    TooFar,
    /// Place has no name
    NoName,
    /// Specialty answer is empty
    NoIntro,
}

impl RejectReason {
    /// Code used in the redirect's `error` parameter.
    pub fn code(self) -> &'static str {
        match self {
            RejectReason::Both => "both",
            RejectReason::Lat => "lat",
            RejectReason::Lon => "lon",
            RejectReason::TooMany => "toomany",
            RejectReason::NoSpecialty => "nospecialty",
            RejectReason::TooFar => "toofar",
            RejectReason::NoName => "noname",
            RejectReason::NoIntro => "nointro",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A submission the member has to correct.
///
/// `echo` carries the raw values to put back into the form, in the order
/// they appear in the redirect query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub step: Step,
    pub reason: RejectReason,
    pub echo: Vec<(&'static str, String)>,
}

impl Rejection {
    pub(crate) fn new(step: Step, reason: RejectReason) -> Self {
        Self {
            step,
            reason,
            echo: Vec::new(),
        }
    }

    pub(crate) fn echo(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.echo.push((key, value.into()));
        self
    }
}

/// Tunable limits on what a submission may contain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WizardLimits {
    pub max_specialties: usize,
    pub walking_radius_km: f64,
}

impl Default for WizardLimits {
    fn default() -> Self {
        Self {
            max_specialties: 4,
            walking_radius_km: 45.0,
        }
    }
}

impl From<&WizardConfig> for WizardLimits {
    fn from(config: &WizardConfig) -> Self {
        Self {
            max_specialties: config.max_specialties,
            walking_radius_km: config.walking_radius_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        let all = [
            (RejectReason::Both, "both"),
            (RejectReason::Lat, "lat"),
            (RejectReason::Lon, "lon"),
            (RejectReason::TooMany, "toomany"),
            (RejectReason::NoSpecialty, "nospecialty"),
            (RejectReason::TooFar, "toofar"),
            (RejectReason::NoName, "noname"),
            (RejectReason::NoIntro, "nointro"),
        ];
        for (reason, code) in all {
            assert_eq!(reason.code(), code);
            assert_eq!(reason.to_string(), code);
        }
    }

    #[test]
    fn test_limits_follow_config() {
        assert_eq!(WizardLimits::from(&WizardConfig::default()), WizardLimits::default());
    }

    #[test]
    fn test_echo_keeps_order() {
        let rejection = Rejection::new(Step::Center, RejectReason::Lat)
            .echo("lat", "200")
            .echo("lon", "-80");
        assert_eq!(
            rejection.echo,
            vec![("lat", "200".to_string()), ("lon", "-80".to_string())]
        );
    }
}
