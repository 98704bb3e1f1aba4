//! Event labels and the priority decision table.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::conditions::ConditionSet;

/// Classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventLabel {
    Geoportal,
    Atmospheric,
    Emergency,
    Contact,
    Observational,
    #[serde(rename = "NONE")]
    NoMatch,
}

/// All labels in decision order.
pub const ALL_EVENT_LABELS: [EventLabel; 6] = [
    EventLabel::Geoportal,
    EventLabel::Atmospheric,
    EventLabel::Emergency,
    EventLabel::Contact,
    EventLabel::Observational,
    EventLabel::NoMatch,
];

impl EventLabel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Geoportal => "GEOPORTAL",
            Self::Atmospheric => "ATMOSPHERIC",
            Self::Emergency => "EMERGENCY",
            Self::Contact => "CONTACT",
            Self::Observational => "OBSERVATIONAL",
            Self::NoMatch => "NONE",
        }
    }

    pub const fn all() -> &'static [EventLabel; 6] {
        &ALL_EVENT_LABELS
    }

    pub const fn is_match(self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

impl Display for EventLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown label text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event label: {0}")]
pub struct ParseLabelError(pub String);

impl FromStr for EventLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_EVENT_LABELS
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLabelError(s.to_string()))
    }
}

/// Apply the decision table. First match wins.
///
/// | # | rule | label |
/// |---|------|-------|
/// | 1 | (C1 ∨ C3 ∨ C5) ∧ C2 ∧ C4 ∧ C6 | GEOPORTAL |
/// | 2 | (8th ∨ 12th) ∧ C3 ∧ C6 | ATMOSPHERIC |
/// | 3 | C1 ∧ (8th ∨ 12th ∨ Mula) ∧ Kp ≥ 6 | EMERGENCY |
/// | 4 | C5 ∧ C6 ∧ (C1 ∨ C3) ∧ contact | CONTACT |
/// | 5 | C5 ∧ C6 ∧ (C1 ∨ C3) | OBSERVATIONAL |
///
/// CONTACT narrows OBSERVATIONAL by the contact-table match, so it is
/// tested first.
pub fn decide(c: &ConditionSet, contact_match: bool) -> EventLabel {
    let c1 = c.node_proximity;
    let c3 = c.mansion_member;
    let c5 = c.night;
    let c6 = c.quiet_geomagnetic;

    if (c1 || c3 || c5) && c.critical_angle && c.latitude_band && c6 {
        EventLabel::Geoportal
    } else if c.house_like() && c3 && c6 {
        EventLabel::Atmospheric
    } else if c1 && (c.house_like() || c.in_mula) && c.storm() {
        EventLabel::Emergency
    } else if c5 && c6 && (c1 || c3) && contact_match {
        EventLabel::Contact
    } else if c5 && c6 && (c1 || c3) {
        EventLabel::Observational
    } else {
        EventLabel::NoMatch
    }
}
