//! Structured classification result.

use serde::{Deserialize, Serialize};

use crate::astro::AstroState;
use crate::conditions::ConditionSet;
use crate::decision::EventLabel;
use crate::observation::Observation;

/// Supporting values for a [`Classification`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationDetail {
    pub observation: Observation,
    pub astro: AstroState,
    pub conditions: ConditionSet,
    /// Name of the matched reference event, if any.
    pub contact: Option<String>,
}

/// A label and the values it was decided from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: EventLabel,
    pub detail: ClassificationDetail,
}

impl Classification {
    pub fn is_match(&self) -> bool {
        self.label.is_match()
    }
}
