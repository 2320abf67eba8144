//! Interview record types.
//!
//! An interview record tracks one hiring process end to end: the company,
//! how to reach the contact person, the salary range under discussion, the
//! ordered stage history, and the terminal outcome once there is one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Terminal result of an interview process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Offer,
    Rejected,
}

impl Outcome {
    /// Canonical database/CLI representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Offer => "offer",
            Outcome::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for Outcome {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offer" => Ok(Outcome::Offer),
            "rejected" => Ok(Outcome::Rejected),
            other => Err(ValidationError::InvalidValue {
                field: "outcome".into(),
                message: format!("expected 'offer' or 'rejected', got '{other}'"),
            }),
        }
    }
}

/// One step of an interview process (screening, tech interview, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    /// Unset while the stage is not scheduled yet.
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
}

/// One tracked hiring process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    /// Unique identifier
    pub id: String,
    /// Company name
    pub company: String,
    /// Link to the vacancy posting
    #[serde(default)]
    pub vacancy_link: String,
    /// Name of the HR contact
    pub hr_name: String,
    /// Telegram handle of the contact
    pub contact_telegram: Option<String>,
    /// WhatsApp number of the contact
    pub contact_whats_app: Option<String>,
    /// Phone number of the contact, stored masked (`(XXX) XXX-XXXX`)
    pub contact_phone: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Lower salary bound under discussion
    pub salary_from: Option<u32>,
    /// Upper salary bound under discussion
    pub salary_to: Option<u32>,
    /// Ordered stage history
    #[serde(default)]
    pub stages: Vec<Stage>,
    /// Terminal outcome; unset while the process is in progress
    pub outcome: Option<Outcome>,
}

impl Interview {
    /// Create a new in-progress record with default values.
    pub fn new(company: impl Into<String>, hr_name: impl Into<String>) -> Self {
        Interview {
            id: Uuid::new_v4().to_string(),
            company: company.into(),
            vacancy_link: String::new(),
            hr_name: hr_name.into(),
            contact_telegram: None,
            contact_whats_app: None,
            contact_phone: None,
            created_at: Utc::now(),
            salary_from: None,
            salary_to: None,
            stages: Vec::new(),
            outcome: None,
        }
    }

    /// Check record invariants.
    ///
    /// # Errors
    /// Returns an error when both salary bounds are set and inverted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(from), Some(to)) = (self.salary_from, self.salary_to) {
            if from > to {
                return Err(ValidationError::InvalidSalaryRange { from, to });
            }
        }
        Ok(())
    }

    /// Append a stage to the history.
    pub fn add_stage(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }

    /// True while no terminal outcome is recorded.
    pub fn is_pending(&self) -> bool {
        self.outcome.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn new_record_is_pending() {
        let interview = Interview::new("Acme", "Jordan");
        assert!(interview.is_pending());
        assert!(interview.stages.is_empty());
        assert!(!interview.id.is_empty());
    }

    #[test]
    fn validate_accepts_ordered_salary_bounds() {
        let mut interview = Interview::new("Acme", "Jordan");
        interview.salary_from = Some(100_000);
        interview.salary_to = Some(130_000);
        assert!(interview.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_salary_bounds() {
        let mut interview = Interview::new("Acme", "Jordan");
        interview.salary_from = Some(130_000);
        interview.salary_to = Some(100_000);
        assert!(interview.validate().is_err());
    }

    #[test]
    fn validate_accepts_single_bound() {
        let mut interview = Interview::new("Acme", "Jordan");
        interview.salary_from = Some(130_000);
        assert!(interview.validate().is_ok());
    }

    #[test]
    fn outcome_parses_canonical_strings() {
        assert_eq!(Outcome::from_str("offer").unwrap(), Outcome::Offer);
        assert_eq!(Outcome::from_str("rejected").unwrap(), Outcome::Rejected);
        assert!(Outcome::from_str("ghosted").is_err());
        assert_eq!(Outcome::Offer.as_str(), "offer");
    }

    #[test]
    fn stages_keep_insertion_order() {
        let mut interview = Interview::new("Acme", "Jordan");
        interview.add_stage(Stage {
            name: "Screening".into(),
            date: None,
            description: String::new(),
        });
        interview.add_stage(Stage {
            name: "Tech interview".into(),
            date: Some(Utc::now()),
            description: "System design".into(),
        });
        assert_eq!(interview.stages.len(), 2);
        assert_eq!(interview.stages[0].name, "Screening");
        assert_eq!(interview.stages[1].name, "Tech interview");
    }
}
