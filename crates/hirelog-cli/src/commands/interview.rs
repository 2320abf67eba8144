//! Interview record management commands for CLI.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use hirelog_core::error::{CoreError, ValidationError};
use hirelog_core::interview::{Interview, Outcome, Stage};
use hirelog_core::phone::format_phone;
use hirelog_core::storage::Database;

#[derive(Subcommand)]
pub enum InterviewAction {
    /// Create a new interview record
    Add {
        /// Company name
        company: String,
        /// Name of the HR contact
        #[arg(long, default_value = "")]
        hr_name: String,
        /// Link to the vacancy posting
        #[arg(long)]
        vacancy_link: Option<String>,
        /// Telegram handle of the contact
        #[arg(long)]
        telegram: Option<String>,
        /// WhatsApp number of the contact
        #[arg(long)]
        whats_app: Option<String>,
        /// Phone number of the contact (stored masked)
        #[arg(long)]
        phone: Option<String>,
        /// Lower salary bound
        #[arg(long)]
        salary_from: Option<u32>,
        /// Upper salary bound
        #[arg(long)]
        salary_to: Option<u32>,
    },
    /// List interview records, newest first
    List,
    /// Get record details
    Show {
        /// Record ID
        id: String,
    },
    /// Update a record
    Update {
        /// Record ID
        id: String,
        /// New company name
        #[arg(long)]
        company: Option<String>,
        /// New HR contact name
        #[arg(long)]
        hr_name: Option<String>,
        /// New vacancy link
        #[arg(long)]
        vacancy_link: Option<String>,
        /// New Telegram handle
        #[arg(long)]
        telegram: Option<String>,
        /// New WhatsApp number
        #[arg(long)]
        whats_app: Option<String>,
        /// New phone number (stored masked)
        #[arg(long)]
        phone: Option<String>,
        /// New lower salary bound
        #[arg(long)]
        salary_from: Option<u32>,
        /// New upper salary bound
        #[arg(long)]
        salary_to: Option<u32>,
    },
    /// Record the terminal outcome
    Outcome {
        /// Record ID
        id: String,
        /// "offer" or "rejected"
        outcome: String,
    },
    /// Append a stage to a record
    StageAdd {
        /// Record ID
        id: String,
        /// Stage name
        name: String,
        /// Stage date as an RFC 3339 timestamp
        #[arg(long)]
        date: Option<String>,
        /// Stage description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a record
    Remove {
        /// Record ID
        id: String,
    },
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ValidationError::InvalidValue {
            field: "date".into(),
            message: format!("{e} (expected RFC 3339, e.g. 2026-08-06T10:00:00Z)"),
        })
}

pub fn run(action: InterviewAction) -> Result<(), CoreError> {
    let db = Database::open()?;

    match action {
        InterviewAction::Add {
            company,
            hr_name,
            vacancy_link,
            telegram,
            whats_app,
            phone,
            salary_from,
            salary_to,
        } => {
            let mut interview = Interview::new(company, hr_name);
            if let Some(link) = vacancy_link {
                interview.vacancy_link = link;
            }
            interview.contact_telegram = telegram;
            interview.contact_whats_app = whats_app;
            interview.contact_phone = phone.map(|p| format_phone(&p));
            interview.salary_from = salary_from;
            interview.salary_to = salary_to;
            interview.validate()?;

            db.create_interview(&interview)?;
            println!("Interview created: {}", interview.id);
            println!("{}", serde_json::to_string_pretty(&interview)?);
        }
        InterviewAction::List => {
            let interviews = db.list_interviews()?;
            println!("{}", serde_json::to_string_pretty(&interviews)?);
        }
        InterviewAction::Show { id } => match db.get_interview(&id)? {
            Some(interview) => println!("{}", serde_json::to_string_pretty(&interview)?),
            None => println!("Interview not found: {id}"),
        },
        InterviewAction::Update {
            id,
            company,
            hr_name,
            vacancy_link,
            telegram,
            whats_app,
            phone,
            salary_from,
            salary_to,
        } => {
            let mut interview = db.get_interview(&id)?.ok_or_else(|| {
                CoreError::Validation(ValidationError::InvalidValue {
                    field: "id".into(),
                    message: format!("Interview not found: {id}"),
                })
            })?;

            if let Some(c) = company {
                interview.company = c;
            }
            if let Some(h) = hr_name {
                interview.hr_name = h;
            }
            if let Some(v) = vacancy_link {
                interview.vacancy_link = v;
            }
            if let Some(t) = telegram {
                interview.contact_telegram = Some(t);
            }
            if let Some(w) = whats_app {
                interview.contact_whats_app = Some(w);
            }
            if let Some(p) = phone {
                interview.contact_phone = Some(format_phone(&p));
            }
            if let Some(s) = salary_from {
                interview.salary_from = Some(s);
            }
            if let Some(s) = salary_to {
                interview.salary_to = Some(s);
            }
            interview.validate()?;

            db.update_interview(&interview)?;
            println!("Interview updated:");
            println!("{}", serde_json::to_string_pretty(&interview)?);
        }
        InterviewAction::Outcome { id, outcome } => {
            let outcome: Outcome = outcome.parse()?;
            if db.set_outcome(&id, outcome)? {
                println!("Outcome recorded: {} -> {}", id, outcome.as_str());
            } else {
                println!("Interview not found: {id}");
            }
        }
        InterviewAction::StageAdd {
            id,
            name,
            date,
            description,
        } => {
            let mut interview = db.get_interview(&id)?.ok_or_else(|| {
                CoreError::Validation(ValidationError::InvalidValue {
                    field: "id".into(),
                    message: format!("Interview not found: {id}"),
                })
            })?;

            let date = date.as_deref().map(parse_date).transpose()?;
            interview.add_stage(Stage {
                name,
                date,
                description,
            });
            db.update_interview(&interview)?;
            println!("Stage added:");
            println!("{}", serde_json::to_string_pretty(&interview)?);
        }
        InterviewAction::Remove { id } => {
            if db.delete_interview(&id)? {
                println!("Interview deleted: {id}");
            } else {
                println!("Interview not found: {id}");
            }
        }
    }
    Ok(())
}
