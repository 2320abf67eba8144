//! SQLite-based interview storage.
//!
//! Provides persistent storage for:
//! - Interview records and their stage history
//! - Outcome statistics
//! - Key-value store for application state (session user id, CLI
//!   notification snapshot)

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DatabaseError;
use crate::interview::{Interview, Outcome, Stage};

use super::data_dir;

/// Outcome counts across all records.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutcomeStats {
    pub total: u64,
    pub offers: u64,
    pub rejections: u64,
    pub pending: u64,
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Format outcome for database storage
fn format_outcome(outcome: Outcome) -> &'static str {
    outcome.as_str()
}

/// Parse outcome from database string
fn parse_outcome(outcome_str: &str) -> Option<Outcome> {
    match outcome_str {
        "offer" => Some(Outcome::Offer),
        "rejected" => Some(Outcome::Rejected),
        _ => None,
    }
}

/// Parse datetime from RFC3339 string with fallback to current time
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Build an Interview (without stages) from a database row
fn row_to_interview(row: &rusqlite::Row) -> Result<Interview, rusqlite::Error> {
    let created_at_str: String = row.get(7)?;
    let outcome_str: Option<String> = row.get(10)?;

    Ok(Interview {
        id: row.get(0)?,
        company: row.get(1)?,
        vacancy_link: row.get(2)?,
        hr_name: row.get(3)?,
        contact_telegram: row.get(4)?,
        contact_whats_app: row.get(5)?,
        contact_phone: row.get(6)?,
        created_at: parse_datetime_fallback(&created_at_str),
        salary_from: row.get(8)?,
        salary_to: row.get(9)?,
        stages: Vec::new(),
        outcome: outcome_str.as_deref().and_then(parse_outcome),
    })
}

const INTERVIEW_COLUMNS: &str = "id, company, vacancy_link, hr_name, contact_telegram, \
     contact_whats_app, contact_phone, created_at, salary_from, salary_to, outcome";

/// SQLite database for interview storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/hirelog.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()?.join("hirelog.db");
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS interviews (
                id                TEXT PRIMARY KEY,
                company           TEXT NOT NULL,
                vacancy_link      TEXT NOT NULL DEFAULT '',
                hr_name           TEXT NOT NULL DEFAULT '',
                contact_telegram  TEXT,
                contact_whats_app TEXT,
                contact_phone     TEXT,
                created_at        TEXT NOT NULL,
                salary_from       INTEGER,
                salary_to         INTEGER,
                outcome           TEXT
            );

            CREATE TABLE IF NOT EXISTS stages (
                interview_id  TEXT NOT NULL,
                seq           INTEGER NOT NULL,
                name          TEXT NOT NULL,
                date          TEXT,
                description   TEXT NOT NULL DEFAULT '',
                PRIMARY KEY (interview_id, seq)
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            -- Indexes for the list and statistics queries
            CREATE INDEX IF NOT EXISTS idx_interviews_created_at ON interviews(created_at);
            CREATE INDEX IF NOT EXISTS idx_interviews_outcome ON interviews(outcome);",
        )?;
        Ok(())
    }

    // ── Interview CRUD ───────────────────────────────────────────────

    /// Insert a new record with its stage history.
    ///
    /// # Errors
    /// Returns an error if the insert fails (including duplicate ids).
    pub fn create_interview(&self, interview: &Interview) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO interviews (id, company, vacancy_link, hr_name, contact_telegram,
                 contact_whats_app, contact_phone, created_at, salary_from, salary_to, outcome)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                interview.id,
                interview.company,
                interview.vacancy_link,
                interview.hr_name,
                interview.contact_telegram,
                interview.contact_whats_app,
                interview.contact_phone,
                interview.created_at.to_rfc3339(),
                interview.salary_from,
                interview.salary_to,
                interview.outcome.map(format_outcome),
            ],
        )?;
        self.insert_stages(&interview.id, &interview.stages)?;
        debug!(id = %interview.id, company = %interview.company, "interview created");
        Ok(())
    }

    /// Fetch one record with its stages.
    pub fn get_interview(&self, id: &str) -> Result<Option<Interview>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INTERVIEW_COLUMNS} FROM interviews WHERE id = ?1"
        ))?;
        let interview = stmt
            .query_row(params![id], row_to_interview)
            .optional()?;

        match interview {
            Some(mut interview) => {
                interview.stages = self.load_stages(id)?;
                Ok(Some(interview))
            }
            None => Ok(None),
        }
    }

    /// List all records, newest first, stages included.
    pub fn list_interviews(&self) -> Result<Vec<Interview>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INTERVIEW_COLUMNS} FROM interviews ORDER BY created_at DESC"
        ))?;
        let rows = stmt.query_map([], row_to_interview)?;

        let mut interviews = Vec::new();
        for row in rows {
            let mut interview = row?;
            interview.stages = self.load_stages(&interview.id)?;
            interviews.push(interview);
        }
        Ok(interviews)
    }

    /// Update a record in place, replacing its stage history.
    ///
    /// Returns false when no record with this id exists.
    pub fn update_interview(&self, interview: &Interview) -> Result<bool, DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE interviews
             SET company = ?2, vacancy_link = ?3, hr_name = ?4, contact_telegram = ?5,
                 contact_whats_app = ?6, contact_phone = ?7, salary_from = ?8,
                 salary_to = ?9, outcome = ?10
             WHERE id = ?1",
            params![
                interview.id,
                interview.company,
                interview.vacancy_link,
                interview.hr_name,
                interview.contact_telegram,
                interview.contact_whats_app,
                interview.contact_phone,
                interview.salary_from,
                interview.salary_to,
                interview.outcome.map(format_outcome),
            ],
        )?;
        if changed == 0 {
            return Ok(false);
        }
        self.conn.execute(
            "DELETE FROM stages WHERE interview_id = ?1",
            params![interview.id],
        )?;
        self.insert_stages(&interview.id, &interview.stages)?;
        Ok(true)
    }

    /// Record the terminal outcome. Returns false when the id is unknown.
    pub fn set_outcome(&self, id: &str, outcome: Outcome) -> Result<bool, DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE interviews SET outcome = ?2 WHERE id = ?1",
            params![id, format_outcome(outcome)],
        )?;
        Ok(changed > 0)
    }

    /// Delete a record and its stages. Returns false when the id is unknown.
    pub fn delete_interview(&self, id: &str) -> Result<bool, DatabaseError> {
        self.conn
            .execute("DELETE FROM stages WHERE interview_id = ?1", params![id])?;
        let changed = self
            .conn
            .execute("DELETE FROM interviews WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    // ── Statistics ───────────────────────────────────────────────────

    pub fn outcome_stats(&self) -> Result<OutcomeStats, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT COALESCE(outcome, 'pending'), COUNT(*)
             FROM interviews
             GROUP BY outcome",
        )?;

        let mut stats = OutcomeStats::default();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?))
        })?;

        for row in rows {
            let (outcome, count) = row?;
            stats.total += count;
            match outcome.as_str() {
                "offer" => stats.offers += count,
                "rejected" => stats.rejections += count,
                _ => stats.pending += count,
            }
        }
        Ok(stats)
    }

    // ── Key-value store ──────────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let value = stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn insert_stages(&self, interview_id: &str, stages: &[Stage]) -> Result<(), DatabaseError> {
        for (seq, stage) in stages.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO stages (interview_id, seq, name, date, description)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    interview_id,
                    seq as i64,
                    stage.name,
                    stage.date.map(|d| d.to_rfc3339()),
                    stage.description,
                ],
            )?;
        }
        Ok(())
    }

    fn load_stages(&self, interview_id: &str) -> Result<Vec<Stage>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, date, description FROM stages
             WHERE interview_id = ?1 ORDER BY seq",
        )?;
        let rows = stmt.query_map(params![interview_id], |row| {
            let date_str: Option<String> = row.get(1)?;
            Ok(Stage {
                name: row.get(0)?,
                date: date_str.as_deref().map(parse_datetime_fallback),
                description: row.get(2)?,
            })
        })?;

        let mut stages = Vec::new();
        for row in rows {
            stages.push(row?);
        }
        Ok(stages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_interview() -> Interview {
        let mut interview = Interview::new("Acme", "Jordan");
        interview.vacancy_link = "https://acme.example/jobs/42".into();
        interview.contact_phone = Some("(415) 555-1234".into());
        interview.salary_from = Some(100_000);
        interview.salary_to = Some(130_000);
        interview.add_stage(Stage {
            name: "Screening".into(),
            date: None,
            description: String::new(),
        });
        interview
    }

    #[test]
    fn create_and_get_roundtrip() {
        let db = Database::open_memory().unwrap();
        let interview = sample_interview();
        db.create_interview(&interview).unwrap();

        let loaded = db.get_interview(&interview.id).unwrap().unwrap();
        assert_eq!(loaded.company, "Acme");
        assert_eq!(loaded.contact_phone.as_deref(), Some("(415) 555-1234"));
        assert_eq!(loaded.salary_to, Some(130_000));
        assert_eq!(loaded.stages.len(), 1);
        assert!(loaded.outcome.is_none());
    }

    #[test]
    fn get_unknown_id_returns_none() {
        let db = Database::open_memory().unwrap();
        assert!(db.get_interview("missing").unwrap().is_none());
    }

    #[test]
    fn update_replaces_stages() {
        let db = Database::open_memory().unwrap();
        let mut interview = sample_interview();
        db.create_interview(&interview).unwrap();

        interview.add_stage(Stage {
            name: "Tech interview".into(),
            date: Some(Utc::now()),
            description: "System design".into(),
        });
        interview.salary_to = Some(140_000);
        assert!(db.update_interview(&interview).unwrap());

        let loaded = db.get_interview(&interview.id).unwrap().unwrap();
        assert_eq!(loaded.stages.len(), 2);
        assert_eq!(loaded.stages[1].name, "Tech interview");
        assert_eq!(loaded.salary_to, Some(140_000));
    }

    #[test]
    fn set_outcome_and_stats() {
        let db = Database::open_memory().unwrap();
        let offered = sample_interview();
        let rejected = Interview::new("Globex", "Sam");
        let pending = Interview::new("Initech", "Kim");
        db.create_interview(&offered).unwrap();
        db.create_interview(&rejected).unwrap();
        db.create_interview(&pending).unwrap();

        assert!(db.set_outcome(&offered.id, Outcome::Offer).unwrap());
        assert!(db.set_outcome(&rejected.id, Outcome::Rejected).unwrap());
        assert!(!db.set_outcome("missing", Outcome::Offer).unwrap());

        let stats = db.outcome_stats().unwrap();
        assert_eq!(
            stats,
            OutcomeStats {
                total: 3,
                offers: 1,
                rejections: 1,
                pending: 1,
            }
        );
    }

    #[test]
    fn delete_removes_record_and_stages() {
        let db = Database::open_memory().unwrap();
        let interview = sample_interview();
        db.create_interview(&interview).unwrap();

        assert!(db.delete_interview(&interview.id).unwrap());
        assert!(!db.delete_interview(&interview.id).unwrap());
        assert!(db.get_interview(&interview.id).unwrap().is_none());

        let orphaned: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM stages", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphaned, 0);
    }

    #[test]
    fn list_orders_newest_first() {
        let db = Database::open_memory().unwrap();
        let mut older = Interview::new("Acme", "Jordan");
        older.created_at = Utc::now() - chrono::Duration::days(2);
        let newer = Interview::new("Globex", "Sam");
        db.create_interview(&older).unwrap();
        db.create_interview(&newer).unwrap();

        let all = db.list_interviews().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].company, "Globex");
        assert_eq!(all[1].company, "Acme");
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }
}
