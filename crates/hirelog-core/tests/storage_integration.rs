//! End-to-end storage tests against a temporary data directory.
//!
//! All tests in this binary share one `HIRELOG_DATA_DIR` so the env var is
//! set exactly once; records use unique ids, so parallel tests don't step
//! on each other.

use std::sync::OnceLock;

use hirelog_core::interview::{Interview, Outcome, Stage};
use hirelog_core::storage::{data_dir, Config, Database};

static DATA_DIR: OnceLock<tempfile::TempDir> = OnceLock::new();

fn init_data_dir() {
    let dir = DATA_DIR.get_or_init(|| tempfile::tempdir().expect("create temp data dir"));
    std::env::set_var("HIRELOG_DATA_DIR", dir.path());
}

#[test]
fn interview_lifecycle() {
    init_data_dir();
    let db = Database::open().unwrap();

    let mut interview = Interview::new("Acme", "Jordan");
    interview.vacancy_link = "https://acme.example/jobs/42".into();
    interview.contact_phone = Some("(415) 555-1234".into());
    interview.salary_from = Some(100_000);
    interview.salary_to = Some(130_000);
    db.create_interview(&interview).unwrap();

    // Append stages the way the application does: load, mutate, update.
    let mut loaded = db.get_interview(&interview.id).unwrap().unwrap();
    loaded.add_stage(Stage {
        name: "Screening".into(),
        date: None,
        description: String::new(),
    });
    loaded.add_stage(Stage {
        name: "Tech interview".into(),
        date: Some(chrono::Utc::now()),
        description: "System design".into(),
    });
    assert!(db.update_interview(&loaded).unwrap());

    let loaded = db.get_interview(&interview.id).unwrap().unwrap();
    assert_eq!(loaded.stages.len(), 2);
    assert_eq!(loaded.stages[0].name, "Screening");
    assert!(loaded.is_pending());

    assert!(db.set_outcome(&interview.id, Outcome::Offer).unwrap());
    let loaded = db.get_interview(&interview.id).unwrap().unwrap();
    assert_eq!(loaded.outcome, Some(Outcome::Offer));

    let stats = db.outcome_stats().unwrap();
    assert!(stats.total >= 1);
    assert!(stats.offers >= 1);

    assert!(db.delete_interview(&interview.id).unwrap());
    assert!(db.get_interview(&interview.id).unwrap().is_none());
}

#[test]
fn config_defaults_then_roundtrip() {
    init_data_dir();

    let config = Config::load().unwrap();
    assert_eq!(config.session.user_id, "ad");
    assert_eq!(config.notifications.dismiss_after_ms, 3000);

    // The first load wrote the file; it must parse back.
    let reloaded = Config::load().unwrap();
    assert_eq!(reloaded.session.user_id, config.session.user_id);
}

#[test]
fn data_dir_honors_override() {
    init_data_dir();
    let dir = data_dir().unwrap();
    assert_eq!(dir, DATA_DIR.get().unwrap().path());
}

#[test]
fn kv_persists_across_connections() {
    init_data_dir();
    {
        let db = Database::open().unwrap();
        db.kv_set("session.user_id", "ad").unwrap();
    }
    let db = Database::open().unwrap();
    assert_eq!(db.kv_get("session.user_id").unwrap().unwrap(), "ad");
}
