use clap::Subcommand;
use hirelog_core::error::CoreError;
use hirelog_core::storage::Database;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Print outcome counts as JSON
    Show,
}

pub fn run(action: StatsAction) -> Result<(), CoreError> {
    let db = Database::open()?;
    match action {
        StatsAction::Show => {
            let stats = db.outcome_stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
