//! Code for reading scenario records from a CSV file.
use super::{input_err_msg, read_csv};
use crate::scenario::ScenarioRecord;
use anyhow::{Context, Result, ensure};
use std::path::Path;

const SCENARIOS_FILE_NAME: &str = "scenarios.csv";

/// Check the numeric fields of a scenario record
fn check_scenario(record: &ScenarioRecord) -> Result<()> {
    ensure!(record.id > 0, "Scenario IDs must be greater than zero");
    ensure!(
        record.horizon_span > 0,
        "Scenario {} ({}) has a horizon span of zero",
        record.id,
        record.slug
    );

    Ok(())
}

/// Reads scenario records from a CSV file.
///
/// Disabled records are returned too; they are filtered out once the records are grouped. The
/// `source_uri` field is read as-is.
///
/// # Arguments
///
/// * `catalog_dir` - Folder containing catalog files
///
/// # Returns
///
/// The records in file order, or an error
pub fn read_scenarios(catalog_dir: &Path) -> Result<Vec<ScenarioRecord>> {
    let file_path = catalog_dir.join(SCENARIOS_FILE_NAME);
    let records: Vec<ScenarioRecord> = read_csv(&file_path)?;
    for record in &records {
        check_scenario(record).with_context(|| input_err_msg(&file_path))?;
    }

    Ok(records)
}
