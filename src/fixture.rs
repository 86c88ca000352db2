//! Fixtures for tests
use crate::collaborator::Collaborator;
use crate::run_config::RunConfig;
use crate::scenario::{PolicyGroup, ScenarioGroup, ScenarioRecord};
use anyhow::{Result, bail};
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn scenario() -> ScenarioRecord {
    ScenarioRecord {
        id: 1,
        year: 2010,
        horizon_span: 15,
        group: PolicyGroup::Base,
        tech_label: "Base".into(),
        slug: "baseline".into(),
        source_uri: "https://example.com/output/sfbay-smart-base-2010".into(),
        enabled: true,
    }
}

#[fixture]
pub fn scenario_groups(scenario: ScenarioRecord) -> Vec<ScenarioGroup> {
    let a_lt = ScenarioRecord {
        id: 6,
        group: PolicyGroup::A,
        tech_label: "Low Tech".into(),
        slug: "a_lt".into(),
        source_uri: "https://example.com/output/sfbay-smart-a-lt-2010".into(),
        ..scenario.clone()
    };
    let baseline_2025 = ScenarioRecord {
        year: 2025,
        source_uri: "https://example.com/output/sfbay-smart-base-2025".into(),
        ..scenario.clone()
    };

    vec![
        ScenarioGroup::new(2010, vec![scenario, a_lt]).unwrap(),
        ScenarioGroup::new(2025, vec![baseline_2025]).unwrap(),
    ]
}

/// A collaborator which keeps hold of every config it is given
#[derive(Default)]
pub struct RecordingCollaborator {
    pub calls: Vec<RunConfig>,
}

impl Collaborator for RecordingCollaborator {
    fn make_plots(&mut self, config: RunConfig) -> Result<()> {
        self.calls.push(config);
        Ok(())
    }
}

/// A collaborator which always fails
pub struct FailingCollaborator;

impl Collaborator for FailingCollaborator {
    fn make_plots(&mut self, config: RunConfig) -> Result<()> {
        bail!("Could not fetch outputs for {}", config.run_name)
    }
}
