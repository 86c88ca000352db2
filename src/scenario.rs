//! Scenarios are individual simulation runs whose outputs are handed on for plotting.
use anyhow::{Result, ensure};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};
use std::rc::Rc;
use strum::EnumIter;

/// A short, machine-friendly name for a scenario (e.g. "a_lt").
///
/// Used downstream for naming files and columns.
#[derive(Clone, Debug, Display, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSlug(pub Rc<str>);

impl From<&str> for ScenarioSlug {
    fn from(s: &str) -> Self {
        Self(Rc::from(s))
    }
}

impl From<String> for ScenarioSlug {
    fn from(s: String) -> Self {
        Self(Rc::from(s))
    }
}

/// The policy/technology bundle a scenario belongs to.
///
/// Displayed using its label (e.g. "base").
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum PolicyGroup {
    /// The baseline and base-fleet variants
    #[string = "base"]
    Base,
    /// Bundle A
    #[string = "a"]
    A,
    /// Bundle B
    #[string = "b"]
    B,
    /// Bundle C
    #[string = "c"]
    C,
}

/// Whether a record takes part in the catalog unless told otherwise
fn default_enabled() -> bool {
    true
}

/// A single simulation run, identified by its metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    /// Stable numeric identifier
    pub id: u32,
    /// The analysis year (e.g. 2025)
    pub year: u32,
    /// The number of years the scenario projects forward
    pub horizon_span: u32,
    /// Policy/technology bundle
    pub group: PolicyGroup,
    /// Human-readable technology variant (e.g. "High Tech")
    pub tech_label: String,
    /// Short name for the scenario
    pub slug: ScenarioSlug,
    /// Where the simulation output for this scenario can be found.
    ///
    /// This is never checked or modified here: resolving it is the job of whoever consumes the
    /// catalog.
    pub source_uri: String,
    /// Whether the record is included in the catalog
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// An ordered sequence of scenarios which share the same analysis year.
///
/// The order of the records determines the order of series in downstream plots.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioGroup {
    year: u32,
    records: Vec<ScenarioRecord>,
}

impl ScenarioGroup {
    /// Create a new [`ScenarioGroup`].
    ///
    /// Returns an error if any of `records` is for a year other than `year`.
    pub fn new(year: u32, records: Vec<ScenarioRecord>) -> Result<Self> {
        for record in &records {
            ensure!(
                record.year == year,
                "Scenario {} ({}) has year {}, but belongs to the group for {year}",
                record.id,
                record.slug,
                record.year
            );
        }

        Ok(Self { year, records })
    }

    /// The analysis year shared by all scenarios in this group
    pub fn year(&self) -> u32 {
        self.year
    }

    /// Iterate over the scenarios in this group, in order
    pub fn iter(&self) -> impl Iterator<Item = &ScenarioRecord> {
        self.records.iter()
    }

    /// The number of scenarios in this group
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether this group has no scenarios
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop disabled scenarios, returning those which were removed.
    ///
    /// The relative order of the remaining scenarios is unchanged.
    pub fn retain_enabled(&mut self) -> Vec<ScenarioRecord> {
        let (enabled, disabled): (Vec<_>, Vec<_>) =
            self.records.drain(..).partition(|record| record.enabled);
        self.records = enabled;

        disabled
    }
}

impl IntoIterator for ScenarioGroup {
    type Item = ScenarioRecord;
    type IntoIter = std::vec::IntoIter<ScenarioRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, scenario};
    use itertools::Itertools;
    use rstest::rstest;

    #[rstest]
    fn test_scenario_group_new(scenario: ScenarioRecord) {
        let group = ScenarioGroup::new(2010, vec![scenario.clone()]).unwrap();
        assert_eq!(group.year(), 2010);
        assert_eq!(group.len(), 1);
        assert_eq!(group.iter().next(), Some(&scenario));
    }

    #[test]
    fn test_scenario_group_new_empty() {
        let group = ScenarioGroup::new(2025, Vec::new()).unwrap();
        assert!(group.is_empty());
    }

    #[rstest]
    fn test_scenario_group_new_wrong_year(scenario: ScenarioRecord) {
        assert_error!(
            ScenarioGroup::new(2040, vec![scenario]),
            "Scenario 1 (baseline) has year 2010, but belongs to the group for 2040"
        );
    }

    #[rstest]
    fn test_retain_enabled(scenario: ScenarioRecord) {
        let records = (1..=4)
            .map(|id| ScenarioRecord {
                id,
                enabled: id != 2,
                ..scenario.clone()
            })
            .collect_vec();
        let mut group = ScenarioGroup::new(2010, records).unwrap();

        let disabled = group.retain_enabled();
        assert_eq!(disabled.iter().map(|r| r.id).collect_vec(), [2]);
        assert_eq!(group.iter().map(|r| r.id).collect_vec(), [1, 3, 4]);
    }

    #[rstest]
    #[case("base", PolicyGroup::Base)]
    #[case("a", PolicyGroup::A)]
    #[case("b", PolicyGroup::B)]
    #[case("c", PolicyGroup::C)]
    fn test_policy_group_from_toml(#[case] label: &str, #[case] expected: PolicyGroup) {
        #[derive(Deserialize)]
        struct Wrapper {
            group: PolicyGroup,
        }

        let wrapper: Wrapper = toml::from_str(&format!("group = \"{label}\"")).unwrap();
        assert_eq!(wrapper.group, expected);
    }

    #[rstest]
    #[case(PolicyGroup::Base, "base")]
    #[case(PolicyGroup::A, "a")]
    #[case(PolicyGroup::C, "c")]
    fn test_policy_group_display(#[case] group: PolicyGroup, #[case] expected: &str) {
        assert_eq!(group.to_string(), expected);
    }

    #[test]
    fn test_policy_group_invalid() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Wrapper {
            group: PolicyGroup,
        }

        assert!(toml::from_str::<Wrapper>("group = \"d\"").is_err());
    }
}
