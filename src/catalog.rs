//! The catalog is the full, ordered collection of scenarios considered in a single run.
use crate::scenario::{PolicyGroup, ScenarioGroup, ScenarioRecord};
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::HashSet;
use strum::IntoEnumIterator;

/// The ordered collection of scenarios for a run.
///
/// Scenarios appear in the order in which their groups were supplied to [`build_catalog`], with
/// the order within each group preserved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog(Vec<ScenarioRecord>);

impl Catalog {
    /// Iterate over the scenarios in the catalog, in order
    pub fn iter(&self) -> impl Iterator<Item = &ScenarioRecord> {
        self.0.iter()
    }

    /// The number of scenarios in the catalog
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the catalog contains no scenarios
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The distinct years covered by the catalog, in order of first appearance
    pub fn years(&self) -> Vec<u32> {
        self.iter().map(|record| record.year).unique().collect()
    }

    /// The number of scenarios in each policy group
    pub fn count_by_group(&self) -> IndexMap<PolicyGroup, usize> {
        PolicyGroup::iter()
            .map(|group| {
                let count = self.iter().filter(|record| record.group == group).count();
                (group, count)
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ScenarioRecord;
    type IntoIter = std::slice::Iter<'a, ScenarioRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Concatenate scenario groups into a catalog.
///
/// All the records of one group come before any record of the next and the order within groups
/// is kept. Nothing is sorted, deduplicated or checked.
pub fn build_catalog<I>(groups: I) -> Catalog
where
    I: IntoIterator<Item = ScenarioGroup>,
{
    Catalog(groups.into_iter().flatten().collect())
}

/// Partition scenarios into groups, one per year in `years`.
///
/// Groups are returned in the order of `years`; records keep their relative order. A year with
/// no records yields an empty group.
///
/// # Arguments
///
/// * `records` - The scenarios to group
/// * `years` - The analysis years, in the order the groups should appear
///
/// # Returns
///
/// The groups, or an error if a record's year is not in `years`.
pub fn group_by_year<I>(records: I, years: &[u32]) -> Result<Vec<ScenarioGroup>>
where
    I: IntoIterator<Item = ScenarioRecord>,
{
    let mut by_year: IndexMap<u32, Vec<ScenarioRecord>> =
        years.iter().map(|year| (*year, Vec::new())).collect();
    for record in records {
        let year = record.year;
        by_year
            .get_mut(&year)
            .with_context(|| {
                format!(
                    "Scenario {} ({}) is for year {year}, which is not one of the run's years",
                    record.id, record.slug
                )
            })?
            .push(record);
    }

    by_year
        .into_iter()
        .map(|(year, records)| ScenarioGroup::new(year, records))
        .try_collect()
}

/// Check that no two scenarios in the same year share an ID.
///
/// IDs are reused across analysis years (e.g. the baseline is always 1), so only the combination
/// of year and ID needs to be unique.
pub fn check_scenario_ids_unique<'a, I>(records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a ScenarioRecord>,
{
    let mut seen = HashSet::new();
    for record in records {
        ensure!(
            seen.insert((record.year, record.id)),
            "Duplicate scenario ID {} for year {}",
            record.id,
            record.year
        );
    }

    Ok(())
}
