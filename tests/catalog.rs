//! Tests for assembling catalogs through the public API.
use smartdata::catalog::build_catalog;
use smartdata::collaborator::{Collaborator, execute};
use smartdata::input::load_catalog;
use smartdata::run_config::{RunConfig, build_run_config};
use std::path::{Path, PathBuf};

/// Get the path to the bundled catalog.
fn get_catalog_dir() -> PathBuf {
    PathBuf::from("catalogs/sfbay_smart")
}

/// Counts the scenarios it is given
#[derive(Default)]
struct CountingCollaborator {
    calls: usize,
    scenarios: Vec<(u32, u32)>,
}

impl Collaborator for CountingCollaborator {
    fn make_plots(&mut self, config: RunConfig) -> anyhow::Result<()> {
        self.calls += 1;
        self.scenarios
            .extend(config.scenarios.iter().map(|record| (record.year, record.id)));
        Ok(())
    }
}

#[test]
fn test_bundled_catalog() {
    let (params, groups) = load_catalog(&get_catalog_dir()).unwrap();
    assert_eq!(params.run_name, "20thSep2019");
    assert_eq!(params.years, [2010, 2025, 2040]);

    let group_sizes: Vec<_> = groups.iter().map(|group| group.len()).collect();
    assert_eq!(group_sizes, [7, 5, 7]);

    let catalog = build_catalog(groups);
    assert_eq!(catalog.len(), 19);
    assert_eq!(catalog.years(), [2010, 2025, 2040]);
    assert!(catalog.iter().all(|record| record.enabled));

    let config = build_run_config(&params.run_name, Path::new("/tmp"), catalog);
    let mut collaborator = CountingCollaborator::default();
    execute(config, &mut collaborator).unwrap();
    assert_eq!(collaborator.calls, 1);
    assert_eq!(
        collaborator.scenarios[..8],
        [
            (2010, 1),
            (2010, 6),
            (2010, 7),
            (2010, 8),
            (2010, 9),
            (2010, 10),
            (2010, 11),
            (2025, 1)
        ]
    );
}
