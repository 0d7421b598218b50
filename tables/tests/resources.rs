use std::{fs, path::PathBuf};

use storm_genesis_core::{Basin, GenesisError};
use storm_genesis_tables::{
    GenesisMonthTable, GenesisRateTable, GenesisResources, ResourcePaths, MONTH_TABLE_FILE,
    RATE_TABLE_FILE,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "storm-genesis-tables-{}-{name}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create scratch directory");
    dir
}

#[test]
fn bundled_tables_cover_every_basin() {
    let resources = GenesisResources::load_bundled().expect("bundled tables load");
    for basin in Basin::ALL {
        let rate = resources.rates().rate(basin);
        assert!(rate > 0.0, "{basin} should have a positive genesis rate");
        let months = resources.months().months(basin);
        assert!(!months.is_empty(), "{basin} should list genesis months");
        assert!(months.iter().all(|month| (1..=12).contains(&month.get())));
    }
}

#[test]
fn bundled_paths_use_canonical_file_names() {
    let paths = ResourcePaths::bundled();
    assert!(paths.rate_table().ends_with(RATE_TABLE_FILE));
    assert!(paths.month_table().ends_with(MONTH_TABLE_FILE));
    assert_eq!(paths, ResourcePaths::default());
}

#[test]
fn missing_table_reports_its_path() {
    let dir = scratch_dir("missing");
    let paths = ResourcePaths::from_dir(&dir);
    match GenesisResources::load(&paths) {
        Err(GenesisError::ResourceLoad { path, .. }) => {
            assert_eq!(path, dir.join(RATE_TABLE_FILE));
        }
        other => panic!("expected a resource load error, got {other:?}"),
    }
}

#[test]
fn malformed_rate_table_is_fatal() {
    let dir = scratch_dir("malformed-rates");
    fs::write(dir.join(RATE_TABLE_FILE), "1.0 2.0 nope\n").expect("write rates");
    let error = GenesisRateTable::load(dir.join(RATE_TABLE_FILE)).expect_err("must fail");
    let message = error.to_string();
    assert!(message.contains(RATE_TABLE_FILE), "message: {message}");
    assert!(message.contains("nope"), "message: {message}");
}

#[test]
fn malformed_month_table_is_fatal() {
    let dir = scratch_dir("malformed-months");
    let path = dir.join(MONTH_TABLE_FILE);
    fs::write(&path, "[months]\n\"0\" = [1, 2]\n").expect("write months");
    assert!(matches!(
        GenesisMonthTable::load(&path),
        Err(GenesisError::ResourceLoad { .. })
    ));
}

#[test]
fn custom_directory_is_honoured() {
    let dir = scratch_dir("custom");
    fs::write(dir.join(RATE_TABLE_FILE), "1 2 3 4 5 6\n").expect("write rates");
    fs::write(
        dir.join(MONTH_TABLE_FILE),
        "[months]\n\"0\" = [1]\n\"1\" = [2]\n\"2\" = [3]\n\"3\" = [4]\n\"4\" = [5]\n\"5\" = [6]\n",
    )
    .expect("write months");

    let resources = GenesisResources::load(&ResourcePaths::from_dir(&dir)).expect("load");
    assert_eq!(resources.rates().rates(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    for basin in Basin::ALL {
        let months = resources.months().months(basin);
        assert_eq!(months.len(), 1);
        assert_eq!(usize::from(months[0].get()), basin.index() + 1);
    }
}
