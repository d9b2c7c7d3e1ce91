//! Building an index from layered settings.

use hyperlsh::{LshIndex, Settings};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_seeded_config_builds_reproducible_index() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("hyperlsh.toml");
    fs::write(
        &config_path,
        "[index]\ndimension = 8\nnum_tables = 3\nnum_projections = 5\nseed = 1234\n",
    )
    .unwrap();

    let settings = Settings::load_from(&config_path).unwrap();
    let first: LshIndex<()> = LshIndex::from_config(&settings.index).unwrap();
    let second: LshIndex<()> = LshIndex::from_config(&settings.index).unwrap();

    assert_eq!(first.dimension(), 8);
    assert_eq!(first.num_tables(), 3);
    assert_eq!(first.num_projections(), 5);
    assert!(first.projections().eq(second.projections()));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("hyperlsh.toml");
    fs::write(&config_path, "[index]\ndimension = 8\nnum_projections = 80\n").unwrap();

    let settings = Settings::load_from(&config_path).unwrap();
    assert!(settings.index.validate().is_err());

    let err = LshIndex::<()>::from_config(&settings.index).unwrap_err();
    assert_eq!(err.status_code(), "INVALID_CONFIG");
}
