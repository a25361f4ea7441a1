use std::path::PathBuf;

use assert_matches::assert_matches;

use sra_runinfo_harvester::error::HarvestError;
use sra_runinfo_harvester::input::read_bioprojects;

fn write_temp(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bioprojects.csv");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn reads_single_column_file() {
    let (_dir, path) = write_temp("PRJNA123\nPRJNA456\n");
    let projects = read_bioprojects(&path).unwrap();
    let ids: Vec<&str> = projects.iter().map(|p| p.as_str()).collect();
    assert_eq!(ids, ["PRJNA123", "PRJNA456"]);
}

#[test]
fn takes_first_field_and_ignores_the_rest() {
    let (_dir, path) = write_temp("PRJNA123,mouse liver study\nPRJNA456,another study,extra\n");
    let projects = read_bioprojects(&path).unwrap();
    let ids: Vec<&str> = projects.iter().map(|p| p.as_str()).collect();
    assert_eq!(ids, ["PRJNA123", "PRJNA456"]);
}

#[test]
fn unquotes_first_field() {
    let (_dir, path) = write_temp("\"PRJNA123\",\"study, with comma\"\n");
    let projects = read_bioprojects(&path).unwrap();
    assert_eq!(projects[0].as_str(), "PRJNA123");
}

#[test]
fn empty_file_yields_no_projects() {
    let (_dir, path) = write_temp("");
    let projects = read_bioprojects(&path).unwrap();
    assert!(projects.is_empty());
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.csv");
    let err = read_bioprojects(&path).unwrap_err();
    assert_matches!(err, HarvestError::InputRead(reported) if reported == path);
}
