use crate::export::writer::remove_leftover;
use crate::export::{
    ExportTable, JobId, PROGRESS_EVERY, artifact_stem, compress_csv, progress_percent, write_csv,
};
use chrono::{Local, TimeZone};
use std::fs::File;
use std::io::Read;
use tempfile::tempdir;
use zip::ZipArchive;

fn table(rows: usize) -> ExportTable {
    ExportTable {
        headers: vec!["File Name".into(), "Descrizione".into()],
        rows: (0..rows)
            .map(|i| vec![format!("N{i}.log"), format!("title {i}")])
            .collect(),
    }
}

#[test]
fn percent_is_clamped_between_2_and_99() {
    assert_eq!(progress_percent(0, 1000), 2);
    assert_eq!(progress_percent(1, 1000), 2);
    assert_eq!(progress_percent(500, 1000), 50);
    assert_eq!(progress_percent(1000, 1000), 99);
    assert_eq!(progress_percent(0, 0), 2);
}

#[test]
fn stem_has_base_timestamp_and_short_id() {
    let id = JobId::new();
    let now = Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();

    let stem = artifact_stem("LGA", now, &id);

    assert_eq!(stem, format!("LGA_20240506_070809_{}", id.short()));
}

#[test]
fn progress_reported_every_200_rows_and_at_the_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let mut reports = Vec::new();

    write_csv(&path, &table(450), |done, total| reports.push((done, total))).unwrap();

    assert_eq!(PROGRESS_EVERY, 200);
    assert_eq!(reports, vec![(200, 450), (400, 450), (450, 450)]);
}

#[test]
fn header_only_table_reports_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    let mut calls = 0;

    write_csv(&path, &table(0), |_, _| calls += 1).unwrap();

    assert_eq!(calls, 0);
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.trim_end(), "File Name,Descrizione");
}

#[test]
fn archive_round_trips_quoted_fields() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("LGA_x.csv");
    let zip_path = dir.path().join("LGA_x.zip");
    let mut input = table(3);
    input.rows[1][1] = "Link down, \"hard\"\nsecond line".into();

    write_csv(&csv_path, &input, |_, _| {}).unwrap();
    compress_csv(&csv_path, &zip_path).unwrap();

    assert!(!csv_path.exists());

    let mut archive = ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 1);

    let mut entry = archive.by_index(0).unwrap();
    assert_eq!(entry.name(), "LGA_x.csv");
    let mut text = String::new();
    entry.read_to_string(&mut text).unwrap();

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();

    assert_eq!(headers, input.headers);
    assert_eq!(rows, input.rows);
}

#[test]
fn failed_packing_leaves_nothing_behind() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("LGA_y.csv");
    let zip_path = dir.path().join("LGA_y.zip");
    std::fs::create_dir(&zip_path).unwrap();

    write_csv(&csv_path, &table(2), |_, _| {}).unwrap();
    let result = compress_csv(&csv_path, &zip_path);

    assert!(result.is_err());
    assert!(!csv_path.exists());
    assert!(zip_path.is_dir());
}

#[test]
fn missing_csv_does_not_leave_a_partial_archive() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("gone.csv");
    let zip_path = dir.path().join("gone.zip");

    let result = compress_csv(&csv_path, &zip_path);

    assert!(result.is_err());
    assert!(!zip_path.exists());
}

#[test]
fn leftover_removal_is_best_effort() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("never-written.csv");
    let busy = dir.path().join("not-a-file");
    std::fs::create_dir(&busy).unwrap();

    remove_leftover(&missing);
    remove_leftover(&busy);

    assert!(busy.is_dir());
}
