use dwlog_core::conf::ExportMode;
use integration_tests::harness::TestServer;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::io::{Cursor, Read};
use std::thread;
use std::time::{Duration, Instant};

fn start_export(srv: &TestServer, body: Value) -> String {
    let res: Value = srv
        .post_json("/export/start", &body)
        .send()
        .unwrap()
        .json()
        .unwrap();
    res["job_id"].as_str().unwrap().to_string()
}

fn wait_until_done(srv: &TestServer, id: &str) -> Value {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let status = srv.get_json(&format!("/export/status?id={id}"));
        match status["status"].as_str() {
            Some("done") | Some("error") => return status,
            _ if Instant::now() > deadline => panic!("export {id} did not finish: {status}"),
            _ => thread::sleep(Duration::from_millis(25)),
        }
    }
}

/// Downloads the archive and returns the name and contents of its only entry.
fn download_csv(srv: &TestServer, id: &str) -> (String, String) {
    let res = srv.get(&format!("/export/download?id={id}")).send().unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/zip");
    assert_eq!(res.headers()["cache-control"], "no-cache");

    let bytes = res.bytes().unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    assert_eq!(archive.len(), 1);

    let mut entry = archive.by_index(0).unwrap();
    let name = entry.name().to_string();
    let mut csv = String::new();
    entry.read_to_string(&mut csv).unwrap();
    (name, csv)
}

#[test]
fn async_export_of_the_corpus() {
    let srv = TestServer::start();

    let id = start_export(&srv, json!({ "type": "lga" }));
    let status = wait_until_done(&srv, &id);

    assert_eq!(status["status"], "done");
    assert_eq!(status["percent"], 100);

    let (name, csv) = download_csv(&srv, &id);
    assert!(name.starts_with("LGA_") && name.ends_with(".csv"), "{name}");

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec!["File Name", "Data", "Ora", "Type", "Sev", "Oggetto", "Descrizione", "Dettaglio"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(&rows[0][0], "CS0BE.log");
    assert_eq!(&rows[0][6], "Link down");
}

#[test]
fn inline_export_of_client_rows() {
    let srv = TestServer::start_with_mode(ExportMode::Inline);

    let id = start_export(
        &srv,
        json!({
            "type": "LGD_RESTARTS",
            "data": { "lgdRestarts": [{
                "fileName": "A.log",
                "dateIso": "2024-01-02",
                "time": "03:04:05",
                "typeReason": "Node Upgrade",
                "value": "R1",
                "comment": "with, comma",
                "duration": 12
            }]}
        }),
    );

    // Inline jobs are finished before the start request returns.
    let status = srv.get_json(&format!("/export/status?id={id}"));
    assert_eq!(status["status"], "done");

    let (_, csv) = download_csv(&srv, &id);
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].iter().collect::<Vec<_>>(),
        vec!["A.log", "2024-01-02", "03:04:05", "Node Upgrade", "R1", "with, comma", "12"]
    );
}

#[test]
fn unknown_jobs_are_not_found() {
    let srv = TestServer::start();

    let status = srv.get("/export/status?id=nope").send().unwrap();
    let download = srv
        .get("/export/download?id=1b4e28ba-2fa1-11d2-883f-0016d3cca427")
        .send()
        .unwrap();

    assert_eq!(status.status(), StatusCode::NOT_FOUND);
    assert_eq!(download.status(), StatusCode::NOT_FOUND);
}

#[test]
fn finished_archives_are_served_from_exports() {
    let srv = TestServer::start();

    let id = start_export(&srv, json!({ "type": "DOWNTIME_COUNT" }));
    wait_until_done(&srv, &id);

    let exports = srv.root().join("web/exports");
    let archive = std::fs::read_dir(&exports)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .find(|n| n.starts_with("DOWNTIME_COUNT_") && n.ends_with(".zip"))
        .expect("archive in export dir");
    let leftover_csv = std::fs::read_dir(&exports)
        .unwrap()
        .any(|e| e.unwrap().path().extension().is_some_and(|x| x == "csv"));

    let res = srv.get(&format!("/exports/{archive}")).send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(!leftover_csv);
}
