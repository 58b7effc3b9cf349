use crate::corpus::scan_content;
use crate::stats::{HeaderStats, TopN, charts_summary, header_stats};
use pretty_assertions::assert_eq;

const NODE_LOG: &str = "\
2024-01-02;03:04:05;AL;Major;NodeX;Link down;cable fault
2024-01-03;04:05:06;AL;minor;NodeX;Link down;
2024-01-04;05:06:07;EV;Warning;NodeX;Sync lost;
2024-02-01;10:00:00;Manual (Operator);1;planned;00:05:00
2024-02-02 11:00:00;Spontaneous (Crash);1;-;1229s (20m29s)
Total downtime;0s;12s;0s;12s;3s
Number Of outages;0;1
";

#[test]
fn header_counts_every_collection() {
    let mut corpus = scan_content(NODE_LOG, "CS0BE.log");
    corpus.files = 1;

    assert_eq!(
        header_stats(&corpus),
        HeaderStats {
            total_files: 1,
            lga_count: 2,
            lge_count: 1,
            lgd_count: 2,
            lgd_restarts_count: 2,
        }
    );
}

#[test]
fn charts_summary_uses_all_collections() {
    let corpus = scan_content(NODE_LOG, "CS0BE.log");

    let charts = charts_summary(&corpus, TopN::default());

    assert_eq!(charts.lga_top_by_title.labels, vec!["Link down"]);
    assert_eq!(charts.lga_top_by_title.data, vec![2]);
    assert_eq!(charts.lge_top_by_title.labels, vec!["Sync lost"]);
    assert_eq!(charts.lga_severity.labels, vec!["MAJOR", "MINOR"]);
    assert_eq!(charts.lgd_top_by_file_name.labels, vec!["CS0BE.log"]);
    assert_eq!(charts.lgd_top_by_file_name.data, vec![2]);
    assert_eq!(
        charts.lgd_duration_by_type_reason.labels,
        vec!["Spontaneous (Crash)", "Manual (Operator)"]
    );
    assert_eq!(charts.lgd_duration_by_type_reason.data, vec![1229, 300]);
}

#[test]
fn summary_serializes_camel_case() {
    let corpus = scan_content(NODE_LOG, "CS0BE.log");

    let json = serde_json::to_value(charts_summary(&corpus, TopN::default())).unwrap();

    assert!(json.get("lgaTopByTitle").is_some());
    assert!(json.get("lgdDurationByTypeReason").is_some());
    assert_eq!(json["lgeTopByTitle"]["labels"][0], "Sync lost");
}
