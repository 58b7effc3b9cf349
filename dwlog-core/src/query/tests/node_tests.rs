use crate::corpus::scan_content;
use crate::query::{NodeFilter, node_summary};

#[test]
fn summary_collects_one_node() {
    let mut corpus = scan_content(
        "2024-01-02;03:04:05;AL;Major;X;Link down;\n\
         2024-01-02;03:04:06;EV;Minor;X;Sync;\n\
         2024-01-02 03:04:07;Manual;1;-;10s\n",
        "CS0BE.log",
    );
    corpus.extend(scan_content(
        "2024-01-02;03:04:05;AL;Major;Y;Other;\n",
        "OTHER.log",
    ));
    let node = NodeFilter::parse(Some("CS0BE")).unwrap();

    let summary = node_summary(&corpus, &node);

    assert_eq!(summary.file_name, "CS0BE.log");
    assert_eq!(summary.lga.len(), 1);
    assert_eq!(summary.lge.len(), 1);
    assert_eq!(summary.lgd_restarts.len(), 1);
    assert_eq!(summary.lga[0].title, "Link down");
}

#[test]
fn summary_serializes_camel_case() {
    let corpus = scan_content("", "A.log");
    let node = NodeFilter::parse(Some("A.log")).unwrap();

    let json = serde_json::to_value(node_summary(&corpus, &node)).unwrap();

    assert_eq!(json["fileName"], "A.log");
    assert!(json["lgdRestarts"].as_array().unwrap().is_empty());
}
