use crate::cli::scan::render_scan;
use crate::stats::{ChartSeries, ChartsSummary, HeaderStats};

#[test]
fn plain_render_lists_counters_and_bars() {
    let header = HeaderStats {
        total_files: 2,
        lga_count: 3,
        lge_count: 1,
        lgd_count: 4,
        lgd_restarts_count: 0,
    };
    let charts = ChartsSummary {
        lga_severity: ChartSeries {
            labels: vec!["Major".to_string(), "Minor".to_string()],
            data: vec![2, 1],
        },
        ..ChartsSummary::default()
    };

    let out = render_scan(&header, &charts, true);

    assert!(out.starts_with("dwlog scan\n"));
    assert!(out.contains(
        "files: 2 | alarms: 3 | notifications: 1 | metric lines: 4 | restarts: 0"
    ));
    assert!(out.contains(&format!("  Major {} 2\n", "█".repeat(20))));
    assert!(out.contains(&format!("  Minor {:<20} 1\n", "█".repeat(10))));
    assert!(out.contains("Top restarts by node:\n  <no data>\n"));
    assert!(!out.contains('\u{1b}'));
}

#[test]
fn colored_render_uses_ansi() {
    let out = render_scan(&HeaderStats::default(), &ChartsSummary::default(), false);

    assert!(out.contains('\u{1b}'));
}
