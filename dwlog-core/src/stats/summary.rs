use crate::corpus::Corpus;
use crate::stats::aggregation::{
    ChartSeries, TopN, duration_by_key, severity_distribution, top_counts,
};
use serde::Serialize;

/// Counters shown in the dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStats {
    pub total_files: usize,
    pub lga_count: usize,
    pub lge_count: usize,
    pub lgd_count: usize,
    pub lgd_restarts_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsSummary {
    pub lga_top_by_title: ChartSeries,
    pub lge_top_by_title: ChartSeries,
    pub lga_severity: ChartSeries,
    pub lgd_top_by_type_reason: ChartSeries,
    pub lgd_top_by_file_name: ChartSeries,
    pub lgd_duration_by_type_reason: ChartSeries,
}

pub fn header_stats(corpus: &Corpus) -> HeaderStats {
    HeaderStats {
        total_files: corpus.files,
        lga_count: corpus.alarms.len(),
        lge_count: corpus.notifications.len(),
        lgd_count: corpus.metric_lines,
        lgd_restarts_count: corpus.restarts.len(),
    }
}

pub fn charts_summary(corpus: &Corpus, n: TopN) -> ChartsSummary {
    ChartsSummary {
        lga_top_by_title: top_counts(&corpus.alarms, |e| e.title.as_str(), n),
        lge_top_by_title: top_counts(&corpus.notifications, |e| e.title.as_str(), n),
        lga_severity: severity_distribution(&corpus.alarms, |e| e.severity.as_str()),
        lgd_top_by_type_reason: top_counts(&corpus.restarts, |r| r.type_reason.as_str(), n),
        lgd_top_by_file_name: top_counts(&corpus.restarts, |r| r.file_name.as_str(), n),
        lgd_duration_by_type_reason: duration_by_key(
            &corpus.restarts,
            |r| r.type_reason.as_str(),
            |r| r.duration.as_str(),
            n,
        ),
    }
}
