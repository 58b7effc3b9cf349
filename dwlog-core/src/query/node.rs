use crate::corpus::{AlarmEvent, Corpus, NotificationEvent, RestartEvent};
use crate::query::NodeFilter;
use serde::Serialize;

/// Everything recorded for one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
    pub file_name: String,
    pub lga: Vec<AlarmEvent>,
    pub lge: Vec<NotificationEvent>,
    pub lgd_restarts: Vec<RestartEvent>,
}

pub fn node_summary(corpus: &Corpus, node: &NodeFilter) -> NodeSummary {
    NodeSummary {
        file_name: node.log_name().to_string(),
        lga: by_node(&corpus.alarms, node, |e| e.file_name.as_str()),
        lge: by_node(&corpus.notifications, node, |e| e.file_name.as_str()),
        lgd_restarts: by_node(&corpus.restarts, node, |r| r.file_name.as_str()),
    }
}

fn by_node<T, F>(items: &[T], node: &NodeFilter, file_name: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    items
        .iter()
        .filter(|item| node.matches(file_name(item)))
        .cloned()
        .collect()
}
