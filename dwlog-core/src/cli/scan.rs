use crate::corpus::scan_corpus;
use crate::stats::{ChartSeries, ChartsSummary, HeaderStats, TopN, charts_summary, header_stats};
use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use std::path::PathBuf;

const BAR_WIDTH: usize = 20;

/// Scans `dir` offline and prints what the dashboard would show.
pub fn scan(dir: PathBuf, top: Option<usize>, plain: bool) -> Result<()> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let n = top.map(TopN::new).unwrap_or_default();
    let corpus = scan_corpus(&dir);

    print!(
        "{}",
        render_scan(&header_stats(&corpus), &charts_summary(&corpus, n), plain)
    );
    Ok(())
}

pub fn render_scan(header: &HeaderStats, charts: &ChartsSummary, plain: bool) -> String {
    let mut out = String::new();

    let title = "dwlog scan";
    if plain {
        out.push_str(&format!("{title}\n==========\n"));
    } else {
        out.push_str(&format!("{}\n==========\n", title.bold()));
    }

    out.push_str(&format!(
        "files: {} | alarms: {} | notifications: {} | metric lines: {} | restarts: {}\n\n",
        header.total_files,
        header.lga_count,
        header.lge_count,
        header.lgd_count,
        header.lgd_restarts_count
    ));

    let sections = [
        ("Top alarms by title", &charts.lga_top_by_title),
        ("Top notifications by title", &charts.lge_top_by_title),
        ("Alarm severity", &charts.lga_severity),
        ("Top restarts by type/reason", &charts.lgd_top_by_type_reason),
        ("Top restarts by node", &charts.lgd_top_by_file_name),
        ("Restart downtime (s) by type/reason", &charts.lgd_duration_by_type_reason),
    ];

    for (name, series) in sections {
        render_series(&mut out, name, series, plain);
    }

    out
}

fn render_series(out: &mut String, name: &str, series: &ChartSeries, plain: bool) {
    if plain {
        out.push_str(&format!("{name}:\n"));
    } else {
        out.push_str(&format!("{}:\n", name.bold()));
    }

    let Some(max) = series.data.iter().copied().max().filter(|m| *m > 0) else {
        out.push_str("  <no data>\n\n");
        return;
    };

    let bar_width = BAR_WIDTH;
    let width = series.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    for (label, value) in series.labels.iter().zip(&series.data) {
        let bars = ((*value as f64 / max as f64) * bar_width as f64).ceil() as usize;
        let bar = "█".repeat(bars.max(1));
        if plain {
            out.push_str(&format!("  {label:<width$} {bar:<bar_width$} {value}\n"));
        } else {
            let padded = format!("{bar:<bar_width$}");
            out.push_str(&format!("  {label:<width$} {} {value}\n", padded.green()));
        }
    }
    out.push('\n');
}
