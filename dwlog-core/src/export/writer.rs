use crate::export::{ExportError, ExportTable, JobId};
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Rows between two progress reports.
pub const PROGRESS_EVERY: usize = 200;

const MIN_RUNNING_PERCENT: u8 = 2;
const MAX_RUNNING_PERCENT: u8 = 99;

/// `<BASE>_<YYYYmmdd_HHMMSS>_<first 8 chars of the job id>`
pub fn artifact_stem(base: &str, now: DateTime<Local>, id: &JobId) -> String {
    format!("{base}_{}_{}", now.format("%Y%m%d_%H%M%S"), id.short())
}

/// Percentage shown while rows are written. Never 100: that is reserved
/// for a finished job.
pub fn progress_percent(done: usize, total: usize) -> u8 {
    let total = total.max(1) as f64;
    let pct = (done as f64 * 100.0 / total).round();
    pct.clamp(MIN_RUNNING_PERCENT as f64, MAX_RUNNING_PERCENT as f64) as u8
}

/// Writes `table` as RFC 4180 CSV.
///
/// `on_progress(written, total)` fires every [`PROGRESS_EVERY`] rows and
/// after the last one.
pub fn write_csv<F>(path: &Path, table: &ExportTable, mut on_progress: F) -> Result<(), ExportError>
where
    F: FnMut(usize, usize),
{
    let mut writer = csv::Writer::from_path(path).map_err(|e| ExportError::csv(path, e))?;

    writer
        .write_record(&table.headers)
        .map_err(|e| ExportError::csv(path, e))?;

    let total = table.len();
    for (i, row) in table.rows.iter().enumerate() {
        writer
            .write_record(row)
            .map_err(|e| ExportError::csv(path, e))?;

        let written = i + 1;
        if written % PROGRESS_EVERY == 0 || written == total {
            on_progress(written, total);
        }
    }

    writer.flush().map_err(|e| ExportError::io(path, e))?;
    Ok(())
}

/// Packs `csv_path` into a single-entry deflated archive at `zip_path`,
/// then removes the CSV.
///
/// On failure neither file is left behind. A CSV that cannot be removed
/// after a complete archive is only logged.
pub fn compress_csv(csv_path: &Path, zip_path: &Path) -> Result<(), ExportError> {
    if let Err(e) = pack(csv_path, zip_path) {
        remove_leftover(zip_path);
        remove_leftover(csv_path);
        return Err(e);
    }

    remove_leftover(csv_path);
    Ok(())
}

fn pack(csv_path: &Path, zip_path: &Path) -> Result<(), ExportError> {
    let entry_name = csv_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut input = File::open(csv_path).map_err(|e| ExportError::io(csv_path, e))?;

    let out = File::create(zip_path).map_err(|e| ExportError::io(zip_path, e))?;
    let mut zip = ZipWriter::new(out);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(entry_name, options)
        .map_err(|e| ExportError::zip(zip_path, e))?;

    io::copy(&mut input, &mut zip).map_err(|e| ExportError::io(zip_path, e))?;

    zip.finish().map_err(|e| ExportError::zip(zip_path, e))?;
    Ok(())
}

/// Best-effort removal of an intermediate export file.
pub(crate) fn remove_leftover(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(error = %e, file = %path.display(), "failed to remove export leftover");
        }
    }
}
