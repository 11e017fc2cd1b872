// CSV export of the history log and chart windows
use crate::application::history::HistoryLog;
use crate::domain::dashboard::ChartSnapshot;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv flush failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Serialize)]
struct ChartSampleRow<'a> {
    chart: &'a str,
    series: &'a str,
    index: usize,
    value: f64,
}

/// One row per committed record, headed by the record's field names.
pub fn history_to_csv(history: &HistoryLog) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in history.iter() {
        writer.serialize(record)?;
    }
    finish(writer)
}

/// Long-format dump of every chart window: `chart,series,index,value`.
pub fn charts_to_csv(charts: &[ChartSnapshot]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for chart in charts {
        for series in &chart.series {
            for (index, value) in series.samples.iter().enumerate() {
                writer.serialize(ChartSampleRow {
                    chart: &chart.id,
                    series: &series.id,
                    index,
                    value: *value,
                })?;
            }
        }
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
