use crate::domain::model::ForecastRecord;
use crate::utils::error::Result;
use std::io::Read;
use std::path::Path;

/// Reads a header-delimited CSV into typed records.
///
/// Extra columns are ignored and short rows are accepted; cells that are
/// missing fall back to the record defaults.
pub fn parse_forecast_csv<R: Read>(reader: R) -> Result<Vec<ForecastRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in rdr.deserialize::<ForecastRecord>() {
        records.push(row?);
    }

    tracing::debug!("Parsed {} forecast rows", records.len());
    Ok(records)
}

pub async fn read_forecast_file(path: &Path) -> Result<Vec<ForecastRecord>> {
    let data = tokio::fs::read(path).await?;
    parse_forecast_csv(data.as_slice())
}
