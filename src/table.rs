//! Reading repository record tables.

use anyhow::Result;
use log::warn;

use crate::Record;

/// Parse CSV data with a header row into records.
///
/// Columns are matched by header name and anything other than `repo_name`
/// and `topics` is ignored. Rows that can't be decoded, such as ones with
/// invalid UTF-8 in a read column, are logged and skipped.
pub fn parse_records(data: &[u8]) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(data);

    // Fail early on a broken header, everything after it is best-effort.
    rdr.headers()?;

    let mut records = Vec::new();
    for row in rdr.deserialize::<Record>() {
        match row {
            Ok(record) => records.push(record),
            Err(e) => {
                let line = e.position().map(|p| p.line());
                warn!("skipping unreadable row (line {line:?}): {e}");
            }
        }
    }

    Ok(records)
}
