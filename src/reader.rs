use crate::errors::AppError;
use crate::model::InputChannelRecord;
use csv::ReaderBuilder;
use log::{debug, trace, warn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[inline]
fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{FEFF}').unwrap_or(s)
}

pub fn read_chirp_file(path: &Path) -> Result<Vec<InputChannelRecord>, AppError> {
    if !path.exists() {
        return Err(AppError::MissingInput(path.to_path_buf()));
    }
    let f = File::open(path)
        .map_err(|e| AppError::IO(format!("open {}: {}", path.display(), e)))?;
    read_chirp(BufReader::new(f))
}

/// Parse a CHIRP CSV export.
///
/// Every header column gets a key; a short row leaves its trailing columns empty.
pub fn read_chirp<R: Read>(reader: R) -> Result<Vec<InputChannelRecord>, AppError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| AppError::Parse(format!("csv header: {}", e)))?
        .iter()
        .enumerate()
        .map(|(i, h)| if i == 0 { strip_bom(h).to_string() } else { h.to_string() })
        .collect();
    debug!("CHIRP columns: {:?}", headers);

    let mut out = Vec::new();
    for (n, row) in rdr.records().enumerate() {
        let row = row.map_err(|e| AppError::Parse(format!("csv row {}: {}", n + 1, e)))?;
        if row.len() > headers.len() {
            warn!(
                "row {} has {} cells for {} columns; extra cells ignored",
                n + 1,
                row.len(),
                headers.len()
            );
        }
        let rec: InputChannelRecord = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), row.get(i).unwrap_or("")))
            .collect();
        trace!("row {}: {:?}", n + 1, rec);
        out.push(rec);
    }

    if out.is_empty() {
        warn!("CHIRP input has no channel rows");
    }
    Ok(out)
}
