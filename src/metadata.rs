//src/metadata.rs

use std::path::Path;

use crate::errors::CombineError;

/// Reads the ordered list of sample IDs from a metadata file in the format:
/// ```text
/// SampleID,Group,...
/// sample_01,control,...
/// ```
/// The `SampleID` column may sit at any position in the header. Order and
/// duplicates are preserved: column order of the combined table follows the
/// metadata file.
pub fn read_sample_ids<P: AsRef<Path>>(path: P) -> Result<Vec<String>, CombineError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CombineError::MetadataNotFound(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let sample_col = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == "SampleID")
        .ok_or_else(|| CombineError::MissingSampleIdColumn(path.to_path_buf()))?;

    let mut sample_ids = Vec::new();
    for record in reader.records() {
        let record = record?;
        // Rows too short to reach the SampleID column are skipped
        if let Some(id) = record.get(sample_col) {
            sample_ids.push(id.trim().to_string());
        }
    }

    Ok(sample_ids)
}
