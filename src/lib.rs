// src/lib.rs
pub mod abundance;
pub mod errors;
pub mod metadata;
pub mod report;
pub mod types;

use std::path::Path;

use log::{debug, info, warn};

use crate::abundance::AbundanceMatrix;
use crate::errors::CombineError;
use crate::metadata::read_sample_ids;
use crate::report::load_sample_counts;
use crate::types::SampleAbundance;

/// A struct to hold the outcome of a combine run.
#[derive(Debug)]
pub struct CombineResults {
    /// The combined taxa x samples table
    pub matrix: AbundanceMatrix,

    /// Samples listed in the metadata whose report file was missing
    pub skipped_samples: Vec<String>,
}

impl CombineResults {
    /// Generate the abundance table CSV text on demand
    pub fn to_csv_string(&self) -> Result<String, CombineError> {
        self.matrix.to_csv_string()
    }
}

/// Unified function to combine per-sample Kraken reports into one table.
///
/// Reads sample IDs from `metadata_file`, parses `<SampleID>.report` under
/// `reports_dir` for each of them (warning and skipping samples without a
/// report), keeps rows at the requested `rank`, and outer-joins the
/// per-sample counts into an [`AbundanceMatrix`].
pub fn combine_reports<P, Q>(
    reports_dir: P,
    metadata_file: Q,
    rank: &str,
) -> Result<CombineResults, CombineError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    // 1. Read metadata to get sample IDs
    let sample_ids = read_sample_ids(&metadata_file)?;
    info!(
        "Found {} sample IDs in '{}'",
        sample_ids.len(),
        metadata_file.as_ref().display()
    );

    // 2. Parse each report file
    let mut samples: Vec<SampleAbundance> = Vec::new();
    let mut skipped_samples = Vec::new();
    for sample_id in sample_ids {
        match load_sample_counts(&reports_dir, &sample_id, rank)? {
            Some(counts) => {
                debug!(
                    "sample '{}': {} taxa at rank '{}'",
                    sample_id,
                    counts.len(),
                    rank
                );
                samples.push(SampleAbundance { sample_id, counts });
            }
            None => {
                warn!(
                    "Report file not found for sample '{}' in '{}'. Skipping.",
                    sample_id,
                    reports_dir.as_ref().display()
                );
                skipped_samples.push(sample_id);
            }
        }
    }

    // 3. Combine all per-sample maps into a single table
    let matrix = AbundanceMatrix::from_samples(&samples)?;

    Ok(CombineResults {
        matrix,
        skipped_samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture(metadata: &str, reports: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("metadata.csv"), metadata).unwrap();
        for (sample_id, contents) in reports {
            fs::write(dir.path().join(format!("{sample_id}.report")), contents).unwrap();
        }
        dir
    }

    #[test]
    fn combines_two_samples_at_genus_rank() {
        let dir = fixture(
            "SampleID,Group\nS1,a\nS2,b\n",
            &[
                (
                    "S1",
                    "90.00\t900\t10\tD\t2\tBacteria\n\
                     5.00\t50\t50\tG\t1350\tEnterococcus\n",
                ),
                (
                    "S2",
                    "3.00\t30\t30\tG\t1357\tLactococcus\n\
                     2.00\t20\t20\tS\t1358\tLactococcus lactis\n",
                ),
            ],
        );

        let results = combine_reports(dir.path(), dir.path().join("metadata.csv"), "G").unwrap();
        assert!(results.skipped_samples.is_empty());

        let matrix = &results.matrix;
        assert_eq!(matrix.samples(), ["S1", "S2"]);
        assert_eq!(matrix.taxa(), ["Enterococcus", "Lactococcus"]);
        assert_eq!(matrix.get("Enterococcus", "S1"), Some(50));
        assert_eq!(matrix.get("Enterococcus", "S2"), Some(0));
        assert_eq!(matrix.get("Lactococcus", "S1"), Some(0));
        assert_eq!(matrix.get("Lactococcus", "S2"), Some(30));
    }

    #[test]
    fn missing_report_skips_sample_but_not_run() {
        // Worked example: A has one genus row, B has no report at all
        let dir = fixture(
            "SampleID\nA\nB\n",
            &[("A", "1.00\t50\t50\tG\t9606\tHomo\n")],
        );

        let results = combine_reports(dir.path(), dir.path().join("metadata.csv"), "G").unwrap();
        assert_eq!(results.skipped_samples, ["B"]);

        assert_eq!(results.matrix.samples(), ["A"]);
        assert_eq!(results.matrix.taxa(), ["Homo"]);
        assert_eq!(results.matrix.get("Homo", "A"), Some(50));
        assert_eq!(results.to_csv_string().unwrap(), ",A\nHomo,50\n");
    }

    #[test]
    fn processed_but_empty_sample_is_a_zero_column() {
        let dir = fixture(
            "SampleID\nS1\nS2\n",
            &[
                ("S1", "5.00\t50\t50\tG\t1350\tEnterococcus\n"),
                ("S2", "2.00\t20\t20\tS\t1358\tLactococcus lactis\n"),
            ],
        );

        let results = combine_reports(dir.path(), dir.path().join("metadata.csv"), "G").unwrap();
        assert_eq!(results.matrix.samples(), ["S1", "S2"]);
        assert_eq!(results.matrix.get("Enterococcus", "S2"), Some(0));
    }

    #[test]
    fn no_reports_at_all_aborts() {
        let dir = fixture("SampleID\nS1\nS2\n", &[]);

        let err = combine_reports(dir.path(), dir.path().join("metadata.csv"), "G").unwrap_err();
        assert!(matches!(err, CombineError::NoSamplesProcessed));
    }

    #[test]
    fn missing_metadata_aborts() {
        let dir = tempfile::tempdir().unwrap();

        let err = combine_reports(dir.path(), dir.path().join("metadata.csv"), "G").unwrap_err();
        assert!(matches!(err, CombineError::MetadataNotFound(_)));
    }

    #[test]
    fn output_is_idempotent() {
        let dir = fixture(
            "SampleID\nS1\nS2\n",
            &[
                ("S1", "5.00\t50\t50\tG\t1350\tEnterococcus\n"),
                ("S2", "3.00\t30\t30\tG\t1357\tLactococcus\n"),
            ],
        );

        let first = combine_reports(dir.path(), dir.path().join("metadata.csv"), "G")
            .unwrap()
            .to_csv_string()
            .unwrap();
        let second = combine_reports(dir.path(), dir.path().join("metadata.csv"), "G")
            .unwrap()
            .to_csv_string()
            .unwrap();
        assert_eq!(first, second);
    }
}
