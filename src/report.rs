//src/report.rs

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use log::warn;

use crate::types::SampleCounts;

/// Locate the report file for a sample: `<SampleID>.report`, falling back to
/// `<SampleID>.report.gz`.
fn find_report(reports_dir: &Path, sample_id: &str) -> Option<PathBuf> {
    let plain = reports_dir.join(format!("{sample_id}.report"));
    if plain.exists() {
        return Some(plain);
    }
    let gz = reports_dir.join(format!("{sample_id}.report.gz"));
    gz.exists().then_some(gz)
}

// If the file ends with ".gz", wrap it in a MultiGzDecoder
fn open_report(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let f = File::open(path)?;

    let is_gz = path.extension().map(|ext| ext == "gz").unwrap_or(false);

    Ok(if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    })
}

/// Parses a Kraken report in the format:
/// ```text
/// <pct>\t<cladeReads>\t<taxReads>\t<rank>\t<taxID>\t<taxName>
/// ```
/// keeping only rows whose rank code equals `rank`, and returns a map of
/// taxon name -> reads assigned at that taxon. When a name repeats at the
/// requested rank, the last occurrence wins.
///
/// Returns `Ok(None)` when the sample has no report file in `reports_dir`;
/// the caller decides how loudly to skip it.
pub fn load_sample_counts<P: AsRef<Path>>(
    reports_dir: P,
    sample_id: &str,
    rank: &str,
) -> io::Result<Option<SampleCounts>> {
    let Some(path) = find_report(reports_dir.as_ref(), sample_id) else {
        return Ok(None);
    };

    let reader = open_report(&path)?;
    let mut counts = SampleCounts::new();

    for (line_no, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let parts: Vec<&str> = line.split('\t').collect();

        // Skip malformed lines; extra columns beyond the sixth are ignored
        if parts.len() < 6 {
            continue;
        }

        let rank_code = parts[3].trim();
        if rank_code != rank {
            continue;
        }
        let taxon_name = parts[5].trim();

        let taxon_reads: u64 = match parts[2].trim().parse() {
            Ok(n) => n,
            Err(_) => {
                warn!(
                    "sample '{}': non-numeric read count on line {}, dropping row",
                    sample_id,
                    line_no + 1
                );
                continue;
            }
        };

        counts.insert(taxon_name.to_string(), taxon_reads);
    }

    Ok(Some(counts))
}
