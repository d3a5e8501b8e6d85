// src/abundance.rs

use std::collections::BTreeSet;
use std::io::Write;

use crate::errors::CombineError;
use crate::types::SampleAbundance;

/// Dense taxa x samples table of read counts.
///
/// Rows are the union of taxon names across all processed samples in sorted
/// order, columns are sample IDs in processing order. Cells with no data
/// are 0, so repeated runs over identical input serialize byte-identically.
#[derive(Debug, Clone)]
pub struct AbundanceMatrix {
    taxa: Vec<String>,
    samples: Vec<String>,
    /// counts[row][col], same indexing as `taxa` and `samples`
    counts: Vec<Vec<u64>>,
}

impl AbundanceMatrix {
    /// Outer-join per-sample count maps on taxon name.
    ///
    /// Samples with an empty map still get a column (all zeros). Fails with
    /// `NoSamplesProcessed` when `samples` is empty.
    pub fn from_samples(samples: &[SampleAbundance]) -> Result<Self, CombineError> {
        if samples.is_empty() {
            return Err(CombineError::NoSamplesProcessed);
        }

        let taxa: Vec<String> = samples
            .iter()
            .flat_map(|s| s.counts.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let counts = taxa
            .iter()
            .map(|taxon| {
                samples
                    .iter()
                    .map(|s| s.counts.get(taxon).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        Ok(AbundanceMatrix {
            taxa,
            samples: samples.iter().map(|s| s.sample_id.clone()).collect(),
            counts,
        })
    }

    pub fn num_taxa(&self) -> usize {
        self.taxa.len()
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Row labels, sorted.
    pub fn taxa(&self) -> &[String] {
        &self.taxa
    }

    /// Column labels, in processing order.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Count for a (taxon, sample) pair, if both labels exist.
    pub fn get(&self, taxon: &str, sample: &str) -> Option<u64> {
        let row = self.taxa.iter().position(|t| t == taxon)?;
        let col = self.samples.iter().position(|s| s == sample)?;
        Some(self.counts[row][col])
    }

    /// Write the table as CSV: a header row with an unnamed taxon column
    /// followed by the sample IDs, then one row per taxon.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), CombineError> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec![String::new()];
        header.extend(self.samples.iter().cloned());
        wtr.write_record(&header)?;

        for (taxon, row) in self.taxa.iter().zip(&self.counts) {
            let mut record = vec![taxon.clone()];
            record.extend(row.iter().map(|count| count.to_string()));
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Generate CSV text on demand
    pub fn to_csv_string(&self) -> Result<String, CombineError> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
