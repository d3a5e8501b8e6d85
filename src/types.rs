//src/types.rs

use ahash::AHashMap;

/// Taxon name -> reads assigned directly at that taxon, for one sample.
pub type SampleCounts = AHashMap<String, u64>;

/// Counts for a single successfully processed sample.
///
/// Built even when `counts` is empty: a present report with no rows at the
/// requested rank still contributes a full zero column to the combined table.
#[derive(Debug, Clone)]
pub struct SampleAbundance {
    pub sample_id: String,
    pub counts: SampleCounts,
}
