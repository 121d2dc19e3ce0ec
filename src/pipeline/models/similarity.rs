pub trait SimilarityScorer: Send + Sync {
    /// Similarity in `[0, 100]`; 100 means identical.
    fn ratio(&self, a: &str, b: &str) -> f64;

    /// Highest ratio two texts of these character lengths could reach. Pairs
    /// whose bound is below the threshold are never scored.
    fn upper_bound(&self, _len_a: usize, _len_b: usize) -> f64 {
        100.0
    }
}

/// Normalized Levenshtein similarity scaled to 0-100.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinRatio;

impl SimilarityScorer for LevenshteinRatio {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b) * 100.0
    }

    // Edit distance is at least the length difference.
    fn upper_bound(&self, len_a: usize, len_b: usize) -> f64 {
        let longest = len_a.max(len_b);
        if longest == 0 {
            return 100.0;
        }
        len_a.min(len_b) as f64 / longest as f64 * 100.0
    }
}
