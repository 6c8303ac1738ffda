use core_types::{PriceStats, RankedStats, TimeRangeStats};
use rust_decimal::{Decimal, RoundingStrategy};

/// Ranks assets by how far their price moved within a window.
#[derive(Debug, Default, Clone, Copy)]
pub struct Analyzer {}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores and ranks per-asset stats, highest normalized range first.
    ///
    /// Stats without a range (no records, or a zero minimum price) are dropped
    /// rather than sorted to the end. Equal ranges keep their input order.
    pub fn rank<I>(&self, stats: I) -> Vec<RankedStats>
    where
        I: IntoIterator<Item = TimeRangeStats>,
    {
        // 1. Score
        let mut ranked: Vec<RankedStats> = stats
            .into_iter()
            .map(|stats| RankedStats {
                normalized_range: stats.price_stats.as_ref().and_then(normalized_range),
                stats,
            })
            // 2. Filter
            .filter(|r| r.normalized_range.is_some())
            .collect();

        // 3. Rank
        ranked.sort_by(|a, b| b.normalized_range.cmp(&a.normalized_range));
        ranked
    }
}

/// `(max - min) / min`, rounded half-up to the scale of `max - min`.
///
/// Returns `None` when `min` is zero.
pub fn normalized_range(prices: &PriceStats) -> Option<Decimal> {
    if prices.min.is_zero() {
        return None;
    }
    let spread = prices.max - prices.min;
    let ratio = spread.checked_div(prices.min)?;
    Some(ratio.round_dp_with_strategy(spread.scale(), RoundingStrategy::MidpointAwayFromZero))
}
