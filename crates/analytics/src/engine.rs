use core_types::{AssetId, PriceRecord, PriceStats, TimeRangeStats};
use rust_decimal::Decimal;

/// A stateless calculator for per-asset price statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatsEngine {}

impl StatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarises one asset's records for a time window.
    ///
    /// # Arguments
    ///
    /// * `asset` - The asset the records belong to.
    /// * `records` - The window's records, newest first.
    ///
    /// # Returns
    ///
    /// A `TimeRangeStats` with every optional field set, or all of them `None`
    /// when `records` is empty.
    pub fn calculate(&self, asset: AssetId, records: &[PriceRecord]) -> TimeRangeStats {
        let (Some(newest), Some(oldest)) = (records.first(), records.last()) else {
            return TimeRangeStats::empty(asset);
        };

        let (min, max) = min_max(newest.price, records);

        TimeRangeStats {
            asset_id: asset,
            earliest_timestamp: Some(oldest.timestamp),
            latest_timestamp: Some(newest.timestamp),
            price_stats: Some(PriceStats {
                oldest: oldest.price,
                newest: newest.price,
                min,
                max,
            }),
        }
    }
}

/// Single pass over the prices, both bounds seeded with `seed`.
///
/// Only strict inequalities update a bound, and a price can move at most one
/// of them per step.
fn min_max(seed: Decimal, records: &[PriceRecord]) -> (Decimal, Decimal) {
    let mut min = seed;
    let mut max = seed;
    for record in records {
        if record.price > max {
            max = record.price;
        } else if record.price < min {
            min = record.price;
        }
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eth(timestamp: i64, price: Decimal) -> PriceRecord {
        PriceRecord::new(timestamp, "ETH", price)
    }

    #[test]
    fn summarises_descending_records() {
        let records = vec![
            eth(4, dec!(4)),
            eth(3, dec!(1)),
            eth(2, dec!(5)),
            eth(1, dec!(2)),
        ];

        let stats = StatsEngine::new().calculate(AssetId::Eth, &records);

        assert_eq!(
            stats,
            TimeRangeStats {
                asset_id: AssetId::Eth,
                earliest_timestamp: Some(1),
                latest_timestamp: Some(4),
                price_stats: Some(PriceStats {
                    oldest: dec!(2),
                    newest: dec!(4),
                    min: dec!(1),
                    max: dec!(5),
                }),
            }
        );
    }

    #[test]
    fn empty_records_give_empty_stats() {
        let stats = StatsEngine::new().calculate(AssetId::Btc, &[]);
        assert_eq!(stats, TimeRangeStats::empty(AssetId::Btc));
    }

    #[test]
    fn single_record_is_oldest_newest_min_and_max() {
        let stats = StatsEngine::new().calculate(AssetId::Ltc, &[eth(7, dec!(3.5))]);
        let prices = stats.price_stats.unwrap();
        assert_eq!(stats.earliest_timestamp, Some(7));
        assert_eq!(stats.latest_timestamp, Some(7));
        assert_eq!(prices.oldest, dec!(3.5));
        assert_eq!(prices.newest, dec!(3.5));
        assert_eq!(prices.min, dec!(3.5));
        assert_eq!(prices.max, dec!(3.5));
    }

    #[test]
    fn bounds_enclose_every_price() {
        let records = vec![
            eth(9, dec!(0.7686)),
            eth(8, dec!(0.793)),
            eth(7, dec!(0.7701)),
            eth(6, dec!(0.7686)),
            eth(5, dec!(0.81)),
            eth(4, dec!(0.7599)),
            eth(3, dec!(0.7921)),
        ];

        let stats = StatsEngine::new().calculate(AssetId::Xrp, &records);
        let prices = stats.price_stats.unwrap();

        assert_eq!(prices.min, dec!(0.7599));
        assert_eq!(prices.max, dec!(0.81));
        for record in &records {
            assert!(prices.min <= record.price && record.price <= prices.max);
        }
        assert_eq!(stats.earliest_timestamp, records.iter().map(|r| r.timestamp).min());
        assert_eq!(stats.latest_timestamp, records.iter().map(|r| r.timestamp).max());
    }
}
