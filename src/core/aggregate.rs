use crate::domain::model::{ForecastRecord, Summary};
use std::collections::BTreeMap;

/// 2^53: every f64 at or above this magnitude is already an integer.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Rounds to two decimal places, half away from zero.
///
/// The tie is decided on the shortest decimal text that round-trips to
/// `value` (what `Display` prints), not on the underlying binary fraction.
/// `15.005` therefore becomes `15.01` even though its binary value sits a
/// hair below the tie.
pub fn round_cents(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }

    let text = value.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let digits = fraction.as_bytes();
    if digits.len() <= 2 {
        return value;
    }

    let whole: u64 = match whole.parse() {
        Ok(w) => w,
        Err(_) => return value,
    };
    let mut cents = whole * 100 + u64::from(digits[0] - b'0') * 10 + u64::from(digits[1] - b'0');
    if digits[2] >= b'5' {
        cents += 1;
    }

    let magnitude = format!("{}.{:02}", cents / 100, cents % 100)
        .parse::<f64>()
        .unwrap_or_else(|_| value.abs());

    if magnitude == 0.0 {
        0.0
    } else if value.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Adds values in ascending order so the result does not depend on the
/// order rows arrived in.
fn ordered_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

/// Sums `rev_fcst` overall and per `store_id`.
///
/// Totals are accumulated at full precision and rounded only when the
/// summary is built; the grand total is not derived from the store totals.
pub fn aggregate(records: &[ForecastRecord]) -> Summary {
    let mut all_values = Vec::with_capacity(records.len());
    let mut store_values: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for record in records {
        all_values.push(record.rev_fcst);
        store_values
            .entry(record.store_id.clone())
            .or_default()
            .push(record.rev_fcst);
    }

    Summary {
        grand_total_forecast: round_cents(ordered_sum(all_values)),
        stores: store_values
            .into_iter()
            .map(|(store_id, values)| (store_id, round_cents(ordered_sum(values))))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(rows: &[(&str, f64)]) -> Vec<ForecastRecord> {
        rows.iter()
            .map(|(store, value)| ForecastRecord::new(*store, *value))
            .collect()
    }

    #[test]
    fn test_round_cents_ties_away_from_zero() {
        assert_eq!(round_cents(15.005), 15.01);
        assert_eq!(round_cents(2.675), 2.68);
        assert_eq!(round_cents(1.005), 1.01);
        assert_eq!(round_cents(-1.005), -1.01);
        assert_eq!(round_cents(0.125), 0.13);
    }

    #[test]
    fn test_round_cents_below_tie_and_short_values() {
        assert_eq!(round_cents(10.004), 10.0);
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
        assert_eq!(round_cents(2.5), 2.5);
        assert_eq!(round_cents(42.0), 42.0);
        assert_eq!(round_cents(0.0000001), 0.0);
        assert_eq!(round_cents(99.999), 100.0);
    }

    #[test]
    fn test_round_cents_negative_small_is_plain_zero() {
        let rounded = round_cents(-0.001);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
    }

    #[test]
    fn test_round_cents_passes_through_huge_and_non_finite() {
        assert_eq!(round_cents(1e20), 1e20);
        assert!(round_cents(f64::NAN).is_nan());
        assert_eq!(round_cents(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = aggregate(&[]);
        assert_eq!(summary.grand_total_forecast, 0.0);
        assert!(summary.stores.is_empty());
    }

    #[test]
    fn test_aggregate_reference_scenario() {
        let summary = aggregate(&records(&[("A", 10.005), ("A", 5.00), ("B", 2.50)]));

        assert_eq!(summary.grand_total_forecast, 17.51);
        assert_eq!(summary.stores.len(), 2);
        assert_eq!(summary.stores["A"], 15.01);
        assert_eq!(summary.stores["B"], 2.5);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let rows = [
            ("A", 1.5),
            ("B", 2.25),
            ("A", 3.125),
            ("C", 0.75),
            ("B", 4.0),
        ];
        let forward = aggregate(&records(&rows));

        let mut reversed = rows.to_vec();
        reversed.reverse();
        let backward = aggregate(&records(&reversed));

        let mut rotated = rows.to_vec();
        rotated.rotate_left(2);
        let shifted = aggregate(&records(&rotated));

        assert_eq!(forward, backward);
        assert_eq!(forward, shifted);
    }

    #[test]
    fn test_aggregate_order_independent_near_cent_tie() {
        // 依輸入順序累加時，這組數值的總和會落在 41.395 兩側
        let rows = [("A", 14.224), ("A", 18.729), ("A", 8.442)];
        let forward = aggregate(&records(&rows));

        let mut reversed = rows.to_vec();
        reversed.reverse();
        let backward = aggregate(&records(&reversed));

        let mut rotated = rows.to_vec();
        rotated.rotate_left(1);
        let shifted = aggregate(&records(&rotated));

        assert_eq!(forward, backward);
        assert_eq!(forward, shifted);
        assert_eq!(forward.grand_total_forecast, 41.39);
        assert_eq!(forward.stores["A"], 41.39);
    }

    #[test]
    fn test_aggregate_store_sum_matches_grand_total() {
        let summary = aggregate(&records(&[
            ("1", 10.333),
            ("2", 20.667),
            ("3", 0.004),
            ("1", 7.126),
        ]));

        let store_sum: f64 = summary.stores.values().sum();
        let tolerance = 0.01 * summary.stores.len() as f64;
        assert!((store_sum - summary.grand_total_forecast).abs() <= tolerance);
    }

    #[test]
    fn test_aggregate_empty_key_collapses_into_one_group() {
        let summary = aggregate(&records(&[("", 1.0), ("", 2.0), ("X", 3.0)]));

        assert_eq!(summary.stores[""], 3.0);
        assert_eq!(summary.stores["X"], 3.0);
        assert_eq!(summary.grand_total_forecast, 6.0);
    }

    #[test]
    fn test_aggregate_keys_are_verbatim() {
        let summary = aggregate(&records(&[("a", 1.0), ("A", 1.0), (" A", 1.0)]));
        assert_eq!(summary.stores.len(), 3);
    }
}
