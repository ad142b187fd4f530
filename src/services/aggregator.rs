use crate::types::{HourBucket, PriceSample};
use chrono::Timelike;

/// Partitions samples by the local hour-of-day (0-23) of their timestamp and
/// computes mean/min/max of the selected field per non-empty bucket.
///
/// The key is the hour-of-day component, not the elapsed hour: two samples
/// from different calendar days with the same local hour land in the same
/// bucket. Callers must not assume any particular bucket order, but for a
/// fixed input the output is identical across runs (values accumulate in
/// input order, buckets are scanned 0..24).
pub fn group_by_hour<F>(samples: &[PriceSample], field: F) -> Vec<HourBucket>
where
    F: Fn(&PriceSample) -> f64,
{
    let mut buckets: [Vec<f64>; 24] = std::array::from_fn(|_| Vec::new());

    for sample in samples {
        let hour = sample.timestamp.with_timezone(&chrono::Local).hour() as usize;
        buckets[hour].push(field(sample));
    }

    buckets
        .iter()
        .enumerate()
        .filter(|(_, values)| !values.is_empty())
        .map(|(hour, values)| {
            let sum: f64 = values.iter().sum();
            let mut min_price = values[0];
            let mut max_price = values[0];
            for &value in &values[1..] {
                if value < min_price {
                    min_price = value;
                }
                if value > max_price {
                    max_price = value;
                }
            }

            HourBucket {
                hour: format!("{} hour", hour),
                average_price: sum / values.len() as f64,
                min_price,
                max_price,
            }
        })
        .collect()
}
