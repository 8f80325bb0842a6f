//! Token-count based cost estimation.

use crate::model::ModelDescriptor;

/// Cost in USD of a call that consumed the given token counts.
///
/// Always pass the counts reported for that exact call; re-estimating from
/// prompt length drifts from what the vendor bills.
pub fn estimate(model: &ModelDescriptor, input_tokens: u32, output_tokens: u32) -> f64 {
    f64::from(input_tokens) / 1000.0 * model.input_price_per_1k
        + f64::from(output_tokens) / 1000.0 * model.output_price_per_1k
}
