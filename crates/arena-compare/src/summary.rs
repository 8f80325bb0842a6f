use arena_llm::CompletionResult;
use serde::Serialize;

use crate::outcome::DispatchOutcome;

/// Aggregate figures for one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// USD across successful models.
    pub total_cost: f64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    /// Lowest `duration_ms`; the first model wins ties.
    pub fastest: Option<String>,
    /// Lowest `cost`; the first model wins ties.
    pub cheapest: Option<String>,
}

impl ComparisonSummary {
    pub fn from_outcomes(outcomes: &[DispatchOutcome<CompletionResult>]) -> Self {
        let mut summary = Self {
            succeeded: 0,
            failed: 0,
            total_cost: 0.0,
            total_input_tokens: 0,
            total_output_tokens: 0,
            fastest: None,
            cheapest: None,
        };
        let mut fastest: Option<&CompletionResult> = None;
        let mut cheapest: Option<&CompletionResult> = None;

        for outcome in outcomes {
            let Some(result) = outcome.value() else {
                summary.failed += 1;
                continue;
            };
            summary.succeeded += 1;
            summary.total_cost += result.cost;
            summary.total_input_tokens += u64::from(result.input_tokens);
            summary.total_output_tokens += u64::from(result.output_tokens);

            if fastest.is_none_or(|f| result.duration_ms < f.duration_ms) {
                fastest = Some(result);
            }
            if cheapest.is_none_or(|c| result.cost < c.cost) {
                cheapest = Some(result);
            }
        }

        summary.fastest = fastest.map(|r| r.model_id.clone());
        summary.cheapest = cheapest.map(|r| r.model_id.clone());
        summary
    }
}
