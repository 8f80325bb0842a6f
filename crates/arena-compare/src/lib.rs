//! # arena-compare
//!
//! Side-by-side comparison of models.
//!
//! A [`Comparator`] sends one prompt to many models at once and returns one
//! [`DispatchOutcome`] per model, in the order the models were requested. A
//! failure for one model (unknown id, unconfigured provider, relay error) is
//! recorded in that model's outcome and never affects the others.
//!
//! The same fan-out powers [`Comparator::run_evaluation`], which asks a judge
//! model to grade each response.
//!
//! ```ignore
//! let comparator = Comparator::new(registry).with_concurrency_limit(4);
//! let outcomes = comparator
//!     .compare(&["gpt-4o".into(), "claude-3-5-sonnet-20241022".into()], request)
//!     .await?;
//! let summary = ComparisonSummary::from_outcomes(&outcomes);
//! ```

mod comparator;
pub mod evaluation;
pub mod outcome;
mod summary;

pub use comparator::Comparator;
pub use evaluation::{
    DEFAULT_JUDGE_TEMPLATE, EvaluationConfig, EvaluationTarget, render_judge_prompt,
};
pub use outcome::{DispatchError, DispatchOutcome};
pub use summary::ComparisonSummary;
