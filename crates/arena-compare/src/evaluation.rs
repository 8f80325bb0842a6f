//! Scoring model responses, currently with an LLM acting as judge.

use std::sync::Arc;

use arena_llm::{CompletionRequest, CompletionResult, Error};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::comparator::{Comparator, Pending, settle};
use crate::outcome::DispatchOutcome;

/// Replaced with the original prompt in a judge template.
pub const INPUT_PLACEHOLDER: &str = "{input}";
/// Replaced with the evaluated response in a judge template.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

pub const DEFAULT_JUDGE_TEMPLATE: &str = "You are grading an AI assistant's answer.\n\n\
Question:\n{input}\n\n\
Answer:\n{output}\n\n\
Rate the answer from 1 to 10 for correctness and clarity. \
Reply with the score on the first line followed by a one-paragraph justification.";

/// How to evaluate a set of responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EvaluationConfig {
    LlmJudge {
        name: String,
        prompt_template: String,
        judge_model: String,
    },
    Sentiment {
        name: String,
    },
    Custom {
        name: String,
        script: String,
    },
}

impl EvaluationConfig {
    pub fn llm_judge(
        name: impl Into<String>,
        prompt_template: impl Into<String>,
        judge_model: impl Into<String>,
    ) -> Self {
        Self::LlmJudge {
            name: name.into(),
            prompt_template: prompt_template.into(),
            judge_model: judge_model.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::LlmJudge { name, .. } | Self::Sentiment { name } | Self::Custom { name, .. } => {
                name
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::LlmJudge { .. } => "llm_judge",
            Self::Sentiment { .. } => "sentiment",
            Self::Custom { .. } => "custom",
        }
    }
}

/// A response to evaluate. `response_text` is `None` while the model has
/// not (successfully) answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationTarget {
    pub model_id: String,
    pub response_text: Option<String>,
}

impl EvaluationTarget {
    pub fn new(model_id: impl Into<String>, response_text: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            response_text: Some(response_text.into()),
        }
    }

    pub fn awaiting(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            response_text: None,
        }
    }

    /// Targets for the results of [`Comparator::compare`]. Failed models
    /// become awaiting targets.
    pub fn from_outcomes(outcomes: &[DispatchOutcome<CompletionResult>]) -> Vec<Self> {
        outcomes
            .iter()
            .map(|outcome| Self {
                model_id: outcome.model_id.clone(),
                response_text: outcome.value().map(|r| r.content.clone()),
            })
            .collect()
    }
}

/// Fill a judge template. Every placeholder occurrence is substituted in a
/// single left-to-right pass, so placeholder text inside the substituted
/// values is left alone.
pub fn render_judge_prompt(template: &str, input: &str, output: &str) -> String {
    let mut rendered = String::with_capacity(template.len() + input.len() + output.len());
    let mut rest = template;
    loop {
        let next = [(INPUT_PLACEHOLDER, input), (OUTPUT_PLACEHOLDER, output)]
            .into_iter()
            .filter_map(|(token, value)| rest.find(token).map(|at| (at, token, value)))
            .min_by_key(|(at, _, _)| *at);
        let Some((at, token, value)) = next else {
            rendered.push_str(rest);
            return rendered;
        };
        rendered.push_str(&rest[..at]);
        rendered.push_str(value);
        rest = &rest[at + token.len()..];
    }
}

fn check_template(template: &str) -> Result<(), Error> {
    for placeholder in [INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER] {
        if !template.contains(placeholder) {
            return Err(Error::Validation(format!(
                "judge prompt template must contain {placeholder}"
            )));
        }
    }
    Ok(())
}

impl Comparator {
    /// Evaluate each target's response to `prompt_text`.
    ///
    /// For an LLM judge, the rendered template is sent to the judge model
    /// once per answered target, concurrently and through the same path as
    /// [`compare`](Self::compare). The outcome for each target carries the
    /// judge's text. Targets without a response get an
    /// [`AwaitingResponse`](Error::AwaitingResponse) outcome.
    pub async fn run_evaluation(
        &self,
        config: &EvaluationConfig,
        prompt_text: &str,
        targets: &[EvaluationTarget],
    ) -> Result<Vec<DispatchOutcome<String>>, Error> {
        let (prompt_template, judge_model) = match config {
            EvaluationConfig::LlmJudge {
                prompt_template,
                judge_model,
                ..
            } => (prompt_template, judge_model),
            other => {
                return Err(Error::UnsupportedEvaluation(format!(
                    "{} evaluation '{}' is not implemented",
                    other.kind(),
                    other.name()
                )));
            }
        };
        check_template(prompt_template)?;

        let span = tracing::info_span!(
            "evaluate",
            evaluation = config.name(),
            judge = %judge_model,
            targets = targets.len()
        );
        async {
            let pending = targets
                .iter()
                .map(|target| match &target.response_text {
                    Some(response) => {
                        let prompt = render_judge_prompt(prompt_template, prompt_text, response);
                        self.spawn(
                            &target.model_id,
                            judge_model,
                            Arc::new(CompletionRequest::new(prompt)),
                        )
                    }
                    None => Pending::Ready(DispatchOutcome::failure(
                        &target.model_id,
                        Error::AwaitingResponse(target.model_id.clone()),
                    )),
                })
                .collect();

            let outcomes: Vec<DispatchOutcome<String>> = settle(pending)
                .await
                .into_iter()
                .map(|outcome| outcome.map(|judged| judged.content))
                .collect();
            tracing::info!(
                judged = outcomes.iter().filter(|o| o.is_ok()).count(),
                "evaluation finished"
            );
            Ok(outcomes)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_placeholder_occurrence_is_replaced() {
        let rendered = render_judge_prompt("{input}|{output}|{input}|{output}", "Q", "A");
        assert_eq!(rendered, "Q|A|Q|A");
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        let rendered = render_judge_prompt("Q: {input} A: {output}", "what is {output}?", "x");
        assert_eq!(rendered, "Q: what is {output}? A: x");
    }

    #[test]
    fn template_must_name_both_placeholders() {
        assert!(check_template("{input} {output}").is_ok());
        assert!(check_template(DEFAULT_JUDGE_TEMPLATE).is_ok());
        let err = check_template("only {input}").unwrap_err();
        assert!(err.to_string().contains("{output}"));
        assert!(check_template("only {output}").is_err());
    }

    #[test]
    fn config_round_trips_with_type_tag() {
        let config = EvaluationConfig::llm_judge("judge", "{input}{output}", "gpt-4o");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "llm_judge");
        assert_eq!(json["judge_model"], "gpt-4o");

        let parsed: EvaluationConfig =
            serde_json::from_str(r#"{"type":"custom","name":"c","script":"exit 0"}"#).unwrap();
        assert_eq!(parsed.kind(), "custom");
        assert_eq!(parsed.name(), "c");
    }

    #[test]
    fn failed_outcomes_become_awaiting_targets() {
        let outcomes = vec![
            DispatchOutcome::success(
                "m1",
                CompletionResult {
                    content: "R1".into(),
                    model_id: "m1".into(),
                    input_tokens: 1,
                    output_tokens: 1,
                    duration_ms: 1,
                    cost: 0.0,
                    metadata: Default::default(),
                },
            ),
            DispatchOutcome::failure("m2", Error::ModelNotFound("m2".into())),
        ];
        assert_eq!(
            EvaluationTarget::from_outcomes(&outcomes),
            vec![EvaluationTarget::new("m1", "R1"), EvaluationTarget::awaiting("m2")]
        );
    }
}
