mod common;

use std::sync::Arc;
use std::time::Duration;

use arena_compare::ComparisonSummary;
use arena_llm::{CompletionRequest, ErrorKind};
use common::{ScriptedRelay, Script, comparator, ids, reply, slow_reply};

#[tokio::test]
async fn outcomes_follow_request_order_not_completion_order() {
    let relay = Arc::new(ScriptedRelay::default());
    relay.script("slow", slow_reply("late", Duration::from_millis(150)));
    relay.script("m1", reply("early", 1, 1));
    relay.script("b1", reply("middle", 1, 1));

    let outcomes = comparator(relay.clone())
        .compare(&ids(&["slow", "m1", "b1"]), CompletionRequest::new("hi"))
        .await
        .unwrap();

    let order: Vec<&str> = outcomes.iter().map(|o| o.model_id.as_str()).collect();
    assert_eq!(order, ["slow", "m1", "b1"]);
    assert_eq!(outcomes[0].value().unwrap().content, "late");
    assert!(outcomes[0].value().unwrap().duration_ms >= 150);
}

#[tokio::test]
async fn unknown_model_gets_an_outcome_without_a_call() {
    let relay = Arc::new(ScriptedRelay::default());
    relay.script("m1", reply("R1", 1, 1));

    let outcomes = comparator(relay.clone())
        .compare(&ids(&["nonexistent", "m1"]), CompletionRequest::new("hi"))
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].error().unwrap().kind, ErrorKind::ModelNotFound);
    assert!(outcomes[1].is_ok());
    assert_eq!(relay.calls_for("nonexistent"), 0);
    assert_eq!(relay.calls(), 1);
}

#[tokio::test]
async fn one_failure_does_not_affect_siblings() {
    let relay = Arc::new(ScriptedRelay::default());
    relay.script("m1", reply("R1", 10, 20));
    relay.script("m2", Script::Fail("upstream exploded".into()));
    relay.script("b1", reply("R3", 10, 20));

    let outcomes = comparator(relay.clone())
        .compare(&ids(&["m1", "m2", "b1"]), CompletionRequest::new("hi"))
        .await
        .unwrap();

    assert!(outcomes[0].is_ok());
    assert!(outcomes[2].is_ok());
    let err = outcomes[1].error().unwrap();
    assert_eq!(err.kind, ErrorKind::ProviderApi);
    assert!(err.message.contains("upstream exploded"));
    assert_eq!(relay.calls(), 3);
}

#[tokio::test]
async fn results_carry_recomputed_cost_and_token_counts() {
    let relay = Arc::new(ScriptedRelay::default());
    relay.script("m1", reply("R1", 10, 20));
    relay.script("m2", reply("R2", 15, 25));

    let outcomes = comparator(relay.clone())
        .compare(&ids(&["m1", "m2"]), CompletionRequest::new("Explain recursion"))
        .await
        .unwrap();

    let r1 = outcomes[0].value().unwrap();
    assert_eq!(r1.content, "R1");
    assert_eq!(r1.model_id, "m1");
    assert_eq!((r1.input_tokens, r1.output_tokens), (10, 20));
    assert!((r1.cost - (10.0 / 1000.0 * 0.001 + 20.0 / 1000.0 * 0.002)).abs() < 1e-12);

    let r2 = outcomes[1].value().unwrap();
    assert_eq!(r2.content, "R2");
    assert_eq!((r2.input_tokens, r2.output_tokens), (15, 25));
    assert!((r2.cost - (15.0 / 1000.0 * 0.003 + 25.0 / 1000.0 * 0.004)).abs() < 1e-12);

    assert_eq!(relay.prompts_for("m1"), ["Explain recursion"]);
    assert_eq!(relay.prompts_for("m2"), ["Explain recursion"]);

    let summary = ComparisonSummary::from_outcomes(&outcomes);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.cheapest.as_deref(), Some("m1"));
    assert_eq!(summary.total_output_tokens, 45);
}

#[tokio::test]
async fn unconfigured_provider_fails_without_a_call() {
    let relay = Arc::new(ScriptedRelay::default());
    relay.script("locked", reply("never", 1, 1));

    let outcomes = comparator(relay.clone())
        .compare(&ids(&["locked"]), CompletionRequest::new("hi"))
        .await
        .unwrap();

    assert_eq!(outcomes[0].error().unwrap().kind, ErrorKind::NotConfigured);
    assert_eq!(relay.calls(), 0);
}

#[tokio::test]
async fn duplicate_ids_resolve_to_first_registered_provider() {
    let relay = Arc::new(ScriptedRelay::default());
    relay.script("shared", reply("either", 1, 1));

    comparator(relay.clone())
        .compare(&ids(&["shared"]), CompletionRequest::new("hi"))
        .await
        .unwrap();

    assert_eq!(relay.vendors_for("shared"), ["alpha"]);
}

#[tokio::test]
async fn validation_errors_stop_before_any_call() {
    let relay = Arc::new(ScriptedRelay::default());
    let comparator = comparator(relay.clone());

    let err = comparator
        .compare(&[], CompletionRequest::new("hi"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = comparator
        .compare(&ids(&["m1"]), CompletionRequest::new("   "))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(relay.calls(), 0);
}

#[tokio::test]
async fn models_run_concurrently_by_default() {
    let relay = Arc::new(ScriptedRelay::default());
    for id in ["m1", "m2", "b1"] {
        relay.script(id, slow_reply(id, Duration::from_millis(100)));
    }

    comparator(relay.clone())
        .compare(&ids(&["m1", "m2", "b1"]), CompletionRequest::new("hi"))
        .await
        .unwrap();

    assert_eq!(relay.peak_in_flight(), 3);
}

#[tokio::test]
async fn concurrency_limit_caps_requests_in_flight() {
    let relay = Arc::new(ScriptedRelay::default());
    for id in ["m1", "m2", "b1"] {
        relay.script(id, slow_reply(id, Duration::from_millis(30)));
    }

    let outcomes = comparator(relay.clone())
        .with_concurrency_limit(1)
        .compare(&ids(&["m1", "m2", "b1"]), CompletionRequest::new("hi"))
        .await
        .unwrap();

    assert!(outcomes.iter().all(|o| o.is_ok()));
    assert_eq!(relay.peak_in_flight(), 1);
}
