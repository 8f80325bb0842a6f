//! Terminal and JSON output.

use arena_compare::{ComparisonSummary, DispatchOutcome};
use arena_llm::{CompletionResult, ModelDescriptor};
use arena_registry::{CheapestModels, Registry};

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

pub fn providers(registry: &Registry) {
    for adapter in registry.adapters() {
        let status = if adapter.is_configured() {
            "configured"
        } else {
            "needs credential"
        };
        let hint = if adapter.is_configured() || adapter.credential_env().is_empty() {
            String::new()
        } else {
            format!(" (set {})", adapter.credential_env().join(" or "))
        };
        println!(
            "{} ({}) [{}]{}",
            adapter.name(),
            adapter.display_name(),
            status,
            hint
        );
        for model in adapter.list_models() {
            println!("  - {}", model.id);
        }
    }
}

pub fn models(models: &[&ModelDescriptor], json: bool) -> Result {
    if json {
        println!("{}", serde_json::to_string_pretty(models)?);
        return Ok(());
    }
    if models.is_empty() {
        println!("no matching models");
        return Ok(());
    }

    let width = models.iter().map(|m| m.id.len()).max().unwrap_or(0);
    for m in models {
        let mut tags = Vec::new();
        if m.capabilities.supports_vision {
            tags.push("vision");
        }
        if m.capabilities.supports_function_calling {
            tags.push("functions");
        }
        if !m.supports_streaming {
            tags.push("no-stream");
        }
        println!(
            "{:<width$}  {:<11} ctx {:>9}  in ${:<8} out ${:<8} {}",
            m.id,
            m.provider_name,
            m.context_window_tokens,
            m.input_price_per_1k,
            m.output_price_per_1k,
            tags.join(","),
        );
    }
    Ok(())
}

pub fn cheapest(cheapest: Option<&CheapestModels>, json: bool) -> Result {
    if json {
        println!("{}", serde_json::to_string_pretty(&cheapest)?);
        return Ok(());
    }
    let Some(c) = cheapest else {
        println!("no models registered");
        return Ok(());
    };
    println!(
        "cheapest input:    {} (${}/1k)",
        c.cheapest_input.id, c.cheapest_input.input_price_per_1k
    );
    println!(
        "cheapest output:   {} (${}/1k)",
        c.cheapest_output.id, c.cheapest_output.output_price_per_1k
    );
    println!(
        "best combined:     {} (${}/1k)",
        c.best_combined.id,
        c.best_combined.combined_price_per_1k()
    );
    Ok(())
}

pub fn comparison(
    outcomes: &[DispatchOutcome<CompletionResult>],
    summary: &ComparisonSummary,
    judged: Option<&[DispatchOutcome<String>]>,
    json: bool,
) -> Result {
    if json {
        let mut doc = serde_json::json!({
            "outcomes": outcomes,
            "summary": summary,
        });
        if let Some(judged) = judged {
            doc["evaluation"] = serde_json::to_value(judged)?;
        }
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    for outcome in outcomes {
        match &outcome.result {
            Ok(r) => {
                println!(
                    "== {} ({} ms, {} in / {} out, ${:.6})",
                    outcome.model_id, r.duration_ms, r.input_tokens, r.output_tokens, r.cost
                );
                println!("{}\n", r.content.trim_end());
            }
            Err(err) => println!("== {} failed [{}]: {}\n", outcome.model_id, err.kind, err),
        }
    }

    println!(
        "{} succeeded, {} failed, {} tokens, ${:.6} total",
        summary.succeeded,
        summary.failed,
        summary.total_input_tokens + summary.total_output_tokens,
        summary.total_cost
    );
    if let Some(fastest) = &summary.fastest {
        println!("fastest: {fastest}");
    }
    if let Some(cheapest) = &summary.cheapest {
        println!("cheapest: {cheapest}");
    }

    if let Some(judged) = judged {
        println!("\n-- judge --");
        for outcome in judged {
            match &outcome.result {
                Ok(text) => println!("== {}\n{}\n", outcome.model_id, text.trim_end()),
                Err(err) => println!("== {} not judged [{}]: {}\n", outcome.model_id, err.kind, err),
            }
        }
    }
    Ok(())
}
