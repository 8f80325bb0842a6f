mod render;

use std::path::PathBuf;
use std::sync::Arc;

use arena_app::Config;
use arena_compare::{
    ComparisonSummary, Comparator, DEFAULT_JUDGE_TEMPLATE, EvaluationConfig, EvaluationTarget,
};
use arena_registry::Registry;
use arena_relay::{DEFAULT_ENDPOINT, HttpRelay, HttpRelayConfig};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arena", version, about = "Compare LLM responses side by side.")]
struct Cli {
    /// Config file. Defaults to `arena.toml` in the user config directory.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List providers, whether they are configured, and their models.
    Providers,
    /// List models across every provider.
    Models(ModelsArgs),
    /// Show the cheapest models by input, output and combined price.
    Cheapest {
        #[arg(long)]
        json: bool,
    },
    /// Send one prompt to several models and compare the answers.
    Compare(CompareArgs),
}

#[derive(Args)]
struct ModelsArgs {
    /// Only models that accept images.
    #[arg(long)]
    vision: bool,
    /// Only models with function calling.
    #[arg(long)]
    functions: bool,
    /// Max input price, USD per 1000 tokens.
    #[arg(long, value_name = "USD")]
    max_input: Option<f64>,
    /// Max output price, USD per 1000 tokens.
    #[arg(long, value_name = "USD")]
    max_output: Option<f64>,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CompareArgs {
    /// Model to query. Repeat for each model; results keep this order.
    #[arg(short = 'm', long = "model", value_name = "ID", required = true)]
    models: Vec<String>,
    #[arg(long)]
    system: Option<String>,
    #[arg(long)]
    temperature: Option<f32>,
    #[arg(long)]
    top_p: Option<f32>,
    #[arg(long)]
    max_tokens: Option<u32>,
    /// Stop sequence. May be repeated.
    #[arg(long)]
    stop: Vec<String>,
    /// Max requests in flight. Overrides `[dispatch] concurrency`.
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,
    /// Have this model grade every answer.
    #[arg(long, value_name = "MODEL")]
    judge: Option<String>,
    /// Judge prompt with `{input}` and `{output}` placeholders.
    #[arg(long, value_name = "TEMPLATE", requires = "judge")]
    judge_template: Option<String>,
    #[arg(long)]
    json: bool,
    prompt: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _ = dotenvy::dotenv();

    // Logs go to stderr so `--json` output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => arena_app::default_config_path()?,
    };
    let config = Config::load(&config_path)?;
    let registry = Arc::new(build_registry(&config));

    match cli.command {
        Command::Providers => render::providers(&registry),
        Command::Models(args) => list_models(&registry, &args)?,
        Command::Cheapest { json } => render::cheapest(registry.cheapest().as_ref(), json)?,
        Command::Compare(args) => compare(registry, &config, args).await?,
    }
    Ok(())
}

fn build_registry(config: &Config) -> Registry {
    let endpoint = config
        .relay
        .url
        .clone()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let relay = HttpRelay::new(HttpRelayConfig {
        endpoint,
        timeout: config.relay_timeout(),
    });
    tracing::debug!(endpoint = relay.endpoint(), "using relay");

    let mut registry = Registry::new();
    arena_providers::register_all(&mut registry, Arc::new(relay));

    let configs = config.provider_configs(&registry);
    if let Err(err) = registry.configure_many(configs) {
        tracing::warn!(error = %err, "some providers could not be configured");
    }
    registry
}

fn list_models(registry: &Registry, args: &ModelsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut models = match (args.max_input, args.max_output) {
        (None, None) => registry.all_models(),
        (max_input, max_output) => registry.filter_by_price_ceiling(
            max_input.unwrap_or(f64::INFINITY),
            max_output.unwrap_or(f64::INFINITY),
        ),
    };
    models.retain(|m| {
        (!args.vision || m.capabilities.supports_vision)
            && (!args.functions || m.capabilities.supports_function_calling)
    });
    render::models(&models, args.json)
}

async fn compare(
    registry: Arc<Registry>,
    config: &Config,
    args: CompareArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = arena_llm::request(args.prompt.clone());
    if let Some(system) = args.system {
        builder.system(system);
    }
    if let Some(t) = args.temperature {
        builder.temperature(t);
    }
    if let Some(p) = args.top_p {
        builder.top_p(p);
    }
    if let Some(n) = args.max_tokens {
        builder.max_tokens(n);
    }
    if !args.stop.is_empty() {
        builder.stop(args.stop);
    }

    let limit = args.concurrency.or(config.dispatch.concurrency).unwrap_or(0);
    let comparator = Comparator::new(registry).with_concurrency_limit(limit);

    let outcomes = comparator.compare(&args.models, builder.build()).await?;
    let summary = ComparisonSummary::from_outcomes(&outcomes);

    let judged = match args.judge {
        Some(judge_model) => {
            let template = args
                .judge_template
                .unwrap_or_else(|| DEFAULT_JUDGE_TEMPLATE.to_string());
            let evaluation = EvaluationConfig::llm_judge("judge", template, judge_model);
            let targets = EvaluationTarget::from_outcomes(&outcomes);
            Some(
                comparator
                    .run_evaluation(&evaluation, &args.prompt, &targets)
                    .await?,
            )
        }
        None => None,
    };

    render::comparison(&outcomes, &summary, judged.as_deref(), args.json)
}
