use clap::Parser;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intervals_mcp_runtime::{DEFAULT_BASE_URL, McpCommands, RuntimeConfig, run};

#[derive(Parser)]
#[command(
    name = "intervals-mcp",
    version,
    about = "MCP server exposing intervals.icu training data over stdio"
)]
struct Cli {
    /// API base URL
    #[arg(long, env = "INTERVALS_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Athlete id the server is scoped to (e.g. i12345)
    #[arg(long, env = "ATHLETE_ID")]
    athlete_id: Option<String>,

    /// intervals.icu API key
    #[arg(long, env = "API_KEY")]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<McpCommands>,
}

fn exit_error(message: &str, docs_hint: Option<&str>) -> ! {
    let mut err = json!({
        "error": "config_error",
        "message": message
    });
    if let Some(hint) = docs_hint {
        err["docs_hint"] = json!(hint);
    }
    eprintln!(
        "{}",
        serde_json::to_string_pretty(&err).unwrap_or_else(|_| "{}".to_string())
    );
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    // Load .env if present (dev only)
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Structured JSON logging on stderr; stdout belongs to the MCP transport
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intervals_mcp_runtime=info,intervals_client=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let Some(athlete_id) = cli.athlete_id else {
        exit_error(
            "ATHLETE_ID is not set",
            Some("Set the ATHLETE_ID environment variable (or pass --athlete-id). Your id is shown in your intervals.icu profile URL, e.g. i12345."),
        );
    };
    let Some(api_key) = cli.api_key else {
        exit_error(
            "API_KEY is not set",
            Some("Set the API_KEY environment variable (or pass --api-key). Generate a key under intervals.icu Settings > Developer Settings."),
        );
    };

    let config = RuntimeConfig {
        athlete_id,
        api_key,
        base_url: cli.base_url,
    };
    let code = run(config, cli.command.unwrap_or(McpCommands::Serve)).await;
    std::process::exit(code);
}
