use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use renderlab::api;
use renderlab::assets::AssetLoader;
use renderlab::models::{AppConfig, PageRender, Strategy, TimeSample};
use renderlab::server;
use renderlab::services::{produce_sample, ClientFetch, ClientState, HttpTimeSource};

#[derive(Parser)]
#[command(name = "renderlab")]
#[command(about = "Rendering strategy demo server - mock time endpoint and cached page routes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print one freshly generated sample as JSON
    Sample,
    /// Fetch /api/time the way a client-rendered page does, printing each state
    Client {
        /// Base URL of a running server (defaults to the configured api_base_url)
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Extract the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Renderlab API",
        description = "Mock time endpoint and pages rendered under different cache policies",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_time,
        api::handle_ssg,
        api::handle_isr,
        api::handle_ssr,
        api::handle_rsc,
        api::handle_server_actions,
        api::handle_submit_message,
    ),
    components(schemas(TimeSample, PageRender, Strategy, api::MessageForm)),
    tags(
        (name = "Data", description = "Mock data endpoint"),
        (name = "Pages", description = "Pages rendered under each strategy"),
        (name = "Actions", description = "Server-side form mutations")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Sample) => run_sample_command().await,
        Some(Commands::Client { url }) => run_client_command(url).await,
        Some(Commands::Init { force, list }) => run_init_command(force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "renderlab=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_config() -> AppConfig {
    let loader = AssetLoader::from_env();
    AppConfig::load_from_assets(&loader).with_env_overrides()
}

/// Generate a sample locally, honoring the configured delay
async fn run_sample_command() -> anyhow::Result<()> {
    init_cli_tracing();

    let config = load_config();
    let sample = produce_sample(config.endpoint_delay()).await;
    println!("{}", serde_json::to_string_pretty(&sample)?);

    Ok(())
}

/// Mount a client fetch and print its state transitions
async fn run_client_command(url: Option<String>) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = load_config().with_api_base_url(url);
    let source = HttpTimeSource::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create client: {e}"))?;
    println!("GET {}", source.url());

    let fetch = ClientFetch::mount(Arc::new(source));
    println!("rendered at {}", fetch.rendered_at());

    let mut updates = fetch.updates();
    while let Some(state) = updates.next().await {
        match state {
            ClientState::Loading => println!("[loading] waiting for data..."),
            ClientState::Loaded(sample) => {
                println!("[loaded]");
                println!("{}", serde_json::to_string_pretty(&sample)?);
                return Ok(());
            }
            ClientState::Error(message) => {
                println!("[error] {message}");
                anyhow::bail!(message);
            }
        }
    }

    Ok(())
}

/// Extract the embedded config
fn run_init_command(force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(force)?;

    for f in &report.written {
        println!("  + {f}");
    }
    for f in &report.skipped {
        println!("  - {f} (exists, use --force to overwrite)");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let api_base_url = std::env::var("API_BASE_URL").ok();

    println!("Renderlab v{VERSION}");
    println!("Rendering strategy demo server\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR    = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE  = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  API_BASE_URL = {}",
        api_base_url.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::from_env();
    println!("\nConfig:  {}", loader.config_source());

    println!("\nRoutes:");
    println!("  GET  /api/time        mock data endpoint");
    for strategy in Strategy::ALL {
        println!("  GET  {:<17} {}", strategy.path(), strategy.title());
    }
    println!("  POST /server-actions  submit a message (form field: message)");

    println!("\nCommands:");
    println!("  renderlab serve    Start the HTTP server");
    println!("  renderlab sample   Print one generated sample");
    println!("  renderlab client   Fetch like a client-rendered page");
    println!("  renderlab init     Extract embedded config.yaml");
    println!("\nRun 'renderlab --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "renderlab=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let loader = AssetLoader::from_env();
    tracing::info!(config = %loader.config_source(), "Config source");

    let config = AppConfig::load_from_assets(&loader).with_env_overrides();
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let prerender = config.prerender;

    let state = server::create_app_state(config)?;
    let pages = state.pages.clone();

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Renderlab server listening");

    if prerender {
        // Pages fetch from this very server; connections queue until serve starts
        tokio::spawn(async move {
            pages.prerender().await;
        });
    }

    axum::serve(listener, app).await?;

    Ok(())
}
