use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voxboard::agents::AgentRegistry;
use voxboard::cli::output::Output;
use voxboard::cli::{AgentCommands, Cli, Commands};
use voxboard::kv::KvProvider;
use voxboard::{app, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    let default_filter = if cli.verbose {
        "voxboard=debug,tower_http=debug"
    } else {
        "voxboard=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command {
        None => serve(config).await,
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Some(Commands::Agent(command)) => run_agent_command(config, command, &output).await,
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config)?;

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "voxboard listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// Run one agent subcommand directly against the configured store, without
/// starting the server.
async fn run_agent_command(
    config: Config,
    command: AgentCommands,
    output: &Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = KvProvider::from_config(&config.kv).create_store()?;
    let registry = AgentRegistry::new(store);

    match command {
        AgentCommands::List => {
            let agents = registry.list().await;
            output.agent_list(&agents);
        }
        AgentCommands::Show { name } => match registry.get(&name).await {
            Some(agent) => output.agent(&agent),
            None => {
                output.error(&format!("Agent '{}' not found", name));
                std::process::exit(1);
            }
        },
        AgentCommands::Add {
            name,
            assistant_id,
        } => {
            if !voxboard::api::handlers::agents::is_valid_agent_name(&name) {
                output.error("Name must contain only lowercase letters, numbers, and hyphens");
                std::process::exit(1);
            }
            let agent = registry.upsert(&name, &assistant_id).await?;
            output.success(&format!("Saved agent '{}'", agent.name));
            output.info(&format!("Public URL: /agent/{}", agent.name));
        }
        AgentCommands::Remove { name } => {
            if registry.delete(&name).await {
                output.success(&format!("Deleted agent '{}'", name.to_lowercase()));
            } else {
                output.error(&format!("Failed to delete agent '{}'", name));
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
