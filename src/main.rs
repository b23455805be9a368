use anyhow::Context;
use chrono::Utc;
use rolegate::{
    build_app,
    cli::{
        commands,
        init::{self, InitConfig, InitResult},
        output::Output,
        Cli, Commands, TokenCommands, UserCommands,
    },
    db::DatabaseProvider,
    AppState, CredentialHasher, RolegateConfig, TokenCodec,
};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the secret may come from the real environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command {
        Some(Commands::Init {
            path,
            force,
            host,
            port,
        }) => {
            let result = init::run(
                InitConfig {
                    path,
                    force,
                    host,
                    port,
                },
                &output,
            );
            match result {
                InitResult::Success => Ok(()),
                InitResult::AlreadyExists => std::process::exit(1),
                InitResult::Error(e) => anyhow::bail!(e),
            }
        }
        Some(Commands::Config { validate }) => {
            let config = RolegateConfig::load_unvalidated(&cli.config)?;
            if let Err(e) = commands::show_config(&config, validate, &output) {
                output.error(&e.to_string());
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::User(UserCommands::Create {
            username,
            password,
            role,
        })) => {
            let config = RolegateConfig::load_unvalidated(&cli.config)?;
            let store = DatabaseProvider::from_url(&config.database.url)
                .create_client()
                .await?;

            let user = commands::create_user(
                store.as_ref(),
                &CredentialHasher::new(),
                &username,
                &password,
                &role,
            )
            .await?;

            output.user(&user);
            Ok(())
        }
        Some(Commands::Token(TokenCommands::Inspect { token })) => {
            let config = RolegateConfig::load_unvalidated(&cli.config)?;
            let codec = TokenCodec::new(config.jwt_secret()?);

            match commands::inspect_token(&codec, &token, Utc::now()) {
                Ok(payload) => {
                    output.token(&payload);
                    Ok(())
                }
                Err(rejection) => {
                    output.error(&format!("Token rejected: {}", rejection));
                    std::process::exit(1);
                }
            }
        }
        None => serve(&cli.config, cli.verbose, cli.json_logs, &output).await,
    }
}

async fn serve(
    config_path: &Path,
    verbose: bool,
    json_logs: bool,
    output: &Output,
) -> anyhow::Result<()> {
    let config = RolegateConfig::load(config_path).with_context(|| {
        format!(
            "failed to load {} (run `rolegate-server init` to create one)",
            config_path.display()
        )
    })?;

    init_tracing(&config, verbose, json_logs);
    output.banner();

    let secret = config.jwt_secret()?;
    let store = DatabaseProvider::from_url(&config.database.url)
        .create_client()
        .await?;

    let addr = config.bind_address();
    let state = AppState::new(config, store, &secret);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(%addr, "rolegate listening");
    output.info(&format!("Listening on http://{}", addr));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &RolegateConfig, verbose: bool, json: bool) {
    let fallback = if verbose {
        "debug"
    } else {
        config.server.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
