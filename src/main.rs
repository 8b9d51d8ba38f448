use clap::Parser;
use wayfinder::{names, store::Store, AdminCredentials, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the decision tree JSON document.
    #[arg(long, env, default_value = names::DEFAULT_DATA_FILE)]
    data_file: std::path::PathBuf,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:4114")]
    address: String,

    /// Username for the admin panel and mutating API.
    #[arg(long, env, default_value = names::DEFAULT_ADMIN_USERNAME)]
    admin_username: String,

    /// Password for the admin panel and mutating API.
    #[arg(long, env, default_value = names::DEFAULT_ADMIN_PASSWORD)]
    admin_password: String,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,axum=info,wayfinder=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    if args.admin_password == names::DEFAULT_ADMIN_PASSWORD {
        tracing::warn!("running with the default admin password");
    }

    let store = Store::new(args.data_file).await?;
    let state = AppState {
        store,
        admin: AdminCredentials {
            username: args.admin_username,
            password: args.admin_password,
        },
    };

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, wayfinder::router(state)).await?;

    Ok(())
}
