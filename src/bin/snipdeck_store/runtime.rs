use std::net::SocketAddr;

use axum::routing::get;
use clap::Parser;

use snipdeck::logging::{LogTarget, init as init_logging};

use super::*;

#[derive(Parser)]
#[command(name = "snipdeck-store")]
#[command(about = "Development row store for snipdeck", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:54321")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Directory holding tables.json
    #[arg(long, default_value = "./snipdeck-data")]
    data_dir: PathBuf,

    /// Key clients must send as `apikey` or bearer token
    #[arg(long, default_value = "dev")]
    api_key: String,
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(LogTarget::Stderr, "snipdeck_store=info,snipdeck=info")?;

    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;
    let db = load_db(&args.data_dir).context("load tables")?;
    tracing::info!(
        projects = db.rows("projects").len(),
        snippets = db.rows("code_snippets").len(),
        "loaded tables"
    );

    let state = Arc::new(AppState {
        api_key: args.api_key.clone(),
        data_dir: args.data_dir.clone(),
        db: Arc::new(RwLock::new(db)),
    });

    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(rest_router(state.clone()))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!("snipdeck-store listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
