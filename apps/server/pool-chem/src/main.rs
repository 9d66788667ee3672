use pool_chem::error::ServerError;
use pool_chem::logger::initialize as LoggerInitialize;
use pool_chem::routes::router;
use pool_chem::server::serve;
use pool_chem::settings::{ServerSettings, env_lookup, load_dotenv};
use pool_chem::state::AppState;

use report_core::ReportTranslator;
use report_core::config::UpstreamConfig;

use std::process::ExitCode;

use log::{debug, error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("pool-chem: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    // .env first: it may carry LOG_DIR / LOG_LEVEL
    let dotenv = load_dotenv();
    let settings = ServerSettings::from_lookup(env_lookup)?;

    LoggerInitialize(&settings.log_dir, settings.log_level)?;

    info!("Pool ChemGPT report server starting");
    match (&dotenv.path, &dotenv.error) {
        (Some(path), _) => info!("Loaded .env from: {}", path.display()),
        (None, Some(e)) => warn!("Failed to parse .env at {e}"),
        (None, None) => debug!("No .env file found - using existing environment variables"),
    }

    let config = UpstreamConfig::from_lookup(env_lookup)?;
    let translator = ReportTranslator::with_http_transport(config)?;

    if !settings.static_dir.is_dir() {
        warn!(
            "Static directory {} does not exist; only {} will be served",
            settings.static_dir.display(),
            pool_chem::routes::REPORT_ROUTE
        );
    }

    let app = router(AppState::new(translator), &settings.static_dir);
    serve(app, settings.socket_addr()).await
}
