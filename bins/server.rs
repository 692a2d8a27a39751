use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn load_config() -> Option<configs::AppConfig> {
    match configs::AppConfig::load_or_env() {
        Ok(cfg) => {
            common::utils::logging::init_logging(cfg.server.json_logs());
            Some(cfg)
        }
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "car_stock", event = "config_invalid", error = %e, "failed to load configuration");
            None
        }
    }
}

fn main() -> ExitCode {
    // .env first so RUST_LOG and DATABASE_URL are visible to config and logging
    dotenv().ok();
    let Some(cfg) = load_config() else {
        return ExitCode::FAILURE;
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "car_stock",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "car_stock", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "car_stock",
        event = "start",
        %service_id,
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "car stock service starting"
    );

    rt.block_on(async move {
        match server::run_with_config(cfg).await {
            Ok(()) => {
                info!(service = "car_stock", event = "stop", %service_id, pid, "server stopped normally");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "car_stock", event = "run_failed", error = %e, "server exited with error");
                ExitCode::FAILURE
            }
        }
    })
}
