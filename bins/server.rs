use std::process::ExitCode;

use configs::AppConfig;
use dotenvy::dotenv;
use tokio::runtime::Runtime;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // 提前加载 .env，使得 RUST_LOG / LOG_FORMAT 等环境变量生效
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
}

fn install_panic_hook(service_id: Uuid) {
    let pid = std::process::id();
    std::panic::set_hook(Box::new(move |info| {
        error!(event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));
}

fn build_runtime(worker_threads: Option<usize>) -> std::io::Result<Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    builder.build()
}

/// Serve until `server::run` fails or Ctrl+C arrives.
async fn serve(cfg: AppConfig) -> ExitCode {
    let server_task = tokio::spawn(server::run(cfg));
    tokio::select! {
        res = server_task => match res {
            Ok(Ok(())) => ExitCode::SUCCESS,
            Ok(Err(e)) => {
                error!(event = "run_failed", error = %e, "course service stopped with an error");
                ExitCode::FAILURE
            }
            Err(e) => {
                error!(event = "task_join_error", error = %e, "server task join error");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
            ExitCode::SUCCESS
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let service_id = Uuid::new_v4();
    install_panic_hook(service_id);

    // config.toml 优先；仅当文件不存在时回退到环境变量
    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = ?e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match build_runtime(cfg.server.worker_threads) {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        %service_id,
        version = env!("CARGO_PKG_VERSION"),
        addr = %cfg.server.bind_addr(),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "course service starting"
    );
    let code = rt.block_on(serve(cfg));
    info!(event = "stop", %service_id, "course service stopped");
    code
}
