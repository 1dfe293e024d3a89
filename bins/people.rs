use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

const SERVICE: &str = "people";

fn init_logging() {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let service_id = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = SERVICE, event = "panic", %service_id, message = %info, "unhandled panic occurred");
    }));

    let cfg = configs::AppConfig::load_and_validate()?;
    info!(
        service = SERVICE,
        event = "start",
        %service_id,
        version = env!("CARGO_PKG_VERSION"),
        "people service starting"
    );

    tokio::select! {
        res = server::run_people(&cfg) => res?,
        _ = tokio::signal::ctrl_c() => {
            info!(service = SERVICE, event = "shutdown_signal", %service_id, "received Ctrl+C, shutting down");
        }
    }
    Ok(())
}
