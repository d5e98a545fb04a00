use std::sync::Arc;

use otf_proxy::api::{AppState, handler};
use otf_proxy::core::config::{AppConfig, prepare_sandbox_home};
use otf_proxy::errors::OtfError;
use otf_proxy::otf::HttpConnector;

fn main() -> Result<(), lambda_runtime::Error> {
    // Before the runtime exists, so no other thread can observe the change.
    let home = prepare_sandbox_home();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async move {
            otf_proxy::setup_logging();
            tracing::info!(home = %home.display(), "Sandbox home prepared");

            let config = AppConfig::from_env().map_err(|e| {
                tracing::error!("Config error: {}", e);
                OtfError::ConfigError(e)
            })?;
            let connector = HttpConnector::new(&config)?;
            tracing::info!(profile = config.profile.name, "OTF proxy starting");

            let state = Arc::new(AppState { config, connector });
            lambda_runtime::run(lambda_runtime::service_fn(move |event| {
                let state = Arc::clone(&state);
                async move { handler(&*state, event).await }
            }))
            .await
        })
}
