//! OTF proxy - serverless handlers that expose an OrangeTheory Fitness account as one JSON document.
//!
//! Each invocation authenticates with the credentials in `OTF_EMAIL` / `OTF_PASSWORD`,
//! fetches a configured set of datasets one after another, flattens the class-like
//! ones, and answers with a single API Gateway proxy response.
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - reqwest for the Cognito login and the OTF member APIs
//! - a `HandlerProfile` that lists the datasets to gather and which to flatten
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use otf_proxy::api::respond;
//! use otf_proxy::core::config::{AppConfig, Credentials};
//! use otf_proxy::otf::HttpConnector;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     otf_proxy::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let connector = HttpConnector::new(&config)?;
//!
//!     let response = respond(Credentials::from_env(), &connector, &config.profile).await;
//!     println!("{}", response["statusCode"]);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod core;
pub mod errors;
pub mod features;
pub mod otf;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch` Logs.
/// Call it once at the start of each Lambda binary. With the `debug-logs` feature
/// the level is raised to DEBUG.
///
/// # Example
///
/// ```
/// otf_proxy::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;

    let level = if cfg!(feature = "debug-logs") {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(level)
        .with(fmt_layer)
        .try_init();
}
