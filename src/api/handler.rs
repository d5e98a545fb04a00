//! OTF proxy handler: credentials, session, gather, serialize, respond.

use std::backtrace::Backtrace;

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use super::helpers;
use crate::core::config::{AppConfig, Credentials};
use crate::errors::OtfError;
use crate::features::gather::gather;
use crate::features::profile::HandlerProfile;
use crate::otf::session::OtfConnector;

/// Process-wide state built once in `main`.
pub struct AppState<C> {
    pub config: AppConfig,
    pub connector: C,
}

/// Lambda handler for the OTF proxy entrypoint.
///
/// Always answers with a proxy response; failures become 400/500 bodies.
///
/// # Errors
///
/// Never returns `Err`; the `Result` is what `lambda_runtime` expects.
#[tracing::instrument(level = "info", skip(state, event), fields(request_id = %Uuid::new_v4()))]
pub async fn function_handler<C: OtfConnector>(
    state: &AppState<C>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    info!(
        path = helpers::request_path(&event.payload).unwrap_or("/"),
        "OTF proxy received request"
    );

    Ok(respond(Credentials::from_env(), &state.connector, &state.config.profile).await)
}

/// Turns a credential lookup into exactly one proxy response.
pub async fn respond(
    credentials: Result<Credentials, OtfError>,
    connector: &dyn OtfConnector,
    profile: &HandlerProfile,
) -> Value {
    let credentials = match credentials {
        Ok(c) => c,
        Err(e) => {
            error!("Rejecting request: {}", e);
            return helpers::err_response(e.status_code(), &e.to_string());
        }
    };

    match build_body(&credentials, connector, profile).await {
        Ok(body) => helpers::json_response(200, body),
        Err(e) => {
            error!(
                error = %e,
                detail = ?e,
                backtrace = %Backtrace::capture(),
                "OTF proxy request failed"
            );
            helpers::err_response(e.status_code(), &e.to_string())
        }
    }
}

async fn build_body(
    credentials: &Credentials,
    connector: &dyn OtfConnector,
    profile: &HandlerProfile,
) -> Result<String, OtfError> {
    let session = connector.connect(credentials).await?;
    let payload = gather(session.as_ref(), profile).await?;
    let body = serde_json::to_string(&payload)?;
    Ok(body)
}
