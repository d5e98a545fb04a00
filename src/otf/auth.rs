//! Cognito password login and ID-token claim decoding.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::core::config::{AppConfig, Credentials};
use crate::errors::OtfError;

const INITIATE_AUTH_TARGET: &str = "AWSCognitoIdentityProviderService.InitiateAuth";
const COGNITO_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthTokens {
    pub id_token: String,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthTokens>,
    challenge_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CognitoErrorBody {
    #[serde(rename = "__type")]
    kind: Option<String>,
    message: Option<String>,
}

#[must_use]
pub fn cognito_endpoint(region: &str) -> String {
    format!("https://cognito-idp.{region}.amazonaws.com/")
}

#[must_use]
pub fn build_initiate_auth_payload(client_id: &str, credentials: &Credentials) -> Value {
    json!({
        "AuthFlow": "USER_PASSWORD_AUTH",
        "ClientId": client_id,
        "AuthParameters": {
            "USERNAME": credentials.email,
            "PASSWORD": credentials.password,
        }
    })
}

/// Turns a Cognito error body into a caller-facing message.
#[must_use]
pub fn describe_cognito_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<CognitoErrorBody>(body) {
        Ok(CognitoErrorBody {
            kind: Some(kind),
            message,
        }) => {
            let kind = kind.rsplit('#').next().unwrap_or(&kind).to_string();
            match message {
                Some(m) => format!("{kind}: {m}"),
                None => kind,
            }
        }
        _ => format!("status {status}"),
    }
}

/// Logs in with the password flow.
///
/// # Errors
///
/// Returns `OtfError::AuthError` if Cognito rejects the credentials or asks for a challenge.
pub async fn login(
    http: &Client,
    config: &AppConfig,
    credentials: &Credentials,
) -> Result<AuthTokens, OtfError> {
    let payload = build_initiate_auth_payload(&config.cognito_client_id, credentials);

    let response = http
        .post(cognito_endpoint(&config.cognito_region))
        .header("X-Amz-Target", INITIATE_AUTH_TARGET)
        .header("Content-Type", COGNITO_CONTENT_TYPE)
        .body(payload.to_string())
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = describe_cognito_error(status.as_u16(), &body);
        warn!(status = status.as_u16(), "Cognito login rejected: {}", message);
        return Err(OtfError::AuthError(message));
    }

    let parsed: InitiateAuthResponse = serde_json::from_str(&body)
        .map_err(|e| OtfError::UnexpectedResponse(format!("Cognito response: {e}")))?;

    match (parsed.authentication_result, parsed.challenge_name) {
        (Some(tokens), _) => {
            debug!(expires_in = ?tokens.expires_in, "Cognito login succeeded");
            Ok(tokens)
        }
        (None, Some(challenge)) => Err(OtfError::AuthError(format!(
            "unsupported login challenge {challenge}"
        ))),
        (None, None) => Err(OtfError::AuthError(
            "login response carried no tokens".to_string(),
        )),
    }
}

/// Reads the member UUID (`cognito:username`) out of an ID token without verifying it.
///
/// # Errors
///
/// Returns `OtfError::AuthError` if the token is malformed or lacks the claim.
pub fn member_uuid_from_id_token(id_token: &str) -> Result<String, OtfError> {
    let payload = id_token
        .split('.')
        .nth(1)
        .ok_or_else(|| OtfError::AuthError("ID token is not a JWT".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| OtfError::AuthError(format!("ID token payload: {e}")))?;

    let claims: Value = serde_json::from_slice(&bytes)
        .map_err(|e| OtfError::AuthError(format!("ID token claims: {e}")))?;

    claims
        .get("cognito:username")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| OtfError::AuthError("ID token missing cognito:username".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_jwt(claims: &Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let body = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{body}.sig")
    }

    #[test]
    fn member_uuid_is_read_from_claims() {
        let token = fake_jwt(&json!({"cognito:username": "member-123", "email": "a@b.c"}));
        assert_eq!(member_uuid_from_id_token(&token).unwrap(), "member-123");
    }

    #[test]
    fn missing_claim_is_an_auth_error() {
        let token = fake_jwt(&json!({"email": "a@b.c"}));
        assert!(matches!(
            member_uuid_from_id_token(&token),
            Err(OtfError::AuthError(_))
        ));
        assert!(member_uuid_from_id_token("not-a-token").is_err());
    }

    #[test]
    fn cognito_errors_are_described() {
        let body = r#"{"__type":"NotAuthorizedException","message":"Incorrect username or password."}"#;
        assert_eq!(
            describe_cognito_error(400, body),
            "NotAuthorizedException: Incorrect username or password."
        );
        assert_eq!(describe_cognito_error(502, "<html>"), "status 502");
    }

    #[test]
    fn initiate_auth_payload_uses_password_flow() {
        let creds = Credentials {
            email: "a@b.c".into(),
            password: "pw".into(),
        };
        let payload = build_initiate_auth_payload("client", &creds);
        assert_eq!(payload["AuthFlow"], "USER_PASSWORD_AUTH");
        assert_eq!(payload["ClientId"], "client");
        assert_eq!(payload["AuthParameters"]["USERNAME"], "a@b.c");
    }

    #[test]
    fn tokens_parse_from_authentication_result() {
        let body = r#"{"AuthenticationResult":{"IdToken":"id","AccessToken":"acc","ExpiresIn":3600}}"#;
        let parsed: InitiateAuthResponse = serde_json::from_str(body).unwrap();
        let tokens = parsed.authentication_result.unwrap();
        assert_eq!(tokens.id_token, "id");
        assert_eq!(tokens.expires_in, Some(3600));
        assert!(tokens.refresh_token.is_none());
    }
}
