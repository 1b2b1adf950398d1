//! Protocol version discovery against the WhatsApp Web update endpoint.

use atende_core::{error::AtendeError, event::VersionInfo};
use serde::Deserialize;

const CHECK_UPDATE_URL: &str = "https://web.whatsapp.com/check-update?version=2.3000.0&platform=web";

#[derive(Debug, Deserialize)]
struct CheckUpdateResponse {
    #[serde(rename = "currentVersion")]
    current_version: String,
    #[serde(rename = "isBroken", default)]
    is_broken: bool,
    #[serde(rename = "isBelowSoft", default)]
    is_below_soft: bool,
}

/// Fetch the current web-client version advertised by the server.
pub async fn fetch_latest(http: &reqwest::Client) -> Result<VersionInfo, AtendeError> {
    let resp: CheckUpdateResponse = http
        .get(CHECK_UPDATE_URL)
        .send()
        .await
        .map_err(|e| AtendeError::Transport(format!("version check failed: {e}")))?
        .json()
        .await
        .map_err(|e| AtendeError::Transport(format!("version check parse failed: {e}")))?;

    parse_response(&resp)
}

fn parse_response(resp: &CheckUpdateResponse) -> Result<VersionInfo, AtendeError> {
    let mut parts = resp.current_version.split('.').map(str::parse::<u32>);
    let mut next = || {
        parts
            .next()
            .and_then(Result::ok)
            .ok_or_else(|| {
                AtendeError::Transport(format!(
                    "unparseable version '{}'",
                    resp.current_version
                ))
            })
    };
    let version = [next()?, next()?, next()?];

    Ok(VersionInfo {
        version,
        is_latest: !resp.is_broken && !resp.is_below_soft,
    })
}
