use idilia_core::{Context, OsEnv, Result};
use idilia_http_send_reqwest::ReqwestHttpSend;
use std::time::Duration;

/// Create a context reading the process environment and holding one
/// persistent connection with the given connect and read timeout.
pub fn default_context(timeout: Duration) -> Result<Context> {
    Ok(Context::new()
        .with_http_send(ReqwestHttpSend::persistent(timeout)?)
        .with_env(OsEnv))
}
