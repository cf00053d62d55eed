pub mod render;
pub mod sync;

use anyhow::{Context, Result};
use chrono::Utc;
use issuesync_core::HostContext;
use issuesync_renderer::RenderContext;

/// Host configuration plus the render context stamped at run start.
pub(crate) fn load_host() -> Result<(HostContext, RenderContext)> {
    let host = HostContext::from_env().context("failed to read host configuration")?;
    let context = RenderContext::from_host(&host, utf8_vars(), Utc::now());
    Ok((host, context))
}

/// Process environment, skipping entries that are not valid UTF-8.
fn utf8_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(key, value)| {
        Some((key.into_string().ok()?, value.into_string().ok()?))
    })
}
