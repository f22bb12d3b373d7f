//! CLI error types.

use outpages_cloudflare::DeployError;
use outpages_config::ConfigError;
use outpages_outline::OutlineError;
use outpages_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Outline(#[from] OutlineError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Deploy(#[from] DeployError),
}
