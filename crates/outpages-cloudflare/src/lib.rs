//! Content-addressed deployment to Cloudflare Pages.
//!
//! Pages are identified by a truncated SHA-256 digest of their bytes, pushed
//! in size-bounded batches through the direct-upload API under a short-lived
//! upload token, and published atomically by submitting a path→hash manifest
//! to the deployment endpoint. Any non-success response aborts the whole
//! deployment; nothing is retried and no partial deployment is recorded.

mod client;
mod deploy;
mod error;
mod hash;

pub use client::CloudflareClient;
pub use deploy::{Deployer, DeploymentOutcome, MAX_BATCH_BYTES};
pub use error::DeployError;
pub use hash::content_hash;
