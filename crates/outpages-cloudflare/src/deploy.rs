//! Batch partitioning, manifest construction, and deployment orchestration.

use std::collections::BTreeMap;
use std::ops::Range;

use outpages_site::{Format, Page};
use tracing::info;

use crate::client::CloudflareClient;
use crate::error::DeployError;
use crate::hash::content_hash;

/// Per-call size ceiling of the batched asset upload endpoint.
pub const MAX_BATCH_BYTES: usize = 10_000_000;

/// Partition pages into contiguous upload batches.
///
/// The running total is checked before each addition: once the pages taken
/// so far already exceed the ceiling, the batch is cut and the next page
/// starts a new one. A batch may therefore overshoot the ceiling by its
/// final page; a page bigger than the ceiling ends up alone in its batch
/// when nothing precedes it.
fn partition_batches(pages: &[Page]) -> Vec<Range<usize>> {
    let mut batches = Vec::new();
    let mut start = 0;
    let mut running = 0usize;

    for (index, page) in pages.iter().enumerate() {
        if running > MAX_BATCH_BYTES {
            batches.push(start..index);
            start = index;
            running = 0;
        }
        running += page.content.len();
    }
    if start < pages.len() {
        batches.push(start..pages.len());
    }
    batches
}

/// Manifest key for a page: its public path with a leading slash.
///
/// Markdown pages are served as HTML and get a literal `.html` suffix; every
/// other format keeps its path unchanged.
fn manifest_key(page: &Page) -> String {
    if page.format == Format::Markdown {
        format!("/{}.html", page.path)
    } else {
        format!("/{}", page.path)
    }
}

/// Result of a completed deployment.
#[derive(Debug)]
pub struct DeploymentOutcome {
    /// Public URL of the deployed site.
    pub url: String,
    /// The published path→hash manifest.
    pub manifest: BTreeMap<String, String>,
    /// Number of upload batches issued.
    pub batches: usize,
}

/// Runs the upload-and-publish half of a build.
pub struct Deployer<'a> {
    client: &'a CloudflareClient,
}

impl<'a> Deployer<'a> {
    /// Create a deployer over `client`.
    #[must_use]
    pub fn new(client: &'a CloudflareClient) -> Self {
        Self { client }
    }

    /// Upload all pages and publish the manifest.
    ///
    /// Fetches a short-lived upload token, pushes each batch, then submits
    /// the manifest with the long-lived API token. The first non-success
    /// response aborts the whole deployment.
    pub fn deploy(&self, pages: &[Page]) -> Result<DeploymentOutcome, DeployError> {
        let upload_token = self.client.upload_token()?;

        let hashes: Vec<String> = pages
            .iter()
            .map(|page| content_hash(&page.content))
            .collect();

        let batches = partition_batches(pages);
        info!(pages = pages.len(), batches = batches.len(), "uploading site");
        for (index, range) in batches.iter().enumerate() {
            self.client.upload_assets(
                &upload_token,
                &pages[range.clone()],
                &hashes[range.clone()],
                index,
            )?;
        }

        let manifest: BTreeMap<String, String> = pages
            .iter()
            .zip(&hashes)
            .map(|(page, hash)| (manifest_key(page), hash.clone()))
            .collect();

        self.client.create_deployment(&manifest)?;

        Ok(DeploymentOutcome {
            url: self.client.site_url(),
            manifest,
            batches: batches.len(),
        })
    }
}
