//! `outpages publish` command implementation.

use std::path::PathBuf;

use clap::Args;
use outpages_cloudflare::{CloudflareClient, Deployer};
use outpages_config::Config;
use outpages_outline::OutlineClient;
use outpages_site::SiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the publish command.
#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Build the site without uploading anything.
    #[arg(long)]
    dry_run: bool,

    /// Path to configuration file (default: auto-discover outpages.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// # Errors
    ///
    /// Returns an error if any stage of the build or deployment fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref())?;
        let outline_config = config.require_outline()?;

        let outline = OutlineClient::new(&outline_config.base_url, &outline_config.api_token);
        output.info("Loading documents from Outline...");
        let documents = outline.list_documents(outline_config.collection_id)?;
        output.info(&format!("Loaded {} documents", documents.len()));

        let pages = SiteBuilder::new(&outline).build(&documents)?;

        if self.dry_run {
            output.highlight("\n[DRY RUN] Nothing uploaded.");
            print_page_summary(&output, &pages);
            return Ok(());
        }

        let cloudflare_config = config.require_cloudflare()?;
        let cloudflare = CloudflareClient::new(
            &cloudflare_config.account_id,
            &cloudflare_config.project,
            &cloudflare_config.api_token,
        );

        output.info(&format!("Deploying {} pages...", pages.len()));
        let outcome = Deployer::new(&cloudflare).deploy(&pages)?;

        output.success(&format!(
            "Published {} paths in {} batch(es)",
            outcome.manifest.len(),
            outcome.batches
        ));
        output.highlight(&format!("Site live at {}", outcome.url));
        Ok(())
    }
}

fn print_page_summary(output: &Output, pages: &[outpages_site::Page]) {
    let total: usize = pages.iter().map(|p| p.content.len()).sum();
    for page in pages {
        output.info(&format!("  /{}  ({} bytes)", page.path, page.content.len()));
    }
    output.info(&format!("\n{} pages, {total} bytes total", pages.len()));
}
