//! Fetch, extract and build in one call
//!
//! [`ExportService`] holds no state besides its fetcher: every call gets its
//! inputs as parameters and returns a self-contained [`ScrapeOutput`]. Keeping
//! the last result around, or writing it somewhere, is up to the caller.

use crate::document::Document;
use crate::error::Result;
use crate::extraction::{normalize_base, ContentExtractor};
use crate::fetch::DocumentFetcher;
use crate::preview::Preview;
use crate::selection::SelectionSet;
use crate::workbook::WorkbookBuilder;
use tracing::{error, info, instrument};

/// Everything produced by one export
#[derive(Debug, Clone)]
pub struct ScrapeOutput {
    /// Extracted document
    pub document: Document,
    /// Raw markup of each table, for previews
    pub tables_html: Vec<String>,
    /// Serialized xlsx workbook
    pub workbook: Vec<u8>,
}

impl ScrapeOutput {
    /// Preview of this output for `selection`
    pub fn preview(&self, selection: &SelectionSet) -> Preview {
        Preview::build(&self.document, &self.tables_html, selection)
    }
}

/// Stateless export pipeline over a [`DocumentFetcher`]
#[derive(Debug, Clone)]
pub struct ExportService<F> {
    fetcher: F,
}

impl<F: DocumentFetcher> ExportService<F> {
    /// Create a service using `fetcher` for page retrieval
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// The underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch `url`, extract its content and build a workbook for `selection`.
    ///
    /// There is no partial success: either the document and the workbook
    /// are both returned or the whole call fails.
    #[instrument(skip(self, selection), fields(selection = %selection))]
    pub async fn extract_and_build(
        &self,
        url: &str,
        selection: &SelectionSet,
    ) -> Result<ScrapeOutput> {
        let base_url = normalize_base(url);

        let html = self.fetcher.fetch(&base_url).await.map_err(|e| {
            error!("Fetch failed for {}: {}", base_url, e);
            e
        })?;

        let extraction = ContentExtractor::extract_html(&html, &base_url);
        let workbook = WorkbookBuilder::build(&extraction.document, selection)?;

        info!(
            "Built workbook of {} bytes for {}",
            workbook.len(),
            base_url
        );

        Ok(ScrapeOutput {
            document: extraction.document,
            tables_html: extraction.tables_html,
            workbook,
        })
    }
}
