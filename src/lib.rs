//! Websheet - Web Page to Spreadsheet Exporter
//!
//! This crate fetches a web page, extracts its title, paragraphs, images,
//! links and tables into a [`Document`], and writes the categories a caller
//! selects into a multi-sheet xlsx workbook.
//!
//! # Features
//!
//! - **Content Extraction**: Pure functions over a parser-independent node trait
//! - **URL Resolution**: Relative image and link references made absolute
//! - **Workbook Export**: A "Main Content" sheet plus one sheet per table
//! - **HTTP Server**: axum endpoints to run exports and download results
//!
//! # Architecture
//!
//! ```text
//! URL ──▶ DocumentFetcher ──▶ ContentExtractor ──▶ Document
//!                               │        │            │
//!                               ▼        ▼            ▼
//!                        UrlResolver  TableParser  WorkbookBuilder ──▶ xlsx bytes
//!                                                                        │
//!                                                                        ▼
//!                                                                   ExportStore
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use websheet::{ExportService, HttpFetcher, SelectionSet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = ExportService::new(HttpFetcher::new()?);
//!     let selection: SelectionSet = "title,tables".parse()?;
//!
//!     let output = service.extract_and_build("example.com", &selection).await?;
//!     std::fs::write("example.xlsx", &output.workbook)?;
//!
//!     println!("Extracted: {}", output.document.title());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod cors;
pub mod document;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod handlers;
pub mod preview;
pub mod selection;
pub mod service;
pub mod store;
pub mod workbook;

// Re-exports for convenience
pub use config::ServiceConfig;
pub use document::{Document, Table};
pub use error::{Error, Result};
pub use extraction::{ContentExtractor, MarkupNode, TableParser, UrlResolver};
pub use fetch::{DocumentFetcher, FetchOptions, HttpFetcher};
pub use handlers::{app_router, AppState};
pub use preview::Preview;
pub use selection::{Category, SelectionSet};
pub use service::{ExportService, ScrapeOutput};
pub use store::ExportStore;
pub use workbook::WorkbookBuilder;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
