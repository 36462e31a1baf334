//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external capability
//! traits, allowing lifecycle testing without a network or the real media
//! tools.
//!
//! # Example
//!
//! ```rust,ignore
//! use gifsmith_core::testing::{MockFrameExtractor, MockGifAssembler, MockVideoFetcher};
//!
//! let fetcher = MockVideoFetcher::new();
//! fetcher.set_default_formats(vec![18, 22]).await;
//!
//! let extractor = MockFrameExtractor::new();
//! let assembler = MockGifAssembler::new();
//!
//! // Use in DownloadManager::new(...)
//! ```

mod mock_assembler;
mod mock_extractor;
mod mock_fetcher;

pub use mock_assembler::MockGifAssembler;
pub use mock_extractor::MockFrameExtractor;
pub use mock_fetcher::{MockVideoFetcher, RecordedDownload};
