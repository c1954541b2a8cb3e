//! # tessdata-discovery
//!
//! Locate Tesseract OCR language-data directories (`*.traineddata`) on the
//! current machine, without knowing in advance how the engine was
//! installed.
//!
//! Discovery runs an ordered set of independent search strategies for the
//! target OS family (registry keys, environment variables, well-known
//! install locations, package-manager trees, paths next to the `tesseract`
//! binary, drive enumeration and a bounded filesystem walk), validates
//! every path they produce and returns a deduplicated, confidence-ranked
//! [`DiscoveryReport`].
//!
//! ## Features
//!
//! - `discover()` async function searching with every built-in strategy
//! - [`DiscoveryEngine`] for custom strategy sets and injected hosts
//! - [`DiscoverOptions`] for OS overrides, allowlists and timeouts
//! - [`Confidence`] scoring: `Verified > Likely > Possible`
//!
//! ## Example
//!
//! ```rust,no_run
//! use tessdata_discovery::{discover, DiscoverOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let report = discover(&DiscoverOptions::default())
//!         .await
//!         .expect("default options are valid");
//!
//!     match report.primary() {
//!         Some(best) => println!("tessdata at {:?} ({})", best.path, best.confidence),
//!         None => println!("no tessdata directory found"),
//!     }
//!
//!     for run in report.strategies_run() {
//!         println!("{}: {}", run.id, run.status.label());
//!     }
//! }
//! ```

mod discover;
mod error;
pub mod host;
mod options;
mod os_family;
pub mod probe;
mod render;
mod report;
pub mod strategy;

pub use discover::{discover, DiscoveryEngine};
pub use error::{DiscoveryError, StrategyError};
pub use options::DiscoverOptions;
pub use os_family::OsFamily;
pub use render::render_text;
pub use report::{Candidate, Confidence, DiscoveryReport, RunStatus, StrategyRun};
pub use strategy::{StrategySource, StrategySpec, Trust};
