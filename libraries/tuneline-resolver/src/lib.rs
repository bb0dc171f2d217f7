//! Tuneline Resolver
//!
//! Everything between a search box and a playable URL: launching the
//! external resolver tool, parsing what it prints, and remembering the
//! answers for the lifetime of the process.
//!
//! # Architecture
//!
//! - **Invoker** (`invoker`): one child process per call, fixed argument
//!   contract, bounded wait, cancellable
//! - **Parser** (`parser`): line-delimited JSON to `Track`s, or a single URL
//! - **Cache** (`cache`): two namespaces (search, stream), failures never stored
//! - **`YtDlpResolver`**: Invoker + Parser behind `tuneline_core::MediaResolver`
//!
//! # Example
//!
//! ```rust,no_run
//! use tuneline_core::MediaResolver;
//! use tuneline_resolver::{ResolverOptions, YtDlpResolver};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> tuneline_core::Result<()> {
//! let resolver = YtDlpResolver::new(ResolverOptions::default());
//! let tracks = resolver.search("lofi", &CancellationToken::new()).await?;
//! let url = resolver
//!     .resolve_stream(&tracks[0].source_ref, &CancellationToken::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod cache;
pub mod invoker;
pub mod parser;
mod resolver;

pub use cache::{CacheStats, Namespace, ResolutionCache};
pub use invoker::{InvocationMode, ResolverInvoker};
pub use parser::{format_duration, parse_search_output, parse_stream_output};
pub use resolver::{ResolverOptions, YtDlpResolver};
