/// yt-dlp backed `MediaResolver`
use crate::invoker::{InvocationMode, ResolverInvoker};
use crate::parser::{parse_search_output, parse_stream_output};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tuneline_core::{MediaResolver, Result, SearchResultSet};

/// How to call the resolver tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    pub binary_path: PathBuf,
    pub extra_args: Vec<String>,
    pub search_limit: u32,
    pub audio_format: String,
    pub timeout: Duration,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            binary_path: PathBuf::from("yt-dlp"),
            extra_args: Vec::new(),
            search_limit: 10,
            audio_format: "bestaudio".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    invoker: ResolverInvoker,
    search_limit: u32,
    audio_format: String,
}

impl YtDlpResolver {
    pub fn new(options: ResolverOptions) -> Self {
        let invoker = ResolverInvoker::new(options.binary_path, options.timeout)
            .with_extra_args(options.extra_args);
        Self {
            invoker,
            search_limit: options.search_limit,
            audio_format: options.audio_format,
        }
    }
}

#[async_trait]
impl MediaResolver for YtDlpResolver {
    async fn search(&self, query: &str, cancel: &CancellationToken) -> Result<SearchResultSet> {
        let mode = InvocationMode::Search {
            query,
            limit: self.search_limit,
        };
        let output = self.invoker.invoke(&mode, cancel).await?;
        parse_search_output(&output)
    }

    async fn resolve_stream(
        &self,
        source_ref: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let mode = InvocationMode::ResolveStream {
            source_ref,
            format: &self.audio_format,
        };
        let output = self.invoker.invoke(&mode, cancel).await?;
        parse_stream_output(&output)
    }
}
