mod article;
mod fallback;

pub use article::ReadabilityStrategy;
pub use fallback::{extract_from_html, FallbackStrategy, CONTENT_CLASS_PATTERNS, NO_TITLE};

use crate::{
    config::AnalyzerConfig,
    preprocess::{clean, CleanedText},
    AnalysisRequest, AnalyzerError,
};
use std::fmt;
use tracing::{debug, warn};

pub const UNREACHABLE_MESSAGE: &str = "오류: 웹사이트에 접근할 수 없습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The strategy could not extract an article; the next one gets a try.
    ExtractionFailed,
    /// The page could not be downloaded at all.
    Unreachable,
}

/// Title and text pulled out of a page, before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    pub title: String,
    pub raw_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub reason: ErrorKind,
    pub message: String,
}

impl FetchFailure {
    pub fn extraction(err: impl fmt::Display) -> Self {
        FetchFailure {
            reason: ErrorKind::ExtractionFailed,
            message: err.to_string(),
        }
    }

    pub fn unreachable() -> Self {
        FetchFailure {
            reason: ErrorKind::Unreachable,
            message: UNREACHABLE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Success { title: String, raw_text: String },
    Failure { reason: ErrorKind, message: String },
}

impl From<Result<RawArticle, FetchFailure>> for FetchResult {
    fn from(res: Result<RawArticle, FetchFailure>) -> Self {
        match res {
            Ok(RawArticle { title, raw_text }) => FetchResult::Success { title, raw_text },
            Err(FetchFailure { reason, message }) => FetchResult::Failure { reason, message },
        }
    }
}

/// Article title and cleaned text, ready for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedArticle {
    pub title: String,
    pub text: CleanedText,
}

/// One way of turning a URL into an article.
#[async_trait::async_trait]
pub trait FetchStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self, client: &reqwest::Client, url: &str) -> Result<RawArticle, FetchFailure>;
}

/// Runs its strategies in order; the first success wins.
pub struct Fetcher {
    client: reqwest::Client,
    strategies: Vec<Box<dyn FetchStrategy>>,
}

impl Fetcher {
    /// Readability extraction first, then the raw HTML fallback.
    pub fn new(config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_strategies(
            client,
            vec![
                Box::new(ReadabilityStrategy),
                Box::new(FallbackStrategy::new(&config.user_agent)),
            ],
        ))
    }

    pub fn with_strategies(
        client: reqwest::Client,
        strategies: Vec<Box<dyn FetchStrategy>>,
    ) -> Self {
        Self { client, strategies }
    }

    async fn try_strategies(&self, url: &str) -> Result<RawArticle, FetchFailure> {
        let mut last_failure = FetchFailure::extraction("no fetch strategy configured");
        for strategy in &self.strategies {
            match strategy.fetch(&self.client, url).await {
                Ok(article) => {
                    debug!("[{}] extracted {} ({} chars)", strategy.name(), url, article.raw_text.len());
                    return Ok(article);
                }
                Err(failure) => {
                    warn!("[{}] failed on {}: {}", strategy.name(), url, failure.message);
                    last_failure = failure;
                }
            }
        }
        Err(last_failure)
    }

    pub async fn fetch(&self, url: &str) -> FetchResult {
        self.try_strategies(url).await.into()
    }

    /// Fetch the request's URL and clean the text with its stop words.
    pub async fn fetch_request(
        &self,
        request: &AnalysisRequest,
    ) -> Result<FetchedArticle, FetchFailure> {
        let article = self.try_strategies(&request.url).await?;
        Ok(FetchedArticle {
            title: article.title,
            text: clean(&article.raw_text, &request.stop_words),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::{
        collections::HashSet,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    struct Fixed {
        result: Result<RawArticle, FetchFailure>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl FetchStrategy for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch(&self, _: &reqwest::Client, _: &str) -> Result<RawArticle, FetchFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn article(title: &str, text: &str) -> RawArticle {
        RawArticle {
            title: title.to_string(),
            raw_text: text.to_string(),
        }
    }

    fn fetcher(results: Vec<Result<RawArticle, FetchFailure>>) -> (Fetcher, Vec<Arc<AtomicUsize>>) {
        let mut counters = vec![];
        let mut strategies: Vec<Box<dyn FetchStrategy>> = vec![];
        for result in results {
            let calls = Arc::new(AtomicUsize::new(0));
            counters.push(calls.clone());
            strategies.push(Box::new(Fixed { result, calls }));
        }
        (
            Fetcher::with_strategies(reqwest::Client::new(), strategies),
            counters,
        )
    }

    #[tokio::test]
    async fn first_success_short_circuits() {
        let (f, calls) = fetcher(vec![
            Ok(article("제목", "본문")),
            Ok(article("다른", "본문")),
        ]);
        let res = f.fetch("http://example.invalid").await;

        assert_eq!(
            res,
            FetchResult::Success {
                title: "제목".into(),
                raw_text: "본문".into()
            }
        );
        assert_eq!(calls[0].load(Ordering::SeqCst), 1);
        assert_eq!(calls[1].load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn falls_through_to_next_strategy() {
        let (f, calls) = fetcher(vec![
            Err(FetchFailure::extraction("not an article")),
            Ok(article("제목 없음", "static page")),
        ]);
        let res = f.fetch("http://example.invalid").await;

        assert!(matches!(res, FetchResult::Success { .. }));
        assert_eq!(calls[0].load(Ordering::SeqCst), 1);
        assert_eq!(calls[1].load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn last_failure_is_reported() {
        let (f, _) = fetcher(vec![
            Err(FetchFailure::extraction("not an article")),
            Err(FetchFailure::unreachable()),
        ]);

        assert_eq!(
            f.fetch("http://example.invalid").await,
            FetchResult::Failure {
                reason: ErrorKind::Unreachable,
                message: UNREACHABLE_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn fetch_request_cleans_with_stop_words() {
        let (f, _) = fetcher(vec![Ok(article("제목", "[기사] 경제, 정책! 댓글 바로가기"))]);
        let request = AnalysisRequest {
            url: "http://example.invalid".into(),
            stop_words: ["댓글", "바로가기", "기사"].iter().map(ToString::to_string).collect::<HashSet<_>>(),
        };

        let fetched = f.fetch_request(&request).await.unwrap();
        assert_eq!(fetched.title, "제목");
        assert_eq!(fetched.text.as_str(), "경제 정책");
    }
}
