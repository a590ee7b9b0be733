use std::{collections::HashSet, sync::Arc};
use tracing::{debug, info, warn};

pub mod config;
pub mod fetcher;
pub mod frequency;
pub mod nouns;
pub mod preprocess;
pub mod presentation;
pub mod render;
pub mod web;

mod error;
mod utils;

pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use fetcher::{ErrorKind, FetchResult, Fetcher};
pub use frequency::{FrequencyAnalyzer, FrequencyTable};
pub use nouns::NounExtractor;
pub use preprocess::CleanedText;
pub use presentation::RankedView;

use fetcher::FetchFailure;
use presentation::{as_mapping, top_n};
use render::{bar_chart_svg, word_cloud_svg, CloudOptions};

/// One link row of the form: a URL and the stop words that apply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub url: String,
    pub stop_words: HashSet<String>,
}

impl AnalysisRequest {
    pub fn new(url: &str, stop_words: HashSet<String>) -> Self {
        Self {
            url: url.trim().to_string(),
            stop_words,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub url: String,
    pub title: String,
    pub table: FrequencyTable,
    pub top_words: RankedView,
    pub chart_words: RankedView,
    pub word_cloud_svg: String,
    pub bar_chart_svg: String,
}

impl AnalysisReport {
    /// Ordered `noun -> count` object of the top words.
    pub fn top_words_json(&self) -> serde_json::Map<String, serde_json::Value> {
        as_mapping(&self.top_words)
    }
}

#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Report(AnalysisReport),
    Failed {
        url: String,
        reason: FailureReason,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Fetch(ErrorKind),
    Analysis,
}

/// Fetch, clean, count and render, one request after the other.
#[derive(Clone)]
pub struct Pipeline {
    fetcher: Arc<Fetcher>,
    analyzer: FrequencyAnalyzer,
    config: AnalyzerConfig,
}

impl Pipeline {
    pub fn new(fetcher: Fetcher, analyzer: FrequencyAnalyzer, config: AnalyzerConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            analyzer,
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        let article = match self.fetcher.fetch_request(request).await {
            Ok(article) => article,
            Err(FetchFailure { reason, message }) => {
                return AnalysisOutcome::Failed {
                    url: request.url.clone(),
                    reason: FailureReason::Fetch(reason),
                    message,
                }
            }
        };

        let rendered = self.analyzer.analyze(&article.text).map(|table| {
            let chart_words = top_n(&table, self.config.chart_words);
            tokio::task::spawn_blocking(move || {
                let cloud = word_cloud_svg(&table, &CloudOptions::default());
                let chart = bar_chart_svg(&chart_words);
                (table, chart_words, cloud, chart)
            })
        });
        let rendered = match rendered {
            Ok(task) => task.await.map_err(AnalyzerError::from),
            Err(e) => Err(e),
        };

        match rendered {
            Ok((table, chart_words, cloud, chart)) => {
                AnalysisOutcome::Report(AnalysisReport {
                    url: request.url.clone(),
                    title: article.title,
                    top_words: top_n(&table, self.config.top_words),
                    table,
                    chart_words,
                    word_cloud_svg: cloud,
                    bar_chart_svg: chart,
                })
            }
            Err(e) => {
                warn!("Analysis of {} failed: {}", request.url, e);
                AnalysisOutcome::Failed {
                    url: request.url.clone(),
                    reason: FailureReason::Analysis,
                    message: format!("오류: {}", e),
                }
            }
        }
    }

    /// Run every non-blank request in order. A failed request does not stop
    /// the ones after it.
    pub async fn run(&self, requests: &[AnalysisRequest]) -> Vec<AnalysisOutcome> {
        let mut outcomes = vec![];
        for (i, request) in requests.iter().enumerate() {
            if request.is_blank() {
                debug!("Skip blank link {}", i + 1);
                continue;
            }

            info!("[{}/{}] Analyze {}", i + 1, requests.len(), request.url);
            let outcome = self.analyze(request).await;
            match &outcome {
                AnalysisOutcome::Report(report) => info!(
                    "[{}/{}] {} distinct nouns in \"{}\"",
                    i + 1,
                    requests.len(),
                    report.table.len(),
                    report.title
                ),
                AnalysisOutcome::Failed { message, .. } => {
                    warn!("[{}/{}] {}: {}", i + 1, requests.len(), request.url, message)
                }
            }
            outcomes.push(outcome);
        }
        outcomes
    }
}
