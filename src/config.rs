use clap::{Parser, Subcommand};
use std::{net::SocketAddr, time::Duration};

#[derive(Debug, Parser)]
#[command(name = "news-content-analyzer", version, about = "Noun frequency analysis of news articles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// User-Agent sent by the fallback request
    #[arg(long, global = true, default_value = "Mozilla/5.0")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Largest number of link rows the form accepts
    #[arg(long, global = true, default_value_t = 20)]
    pub max_links: usize,

    /// Words shown in the ranked list
    #[arg(long, global = true, default_value_t = 20)]
    pub top_words: usize,

    /// Words shown in the bar chart
    #[arg(long, global = true, default_value_t = 10)]
    pub chart_words: usize,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the analysis form
    Serve {
        #[arg(long, default_value = "127.0.0.1:8501")]
        bind: SocketAddr,
    },
    /// Analyze URLs and print the ranked nouns
    Analyze {
        #[arg(required = true)]
        urls: Vec<String>,

        /// Space separated stop words applied to every URL
        #[arg(long, default_value = "")]
        stop_words: String,
    },
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub max_links: usize,
    pub top_words: usize,
    pub chart_words: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            timeout: Duration::from_secs(30),
            max_links: 20,
            top_words: 20,
            chart_words: 10,
        }
    }
}

impl From<&Cli> for AnalyzerConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            user_agent: cli.user_agent.clone(),
            timeout: Duration::from_secs(cli.timeout_secs),
            max_links: cli.max_links.max(1),
            top_words: cli.top_words,
            chart_words: cli.chart_words,
        }
    }
}
