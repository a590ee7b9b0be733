use clap::Parser;
use news_content_analyzer::{
    config::{Cli, Command},
    nouns,
    preprocess::parse_stop_words,
    web::{self, AppState},
    AnalysisOutcome, AnalysisRequest, AnalyzerConfig, Fetcher, FrequencyAnalyzer, Pipeline,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

fn print_outcomes(outcomes: &[AnalysisOutcome]) {
    for outcome in outcomes {
        match outcome {
            AnalysisOutcome::Report(report) => {
                println!("### {}", report.title);
                println!("{}", report.url);
                for (rank, (word, count)) in report.top_words.iter().enumerate() {
                    println!("{:>3}. {} ({})", rank + 1, word, count);
                }
                println!();
            }
            AnalysisOutcome::Failed { url, message, .. } => {
                eprintln!("{}: {}", url, message);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let cli = Cli::parse();
    let config = AnalyzerConfig::from(&cli);

    let extractor = Arc::from(nouns::default_extractor()?);
    let analyzer = FrequencyAnalyzer::new(extractor);
    info!("Noun extractor: {}", analyzer.extractor_name());

    let pipeline = Pipeline::new(Fetcher::new(&config)?, analyzer, config);

    match cli.command {
        Some(Command::Analyze { urls, stop_words }) => {
            let stop_words = parse_stop_words(&stop_words);
            let requests = urls
                .iter()
                .map(|url| AnalysisRequest::new(url, stop_words.clone()))
                .collect::<Vec<_>>();
            print_outcomes(&pipeline.run(&requests).await);
        }
        Some(Command::Serve { bind }) => web::serve(bind, AppState::new(pipeline)).await?,
        None => {
            let bind: SocketAddr = ([127, 0, 0, 1], 8501).into();
            web::serve(bind, AppState::new(pipeline)).await?
        }
    }

    Ok(())
}
