mod page;

use crate::{preprocess::parse_stop_words, AnalysisRequest, AnalyzerError, Pipeline};
use axum::{
    extract::{Query, State},
    response::Html,
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::{collections::HashMap, net::SocketAddr};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pipeline: Pipeline,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    fn link_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(1)
            .clamp(1, self.pipeline.config().max_links)
    }
}

#[derive(Debug, Deserialize)]
struct LinksQuery {
    links: Option<usize>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), AnalyzerError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn index(State(state): State<AppState>, Query(query): Query<LinksQuery>) -> Html<String> {
    let links = state.link_count(query.links);
    Html(page::render_page(
        state.pipeline.config().top_words,
        links,
        &[],
        None,
    ))
}

/// Link rows submitted as `url_{i}` / `stopwords_{i}` fields.
fn requests_from_form(fields: &HashMap<String, String>, links: usize) -> Vec<(String, String)> {
    (0..links)
        .map(|i| {
            let field = |name: &str| {
                fields
                    .get(&format!("{}_{}", name, i))
                    .cloned()
                    .unwrap_or_default()
            };
            (field("url"), field("stopwords"))
        })
        .collect()
}

async fn analyze(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Html<String> {
    let links = state.link_count(fields.get("links").and_then(|l| l.trim().parse().ok()));
    let rows = requests_from_form(&fields, links);

    let requests = rows
        .iter()
        .map(|(url, stop_words)| AnalysisRequest::new(url, parse_stop_words(stop_words)))
        .collect::<Vec<_>>();
    let outcomes = state.pipeline.run(&requests).await;

    Html(page::render_page(
        state.pipeline.config().top_words,
        links,
        &rows,
        Some(&outcomes),
    ))
}
