use super::{FetchFailure, FetchStrategy, RawArticle};
use crate::AnalyzerError;
use dom_smoothie::{Config, Readability};

/// Downloads the page and runs readability extraction on it, the way a news
/// article parser would.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadabilityStrategy;

impl ReadabilityStrategy {
    pub fn extract(html: &str, url: &str) -> Result<RawArticle, AnalyzerError> {
        let cfg = Config {
            max_elements_to_parse: 9000,
            ..Default::default()
        };
        let mut readability = Readability::new(html, Some(url), Some(cfg))
            .map_err(|e| AnalyzerError::ReadabilityError(e.to_string()))?;
        let article = readability
            .parse()
            .map_err(|e| AnalyzerError::ReadabilityError(e.to_string()))?;

        let title = article.title.trim().to_string();
        let raw_text = article.text_content.trim().to_string();
        if title.is_empty() && raw_text.is_empty() {
            return Err(AnalyzerError::EmptyArticle);
        }

        Ok(RawArticle { title, raw_text })
    }

    async fn download(client: &reqwest::Client, url: &str) -> Result<String, AnalyzerError> {
        Ok(client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?)
    }
}

#[async_trait::async_trait]
impl FetchStrategy for ReadabilityStrategy {
    fn name(&self) -> &'static str {
        "readability"
    }

    async fn fetch(&self, client: &reqwest::Client, url: &str) -> Result<RawArticle, FetchFailure> {
        let html = Self::download(client, url)
            .await
            .map_err(FetchFailure::extraction)?;
        Self::extract(&html, url).map_err(FetchFailure::extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn extracts_news_article() {
        let html = fs::read_to_string("tests/htmls/news.html").expect("Invalid file path");
        let article =
            ReadabilityStrategy::extract(&html, "https://news.example.com/article/1").unwrap();

        assert!(!article.title.is_empty());
        assert!(article.raw_text.contains("반도체"));
        assert!(!article.raw_text.contains("console.log"));
    }
}
