use super::{FetchFailure, FetchStrategy, RawArticle};
use itertools::Itertools;
use lazy_static::lazy_static;
use reqwest::header::USER_AGENT;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Class substrings that mark the article body, tried in this order on every
/// `div` of the page. Matching is case-insensitive.
pub const CONTENT_CLASS_PATTERNS: &[&str] = &[
    "content",
    "article",
    "post",
    "text",
    "article_body",
    "main_content",
    "article_txt",
    "article_view",
];

pub const NO_TITLE: &str = "제목 없음";

const INVISIBLE: &[&str] = &["script", "style", "template"];

const E: &str = "Invalid selector";
lazy_static! {
    static ref DIV: Selector = Selector::parse("div").expect(E);
    static ref TITLE: Selector = Selector::parse("title").expect(E);
}

/// Plain GET with a browser user agent, then heuristic body detection.
#[derive(Debug, Clone)]
pub struct FallbackStrategy {
    user_agent: String,
}

impl FallbackStrategy {
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl FetchStrategy for FallbackStrategy {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn fetch(&self, client: &reqwest::Client, url: &str) -> Result<RawArticle, FetchFailure> {
        let response = match client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("GET {} failed: {}", url, e);
                return Err(FetchFailure::unreachable());
            }
        };

        if !response.status().is_success() {
            debug!("GET {} returned {}", url, response.status());
            return Err(FetchFailure::unreachable());
        }

        let html = response.text().await.map_err(|e| {
            debug!("Reading body of {} failed: {}", url, e);
            FetchFailure::unreachable()
        })?;
        Ok(extract_from_html(&html))
    }
}

fn is_content_div(el: &ElementRef) -> bool {
    el.value().classes().any(|class| {
        let class = class.to_lowercase();
        CONTENT_CLASS_PATTERNS.iter().any(|p| class.contains(p))
    })
}

/// Visible text under `root`, each text node trimmed, joined by single spaces.
fn visible_text(root: ElementRef) -> String {
    root.descendants()
        .filter(|node| {
            !node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| INVISIBLE.contains(&el.value().name()))
        })
        .filter_map(|node| node.value().as_text().map(|t| t.trim()))
        .filter(|t| !t.is_empty())
        .join(" ")
}

/// Title and body text of a page without any article parser.
///
/// The body is the first `div` whose class matches [`CONTENT_CLASS_PATTERNS`],
/// or the whole document when there is none.
pub fn extract_from_html(html: &str) -> RawArticle {
    let doc = Html::parse_document(html);

    let root = match doc.select(&DIV).find(is_content_div) {
        Some(div) => div,
        None => {
            debug!("No content div, using the whole document");
            doc.root_element()
        }
    };

    let title = doc
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    RawArticle {
        title,
        raw_text: visible_text(root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn uses_matching_content_div() {
        let html = r#"<html><head><title>Test</title></head><body>
            <div class="header">Menu</div>
            <div class="article-content">Hello there world</div>
            <div class="footer">Footer</div>
        </body></html>"#;

        let article = extract_from_html(html);
        assert_eq!(article.title, "Test");
        assert_eq!(article.raw_text, "Hello there world");
    }

    #[test]
    fn first_matching_div_in_document_order() {
        let html = r#"<body>
            <div class="sidebar"><div class="post-list">첫 번째</div></div>
            <div class="article_body">두 번째</div>
        </body>"#;

        assert_eq!(extract_from_html(html).raw_text, "첫 번째");
    }

    #[test]
    fn class_match_is_case_insensitive() {
        let html = r#"<body><div class="nav">메뉴</div><div class="news ArticleView">본문 내용</div></body>"#;
        assert_eq!(extract_from_html(html).raw_text, "본문 내용");
    }

    #[test]
    fn only_div_elements_are_candidates() {
        let html = r#"<body><section class="content">섹션</section><p>문단</p></body>"#;
        assert_eq!(extract_from_html(html).raw_text, "섹션 문단");
    }

    #[test]
    fn whole_document_without_content_div() {
        let html = fs::read_to_string("tests/htmls/static.html").expect("Invalid file path");
        let article = extract_from_html(&html);

        assert_eq!(article.title, "회사 소개");
        assert_eq!(
            article.raw_text,
            "회사 소개 우리 회사 우리는 좋은 제품을 만듭니다. 연락처 : 02-123-4567 Copyright 2024"
        );
    }

    #[test]
    fn missing_or_blank_title_uses_placeholder() {
        assert_eq!(extract_from_html("<p>본문</p>").title, NO_TITLE);
        assert_eq!(
            extract_from_html("<html><head><title>  </title></head></html>").title,
            NO_TITLE
        );
    }

    #[test]
    fn skips_scripts_and_styles_but_keeps_noscript() {
        let html = r#"<div class="content"><style>.a{color:red}</style>기사 <script>var x = 1;</script>본문<template><p>틀</p></template><noscript>켜주세요</noscript></div>"#;
        assert_eq!(extract_from_html(html).raw_text, "기사 본문 켜주세요");
    }

    #[test]
    fn pattern_list_is_ordered() {
        assert_eq!(CONTENT_CLASS_PATTERNS.first(), Some(&"content"));
        assert_eq!(CONTENT_CLASS_PATTERNS.len(), 8);
    }
}
