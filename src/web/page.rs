use crate::{utils::escape_xml, AnalysisOutcome, AnalysisReport};
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: "Noto Sans KR", "Malgun Gothic", sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; color: #262730; }
label { display: block; margin-top: .8rem; font-size: .9rem; }
input[type=text], input[type=url], input[type=number] { width: 100%; padding: .4rem; box-sizing: border-box; }
button { margin-top: 1rem; padding: .5rem 1.2rem; }
.error { background: #ffe9e9; color: #7d353b; padding: .8rem; border-radius: .4rem; margin: 1rem 0; }
pre { background: #f6f6f9; padding: .8rem; overflow-x: auto; }
.report { margin-top: 2rem; border-top: 1px solid #ddd; }
svg { max-width: 100%; height: auto; }
"#;

fn render_form(out: &mut String, links: usize, rows: &[(String, String)]) {
    let _ = write!(
        out,
        r#"<form method="get" action="/"><label>분석할 링크 수를 입력하세요<input type="number" name="links" min="1" step="1" value="{links}" onchange="this.form.submit()"></label></form>"#
    );

    let _ = write!(
        out,
        r#"<form method="post" action="/analyze"><input type="hidden" name="links" value="{links}">"#
    );
    for i in 0..links {
        let (url, stop_words) = rows.get(i).cloned().unwrap_or_default();
        let _ = write!(
            out,
            r#"<label>링크 {n}<input type="text" name="url_{i}" value="{url}"></label><label>링크 {n}에 대한 중지어 (공백으로 구분)<input type="text" name="stopwords_{i}" value="{stop_words}" placeholder="예: 기사 댓글 바로가기"></label>"#,
            n = i + 1,
            url = escape_xml(&url),
            stop_words = escape_xml(&stop_words),
        );
    }
    out.push_str(r#"<button type="submit">분석 시작</button></form>"#);
}

fn render_report(out: &mut String, report: &AnalysisReport, top: usize) {
    let json = serde_json::to_string_pretty(&report.top_words_json()).unwrap_or_default();
    let _ = write!(
        out,
        r#"<section class="report"><h3>{title}</h3><p><a href="{url}">{url}</a></p><p>가장 많이 사용된 단어 Top {top}:</p><pre>{json}</pre><div class="cloud">{cloud}</div><div class="chart">{chart}</div></section>"#,
        title = escape_xml(&report.title),
        url = escape_xml(&report.url),
        json = escape_xml(&json),
        cloud = report.word_cloud_svg,
        chart = report.bar_chart_svg,
    );
}

pub(super) fn render_page(
    top: usize,
    links: usize,
    rows: &[(String, String)],
    outcomes: Option<&[AnalysisOutcome]>,
) -> String {
    let mut out = format!(
        r#"<!DOCTYPE html><html lang="ko"><head><meta charset="utf-8"><title>뉴스 콘텐츠 분석기</title><style>{STYLE}</style></head><body><h1>뉴스 콘텐츠 분석기</h1>"#
    );
    render_form(&mut out, links, rows);

    for outcome in outcomes.unwrap_or_default() {
        match outcome {
            AnalysisOutcome::Report(report) => render_report(&mut out, report, top),
            AnalysisOutcome::Failed { url, message, .. } => {
                let _ = write!(
                    out,
                    r#"<div class="error"><strong>{}</strong><br>{}</div>"#,
                    escape_xml(url),
                    escape_xml(message)
                );
            }
        }
    }

    out.push_str("</body></html>");
    out
}
