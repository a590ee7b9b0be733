mod chart;
mod cloud;

pub use chart::bar_chart_svg;
pub use cloud::{layout_cloud, word_cloud_svg, CloudOptions, PlacedWord};

/// Fonts that can draw Hangul, in order of preference.
pub const FONT_FAMILY: &str =
    "NanumBarunGothic, 'Nanum Gothic', 'Noto Sans KR', 'Malgun Gothic', sans-serif";

/// Rough rendered width of `text` at `font_size`: Latin glyphs are about
/// half as wide as Hangul ones.
pub(crate) fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars()
        .map(|c| if c.is_ascii() { 0.6 } else { 1.0 })
        .sum::<f64>()
        * font_size
}
