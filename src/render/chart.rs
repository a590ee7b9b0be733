use super::FONT_FAMILY;
use crate::{presentation::RankedView, utils::escape_xml};
use std::fmt::Write;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 450.0;
const LEFT: f64 = 70.0;
const RIGHT: f64 = 20.0;
const TOP: f64 = 20.0;
const BOTTOM: f64 = 120.0;
const BAR_COLOR: &str = "#1f77b4";

/// Tick step and axis maximum for counts up to `max`, about five ticks.
fn y_scale(max: u32) -> (u32, u32) {
    let max = max.max(1);
    let step = ((max + 4) / 5).max(1);
    let top = ((max + step - 1) / step) * step;
    (step, top)
}

/// Bar chart of a ranked view, one bar per word in rank order.
pub fn bar_chart_svg(view: &RankedView) -> String {
    let plot_w = WIDTH - LEFT - RIGHT;
    let plot_h = HEIGHT - TOP - BOTTOM;
    let bottom = TOP + plot_h;
    let (step, top) = y_scale(view.max_count());

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="{FONT_FAMILY}" font-size="12">"#
    );
    svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);

    let mut tick = 0;
    while tick <= top {
        let y = bottom - plot_h * f64::from(tick) / f64::from(top);
        let _ = write!(
            svg,
            r##"<line x1="{LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#e0e0e0"/><text x="{:.1}" y="{y:.1}" text-anchor="end" dominant-baseline="central">{tick}</text>"##,
            LEFT + plot_w,
            LEFT - 6.0,
        );
        tick += step;
    }

    if !view.is_empty() {
        let slot = plot_w / view.len() as f64;
        for (i, (word, count)) in view.iter().enumerate() {
            let bar_h = plot_h * f64::from(count) / f64::from(top);
            let x = LEFT + slot * i as f64 + slot * 0.1;
            let cx = LEFT + slot * (i as f64 + 0.5);
            let label_y = bottom + 14.0;
            let _ = write!(
                svg,
                r#"<rect class="bar" x="{x:.1}" y="{:.1}" width="{:.1}" height="{bar_h:.1}" fill="{BAR_COLOR}"><title>{}: {count}</title></rect>"#,
                bottom - bar_h,
                slot * 0.8,
                escape_xml(word),
            );
            let _ = write!(
                svg,
                r#"<text x="{cx:.1}" y="{label_y:.1}" text-anchor="end" transform="rotate(-45 {cx:.1} {label_y:.1})">{}</text>"#,
                escape_xml(word),
            );
        }
    }

    let _ = write!(
        svg,
        r#"<line x1="{LEFT}" y1="{TOP}" x2="{LEFT}" y2="{bottom}" stroke="black"/><line x1="{LEFT}" y1="{bottom}" x2="{:.1}" y2="{bottom}" stroke="black"/>"#,
        LEFT + plot_w,
    );
    let _ = write!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14">Words</text><text x="18" y="{:.1}" text-anchor="middle" font-size="14" transform="rotate(-90 18 {:.1})">Frequency</text>"#,
        LEFT + plot_w / 2.0,
        HEIGHT - 10.0,
        TOP + plot_h / 2.0,
        TOP + plot_h / 2.0,
    );
    svg.push_str("</svg>");
    svg
}
