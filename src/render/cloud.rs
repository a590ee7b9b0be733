use super::{text_width, FONT_FAMILY};
use crate::{frequency::FrequencyTable, presentation::top_n, utils::escape_xml};
use itertools::Itertools;
use std::fmt::Write;
use tracing::debug;

const PALETTE: &[&str] = &[
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b",
];

// Gap kept between neighbouring words.
const PADDING: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct CloudOptions {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub min_font_size: f64,
    pub max_font_size: f64,
    pub background: String,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            max_words: 200,
            min_font_size: 10.0,
            max_font_size: 80.0,
            background: "white".to_string(),
        }
    }
}

/// A word positioned on the canvas. `x`/`y` is the centre of its box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: u32,
    pub font_size: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacedWord {
    pub fn overlaps(&self, other: &PlacedWord) -> bool {
        (self.x - other.x).abs() * 2.0 < self.width + other.width + PADDING * 2.0
            && (self.y - other.y).abs() * 2.0 < self.height + other.height + PADDING * 2.0
    }

    #[cfg(test)]
    fn fits(&self, options: &CloudOptions) -> bool {
        self.x - self.width / 2.0 >= 0.0
            && self.y - self.height / 2.0 >= 0.0
            && self.x + self.width / 2.0 <= f64::from(options.width)
            && self.y + self.height / 2.0 <= f64::from(options.height)
    }
}

fn color(word: &str) -> &'static str {
    let hash = word.chars().fold(0usize, |h, c| h.wrapping_mul(31).wrapping_add(c as usize));
    PALETTE[hash % PALETTE.len()]
}

// Side of one occupancy cell, in pixels.
const CELL: f64 = 4.0;

/// Cell grid over the canvas with a summed-area table, so testing a box for
/// free space costs four lookups whatever its size.
struct Occupancy {
    cols: usize,
    rows: usize,
    filled: Vec<bool>,
    // (cols + 1) * (rows + 1), first row and column are zero
    sums: Vec<u32>,
    // every cell, nearest to the centre first, distance stretched to the canvas shape
    order: Vec<(usize, usize)>,
}

impl Occupancy {
    fn new(options: &CloudOptions) -> Self {
        let cols = (f64::from(options.width) / CELL) as usize;
        let rows = (f64::from(options.height) / CELL) as usize;
        let aspect = cols.max(1) as f64 / rows.max(1) as f64;
        let (cx, cy) = (cols as f64 / 2.0, rows as f64 / 2.0);
        let distance = |&(col, row): &(usize, usize)| {
            let dx = (col as f64 + 0.5 - cx) / aspect;
            let dy = row as f64 + 0.5 - cy;
            dx * dx + dy * dy
        };
        let order = (0..rows)
            .cartesian_product(0..cols)
            .map(|(row, col)| (col, row))
            .sorted_by(|a, b| distance(a).total_cmp(&distance(b)))
            .collect_vec();

        Self {
            cols,
            rows,
            filled: vec![false; cols * rows],
            sums: vec![0; (cols + 1) * (rows + 1)],
            order,
        }
    }

    fn busy(&self, col: usize, row: usize, w: usize, h: usize) -> u32 {
        let at = |c: usize, r: usize| self.sums[r * (self.cols + 1) + c];
        at(col + w, row + h) + at(col, row) - at(col + w, row) - at(col, row + h)
    }

    fn fill(&mut self, col: usize, row: usize, w: usize, h: usize) {
        for r in row..row + h {
            for c in col..col + w {
                self.filled[r * self.cols + c] = true;
            }
        }
        let stride = self.cols + 1;
        for r in 0..self.rows {
            let mut line = 0;
            for c in 0..self.cols {
                line += u32::from(self.filled[r * self.cols + c]);
                self.sums[(r + 1) * stride + c + 1] = self.sums[r * stride + c + 1] + line;
            }
        }
    }

    /// Top-left cell of the free `w` x `h` box whose centre is nearest the
    /// canvas centre.
    fn find(&self, w: usize, h: usize) -> Option<(usize, usize)> {
        if w == 0 || h == 0 || w > self.cols || h > self.rows {
            return None;
        }
        self.order.iter().find_map(|&(c, r)| {
            let col = c.checked_sub(w / 2)?;
            let row = r.checked_sub(h / 2)?;
            (col + w <= self.cols && row + h <= self.rows && self.busy(col, row, w, h) == 0)
                .then_some((col, row))
        })
    }
}

fn place(word: &str, count: u32, font_size: f64, grid: &mut Occupancy) -> Option<PlacedWord> {
    let width = text_width(word, font_size);
    let height = font_size * 1.1;
    let w = ((width + PADDING) / CELL).ceil() as usize;
    let h = ((height + PADDING) / CELL).ceil() as usize;

    let (col, row) = grid.find(w, h)?;
    grid.fill(col, row, w, h);
    Some(PlacedWord {
        word: word.to_string(),
        count,
        font_size,
        x: (col as f64 + w as f64 / 2.0) * CELL,
        y: (row as f64 + h as f64 / 2.0) * CELL,
        width,
        height,
    })
}

/// Position the most frequent words of `table`, biggest first.
///
/// Font size grows with the square root of the relative frequency. A word
/// that does not fit is retried smaller down to the minimum size, then
/// skipped.
pub fn layout_cloud(table: &FrequencyTable, options: &CloudOptions) -> Vec<PlacedWord> {
    let view = top_n(table, options.max_words);
    let max_count = f64::from(view.max_count().max(1));
    let range = options.max_font_size - options.min_font_size;

    let mut grid = Occupancy::new(options);
    let mut placed: Vec<PlacedWord> = vec![];
    for (word, count) in view.iter() {
        let mut size = options.min_font_size + range * (f64::from(count) / max_count).sqrt();
        loop {
            if let Some(p) = place(word, count, size, &mut grid) {
                placed.push(p);
                break;
            }
            if size <= options.min_font_size {
                debug!("No room for {} in word cloud", word);
                break;
            }
            size = (size * 0.85).max(options.min_font_size);
        }
    }
    placed
}

pub fn word_cloud_svg(table: &FrequencyTable, options: &CloudOptions) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}">"#,
        w = options.width,
        h = options.height,
        font = FONT_FAMILY,
    );
    let _ = write!(
        svg,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        escape_xml(&options.background)
    );

    for p in layout_cloud(table, options) {
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            p.x,
            p.y,
            p.font_size,
            color(&p.word),
            escape_xml(&p.word)
        );
    }
    svg.push_str("</svg>");
    svg
}
