//! Plain-text bar charts for the terminal.

use std::fmt::Write as _;

const FILLED: char = '█';
const EMPTY: char = '░';

/// A horizontal bar chart, one bar per label
#[derive(Clone, Debug, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, f64)>,
}

impl BarChart {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            bars: Vec::new(),
        }
    }

    /// Builder-style helper; bars are drawn in the order given
    pub fn with_bars<I, S>(mut self, bars: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.bars = bars.into_iter().map(|(label, value)| (label.into(), value)).collect();
        self
    }

    /// Render with bars scaled so the largest value fills `width` cells
    pub fn render(&self, width: usize) -> String {
        let width = width.max(1);
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{} by {}", self.y_label, self.x_label);

        if self.bars.is_empty() {
            let _ = writeln!(out, "  (no data)");
            return out;
        }

        let label_width = self
            .bars
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let max = self.bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

        for (label, value) in &self.bars {
            let filled = bar_length(*value, max, width);
            let bar: String = std::iter::repeat(FILLED)
                .take(filled)
                .chain(std::iter::repeat(EMPTY).take(width - filled))
                .collect();
            let pad = label_width - label.chars().count();
            let _ = writeln!(
                out,
                "  {}{} │{}│ {}",
                label,
                " ".repeat(pad),
                bar,
                format_amount(*value)
            );
        }

        out
    }
}

fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let cells = (value / max * width as f64).round() as usize;
    cells.min(width)
}

/// Format a quantity with at most two decimals and no trailing zeros
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".into();
    }
    format!("{}", rounded)
}
