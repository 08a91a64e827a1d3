//! Console and LaTeX rendering
//!
//! Pure presentation: this module consumes finished result records and
//! produces strings. Nothing here computes, resolves, or samples, keeping
//! the analysis functions free of formatting concerns (and of stdout).

use crate::accuracy::AccuracyMetrics;
use crate::coverage::CoverageRow;
use crate::summary::ProductSummary;
use crate::timeseries::VariationSummary;
use std::fmt::Write;

/// A console table in bordered grid style.
///
/// ```text
/// +--------+-------+
/// | Source | Cov % |
/// +--------+-------+
/// | Merged | 75.00 |
/// +--------+-------+
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Start a table with the given column headers.
    #[must_use]
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    /// Append one row; short rows are padded with empty cells.
    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Render the bordered grid.
    #[must_use]
    pub fn render(&self) -> String {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(String::len).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                if cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        let mut out = String::new();
        let rule = Self::rule(&widths);
        out.push_str(&rule);
        Self::write_row(&mut out, &self.headers, &widths);
        out.push_str(&rule);
        for row in &self.rows {
            Self::write_row(&mut out, row, &widths);
            out.push_str(&rule);
        }
        out
    }

    fn rule(widths: &[usize]) -> String {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    }

    fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
        out.push('|');
        for (i, &width) in widths.iter().enumerate() {
            let cell = cells.get(i).map_or("", String::as_str);
            let _ = write!(out, " {cell:<width$} |");
        }
        out.push('\n');
    }
}

/// Render the pixel-coverage comparison table.
#[must_use]
pub fn coverage_table(rows: &[CoverageRow]) -> String {
    let mut table = Table::new(&["Source", "Valid Pixels", "Total Pixels", "Coverage (%)"]);
    for row in rows {
        table.push_row(vec![
            row.source.clone(),
            format!("{:.0}", row.valid_pixels),
            format!("{:.0}", row.total_pixels),
            format!("{:.2}", row.coverage_percent),
        ]);
    }
    table.render()
}

/// Render the per-product statistics comparison table.
#[must_use]
pub fn product_table(rows: &[ProductSummary]) -> String {
    let mut table = Table::new(&["Source", "Mean (°C)", "Min (°C)", "Max (°C)", "StdDev (°C)"]);
    for row in rows {
        table.push_row(vec![
            row.source.clone(),
            format!("{:.2}", row.mean_c),
            format!("{:.2}", row.min_c),
            format!("{:.2}", row.max_c),
            format!("{:.2}", row.stddev_c),
        ]);
    }
    table.render()
}

/// Render the day/night accuracy-assessment table.
#[must_use]
pub fn accuracy_table(day: &AccuracyMetrics, night: &AccuracyMetrics) -> String {
    let mut table = Table::new(&["Metric", "Day", "Night"]);
    table.push_row(vec![
        "RMSE (°C)".to_string(),
        format!("{:.2}", day.rmse),
        format!("{:.2}", night.rmse),
    ]);
    table.push_row(vec![
        "MAE (°C)".to_string(),
        format!("{:.2}", day.mae),
        format!("{:.2}", night.mae),
    ]);
    table.push_row(vec![
        "Bias (°C)".to_string(),
        format!("{:.2}", day.bias),
        format!("{:.2}", night.bias),
    ]);
    table.render()
}

/// Render the time-series variation summary as plain lines.
#[must_use]
pub fn variation_lines(summary: &VariationSummary) -> String {
    format!(
        "Day Variation (°C): {:.2}\nNight Variation (°C): {:.2}\nDay-Night Difference (°C): {:.2}\nObservation span: {} .. {}\n",
        summary.day_variation_c,
        summary.night_variation_c,
        summary.day_night_difference_c,
        summary.span.0.format("%Y-%m-%d"),
        summary.span.1.format("%Y-%m-%d"),
    )
}

/// Render the publication LaTeX fragment for the accuracy assessment.
///
/// booktabs/siunitx layout with two decimal places, matching the layout
/// used in the accompanying manuscript.
#[must_use]
pub fn latex_accuracy_table(day: &AccuracyMetrics, night: &AccuracyMetrics) -> String {
    format!(
        r"\begin{{table}}[htbp]
  \centering
  \caption{{Accuracy assessment of the gap-filling algorithm.}}
  \label{{tab:accuracy_assessment}}
  \begin{{tabular}}{{@{{}}lS[table-format=1.2]S[table-format=1.2]@{{}}}}
    \toprule
    Metric & {{Day LST}} & {{Night LST}} \\
    & {{($^{{\circ}}$C)}} & {{($^{{\circ}}$C)}} \\
    \midrule
    RMSE & {:.2} & {:.2} \\
    MAE & {:.2} & {:.2} \\
    Bias & {:.2} & {:.2} \\
    \bottomrule
  \end{{tabular}}
  \caption*{{\footnotesize RMSE: root mean square error; MAE: mean absolute error; Bias: mean signed error.}}
\end{{table}}
",
        day.rmse, night.rmse, day.mae, night.mae, day.bias, night.bias
    )
}
