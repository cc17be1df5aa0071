use eframe::egui::Color32;

use crate::color::ColorMap;
use crate::data::filter::{RankingView, SeriesSet, TableRow, TableView};
use crate::data::model::Sex;

// ---------------------------------------------------------------------------
// Presentation adapter: derived views → chart/grid-ready structures
// ---------------------------------------------------------------------------

/// One renderable line-chart series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Legend label, `"{cause} ({sex})"`.
    pub label: String,
    /// Bracket chart positions; 1:1 with `ys`.
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    /// Female series are dashed, male solid. Both get circular markers.
    pub dashed: bool,
    pub color: Color32,
}

/// Shape a [`SeriesSet`] for the line chart. Colour comes from the
/// per-cause map so a cause's male and female lines share a hue.
pub fn chart_series(set: &SeriesSet, colors: &ColorMap) -> Vec<ChartSeries> {
    set.series
        .iter()
        .map(|series| {
            let (xs, ys) = series
                .points
                .iter()
                .map(|&(age, value)| (age.chart_position(), value))
                .unzip();
            ChartSeries {
                label: format!("{} ({})", series.cause, series.sex),
                xs,
                ys,
                dashed: series.sex == Sex::Female,
                color: colors.color_for(&series.cause),
            }
        })
        .collect()
}

/// One bar of the ranking chart, annotation ready for inline drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingBar {
    pub cause: String,
    pub value: f64,
    /// `"{value:.2}%"`, drawn at the tip of the bar.
    pub annotation: String,
}

/// Shape a [`RankingView`] for the bar chart. Order is already descending;
/// the renderer inverts the bar axis so the first (largest) bar sits on
/// top.
pub fn ranking_bars(ranking: &RankingView) -> Vec<RankingBar> {
    ranking
        .entries
        .iter()
        .map(|entry| RankingBar {
            cause: entry.cause.clone(),
            value: entry.value,
            annotation: format!("{:.2}%", entry.value),
        })
        .collect()
}

/// Heading for the ranking section, e.g. `"Male 65 | mortality ranking"`.
pub fn ranking_title(ranking: &RankingView) -> String {
    format!("{} {} | mortality ranking", ranking.sex, ranking.age)
}

/// Grid headings for the value columns, e.g. `"Male 20"`.
pub fn column_headings(view: &TableView) -> Vec<String> {
    view.columns.iter().map(|key| key.to_string()).collect()
}

/// Grid cell text. Values pass through unrounded; missing cells render as
/// a dash.
pub fn cell_text(row: &TableRow, column: usize) -> String {
    match row.values.get(column) {
        Some(Some(value)) => value.to_string(),
        _ => "–".to_string(),
    }
}
