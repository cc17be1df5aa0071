use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoint, PlotPoints,
    Points, Text,
};

use crate::data::model::AgeBracket;
use crate::present::{ChartSeries, RankingBar};

// ---------------------------------------------------------------------------
// Empty-state placeholder
// ---------------------------------------------------------------------------

/// Informational prompt rendered instead of an empty chart or grid.
/// Distinct on purpose from a zero-series chart, which would just look
/// broken.
pub fn placeholder(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).italics().weak());
}

// ---------------------------------------------------------------------------
// Line chart: probability vs. age bracket
// ---------------------------------------------------------------------------

/// Render the multi-series line chart. One line per (cause, sex): male
/// solid, female dashed, circular markers on both, x grid labelled with
/// the age brackets.
pub fn series_plot(ui: &mut Ui, series: &[ChartSeries]) {
    Plot::new("series_plot")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("Age")
        .y_axis_label("Probability (%)")
        .x_axis_formatter(bracket_axis_formatter)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in series {
                let points: PlotPoints = s
                    .xs
                    .iter()
                    .zip(s.ys.iter())
                    .map(|(&x, &y)| [x, y])
                    .collect();

                let style = if s.dashed {
                    LineStyle::dashed_loose()
                } else {
                    LineStyle::Solid
                };

                plot_ui.line(
                    Line::new(points)
                        .name(&s.label)
                        .color(s.color)
                        .style(style)
                        .width(1.5),
                );

                let markers: PlotPoints = s
                    .xs
                    .iter()
                    .zip(s.ys.iter())
                    .map(|(&x, &y)| [x, y])
                    .collect();
                plot_ui.points(
                    Points::new(markers)
                        .name(&s.label)
                        .color(s.color)
                        .shape(MarkerShape::Circle)
                        .radius(3.0),
                );
            }
        });
}

/// Label integer grid positions with the bracket ages, everything else
/// stays unlabelled.
fn bracket_axis_formatter(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    let idx = mark.value.round();
    if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
        return String::new();
    }
    AgeBracket::ALL
        .get(idx as usize)
        .map(|b| b.to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Ranking: horizontal bar chart, largest on top
// ---------------------------------------------------------------------------

/// Render the ranked horizontal bar chart. `bars` arrive sorted
/// descending; the y axis is inverted by position assignment so the first
/// (largest) bar sits at the top, each annotated at its tip.
pub fn ranking_plot(ui: &mut Ui, bars: &[RankingBar]) {
    let n = bars.len();

    // Position i from the top maps to row n-1-i from the bottom.
    let mut labels_by_row: Vec<String> = vec![String::new(); n];
    let chart_bars: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let row = (n - 1 - i) as f64;
            labels_by_row[n - 1 - i] = bar.cause.clone();
            Bar::new(row, bar.value).name(&bar.cause).width(0.6)
        })
        .collect();

    let max_value = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    let height = 26.0 * n.max(4) as f32 + 60.0;

    Plot::new("ranking_plot")
        .height(height)
        .x_axis_label("Probability (%)")
        .y_axis_formatter(move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels_by_row.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(chart_bars)
                    .horizontal()
                    .color(Color32::from_rgb(135, 206, 235)),
            );

            for (i, bar) in bars.iter().enumerate() {
                let row = (n - 1 - i) as f64;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(bar.value + max_value * 0.01 + 0.1, row),
                        RichText::new(&bar.annotation).size(10.0),
                    )
                    .anchor(Align2::LEFT_CENTER),
                );
            }
        });
}
