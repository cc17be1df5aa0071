use std::collections::BTreeSet;

use super::model::{AgeBracket, ColumnKey, Dataset, Sex};

// ---------------------------------------------------------------------------
// Selection state – the one input every derivation takes
// ---------------------------------------------------------------------------

/// Which sexes' columns the table and line chart show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SexMode {
    Male,
    Female,
    Both,
}

impl SexMode {
    pub const ALL: [SexMode; 3] = [SexMode::Male, SexMode::Female, SexMode::Both];

    pub fn includes(self, sex: Sex) -> bool {
        match self {
            SexMode::Male => sex == Sex::Male,
            SexMode::Female => sex == Sex::Female,
            SexMode::Both => true,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SexMode::Male => "Male",
            SexMode::Female => "Female",
            SexMode::Both => "Both",
        }
    }
}

/// The user's current filter choices. An explicit value passed into each
/// derivation; nothing reads ambient state. An empty `selected_causes` is a
/// first-class state meaning "nothing selected", not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Causes shown in the table / line chart / ranking. Always a subset of
    /// the canonical dataset's causes.
    pub selected_causes: BTreeSet<String>,
    /// Column filter for the table and line chart.
    pub sex_mode: SexMode,
    /// Sex used for the ranking bar chart, independent of `sex_mode`.
    pub ranking_sex: Sex,
    /// Age bracket used for the ranking bar chart.
    pub ranking_age: AgeBracket,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected_causes: BTreeSet::new(),
            sex_mode: SexMode::Both,
            ranking_sex: Sex::Male,
            ranking_age: AgeBracket::Age0,
        }
    }
}

impl SelectionState {
    /// The single (sex, bracket) column the ranking is computed from.
    pub fn ranking_column(&self) -> ColumnKey {
        ColumnKey::new(self.ranking_sex, self.ranking_age)
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// One table row: the cause plus its values aligned 1:1 with
/// [`TableView::columns`] (`None` = missing in the source).
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cause: String,
    pub values: Vec<Option<f64>>,
}

/// The filtered data grid. `is_empty()` signals "render the select-a-cause
/// placeholder", never a blank grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub columns: Vec<ColumnKey>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One line-chart series: the values of a single (cause, sex) pair across
/// the age brackets it has data for.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub cause: String,
    pub sex: Sex,
    /// Points in bracket order; brackets with no value are simply absent,
    /// so every point sits at its true age position.
    pub points: Vec<(AgeBracket, f64)>,
}

/// All series for the line chart. Zero series is valid and means "render
/// the placeholder prompt instead of an empty chart".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    pub series: Vec<Series>,
}

impl SeriesSet {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub cause: String,
    pub value: f64,
}

/// The ranked bar-chart view for one (sex, bracket) column, sorted
/// descending by value. Zero entries is valid (placeholder contract as for
/// the other views).
#[derive(Debug, Clone, PartialEq)]
pub struct RankingView {
    pub sex: Sex,
    pub age: AgeBracket,
    pub entries: Vec<RankingEntry>,
}

impl RankingView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Derivations – pure functions of (dataset, selection)
// ---------------------------------------------------------------------------

/// Derive the filtered data grid: rows whose cause is selected, columns
/// whose sex matches the sex mode. Canonical row and column order is
/// preserved.
pub fn derive_table(dataset: &Dataset, selection: &SelectionState) -> TableView {
    let columns: Vec<ColumnKey> = dataset
        .columns
        .iter()
        .copied()
        .filter(|key| selection.sex_mode.includes(key.sex))
        .collect();

    let rows: Vec<TableRow> = dataset
        .rows
        .iter()
        .filter(|row| selection.selected_causes.contains(&row.cause))
        .map(|row| TableRow {
            cause: row.cause.clone(),
            values: columns.iter().map(|key| row.value(*key)).collect(),
        })
        .collect();

    TableView { columns, rows }
}

/// Derive the line-chart series from an already-filtered table view.
///
/// Each table row still present in `selected_causes` (the table may be
/// stale relative to the selection) yields one series per sex included by
/// the sex mode. Points are matched by bracket, so a row missing an early
/// bracket keeps its later values at the correct age positions. A (cause,
/// sex) pair with no data emits no series.
pub fn derive_series(table: &TableView, selection: &SelectionState) -> SeriesSet {
    let mut series = Vec::new();

    for row in &table.rows {
        if !selection.selected_causes.contains(&row.cause) {
            continue;
        }
        for sex in Sex::ALL {
            if !selection.sex_mode.includes(sex) {
                continue;
            }
            let points: Vec<(AgeBracket, f64)> = AgeBracket::ALL
                .iter()
                .filter_map(|&age| {
                    let idx = table
                        .columns
                        .iter()
                        .position(|key| *key == ColumnKey::new(sex, age))?;
                    row.values[idx].map(|v| (age, v))
                })
                .collect();
            if points.is_empty() {
                continue;
            }
            series.push(Series {
                cause: row.cause.clone(),
                sex,
                points,
            });
        }
    }

    SeriesSet { series }
}

/// Derive the ranking for the selected (sex, bracket) column.
///
/// Always computed from the canonical dataset, so the table/chart sex mode
/// can never affect it. Causes with no value in the ranking column are
/// excluded. If the dataset header lacks the column altogether the result
/// is an empty view, not an error. Sort is descending and stable: equal
/// values keep canonical row order.
pub fn derive_ranking(dataset: &Dataset, selection: &SelectionState) -> RankingView {
    let column = selection.ranking_column();

    let mut entries: Vec<RankingEntry> = if dataset.has_column(column) {
        dataset
            .rows
            .iter()
            .filter(|row| selection.selected_causes.contains(&row.cause))
            .filter_map(|row| {
                row.value(column).map(|value| RankingEntry {
                    cause: row.cause.clone(),
                    value,
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    // Vec::sort_by is stable; ties stay in canonical order.
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));

    RankingView {
        sex: selection.ranking_sex,
        age: selection.ranking_age,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader;

    /// The two-cause dataset from the design scenarios:
    /// Cancer male0=1.0 male20=2.0 female0=1.5; Heart Disease lacks male0.
    fn scenario_dataset() -> Dataset {
        loader::parse_for_tests(
            "cause,male0,male20,female0\n\
             Cancer,1.0,2.0,1.5\n\
             Heart Disease,,0.8,0.9\n",
        )
    }

    fn select(causes: &[&str]) -> SelectionState {
        SelectionState {
            selected_causes: causes.iter().map(|c| c.to_string()).collect(),
            ..SelectionState::default()
        }
    }

    #[test]
    fn empty_selection_gives_empty_views() {
        let ds = scenario_dataset();
        let sel = select(&[]);

        let table = derive_table(&ds, &sel);
        assert!(table.is_empty());
        // Empty of rows, but the column filter still applied.
        assert_eq!(table.columns.len(), 3);

        assert!(derive_series(&table, &sel).is_empty());
        assert!(derive_ranking(&ds, &sel).is_empty());
    }

    #[test]
    fn table_filters_rows_and_columns() {
        let ds = scenario_dataset();
        let sel = SelectionState {
            sex_mode: SexMode::Male,
            ..select(&["Cancer"])
        };
        let table = derive_table(&ds, &sel);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cause, "Cancer");
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.rows[0].values, vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn both_mode_is_union_of_single_sex_columns() {
        let ds = scenario_dataset();
        let causes = select(&["Cancer", "Heart Disease"]);

        let male = derive_table(
            &ds,
            &SelectionState {
                sex_mode: SexMode::Male,
                ..causes.clone()
            },
        );
        let female = derive_table(
            &ds,
            &SelectionState {
                sex_mode: SexMode::Female,
                ..causes.clone()
            },
        );
        let both = derive_table(
            &ds,
            &SelectionState {
                sex_mode: SexMode::Both,
                ..causes
            },
        );

        let mut union = male.columns.clone();
        union.extend(female.columns.iter().copied());
        union.sort();
        let mut both_cols = both.columns.clone();
        both_cols.sort();
        assert_eq!(both_cols, union);
    }

    #[test]
    fn table_preserves_canonical_order_and_values() {
        let ds = scenario_dataset();
        let table = derive_table(&ds, &select(&["Heart Disease", "Cancer"]));
        // Canonical row order, not selection-set order.
        assert_eq!(table.rows[0].cause, "Cancer");
        assert_eq!(table.rows[1].cause, "Heart Disease");
        // Values pass through unrounded; missing stays missing.
        assert_eq!(table.rows[1].values, vec![None, Some(0.8), Some(0.9)]);
    }

    #[test]
    fn series_split_by_sex_with_styleable_tags() {
        let ds = scenario_dataset();
        let sel = select(&["Cancer"]);
        let set = derive_series(&derive_table(&ds, &sel), &sel);
        assert_eq!(set.series.len(), 2);

        let male = &set.series[0];
        assert_eq!((male.cause.as_str(), male.sex), ("Cancer", Sex::Male));
        assert_eq!(
            male.points,
            vec![(AgeBracket::Age0, 1.0), (AgeBracket::Age20, 2.0)]
        );

        let female = &set.series[1];
        assert_eq!(female.sex, Sex::Female);
        assert_eq!(female.points, vec![(AgeBracket::Age0, 1.5)]);
    }

    #[test]
    fn series_keep_bracket_positions_when_early_value_missing() {
        // Heart Disease has no male0; its male series must start at the
        // 20-bracket, not slide down to position 0.
        let ds = scenario_dataset();
        let sel = SelectionState {
            sex_mode: SexMode::Male,
            ..select(&["Heart Disease"])
        };
        let set = derive_series(&derive_table(&ds, &sel), &sel);
        assert_eq!(set.series.len(), 1);
        assert_eq!(set.series[0].points, vec![(AgeBracket::Age20, 0.8)]);
    }

    #[test]
    fn series_guard_against_stale_table() {
        let ds = scenario_dataset();
        let table = derive_table(&ds, &select(&["Cancer", "Heart Disease"]));
        // Selection narrowed after the table was derived.
        let set = derive_series(&table, &select(&["Cancer"]));
        assert!(set.series.iter().all(|s| s.cause == "Cancer"));
    }

    #[test]
    fn ranking_sorts_descending_and_skips_missing() {
        let ds = scenario_dataset();
        let sel = select(&["Cancer", "Heart Disease"]);
        let ranking = derive_ranking(&ds, &sel);
        // Heart Disease has no male0 value: excluded, not sorted last.
        assert_eq!(ranking.entries.len(), 1);
        assert_eq!(ranking.entries[0].cause, "Cancer");
        assert_eq!(ranking.entries[0].value, 1.0);
    }

    #[test]
    fn ranking_ties_keep_canonical_order() {
        let ds = loader::parse_for_tests(
            "cause,male0\nStroke,3.0\nCancer,5.0\nPneumonia,3.0\nSepsis,4.0\n",
        );
        let ranking = derive_ranking(&ds, &select(&["Stroke", "Cancer", "Pneumonia", "Sepsis"]));
        let order: Vec<&str> = ranking.entries.iter().map(|e| e.cause.as_str()).collect();
        // 3.0 tie: Stroke before Pneumonia, as in the source file.
        assert_eq!(order, vec!["Cancer", "Sepsis", "Stroke", "Pneumonia"]);
    }

    #[test]
    fn ranking_ignores_sex_mode() {
        let ds = scenario_dataset();
        let causes = select(&["Cancer", "Heart Disease"]);
        let rankings: Vec<RankingView> = SexMode::ALL
            .iter()
            .map(|&sex_mode| {
                derive_ranking(
                    &ds,
                    &SelectionState {
                        sex_mode,
                        ..causes.clone()
                    },
                )
            })
            .collect();
        assert_eq!(rankings[0], rankings[1]);
        assert_eq!(rankings[1], rankings[2]);
    }

    #[test]
    fn ranking_on_absent_column_degrades_to_empty() {
        let ds = scenario_dataset();
        let sel = SelectionState {
            ranking_sex: Sex::Female,
            ranking_age: AgeBracket::Age90, // no female90 column in the file
            ..select(&["Cancer"])
        };
        let ranking = derive_ranking(&ds, &sel);
        assert!(ranking.is_empty());
        assert_eq!(ranking.age, AgeBracket::Age90);
    }
}
