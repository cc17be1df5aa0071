/// Data layer: core types, loading, and the view derivations.
///
/// Architecture:
/// ```text
///  Shift_JIS CSV (e-Stat)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode + parse + validate header → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  canonical, immutable: Vec<Row>, typed ColumnKeys
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (dataset, selection) → TableView / SeriesSet / RankingView
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
