use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Sex / AgeBracket – the closed column-key space
// ---------------------------------------------------------------------------

/// One of the two sexes the source table breaks probabilities down by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Header spellings this sex is recognized under (the e-Stat Japanese
    /// export plus the plain English form).
    fn header_tags(self) -> &'static [&'static str] {
        match self {
            Sex::Male => &["男性", "male"],
            Sex::Female => &["女性", "female"],
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "Male"),
            Sex::Female => write!(f, "Female"),
        }
    }
}

/// The six fixed age brackets of the source table, in x-axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBracket {
    Age0,
    Age20,
    Age40,
    Age65,
    Age75,
    Age90,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 6] = [
        AgeBracket::Age0,
        AgeBracket::Age20,
        AgeBracket::Age40,
        AgeBracket::Age65,
        AgeBracket::Age75,
        AgeBracket::Age90,
    ];

    /// Age in years at the start of the bracket.
    pub fn years(self) -> u8 {
        match self {
            AgeBracket::Age0 => 0,
            AgeBracket::Age20 => 20,
            AgeBracket::Age40 => 40,
            AgeBracket::Age65 => 65,
            AgeBracket::Age75 => 75,
            AgeBracket::Age90 => 90,
        }
    }

    /// Position of the bracket along the chart x-axis.
    pub fn chart_position(self) -> f64 {
        Self::ALL.iter().position(|b| *b == self).unwrap_or(0) as f64
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.years())
    }
}

// ---------------------------------------------------------------------------
// ColumnKey – typed (sex, bracket) header key
// ---------------------------------------------------------------------------

/// A value column of the source table: one (sex, age-bracket) pair.
///
/// Parsed from the header exactly once at load time; every later lookup is
/// a total function over this closed key space rather than a string probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnKey {
    pub sex: Sex,
    pub age: AgeBracket,
}

impl ColumnKey {
    pub fn new(sex: Sex, age: AgeBracket) -> Self {
        ColumnKey { sex, age }
    }

    /// Parse a header cell like `男性0歳`, `女性75歳`, `male0` or
    /// `female,20`. Returns `None` for anything else.
    pub fn parse(header: &str) -> Option<ColumnKey> {
        let header = header.trim();
        for sex in Sex::ALL {
            for tag in sex.header_tags() {
                let Some(rest) = strip_prefix_ignore_ascii_case(header, tag) else {
                    continue;
                };
                let rest = rest
                    .trim_start_matches([',', '_', '-', ' '])
                    .trim_end_matches('歳')
                    .trim();
                for age in AgeBracket::ALL {
                    if rest == age.years().to_string() {
                        return Some(ColumnKey::new(sex, age));
                    }
                }
            }
        }
        None
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sex, self.age)
    }
}

fn strip_prefix_ignore_ascii_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() < prefix.len() {
        return None;
    }
    match s.split_at_checked(prefix.len()) {
        Some((head, rest)) if head.eq_ignore_ascii_case(prefix) => Some(rest),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Row / Dataset
// ---------------------------------------------------------------------------

/// One cause of death with its probability per (sex, bracket) column.
/// Values are percentages (0–100); a missing entry means the source table
/// carries no figure for that combination.
#[derive(Debug, Clone)]
pub struct Row {
    pub cause: String,
    pub values: BTreeMap<ColumnKey, f64>,
}

impl Row {
    pub fn value(&self, key: ColumnKey) -> Option<f64> {
        self.values.get(&key).copied()
    }
}

/// The full loaded table: ordered rows (causes unique) plus the value
/// columns present in the header, in header order.
///
/// There is exactly one canonical, immutable copy per session; all filtered
/// views are derived from it by the pure functions in [`super::filter`].
#[derive(Debug, Clone)]
pub struct Dataset {
    pub rows: Vec<Row>,
    pub columns: Vec<ColumnKey>,
}

impl Dataset {
    /// Number of causes (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cause labels in canonical row order.
    pub fn causes(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.cause.as_str())
    }

    /// Whether the header carried a column for this (sex, bracket) pair.
    pub fn has_column(&self, key: ColumnKey) -> bool {
        self.columns.contains(&key)
    }
}
