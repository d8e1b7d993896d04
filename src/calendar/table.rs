//! Cycle table definitions
//!
//! A cycle table is the repeating N-day instructional pattern: one row per
//! cycle day, one column per period.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::calendar::error::{ResolveError, ResolveResult};

/// One position of the repeating cycle, e.g. "DAY 3"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleDay {
    /// Unique name of this cycle day
    pub name: String,
    /// Period contents, one per period label; may be empty strings
    #[serde(default)]
    pub slots: Vec<String>,
}

impl CycleDay {
    /// Build a cycle day from a name and its period contents.
    pub fn new<S: Into<String>>(name: &str, slots: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.to_string(),
            slots: slots.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered cycle days sharing one set of period labels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleTable {
    /// Column labels, typically time ranges such as "9:00–9:55"
    #[serde(rename = "periods")]
    pub period_labels: Vec<String>,
    /// Cycle days in cycle order
    #[serde(rename = "day", default)]
    pub days: Vec<CycleDay>,
}

impl CycleTable {
    /// Build a table without validating it. Call [`CycleTable::validate`]
    /// before use, or let the resolver do it.
    #[must_use]
    pub const fn new(period_labels: Vec<String>, days: Vec<CycleDay>) -> Self {
        Self {
            period_labels,
            days,
        }
    }

    /// The six-day, seven-period table used when no table is supplied.
    #[must_use]
    pub fn builtin() -> Self {
        let labels = [
            "9:00–9:55",
            "9:55–10:50",
            "11:10–12:05",
            "12:05–1:00",
            "2:00–2:55",
            "2:55–3:50",
            "3:50–4:45",
        ];
        let days = vec![
            CycleDay::new(
                "DAY 1",
                ["BA(SM)", "PP(CD)", "SML(RHP)", "OE", "Project Phase-II", "Project Phase-II", ""],
            ),
            CycleDay::new(
                "DAY 2",
                ["PP(CD)", "BA(SM)", "SML(RHP)", "OE", "Project Phase-II", "Project Phase-II", ""],
            ),
            CycleDay::new(
                "DAY 3",
                ["CNS(NNS)", "BA(SM)", "SML(RHP)", "OE", "Project Phase-II", "Project Phase-II", ""],
            ),
            CycleDay::new(
                "DAY 4",
                ["PP(CD)", "CNS(NNS)", "Project", "", "SKILL LAB", "", ""],
            ),
            CycleDay::new(
                "DAY 5",
                [
                    "PP LAB B1 & B2 (CD+HK)",
                    "SML LAB B3 & B4 (RHP+AML)",
                    "CNS(NNS)",
                    "",
                    "Project Phase-II",
                    "",
                    "",
                ],
            ),
            CycleDay::new(
                "DAY 6",
                [
                    "PP LAB B3 & B4 (CD+SKN)",
                    "SML LAB B1 & B2 (RHP+AML)",
                    "CNS(NNS)",
                    "OE+",
                    "Project Phase-II",
                    "",
                    "",
                ],
            ),
        ];

        Self::new(labels.iter().map(ToString::to_string).collect(), days)
    }

    /// Number of cycle days (N)
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True if the table has no cycle days
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of period columns (M)
    #[must_use]
    pub fn width(&self) -> usize {
        self.period_labels.len()
    }

    /// Index of the cycle day with the given name
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.days.iter().position(|d| d.name == name)
    }

    /// The cycle day a pointer resolves to; the pointer wraps modulo N.
    ///
    /// Panics on an empty table, which `validate` rejects.
    #[must_use]
    pub fn day_at(&self, idx: usize) -> &CycleDay {
        &self.days[idx % self.days.len()]
    }

    /// Cycle day names in table order
    pub fn day_names(&self) -> impl Iterator<Item = &str> {
        self.days.iter().map(|d| d.name.as_str())
    }

    /// Check the table is non-empty, rectangular and has unique day names.
    pub fn validate(&self) -> ResolveResult<()> {
        if self.days.is_empty() {
            return Err(ResolveError::MalformedCycleTable(
                "table has no cycle days".to_string(),
            ));
        }

        let width = self.width();
        for day in &self.days {
            if day.slots.len() != width {
                return Err(ResolveError::MalformedCycleTable(format!(
                    "cycle day '{}' has {} periods, expected {width}",
                    day.name,
                    day.slots.len()
                )));
            }
        }

        let mut seen = HashSet::new();
        for day in &self.days {
            if day.name.trim().is_empty() {
                return Err(ResolveError::MalformedCycleTable(
                    "cycle day name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(day.name.as_str()) {
                return Err(ResolveError::MalformedCycleTable(format!(
                    "duplicate cycle day '{}'",
                    day.name
                )));
            }
        }

        Ok(())
    }
}
