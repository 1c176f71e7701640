//! Shared domain types.
//!
//! The central type is [`Dataset`]: a small column-oriented table holding the
//! parsed spreadsheet. Columns are either fully numeric (with per-row gaps) or
//! plain text. Renderers never touch the CSV layer; they ask the dataset for
//! the views they need (finite values, category labels, grouped values,
//! row-aligned pairs).

/// Category column used by the default chart suite.
pub const COL_CAUSE: &str = "Causes_Respiratory_Imbalance";
/// Heart rate in beats per minute.
pub const COL_HEART_RATE: &str = "Heart_Rate";
/// Oxygen saturation in percent. Source cells may use a decimal comma.
pub const COL_SPO2: &str = "Oxygen_Saturation";
/// Systolic blood pressure in mmHg.
pub const COL_BPSYS: &str = "BPSYS";

/// Cell storage for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    /// Per-row parsed numbers; `None` marks an empty or non-finite cell.
    Numeric(Vec<Option<f64>>),
    /// Raw text cells (empty string for blank cells).
    Text(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named column of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Numeric(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Text(values),
        }
    }
}

/// Column-oriented table of parsed rows.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    pub fn new(columns: Vec<Column>) -> Self {
        let n_rows = columns.iter().map(|c| c.values.len()).max().unwrap_or(0);
        Self { columns, n_rows }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Per-row cells of a numeric column, gaps included.
    pub fn numeric_slice(&self, name: &str) -> Option<&[Option<f64>]> {
        match &self.column(name)?.values {
            ColumnValues::Numeric(vals) => Some(vals),
            ColumnValues::Text(_) => None,
        }
    }

    /// All finite values of a numeric column, in row order.
    pub fn numeric_values(&self, name: &str) -> Option<Vec<f64>> {
        let slice = self.numeric_slice(name)?;
        Some(slice.iter().flatten().copied().filter(|v| v.is_finite()).collect())
    }

    /// Per-row cells of a text column.
    pub fn text_values(&self, name: &str) -> Option<&[String]> {
        match &self.column(name)?.values {
            ColumnValues::Text(vals) => Some(vals),
            ColumnValues::Numeric(_) => None,
        }
    }

    /// Per-row category labels for a column of either kind.
    ///
    /// Numeric cells are formatted without a trailing `.0` when integral, so a
    /// numeric code column groups the same way a text column would. Missing
    /// cells become empty labels.
    pub fn category_values(&self, name: &str) -> Option<Vec<String>> {
        match &self.column(name)?.values {
            ColumnValues::Text(vals) => Some(vals.clone()),
            ColumnValues::Numeric(vals) => Some(
                vals.iter()
                    .map(|v| match v {
                        Some(x) if x.fract() == 0.0 => format!("{}", *x as i64),
                        Some(x) => format!("{x}"),
                        None => String::new(),
                    })
                    .collect(),
            ),
        }
    }

    /// Finite values of `value_col` grouped by the labels of `group_col`.
    ///
    /// Groups are ordered by first appearance. Rows with an empty label or a
    /// missing value are skipped, and groups left empty are dropped.
    pub fn grouped_values(
        &self,
        group_col: &str,
        value_col: &str,
    ) -> Option<Vec<(String, Vec<f64>)>> {
        let labels = self.category_values(group_col)?;
        let values = self.numeric_slice(value_col)?;

        let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
        for (label, value) in labels.iter().zip(values.iter()) {
            if label.is_empty() {
                continue;
            }
            let idx = match groups.iter().position(|(name, _)| name == label) {
                Some(i) => i,
                None => {
                    groups.push((label.clone(), Vec::new()));
                    groups.len() - 1
                }
            };
            if let Some(v) = value {
                if v.is_finite() {
                    groups[idx].1.push(*v);
                }
            }
        }
        groups.retain(|(_, vals)| !vals.is_empty());
        Some(groups)
    }

    /// Row-aligned `(x, y)` pairs where both cells are present and finite.
    pub fn paired_values(&self, x_col: &str, y_col: &str) -> Option<Vec<(f64, f64)>> {
        let xs = self.numeric_slice(x_col)?;
        let ys = self.numeric_slice(y_col)?;
        Some(
            xs.iter()
                .zip(ys.iter())
                .filter_map(|(x, y)| match (x, y) {
                    (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
                    _ => None,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::text(
                "cause",
                vec![
                    "Asthma".to_string(),
                    "COPD".to_string(),
                    "Asthma".to_string(),
                    String::new(),
                    "COPD".to_string(),
                ],
            ),
            Column::numeric(
                "hr",
                vec![Some(96.0), Some(88.0), Some(102.0), Some(75.0), None],
            ),
            Column::numeric(
                "spo2",
                vec![Some(94.5), None, Some(91.0), Some(98.0), Some(89.5)],
            ),
        ])
    }

    #[test]
    fn numeric_values_skips_gaps() {
        let ds = sample();
        assert_eq!(ds.numeric_values("hr").unwrap(), vec![96.0, 88.0, 102.0, 75.0]);
        assert!(ds.numeric_values("cause").is_none());
        assert!(ds.numeric_values("missing").is_none());
    }

    #[test]
    fn grouped_values_keeps_first_appearance_order() {
        let ds = sample();
        let groups = ds.grouped_values("cause", "hr").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Asthma");
        assert_eq!(groups[0].1, vec![96.0, 102.0]);
        // COPD's only remaining row has a missing hr cell, but the first COPD
        // row (88.0) keeps the group alive.
        assert_eq!(groups[1].0, "COPD");
        assert_eq!(groups[1].1, vec![88.0]);
    }

    #[test]
    fn grouped_values_drops_empty_groups() {
        let ds = Dataset::new(vec![
            Column::text("g", vec!["a".to_string(), "b".to_string()]),
            Column::numeric("v", vec![None, Some(1.0)]),
        ]);
        let groups = ds.grouped_values("g", "v").unwrap();
        assert_eq!(groups, vec![("b".to_string(), vec![1.0])]);
    }

    #[test]
    fn category_values_formats_integral_numbers_without_decimals() {
        let ds = Dataset::new(vec![Column::numeric(
            "code",
            vec![Some(1.0), Some(2.5), None],
        )]);
        assert_eq!(
            ds.category_values("code").unwrap(),
            vec!["1".to_string(), "2.5".to_string(), String::new()]
        );
    }

    #[test]
    fn paired_values_requires_both_cells() {
        let ds = sample();
        let pairs = ds.paired_values("hr", "spo2").unwrap();
        assert_eq!(pairs, vec![(96.0, 94.5), (102.0, 91.0), (75.0, 98.0)]);
    }

    #[test]
    fn n_rows_is_longest_column() {
        let ds = sample();
        assert_eq!(ds.n_rows(), 5);
        assert!(ds.has_column("spo2"));
        assert!(!ds.has_column("bp"));
    }
}
