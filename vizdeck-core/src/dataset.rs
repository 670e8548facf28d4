//! Shared tabular dataset
//!
//! The one dataset all visualization units may consume. It is loaded by
//! an external collaborator, handed over as an immutable value and passed
//! by reference to any unit whose contract requires it. Units that need a
//! derived view must copy; no mutation API exists after construction.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::UnitError;

/// One cell of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Null,
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of a cell. Text cells go through the spreadsheet
    /// cleaning rules: `%` and thousands separators are stripped, and
    /// `""`, `"-"`, `"－"` count as missing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => {
                let cleaned = s.replace('%', "").replace(',', "");
                let cleaned = cleaned.trim();
                if cleaned.is_empty() || cleaned == "-" || cleaned == "－" {
                    return None;
                }
                cleaned.parse().ok()
            }
            CellValue::Null => None,
        }
    }
}

/// Immutable column-major table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<CellValue>>,
    rows: usize,
}

impl Dataset {
    /// Build from named columns. All columns must have equal length.
    pub fn from_columns(
        columns: Vec<(String, Vec<CellValue>)>,
    ) -> Result<Self, UnitError> {
        let rows = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut cells = Vec::with_capacity(columns.len());
        for (name, column) in columns {
            if column.len() != rows {
                return Err(UnitError::ColumnLengthMismatch {
                    name,
                    expected: rows,
                    got: column.len(),
                });
            }
            names.push(name);
            cells.push(column);
        }
        Ok(Self {
            names,
            columns: cells,
            rows,
        })
    }

    /// Build from a JSON array of flat record objects, the shape the
    /// external spreadsheet loader hands over. Column order follows
    /// first appearance; records missing a key get `Null`.
    pub fn from_json_records(text: &str) -> Result<Self, UnitError> {
        let records: Vec<JsonValue> = serde_json::from_str(text)
            .map_err(|e| UnitError::InvalidRecords(e.to_string()))?;

        let mut names: Vec<String> = Vec::new();
        for record in &records {
            let obj = record
                .as_object()
                .ok_or_else(|| UnitError::InvalidRecords("expected an array of objects".into()))?;
            for key in obj.keys() {
                if !names.iter().any(|n| n == key) {
                    names.push(key.clone());
                }
            }
        }

        let mut columns: Vec<Vec<CellValue>> = vec![Vec::with_capacity(records.len()); names.len()];
        for record in &records {
            let Some(obj) = record.as_object() else {
                continue; // rejected in the first pass
            };
            for (i, name) in names.iter().enumerate() {
                let cell = match obj.get(name) {
                    Some(JsonValue::Number(n)) => n
                        .as_f64()
                        .map(CellValue::Number)
                        .unwrap_or(CellValue::Null),
                    Some(JsonValue::String(s)) => CellValue::Text(s.clone()),
                    Some(JsonValue::Null) | None => CellValue::Null,
                    Some(other) => {
                        return Err(UnitError::InvalidRecords(format!(
                            "column '{name}' holds a non-scalar value: {other}"
                        )))
                    }
                };
                columns[i].push(cell);
            }
        }

        let rows = records.len();
        Ok(Self {
            names,
            columns,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[idx])
    }

    /// Text view of a column, empty string for non-text cells.
    pub fn text(&self, name: &str) -> Result<Vec<String>, UnitError> {
        let column = self
            .column(name)
            .ok_or_else(|| UnitError::MissingColumn(name.to_string()))?;
        Ok(column
            .iter()
            .map(|c| c.as_text().unwrap_or_default().to_string())
            .collect())
    }

    /// Cleaned numeric view of a column, `None` for missing values.
    pub fn numeric(&self, name: &str) -> Result<Vec<Option<f64>>, UnitError> {
        let column = self
            .column(name)
            .ok_or_else(|| UnitError::MissingColumn(name.to_string()))?;
        let values: Vec<Option<f64>> = column.iter().map(CellValue::as_number).collect();
        if values.iter().all(Option::is_none) && !values.is_empty() {
            return Err(UnitError::EmptyColumn(name.to_string()));
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_json_records(
            r#"[
                {"产品名称": "基金A", "夏普比率": "1.2", "最大回撤": "-12.5%"},
                {"产品名称": "基金B", "夏普比率": "0.8", "最大回撤": "－"},
                {"产品名称": "基金C", "夏普比率": 1.5, "最大回撤": "-8,000.25%"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_records_keep_column_order() {
        let ds = sample();
        let names: Vec<&str> = ds.column_names().collect();
        assert_eq!(names, vec!["产品名称", "夏普比率", "最大回撤"]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_numeric_strips_percent_and_separators() {
        let ds = sample();
        let drawdown = ds.numeric("最大回撤").unwrap();
        assert_eq!(drawdown[0], Some(-12.5));
        assert_eq!(drawdown[1], None); // full-width dash counts as missing
        assert_eq!(drawdown[2], Some(-8000.25));
    }

    #[test]
    fn test_numeric_accepts_mixed_number_and_text_cells() {
        let ds = sample();
        let sharpe = ds.numeric("夏普比率").unwrap();
        assert_eq!(sharpe, vec![Some(1.2), Some(0.8), Some(1.5)]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let ds = sample();
        assert!(matches!(
            ds.numeric("不存在"),
            Err(UnitError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_all_missing_column_is_empty() {
        let ds = Dataset::from_columns(vec![(
            "x".into(),
            vec![CellValue::Text("-".into()), CellValue::Null],
        )])
        .unwrap();
        assert!(matches!(ds.numeric("x"), Err(UnitError::EmptyColumn(_))));
    }

    #[test]
    fn test_mismatched_column_lengths_rejected() {
        let err = Dataset::from_columns(vec![
            ("a".into(), vec![CellValue::Number(1.0)]),
            ("b".into(), vec![]),
        ])
        .unwrap_err();
        assert!(matches!(err, UnitError::ColumnLengthMismatch { .. }));
    }

    #[test]
    fn test_invalid_records_rejected() {
        assert!(Dataset::from_json_records("[1, 2]").is_err());
        assert!(Dataset::from_json_records(r#"[{"a": [1]}]"#).is_err());
        assert!(Dataset::from_json_records("not json").is_err());
    }
}
