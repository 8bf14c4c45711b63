use serde_json::Value as JsonValue;
use std::fmt;

/// Represents the data type of a cell value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    String,
    Integer,
    Float,
    Boolean,
    Null,
}

impl DataType {
    /// Infer type from a string value
    pub fn infer_from_string(value: &str) -> Self {
        if value.is_empty() {
            return DataType::Null;
        }

        if value == "true" || value == "false" {
            return DataType::Boolean;
        }

        if value.parse::<i64>().is_ok() || value.parse::<u64>().is_ok() {
            return DataType::Integer;
        }

        // "NaN" and "inf" parse as floats but are text in a CSV source
        if value.parse::<f64>().map(|f| f.is_finite()).unwrap_or(false) {
            return DataType::Float;
        }

        DataType::String
    }
}

/// Column definition as received from the host.
///
/// Position in the table's column list defines both header order and the
/// per-row value order; `ordinal` is the host's own index for the column.
#[derive(Debug, Clone, PartialEq)]
pub struct DataColumn {
    pub display_name: String,
    pub ordinal: usize,
}

impl DataColumn {
    pub fn new(display_name: impl Into<String>, ordinal: usize) -> Self {
        Self {
            display_name: display_name.into(),
            ordinal,
        }
    }
}

/// A single cell value in the table
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    String(String),
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl DataValue {
    pub fn from_string(s: &str, data_type: DataType) -> Self {
        match data_type {
            DataType::Null => DataValue::Null,
            DataType::String => DataValue::String(s.to_string()),
            DataType::Integer => s
                .parse::<i64>()
                .map(DataValue::Integer)
                .or_else(|_| s.parse::<u64>().map(DataValue::Unsigned))
                .unwrap_or_else(|_| DataValue::String(s.to_string())),
            DataType::Float => s
                .parse::<f64>()
                .map(DataValue::Float)
                .unwrap_or_else(|_| DataValue::String(s.to_string())),
            DataType::Boolean => DataValue::Boolean(s == "true"),
        }
    }

    /// Convert a host-supplied JSON cell.
    /// Arrays and objects are kept as their JSON text.
    pub fn from_json(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => DataValue::Null,
            JsonValue::Bool(b) => DataValue::Boolean(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DataValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    DataValue::Unsigned(u)
                } else if let Some(f) = n.as_f64() {
                    DataValue::Float(f)
                } else {
                    DataValue::String(n.to_string())
                }
            }
            JsonValue::String(s) => DataValue::String(s.clone()),
            JsonValue::Array(_) | JsonValue::Object(_) => DataValue::String(json.to_string()),
        }
    }

    /// Typed JSON form used by the structured export.
    /// Non-finite floats have no JSON representation and become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            DataValue::String(s) => JsonValue::String(s.clone()),
            DataValue::Integer(i) => JsonValue::from(*i),
            DataValue::Unsigned(u) => JsonValue::from(*u),
            DataValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            DataValue::Boolean(b) => JsonValue::Bool(*b),
            DataValue::Null => JsonValue::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Loose truthiness: null, false, zero, NaN and the empty string are falsy
    pub fn is_falsy(&self) -> bool {
        match self {
            DataValue::Null => true,
            DataValue::Boolean(b) => !b,
            DataValue::Integer(i) => *i == 0,
            DataValue::Unsigned(u) => *u == 0,
            DataValue::Float(f) => *f == 0.0 || f.is_nan(),
            DataValue::String(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Unsigned(u) => write!(f, "{}", u),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::Boolean(b) => write!(f, "{}", b),
            DataValue::Null => write!(f, ""),
        }
    }
}

/// A row of data in the table
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    pub values: Vec<DataValue>,
}

impl DataRow {
    pub fn new(values: Vec<DataValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&DataValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The validated dataset for one render cycle
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    pub columns: Vec<DataColumn>,
    pub rows: Vec<DataRow>,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, column: DataColumn) -> &mut Self {
        self.columns.push(column);
        self
    }

    pub fn add_row(&mut self, row: DataRow) -> Result<(), String> {
        if row.len() != self.columns.len() {
            return Err(format!(
                "Row has {} values but table has {} columns",
                row.len(),
                self.columns.len()
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get column display names in column order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.display_name.clone()).collect()
    }

    /// Get a value at specific row and column
    pub fn get_value(&self, row: usize, col: usize) -> Option<&DataValue> {
        self.rows.get(row)?.get(col)
    }

    /// Build a table from CSV text, inferring each cell's type.
    /// The header record supplies the columns.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> anyhow::Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut table = DataTable::new();
        for (ordinal, header) in csv_reader.headers()?.iter().enumerate() {
            table.add_column(DataColumn::new(header, ordinal));
        }

        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let values = record
                .iter()
                .map(|field| DataValue::from_string(field, DataType::infer_from_string(field)))
                .collect();
            table
                .add_row(DataRow::new(values))
                .map_err(|e| anyhow::anyhow!("CSV record {}: {}", index + 1, e))?;
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_type_inference() {
        assert_eq!(DataType::infer_from_string("123"), DataType::Integer);
        assert_eq!(DataType::infer_from_string("123.45"), DataType::Float);
        assert_eq!(DataType::infer_from_string("true"), DataType::Boolean);
        assert_eq!(DataType::infer_from_string("hello"), DataType::String);
        assert_eq!(DataType::infer_from_string("NaN"), DataType::String);
        assert_eq!(
            DataType::infer_from_string("18446744073709551615"),
            DataType::Integer
        );
        assert_eq!(DataType::infer_from_string(""), DataType::Null);
    }

    #[test]
    fn test_datatable_creation() {
        let mut table = DataTable::new();

        table.add_column(DataColumn::new("id", 0));
        table.add_column(DataColumn::new("name", 1));
        table.add_column(DataColumn::new("active", 2));

        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 0);

        let row = DataRow::new(vec![
            DataValue::Integer(1),
            DataValue::String("Alice".to_string()),
            DataValue::Boolean(true),
        ]);

        table.add_row(row).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.get_value(0, 1).unwrap().to_string(), "Alice");
    }

    #[test]
    fn test_add_row_rejects_wrong_width() {
        let mut table = DataTable::new();
        table.add_column(DataColumn::new("a", 0));
        table.add_column(DataColumn::new("b", 1));

        let err = table
            .add_row(DataRow::new(vec![DataValue::Integer(1)]))
            .unwrap_err();
        assert_eq!(err, "Row has 1 values but table has 2 columns");
        assert!(table.is_empty());
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(DataValue::Integer(30).to_string(), "30");
        assert_eq!(DataValue::Float(2.5).to_string(), "2.5");
        assert_eq!(DataValue::Float(30.0).to_string(), "30");
        assert_eq!(DataValue::Boolean(false).to_string(), "false");
        assert_eq!(DataValue::Null.to_string(), "");
    }

    #[test]
    fn test_from_json_cells() {
        assert_eq!(DataValue::from_json(&json!(null)), DataValue::Null);
        assert_eq!(DataValue::from_json(&json!(7)), DataValue::Integer(7));
        assert_eq!(DataValue::from_json(&json!(1.25)), DataValue::Float(1.25));
        assert_eq!(DataValue::from_json(&json!(true)), DataValue::Boolean(true));
        assert_eq!(
            DataValue::from_json(&json!([1, 2])),
            DataValue::String("[1,2]".to_string())
        );
    }

    #[test]
    fn test_integers_beyond_i64_stay_exact() {
        let cell = DataValue::from_json(&json!(u64::MAX));
        assert_eq!(cell, DataValue::Unsigned(u64::MAX));
        assert_eq!(cell.to_string(), "18446744073709551615");
        assert_eq!(cell.to_json(), json!(u64::MAX));
        assert_eq!(serde_json::to_string(&cell.to_json()).unwrap(), "18446744073709551615");

        assert_eq!(
            DataValue::from_string("18446744073709551615", DataType::Integer),
            DataValue::Unsigned(u64::MAX)
        );
    }

    #[test]
    fn test_falsy_values() {
        assert!(DataValue::Null.is_falsy());
        assert!(DataValue::Integer(0).is_falsy());
        assert!(DataValue::Float(f64::NAN).is_falsy());
        assert!(DataValue::Boolean(false).is_falsy());
        assert!(DataValue::String(String::new()).is_falsy());
        assert!(!DataValue::String("0".to_string()).is_falsy());
        assert!(!DataValue::Integer(-1).is_falsy());
    }

    #[test]
    fn test_non_finite_float_to_json_is_null() {
        assert_eq!(DataValue::Float(f64::INFINITY).to_json(), json!(null));
        assert_eq!(DataValue::Float(0.5).to_json(), json!(0.5));
    }

    #[test]
    fn test_from_csv_reader() {
        let text = "Name,Age,Member\nAnn,30,true\nBo,,false\n";
        let table = DataTable::from_csv_reader(text.as_bytes()).unwrap();

        assert_eq!(table.column_names(), vec!["Name", "Age", "Member"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get_value(0, 1), Some(&DataValue::Integer(30)));
        assert_eq!(table.get_value(1, 1), Some(&DataValue::Null));
        assert_eq!(table.get_value(1, 2), Some(&DataValue::Boolean(false)));
        assert_eq!(table.columns[2].ordinal, 2);
    }

    #[test]
    fn test_from_csv_reader_reports_ragged_record() {
        let text = "a,b\n1,2\n3\n";
        let err = DataTable::from_csv_reader(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("CSV record 2"));
    }
}
