use std::collections::BTreeMap;

/// One typed column. Every column in a [`Table`] holds exactly one value per row.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    U64(Vec<u64>),
    I64(Vec<i64>),
    F64(Vec<f64>),
    Bool(Vec<bool>),
    Text(Vec<String>),
}

/// A single captured field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    U64(u64),
    I64(i64),
    F64(f64),
    Bool(bool),
    Text(String),
}

impl Column {
    /// Column of `value`'s type holding `rows` defaults.
    fn filled_for(value: &Value, rows: usize) -> Self {
        match value {
            Value::U64(_) => Column::U64(vec![0; rows]),
            Value::I64(_) => Column::I64(vec![0; rows]),
            Value::F64(_) => Column::F64(vec![0.0; rows]),
            Value::Bool(_) => Column::Bool(vec![false; rows]),
            Value::Text(_) => Column::Text(vec![String::new(); rows]),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::U64(v) => v.len(),
            Column::I64(v) => v.len(),
            Column::F64(v) => v.len(),
            Column::Bool(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fill_to(&mut self, rows: usize) {
        let missing = rows.saturating_sub(self.len());
        if missing == 0 {
            return;
        }
        match self {
            Column::U64(v) => v.extend(std::iter::repeat_n(0, missing)),
            Column::I64(v) => v.extend(std::iter::repeat_n(0, missing)),
            Column::F64(v) => v.extend(std::iter::repeat_n(0.0, missing)),
            Column::Bool(v) => v.extend(std::iter::repeat_n(false, missing)),
            Column::Text(v) => v.extend(std::iter::repeat_n(String::new(), missing)),
        }
    }

    /// Append `value`, converting between numeric types where that loses nothing
    /// important. Returns false if the value could not be stored in this column.
    fn push(&mut self, value: Value) -> bool {
        match (self, value) {
            (Column::U64(v), Value::U64(x)) => v.push(x),
            (Column::U64(v), Value::I64(x)) if x >= 0 => v.push(x as u64),
            (Column::I64(v), Value::I64(x)) => v.push(x),
            (Column::I64(v), Value::U64(x)) => v.push(x as i64),
            (Column::F64(v), Value::F64(x)) => v.push(x),
            (Column::F64(v), Value::U64(x)) => v.push(x as f64),
            (Column::F64(v), Value::I64(x)) => v.push(x as f64),
            (Column::Bool(v), Value::Bool(x)) => v.push(x),
            (Column::Text(v), Value::Text(x)) => v.push(x),
            _ => return false,
        }
        true
    }

    pub fn as_u64(&self) -> Option<&[u64]> {
        match self {
            Column::U64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<&[i64]> {
        match self {
            Column::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            Column::F64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<&[bool]> {
        match self {
            Column::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            Column::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// Rows captured under one tracing target. Columns appear the first time a field is seen
/// and are back-filled with defaults for earlier rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: BTreeMap<String, Column>,
    rows: usize,
}

impl Table {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(name, col)| (name.as_str(), col))
    }

    pub fn u64s(&self, name: &str) -> Option<&[u64]> {
        self.column(name).and_then(Column::as_u64)
    }

    pub fn i64s(&self, name: &str) -> Option<&[i64]> {
        self.column(name).and_then(Column::as_i64)
    }

    pub fn f64s(&self, name: &str) -> Option<&[f64]> {
        self.column(name).and_then(Column::as_f64)
    }

    pub fn bools(&self, name: &str) -> Option<&[bool]> {
        self.column(name).and_then(Column::as_bool)
    }

    pub fn texts(&self, name: &str) -> Option<&[String]> {
        self.column(name).and_then(Column::as_text)
    }

    /// Append one row. Fields this row lacks get defaults; a repeated field keeps its first value.
    pub fn push_row(&mut self, fields: impl IntoIterator<Item = (String, Value)>) {
        let row = self.rows;
        for (name, value) in fields {
            let column = self
                .columns
                .entry(name)
                .or_insert_with(|| Column::filled_for(&value, row));
            if column.len() == row {
                column.push(value);
            }
        }
        self.rows += 1;
        for column in self.columns.values_mut() {
            column.fill_to(self.rows);
        }
    }
}

/// Captured tables keyed by tracing target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    tables: BTreeMap<String, Table>,
}

impl Tables {
    pub fn get(&self, target: &str) -> Option<&Table> {
        self.tables.get(target)
    }

    pub fn table_mut(&mut self, target: &str) -> &mut Table {
        self.tables.entry(target.to_string()).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Row count for `target`, zero when nothing was captured under it.
    pub fn rows(&self, target: &str) -> usize {
        self.get(target).map(Table::rows).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, value: Value) -> (String, Value) {
        (name.to_string(), value)
    }

    #[test]
    fn late_columns_are_back_filled() {
        let mut table = Table::default();
        table.push_row([field("tick", Value::U64(1)), field("price", Value::F64(2.5))]);
        table.push_row([field("tick", Value::U64(2)), field("name", Value::Text("b".into()))]);

        assert_eq!(table.rows(), 2);
        assert_eq!(table.u64s("tick"), Some(&[1, 2][..]));
        assert_eq!(table.f64s("price"), Some(&[2.5, 0.0][..]));
        let names = table.texts("name").unwrap();
        assert_eq!(names, &["".to_string(), "b".to_string()]);
    }

    #[test]
    fn integers_widen_into_float_columns() {
        let mut table = Table::default();
        table.push_row([field("x", Value::F64(0.5))]);
        table.push_row([field("x", Value::I64(-2))]);
        table.push_row([field("x", Value::U64(3))]);
        assert_eq!(table.f64s("x"), Some(&[0.5, -2.0, 3.0][..]));
    }

    #[test]
    fn mismatched_value_is_padded() {
        let mut table = Table::default();
        table.push_row([field("flag", Value::Bool(true))]);
        table.push_row([field("flag", Value::Text("yes".into()))]);
        assert_eq!(table.bools("flag"), Some(&[true, false][..]));
        assert!(table.texts("flag").is_none());
    }

    #[test]
    fn negative_into_unsigned_is_rejected() {
        let mut table = Table::default();
        table.push_row([field("n", Value::U64(4))]);
        table.push_row([field("n", Value::I64(-1))]);
        assert_eq!(table.u64s("n"), Some(&[4, 0][..]));
    }

    #[test]
    fn unknown_target_has_no_rows() {
        let tables = Tables::default();
        assert_eq!(tables.rows("nothing"), 0);
        assert!(tables.is_empty());
    }
}
