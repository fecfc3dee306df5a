/// A single spreadsheet cell, kept exactly as the codec produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Excel serial date (days since 1899-12-30).
    DateTime(f64),
    Error(String),
}

impl CellValue {
    /// Empty cells and whitespace-only text count as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(v) => v.trim().is_empty(),
            _ => false,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(v) | CellValue::Error(v) => write!(f, "{v}"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) | CellValue::DateTime(v) => write!(f, "{v}"),
            CellValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

pub type Row = Vec<CellValue>;

pub fn row_is_blank(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_blank)
}

/// Ordered rows of one sheet. Row 0 is the header by convention only; rows
/// may have different lengths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Everything after row 0. Empty for header-only and empty tables.
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Widest row; used for display only.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }
}

impl<R, C> FromIterator<R> for Table
where
    R: IntoIterator<Item = C>,
    C: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Table::new(
            iter.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}
