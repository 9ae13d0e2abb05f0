use chrono::NaiveDate;

/// Date-indexed observations of one basin. Columns are always numeric;
/// cells that fail to parse are stored as `NaN` and handled downstream.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeriesTable {
    index: Vec<NaiveDate>,
    columns: Vec<(String, Vec<f64>)>,
}

impl TimeSeriesTable {
    pub fn new(index: Vec<NaiveDate>, columns: Vec<(String, Vec<f64>)>) -> Self {
        Self { index, columns }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }
}

/// One attribute column. Attribute files mix numeric and categorical
/// variables, so a column stays categorical whenever any cell fails the
/// numeric parse. The record period bounds are carried as dates.
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
    Date(Vec<NaiveDate>),
}

/// Basin-indexed table of static catchment attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeTable {
    basins: Vec<String>,
    columns: Vec<(String, Column)>,
}

impl AttributeTable {
    pub fn new(basins: Vec<String>, columns: Vec<(String, Column)>) -> Self {
        Self { basins, columns }
    }

    pub fn basins(&self) -> &[String] {
        &self.basins
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, column)| column)
    }

    /// Drops every column whose name is not in `keep`.
    pub fn retain_columns(&mut self, keep: &[String]) {
        self.columns.retain(|(name, _)| keep.contains(name));
    }
}
