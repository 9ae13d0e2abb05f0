use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::config::RunConfig;
use crate::errors::Error;

use super::table::{AttributeTable, Column, TimeSeriesTable};
use super::{Period, VariableScaler};

/// Subdirectory of the dataset root holding one csv per basin.
const PREPROCESSED_DIR: &str = "preprocessed";

/// Tab-delimited attribute file shipped at the CAMELS-CL root.
const ATTRIBUTES_FILE: &str = "1_CAMELScl_attributes.txt";

/// Attribute columns holding the observation period bounds.
const DATE_COLUMNS: &[&str] = &["record_period_start", "record_period_end"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// CAMELS-CL data provider.
///
/// Supplies the two loading calls the surrounding dataset lifecycle
/// delegates to. Windowing, normalization and batching happen there, not
/// here; the construction arguments other than the configuration are
/// stored untouched for the lifecycle to pick up.
#[derive(Debug)]
pub struct CamelsCl {
    cfg: RunConfig,
    is_train: bool,
    period: Period,
    basin: Option<String>,
    additional_features: Vec<HashMap<String, TimeSeriesTable>>,
    id_to_int: HashMap<String, usize>,
    scaler: HashMap<String, VariableScaler>,
}

impl CamelsCl {
    pub fn new(
        cfg: RunConfig,
        is_train: bool,
        period: Period,
        basin: Option<String>,
        additional_features: Vec<HashMap<String, TimeSeriesTable>>,
        id_to_int: HashMap<String, usize>,
        scaler: HashMap<String, VariableScaler>,
    ) -> Self {
        Self {
            cfg,
            is_train,
            period,
            basin,
            additional_features,
            id_to_int,
            scaler,
        }
    }

    pub fn cfg(&self) -> &RunConfig {
        &self.cfg
    }

    pub fn is_train(&self) -> bool {
        self.is_train
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn additional_features(&self) -> &[HashMap<String, TimeSeriesTable>] {
        &self.additional_features
    }

    pub fn id_to_int(&self) -> &HashMap<String, usize> {
        &self.id_to_int
    }

    pub fn scaler(&self) -> &HashMap<String, VariableScaler> {
        &self.scaler
    }

    /// Reads the preprocessed timeseries of one basin. The table is
    /// returned as stored on disk; filtering and scaling happen
    /// downstream.
    pub fn load_basin_data(&self, basin: &str) -> Result<TimeSeriesTable, Error> {
        load_preprocessed_timeseries(Path::new(&self.cfg.data_dir), basin)
    }

    /// Reads the attribute table restricted to the configured attribute
    /// names. Returns `None` when no attributes are configured, so the
    /// caller can skip static-feature concatenation entirely rather than
    /// treating it as "zero attributes exist".
    pub fn load_attributes(&self) -> Result<Option<AttributeTable>, Error> {
        if self.cfg.camels_attributes.is_empty() {
            return Ok(None);
        }

        let restriction: &[String] = match &self.basin {
            Some(basin) => std::slice::from_ref(basin),
            None => &[],
        };

        let mut table =
            load_camels_cl_attributes(Path::new(&self.cfg.data_dir), restriction)?;
        table.retain_columns(&self.cfg.camels_attributes);

        Ok(Some(table))
    }
}

/// Loads `<data_dir>/preprocessed/<basin>.csv` into a date-indexed table.
///
/// Fails if the preprocessed directory does not exist; preprocessing is
/// never run implicitly.
pub fn load_preprocessed_timeseries(
    data_dir: &Path,
    basin: &str,
) -> Result<TimeSeriesTable, Error> {
    let preprocessed = data_dir.join(PREPROCESSED_DIR);
    if !preprocessed.is_dir() {
        return Err(Error::MissingPreprocessedData { path: preprocessed });
    }

    let path = preprocessed.join(format!("{basin}.csv"));
    debug!(%basin, path = %path.display(), "loading preprocessed basin timeseries");

    let mut reader = csv::Reader::from_path(&path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();

    let date_idx = headers
        .iter()
        .position(|name| name == "date")
        .ok_or_else(|| Error::MalformedTable {
            path: path.clone(),
            reason: "missing `date` column".to_owned(),
        })?;

    let mut index = Vec::new();
    let mut columns: Vec<(String, Vec<f64>)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_idx)
        .map(|(_, name)| (name.clone(), Vec::new()))
        .collect();

    for record in reader.records() {
        let record = record?;

        let date = NaiveDate::parse_from_str(&record[date_idx], DATE_FORMAT).map_err(|e| {
            Error::MalformedTable {
                path: path.clone(),
                reason: format!("column `date`: {e}"),
            }
        })?;
        index.push(date);

        let mut column = 0;
        for (i, field) in record.iter().enumerate() {
            if i == date_idx {
                continue;
            }
            columns[column].1.push(field.parse::<f64>().unwrap_or(f64::NAN));
            column += 1;
        }
    }

    Ok(TimeSeriesTable::new(index, columns))
}

/// Loads the CAMELS-CL attribute file.
///
/// The file stores one row per attribute and one column per basin; the
/// returned table is transposed so basins index the rows. An empty
/// `basins` slice keeps every basin in the file. Columns become numeric
/// only when every cell parses; anything else stays categorical, since
/// the file mixes numeric and categorical variables.
pub fn load_camels_cl_attributes(
    data_dir: &Path,
    basins: &[String],
) -> Result<AttributeTable, Error> {
    let path = data_dir.join(ATTRIBUTES_FILE);

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(&path)?;

    // Header row: row-label column followed by one basin id per column.
    let all_basins: Vec<String> = reader.headers()?.iter().skip(1).map(str::to_owned).collect();

    let keep: Vec<usize> = if basins.is_empty() {
        (0..all_basins.len()).collect()
    } else {
        all_basins
            .iter()
            .enumerate()
            .filter(|(_, basin)| basins.contains(basin))
            .map(|(i, _)| i)
            .collect()
    };
    let kept_basins: Vec<String> = keep.iter().map(|&i| all_basins[i].clone()).collect();

    let mut columns: Vec<(String, Column)> = Vec::new();
    for record in reader.records() {
        let record = record?;

        let name = match record.get(0) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => continue,
        };

        let values: Vec<String> = keep
            .iter()
            .map(|&i| record.get(i + 1).unwrap_or("").to_owned())
            .collect();

        columns.push((name.clone(), coerce_column(&name, values, &path)?));
    }

    debug!(
        path = %path.display(),
        n_basins = kept_basins.len(),
        n_attributes = columns.len(),
        "loaded attribute table"
    );

    Ok(AttributeTable::new(kept_basins, columns))
}

fn coerce_column(name: &str, values: Vec<String>, path: &Path) -> Result<Column, Error> {
    if DATE_COLUMNS.contains(&name) {
        let dates = values
            .iter()
            .map(|value| NaiveDate::parse_from_str(value, DATE_FORMAT))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::MalformedTable {
                path: path.to_path_buf(),
                reason: format!("column `{name}`: {e}"),
            })?;
        return Ok(Column::Date(dates));
    }

    let numeric: Option<Vec<f64>> = values
        .iter()
        .map(|value| {
            if value.is_empty() {
                Some(f64::NAN)
            } else {
                value.parse::<f64>().ok()
            }
        })
        .collect();

    Ok(match numeric {
        Some(parsed) => Column::Numeric(parsed),
        None => Column::Categorical(values),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_basin_csv(dir: &Path, basin: &str) {
        let preprocessed = dir.join(PREPROCESSED_DIR);
        fs::create_dir_all(&preprocessed).unwrap();
        fs::write(
            preprocessed.join(format!("{basin}.csv")),
            "date,precip,qobs\n1990-01-01,1.5,0.2\n1990-01-02,0.0,0.3\n",
        )
        .unwrap();
    }

    fn write_attributes_file(dir: &Path) {
        fs::write(
            dir.join(ATTRIBUTES_FILE),
            "gauge_id\t8005001\t8005002\n\
             area\t100.5\t200.25\n\
             land_cover\tforest\tgrass\n\
             record_period_start\t1990-01-01\t1995-05-01\n\
             record_period_end\t2009-12-31\t2010-01-01\n",
        )
        .unwrap();
    }

    fn config_with_attributes(dir: &Path, attributes: Vec<String>) -> RunConfig {
        RunConfig::new(
            "lstm".to_owned(),
            "camels_cl".to_owned(),
            dir.to_string_lossy().into_owned(),
            "regression".to_owned(),
            vec!["qobs".to_owned()],
            vec!["precip".to_owned()],
        )
        .with_camels_attributes(attributes)
    }

    fn provider(dir: &Path, attributes: Vec<String>) -> CamelsCl {
        CamelsCl::new(
            config_with_attributes(dir, attributes),
            true,
            Period::Train,
            None,
            Vec::new(),
            HashMap::new(),
            HashMap::new(),
        )
    }

    #[test]
    fn missing_preprocessed_dir_is_fatal_with_remediation() {
        let dir = TempDir::new().unwrap();

        let err = load_preprocessed_timeseries(dir.path(), "8005001").unwrap_err();
        assert!(matches!(err, Error::MissingPreprocessedData { .. }));
        assert!(err.to_string().contains("preprocessed"));
    }

    #[test]
    fn basin_timeseries_is_date_indexed() {
        let dir = TempDir::new().unwrap();
        write_basin_csv(dir.path(), "8005001");

        let table = load_preprocessed_timeseries(dir.path(), "8005001").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.index()[0], NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        assert_eq!(table.column_names(), vec!["precip", "qobs"]);
        assert_eq!(table.column("precip"), Some([1.5, 0.0].as_slice()));
    }

    #[test]
    fn attributes_are_transposed_and_coerced() {
        let dir = TempDir::new().unwrap();
        write_attributes_file(dir.path());

        let table = load_camels_cl_attributes(dir.path(), &[]).unwrap();

        assert_eq!(table.basins(), ["8005001".to_owned(), "8005002".to_owned()]);
        assert_eq!(
            table.column("area"),
            Some(&Column::Numeric(vec![100.5, 200.25]))
        );
        assert_eq!(
            table.column("land_cover"),
            Some(&Column::Categorical(vec![
                "forest".to_owned(),
                "grass".to_owned()
            ]))
        );
        assert_eq!(
            table.column("record_period_start"),
            Some(&Column::Date(vec![
                NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(1995, 5, 1).unwrap(),
            ]))
        );
    }

    #[test]
    fn attribute_loading_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write_attributes_file(dir.path());

        let basins = vec!["8005002".to_owned()];
        let first = load_camels_cl_attributes(dir.path(), &basins).unwrap();
        let second = load_camels_cl_attributes(dir.path(), &basins).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn basin_restriction_drops_other_rows() {
        let dir = TempDir::new().unwrap();
        write_attributes_file(dir.path());

        let table =
            load_camels_cl_attributes(dir.path(), &["8005002".to_owned()]).unwrap();

        assert_eq!(table.basins(), ["8005002".to_owned()]);
        assert_eq!(table.column("area"), Some(&Column::Numeric(vec![200.25])));
    }

    #[test]
    fn provider_filters_to_configured_attributes() {
        let dir = TempDir::new().unwrap();
        write_attributes_file(dir.path());

        let provider = provider(dir.path(), vec!["area".to_owned()]);
        let table = provider.load_attributes().unwrap().unwrap();

        assert_eq!(table.column_names(), vec!["area"]);
    }

    #[test]
    fn no_configured_attributes_yields_absent_result() {
        let dir = TempDir::new().unwrap();
        write_attributes_file(dir.path());

        let provider = provider(dir.path(), Vec::new());
        assert!(provider.load_attributes().unwrap().is_none());
    }
}
