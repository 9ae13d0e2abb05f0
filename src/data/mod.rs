pub mod batch;
pub mod camelscl;
pub mod table;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::RunConfig;
use crate::errors::Error;

use self::camelscl::CamelsCl;
use self::table::{AttributeTable, TimeSeriesTable};

/// Split of the run a data provider is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Train,
    Validation,
    Test,
}

/// Fitted centering and scaling values of one variable, persisted
/// between training and evaluation runs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableScaler {
    pub center: f64,
    pub scale: f64,
}

/// All data providers that can be built from a run configuration. The
/// surrounding dataset lifecycle holds one variant and delegates the two
/// loading calls to it.
#[derive(Debug)]
pub enum Dataset {
    CamelsCl(CamelsCl),
}

/// Builds the data provider named by `cfg.dataset`.
///
/// Everything beyond the configuration is carried through to the
/// provider untouched; the surrounding lifecycle owns windowing,
/// normalization and batching.
pub fn get_dataset(
    cfg: RunConfig,
    is_train: bool,
    period: Period,
    basin: Option<String>,
    additional_features: Vec<HashMap<String, TimeSeriesTable>>,
    id_to_int: HashMap<String, usize>,
    scaler: HashMap<String, VariableScaler>,
) -> Result<Dataset, Error> {
    let key = cfg.dataset.to_lowercase();

    let dataset = match key.as_str() {
        "camels_cl" => Dataset::CamelsCl(CamelsCl::new(
            cfg,
            is_train,
            period,
            basin,
            additional_features,
            id_to_int,
            scaler,
        )),
        _ => {
            return Err(Error::NoDatasetForKey {
                key: cfg.dataset.clone(),
            })
        }
    };

    info!(dataset = %key, "dataset initialized");

    Ok(dataset)
}

impl Dataset {
    /// Loads the raw timeseries of one basin.
    pub fn load_basin_data(&self, basin: &str) -> Result<TimeSeriesTable, Error> {
        match self {
            Dataset::CamelsCl(provider) => provider.load_basin_data(basin),
        }
    }

    /// Loads the attribute table, or `None` when the configuration
    /// requests no attributes.
    pub fn load_attributes(&self) -> Result<Option<AttributeTable>, Error> {
        match self {
            Dataset::CamelsCl(provider) => provider.load_attributes(),
        }
    }
}
