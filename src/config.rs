use burn::config::Config;

/// Run configuration shared by the model and dataset registries.
///
/// Mirrors the experiment file an operator writes: which model, head and
/// dataset to build, which variables feed the network, and the layer
/// sizes. Adapters treat it as read-only for the whole run.
#[derive(Config, Debug)]
pub struct RunConfig {
    /// Registry key of the model to build.
    pub model: String,

    /// Registry key of the dataset to build.
    pub dataset: String,

    /// Root directory of the dataset on disk.
    pub data_dir: String,

    /// Output head placed on top of the recurrent cell.
    pub head: String,

    /// Variables the model is trained to predict.
    pub target_variables: Vec<String>,

    /// Time-varying forcing variables, one column each in the per-basin
    /// timeseries files.
    pub dynamic_inputs: Vec<String>,

    /// Time-invariant inputs taken from additional feature tables.
    #[config(default = "Vec::new()")]
    pub static_inputs: Vec<String>,

    /// Catchment attributes taken from the HydroATLAS table.
    #[config(default = "Vec::new()")]
    pub hydroatlas_attributes: Vec<String>,

    /// Catchment attributes taken from the dataset's own attribute file.
    #[config(default = "Vec::new()")]
    pub camels_attributes: Vec<String>,

    /// Append a one-hot basin indicator to the static inputs.
    #[config(default = false)]
    pub use_basin_id_encoding: bool,

    /// Width of the one-hot basin indicator.
    #[config(default = 0)]
    pub number_of_basins: usize,

    #[config(default = 128)]
    pub hidden_size: usize,

    /// Dropout applied between the recurrent output and the head.
    #[config(default = 0.0)]
    pub output_dropout: f64,

    /// Mixture components of the distributional heads.
    #[config(default = 1)]
    pub n_distributions: usize,

    /// Temporal resolutions requested for inputs and outputs. Models
    /// restricted to a single frequency reject more than one entry.
    #[config(default = "Vec::new()")]
    pub use_frequencies: Vec<String>,
}
