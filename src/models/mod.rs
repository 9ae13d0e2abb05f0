pub mod head;
pub mod lstm;

use burn::tensor::backend::Backend;
use tracing::info;

use crate::config::RunConfig;
use crate::data::batch::{ModelInput, ModelOutput};
use crate::errors::Error;

use self::lstm::LstmModel;

/// Models restricted to exactly one temporal resolution.
const SINGLE_FREQUENCY_MODELS: &[&str] = &["lstm"];

/// All models that can be built from a run configuration.
#[derive(Debug)]
pub enum Model<B: Backend> {
    Lstm(LstmModel<B>),
}

/// Builds the model named by `cfg.model`.
///
/// Fails before construction when a single-frequency model is requested
/// with more than one configured frequency.
pub fn get_model<B: Backend>(cfg: &RunConfig) -> Result<Model<B>, Error> {
    let key = cfg.model.to_lowercase();

    if SINGLE_FREQUENCY_MODELS.contains(&key.as_str()) && cfg.use_frequencies.len() > 1 {
        return Err(Error::MultiFrequencyUnsupported {
            model: cfg.model.clone(),
            count: cfg.use_frequencies.len(),
        });
    }

    let model = match key.as_str() {
        "lstm" => Model::Lstm(LstmModel::new(cfg)?),
        _ => {
            return Err(Error::NoModelForKey {
                key: cfg.model.clone(),
            })
        }
    };

    info!(model = %key, "model initialized");

    Ok(model)
}

impl<B: Backend> Model<B> {
    pub fn forward(&self, input: ModelInput<B>) -> ModelOutput<B> {
        match self {
            Model::Lstm(model) => model.forward(input),
        }
    }

    /// Width of the feature axis of `y_hat`.
    pub fn output_size(&self) -> usize {
        match self {
            Model::Lstm(model) => model.output_size(),
        }
    }

    /// Named sub-components eligible for fine-tuning updates.
    pub fn modules_to_update(&self) -> Vec<&'static str> {
        match self {
            Model::Lstm(model) => model.modules_to_update(),
        }
    }
}
