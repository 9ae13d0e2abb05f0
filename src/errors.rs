use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "no preprocessed basin data under {path}: run the preprocessing \
         utility to generate one csv per basin before building the dataset"
    )]
    MissingPreprocessedData { path: PathBuf },

    #[error("no model implemented for key `{key}`")]
    NoModelForKey { key: String },

    #[error("no dataset implemented for key `{key}`")]
    NoDatasetForKey { key: String },

    #[error("no head implemented for key `{key}`")]
    NoHeadForKey { key: String },

    #[error("model `{model}` supports a single frequency, but {count} are configured")]
    MultiFrequencyUnsupported { model: String, count: usize },

    #[error("malformed table {path}: {reason}")]
    MalformedTable { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
