use burn::module::Module;
use burn::nn::{Dropout, DropoutConfig, Lstm, LstmConfig};
use burn::tensor::backend::Backend;

use crate::config::RunConfig;
use crate::data::batch::{ModelInput, ModelOutput};
use crate::errors::Error;

use super::head::{get_head, output_size, Head, AUX_CHANNEL_HEAD};

/// Single-layer LSTM over the concatenated basin inputs, dropout on the
/// full output sequence, then the configured head.
#[derive(Module, Debug)]
pub struct LstmModel<B: Backend> {
    hidden_size: usize,
    output_size: usize,
    lstm: Lstm<B>,
    dropout: Dropout,
    head: Head<B>,
}

/// Width of the feature axis fed to the recurrent cell: every configured
/// input group, the one-hot basin indicator when enabled, and one extra
/// unit when the head consumes an auxiliary channel.
pub fn input_size(cfg: &RunConfig) -> usize {
    let mut n_in = cfg.dynamic_inputs.len()
        + cfg.static_inputs.len()
        + cfg.hydroatlas_attributes.len()
        + cfg.camels_attributes.len();

    if cfg.use_basin_id_encoding {
        n_in += cfg.number_of_basins;
    }

    if cfg.head.eq_ignore_ascii_case(AUX_CHANNEL_HEAD) {
        n_in += 1;
    }

    n_in
}

impl<B: Backend> LstmModel<B> {
    pub fn new(cfg: &RunConfig) -> Result<Self, Error> {
        let n_in = input_size(cfg);
        let n_out = output_size(cfg);

        Ok(LstmModel {
            hidden_size: cfg.hidden_size,
            output_size: n_out,
            lstm: LstmConfig::new(n_in, cfg.hidden_size, true).init(),
            dropout: DropoutConfig::new(cfg.output_dropout).init(),
            head: get_head(cfg, cfg.hidden_size, n_out)?,
        })
    }

    /// Width of the feature axis of `y_hat`.
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Sub-components eligible for partial parameter updates when
    /// fine-tuning a pretrained run.
    pub fn modules_to_update(&self) -> Vec<&'static str> {
        vec!["lstm", "head"]
    }

    /// Input widths are not validated here; a configuration that
    /// disagrees with the provided tensors surfaces as a shape error in
    /// the tensor library.
    pub fn forward(&self, input: ModelInput<B>) -> ModelOutput<B> {
        let x = input.concat_features();
        let [batch, seq_len, _] = x.dims();

        let (cell_state, hidden_state) = self.lstm.forward(x, None);

        let h_n = hidden_state
            .clone()
            .slice([0..batch, seq_len - 1..seq_len, 0..self.hidden_size]);
        let c_n = cell_state.slice([0..batch, seq_len - 1..seq_len, 0..self.hidden_size]);

        let out = self.dropout.forward(hidden_state);
        let head_out = self.head.forward(out);

        ModelOutput {
            y_hat: head_out.y_hat,
            h_n,
            c_n,
            mu: head_out.mu,
            sigma: head_out.sigma,
            pi: head_out.pi,
        }
    }
}
