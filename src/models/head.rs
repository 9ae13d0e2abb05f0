use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::{activation, backend::Backend, Tensor};

use crate::config::RunConfig;
use crate::errors::Error;

/// Reserved head name that consumes one auxiliary input channel on the
/// model side. Matched case-insensitively.
pub const AUX_CHANNEL_HEAD: &str = "umal";

/// Output record of a head. Every head fills `y_hat` for all timesteps;
/// the distribution parameters are set by the distributional heads only.
#[derive(Clone, Debug)]
pub struct HeadOutput<B: Backend> {
    pub y_hat: Tensor<B, 3>,         // [N, T, D_out]
    pub mu: Option<Tensor<B, 3>>,    // [N, T, D_out / parts]
    pub sigma: Option<Tensor<B, 3>>, // [N, T, D_out / parts]
    pub pi: Option<Tensor<B, 3>>,    // [N, T, D_out / parts]
}

/// Final projection from hidden states to predictions. `parts` is the
/// number of distribution parameter groups the projection splits into:
/// 2 is location and scale, 3 adds mixture weights, anything else keeps
/// the raw projection as `y_hat`.
#[derive(Module, Debug)]
pub struct Head<B: Backend> {
    projection: Linear<B>,
    parts: usize,
}

impl<B: Backend> Head<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> HeadOutput<B> {
        let out = self.projection.forward(x);

        match self.parts {
            3 => {
                let mut chunks = out.chunk(3, 2);
                let mu = chunks.remove(0);
                let sigma = chunks.remove(0).exp();
                let pi = activation::softmax(chunks.remove(0), 2);

                HeadOutput {
                    y_hat: mu.clone(),
                    mu: Some(mu),
                    sigma: Some(sigma),
                    pi: Some(pi),
                }
            }
            2 => {
                let mut chunks = out.chunk(2, 2);
                let mu = chunks.remove(0);
                let sigma = chunks.remove(0).exp();

                HeadOutput {
                    y_hat: mu.clone(),
                    mu: Some(mu),
                    sigma: Some(sigma),
                    pi: None,
                }
            }
            _ => HeadOutput {
                y_hat: out,
                mu: None,
                sigma: None,
                pi: None,
            },
        }
    }
}

/// Builds the configured head. `n_in` is the width of the incoming
/// hidden representation, `n_out` the model's output size.
pub fn get_head<B: Backend>(cfg: &RunConfig, n_in: usize, n_out: usize) -> Result<Head<B>, Error> {
    let parts = match cfg.head.to_lowercase().as_str() {
        "regression" => 1,
        "gmm" => 3,
        "umal" => 2,
        _ => {
            return Err(Error::NoHeadForKey {
                key: cfg.head.clone(),
            })
        }
    };

    Ok(Head {
        projection: LinearConfig::new(n_in, n_out).init(),
        parts,
    })
}

/// Output width of the model: plain targets for regression, distribution
/// parameters per target for the distributional heads.
pub fn output_size(cfg: &RunConfig) -> usize {
    let n_targets = cfg.target_variables.len();

    match cfg.head.to_lowercase().as_str() {
        "gmm" => 3 * cfg.n_distributions * n_targets,
        "umal" => 2 * n_targets,
        _ => n_targets,
    }
}
