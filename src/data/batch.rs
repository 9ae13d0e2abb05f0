use burn::tensor::{backend::Backend, Tensor};

/// Input record of one forward pass.
#[derive(Clone, Debug)]
pub struct ModelInput<B: Backend> {
    pub x_d: Tensor<B, 3>,               // [N, T, D_dyn]
    pub x_s: Option<Tensor<B, 2>>,       // [N, D_stat]
    pub x_one_hot: Option<Tensor<B, 2>>, // [N, n_basins]
}

impl<B: Backend> ModelInput<B> {
    /// Broadcasts the static tensors across the time axis and joins them
    /// onto the feature axis. The order is fixed to [dynamic, static,
    /// one-hot] and must match the input size the model was built with.
    pub fn concat_features(self) -> Tensor<B, 3> {
        let [_, seq_len, _] = self.x_d.dims();
        let mut features = vec![self.x_d];

        if let Some(x_s) = self.x_s {
            let x_s: Tensor<B, 3> = x_s.unsqueeze_dim(1);
            features.push(x_s.repeat(1, seq_len));
        }

        if let Some(x_one_hot) = self.x_one_hot {
            let x_one_hot: Tensor<B, 3> = x_one_hot.unsqueeze_dim(1);
            features.push(x_one_hot.repeat(1, seq_len));
        }

        Tensor::cat(features, 2)
    }
}

/// Output record of one forward pass. `y_hat` covers every timestep of
/// the input sequence; the distribution parameters are only present for
/// the distributional heads.
#[derive(Clone, Debug)]
pub struct ModelOutput<B: Backend> {
    pub y_hat: Tensor<B, 3>,          // [N, T, D_out]
    pub h_n: Tensor<B, 3>,            // [N, 1, D_hidden]
    pub c_n: Tensor<B, 3>,            // [N, 1, D_hidden]
    pub mu: Option<Tensor<B, 3>>,     // [N, T, D_out / parts]
    pub sigma: Option<Tensor<B, 3>>,  // [N, T, D_out / parts]
    pub pi: Option<Tensor<B, 3>>,     // [N, T, D_out / parts]
}

#[cfg(test)]
mod tests {
    use super::*;

    type B = burn::backend::NdArray;

    #[test]
    fn concat_keeps_dynamic_static_one_hot_order() {
        let input = ModelInput {
            x_d: Tensor::<B, 3>::zeros([2, 4, 2]),
            x_s: Some(Tensor::<B, 2>::ones([2, 1])),
            x_one_hot: Some(Tensor::<B, 2>::ones([2, 3]) * 2.0),
        };

        let x = input.concat_features();
        assert_eq!(x.dims(), [2, 4, 6]);

        let dynamic = x.clone().slice([0..2, 0..4, 0..2]);
        let stat = x.clone().slice([0..2, 0..4, 2..3]);
        let one_hot = x.slice([0..2, 0..4, 3..6]);

        assert_eq!(dynamic.sum().into_scalar(), 0.0);
        assert_eq!(stat.sum().into_scalar(), 8.0);
        assert_eq!(one_hot.sum().into_scalar(), 48.0);
    }

    #[test]
    fn concat_with_dynamic_inputs_only_is_identity() {
        let input = ModelInput {
            x_d: Tensor::<B, 3>::ones([2, 4, 2]),
            x_s: None,
            x_one_hot: None,
        };

        let x = input.concat_features();
        assert_eq!(x.dims(), [2, 4, 2]);
        assert_eq!(x.sum().into_scalar(), 16.0);
    }

    #[test]
    fn concat_with_static_inputs_appends_after_dynamic() {
        let input = ModelInput {
            x_d: Tensor::<B, 3>::zeros([2, 4, 2]),
            x_s: Some(Tensor::<B, 2>::ones([2, 3])),
            x_one_hot: None,
        };

        let x = input.concat_features();
        assert_eq!(x.dims(), [2, 4, 5]);
        assert_eq!(x.clone().slice([0..2, 0..4, 0..2]).sum().into_scalar(), 0.0);
        assert_eq!(x.slice([0..2, 0..4, 2..5]).sum().into_scalar(), 24.0);
    }

    #[test]
    fn concat_with_one_hot_only_lands_after_dynamic() {
        let input = ModelInput {
            x_d: Tensor::<B, 3>::zeros([2, 4, 2]),
            x_s: None,
            x_one_hot: Some(Tensor::<B, 2>::ones([2, 3]) * 2.0),
        };

        let x = input.concat_features();
        assert_eq!(x.dims(), [2, 4, 5]);
        assert_eq!(x.slice([0..2, 0..4, 2..5]).sum().into_scalar(), 48.0);
    }
}
