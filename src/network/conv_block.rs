use tch::{nn, Tensor};

use crate::error::ShapeError;

/// Convolution, batch normalization, then rectification. The atomic stage
/// every other component is built from.
///
/// Parameters register under the `conv` and `bn` sub-paths of the path the
/// block is given, so two blocks built at the same path carry the same
/// variable names.
#[derive(Debug)]
pub struct ConvBlock {
    conv: nn::Conv2D,
    bn: nn::BatchNorm,
    in_channels: i64,
}

impl ConvBlock {
    pub fn new(vs: &nn::Path, in_channels: i64, out_channels: i64, kernel: i64, padding: i64) -> Self {
        let conv = nn::conv2d(
            vs / "conv",
            in_channels,
            out_channels,
            kernel,
            nn::ConvConfig {
                padding,
                ..Default::default()
            },
        );
        let bn = nn::batch_norm2d(vs / "bn", out_channels, Default::default());

        ConvBlock {
            conv,
            bn,
            in_channels,
        }
    }

    fn check_input(&self, x: &Tensor) -> Result<(), ShapeError> {
        let size = x.size();
        if size.len() != 4 {
            return Err(ShapeError::Rank(size));
        }
        if size[1] != self.in_channels {
            return Err(ShapeError::Channels {
                expected: self.in_channels,
                actual: size,
            });
        }
        Ok(())
    }

    pub fn forward_t(&self, x: &Tensor, train: bool) -> Result<Tensor, ShapeError> {
        Ok(self.forward_linear_t(x, train)?.relu())
    }

    /// The same stage without the terminal rectification. Used as the second
    /// stage of a residual block, where the activation comes after the skip
    /// addition.
    pub fn forward_linear_t(&self, x: &Tensor, train: bool) -> Result<Tensor, ShapeError> {
        self.check_input(x)?;
        Ok(x.apply(&self.conv).apply_t(&self.bn, train))
    }
}
