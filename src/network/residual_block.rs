use tch::{nn, Tensor};

use crate::error::ShapeError;
use crate::network::conv_block::ConvBlock;

/// Two 3x3 stages at equal channel width plus a skip connection. The second
/// stage carries no activation; rectification happens after the skip
/// addition. Input and output shapes are identical, which is what lets the
/// tower stack these to arbitrary depth.
#[derive(Debug)]
pub struct ResidualBlock {
    stage1: ConvBlock,
    stage2: ConvBlock,
}

impl ResidualBlock {
    pub fn new(vs: &nn::Path, channels: i64) -> Self {
        ResidualBlock {
            stage1: ConvBlock::new(&(vs / "stage1"), channels, channels, 3, 1),
            stage2: ConvBlock::new(&(vs / "stage2"), channels, channels, 3, 1),
        }
    }

    pub fn forward_t(&self, x: &Tensor, train: bool) -> Result<Tensor, ShapeError> {
        // Every stage allocates a fresh output, so the skip branch reads the
        // untransformed input without an explicit copy.
        let y = self.stage1.forward_t(x, train)?;
        let y = self.stage2.forward_linear_t(&y, train)?;
        Ok((y + x).relu())
    }
}
