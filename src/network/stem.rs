use tch::{nn, Tensor};

use crate::error::ShapeError;
use crate::network::conv_block::ConvBlock;

/// Initial stage projecting the raw input planes to the tower's working
/// width. Spatial dimensions pass through unchanged.
#[derive(Debug)]
pub struct StemBlock {
    block: ConvBlock,
}

impl StemBlock {
    pub fn new(vs: &nn::Path, input_channels: i64, num_filters: i64) -> Self {
        StemBlock {
            block: ConvBlock::new(vs, input_channels, num_filters, 3, 1),
        }
    }

    pub fn forward_t(&self, x: &Tensor, train: bool) -> Result<Tensor, ShapeError> {
        self.block.forward_t(x, train)
    }
}
