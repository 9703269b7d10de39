use tch::{nn, Tensor};

use crate::error::ShapeError;
use crate::network::conv_block::ConvBlock;

/// Collapses the tower output to a single scalar per position, bounded to
/// [-1, 1] by the terminal tanh.
///
/// The first dense layer's input width is `board_size²`, fixed at
/// construction; inputs at any other spatial resolution are rejected before
/// reaching it.
#[derive(Debug)]
pub struct ValueHead {
    block: ConvBlock,
    fc1: nn::Linear,
    fc2: nn::Linear,
}

impl ValueHead {
    pub fn new(vs: &nn::Path, num_filters: i64, hidden: i64, board_size: i64) -> Self {
        ValueHead {
            block: ConvBlock::new(&(vs / "block"), num_filters, 1, 1, 0),
            fc1: nn::linear(vs / "fc1", board_size * board_size, hidden, Default::default()),
            fc2: nn::linear(vs / "fc2", hidden, 1, Default::default()),
        }
    }

    /// Scalar estimates of shape `[batch, 1]`.
    pub fn forward_t(&self, x: &Tensor, train: bool) -> Result<Tensor, ShapeError> {
        Ok(self
            .block
            .forward_t(x, train)?
            .flatten(1, -1)
            .apply(&self.fc1)
            .relu()
            .apply(&self.fc2)
            .tanh())
    }
}
