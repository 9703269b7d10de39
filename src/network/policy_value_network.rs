use tch::Tensor;

use crate::error::ShapeError;

/// Shared contract for networks that map a board-state tensor to per-move
/// logits and a scalar position value.
pub trait PolicyValueNetwork {
    fn forward_t(&self, x: &Tensor, train: bool) -> Result<(Tensor, Tensor), ShapeError>;
}
