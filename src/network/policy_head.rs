use tch::{nn, Tensor};

use crate::error::ShapeError;
use crate::network::conv_block::ConvBlock;

/// Produces one unnormalized logit per encoded move per board square.
///
/// One full stage at tower width, then a bare 1x1 projection to the
/// move-encoding channel count. Nothing follows the projection; the output
/// is raw logits for the caller to mask and normalize.
#[derive(Debug)]
pub struct PolicyHead {
    block: ConvBlock,
    proj: nn::Conv2D,
}

impl PolicyHead {
    pub fn new(vs: &nn::Path, num_filters: i64, policy_channels: i64) -> Self {
        PolicyHead {
            block: ConvBlock::new(&(vs / "block"), num_filters, num_filters, 3, 1),
            proj: nn::conv2d(vs / "proj", num_filters, policy_channels, 1, Default::default()),
        }
    }

    /// Logits of shape `[batch, policy_channels, height, width]`.
    pub fn forward_t(&self, x: &Tensor, train: bool) -> Result<Tensor, ShapeError> {
        Ok(self.block.forward_t(x, train)?.apply(&self.proj))
    }
}

#[cfg(test)]
mod tests {
    use tch::{nn, Device, Kind, Tensor};

    use super::*;

    #[test]
    fn test_policy_head_projects_to_move_channels() {
        let vs = nn::VarStore::new(Device::Cpu);
        let head = PolicyHead::new(&vs.root(), 32, 73);

        let x = Tensor::randn([2, 32, 8, 8], (Kind::Float, Device::Cpu));
        let logits = head.forward_t(&x, false).unwrap();
        assert_eq!(logits.size(), [2, 73, 8, 8]);
    }

    #[test]
    fn test_policy_head_emits_raw_logits() {
        // No terminal activation: negative logits must survive.
        let vs = nn::VarStore::new(Device::Cpu);
        let head = PolicyHead::new(&vs.root(), 16, 73);

        let x = Tensor::randn([8, 16, 8, 8], (Kind::Float, Device::Cpu));
        let logits = head.forward_t(&x, false).unwrap();
        assert!(logits.min().double_value(&[]) < 0.);
    }
}
