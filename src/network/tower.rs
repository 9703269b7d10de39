use tch::{nn, Tensor};

use crate::error::ShapeError;
use crate::network::residual_block::ResidualBlock;

/// Ordered stack of residual blocks at a fixed channel width. Shape
/// preserving end to end; a depth of zero is an identity pass-through.
///
/// `depth` is the exact block count. Blocks register under
/// `block0..block{depth-1}` of the tower's path.
#[derive(Debug)]
pub struct ResidualTower {
    blocks: Vec<ResidualBlock>,
}

impl ResidualTower {
    pub fn new(vs: &nn::Path, depth: i64, channels: i64) -> Self {
        Self::with_factory(vs, depth, |path| ResidualBlock::new(path, channels))
    }

    /// Builds the tower from a caller-supplied block constructor so block
    /// variants can be substituted without touching the tower itself.
    pub fn with_factory<F>(vs: &nn::Path, depth: i64, make_block: F) -> Self
    where
        F: Fn(&nn::Path) -> ResidualBlock,
    {
        let mut blocks = Vec::with_capacity(depth.max(0) as usize);
        for i in 0..depth {
            blocks.push(make_block(&(vs / format!("block{i}"))));
        }
        ResidualTower { blocks }
    }

    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    pub fn forward_t(&self, x: &Tensor, train: bool) -> Result<Tensor, ShapeError> {
        let mut x = x.shallow_clone();
        for block in &self.blocks {
            x = block.forward_t(&x, train)?;
        }
        Ok(x)
    }
}
