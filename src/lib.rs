//! Policy-value network for AlphaZero-style game agents.
//!
//! The network maps a stack of board-state planes to a per-move logit map
//! and a scalar position value in [-1, 1]: a convolutional stem, a tower of
//! residual blocks, and two heads that read the tower output independently.
//! Training, search, and move encoding live outside this crate; it only
//! defines the topology and the forward pass.

use lazy_static::lazy_static;
use tch::Device;

pub mod config;
pub mod error;
pub mod network;

pub use config::NetworkConfig;
pub use error::{ConfigError, ShapeError};
pub use network::{PolicyValueNet, PolicyValueNetwork};

lazy_static! {
    /// Default compute device, CUDA when available.
    pub static ref DEVICE: Device = Device::cuda_if_available();
}
