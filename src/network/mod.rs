pub mod conv_block;
pub mod policy_head;
pub mod policy_value_network;
pub mod residual_block;
pub mod stem;
pub mod tower;
pub mod value_head;
mod net;

pub use conv_block::ConvBlock;
pub use net::PolicyValueNet;
pub use policy_head::PolicyHead;
pub use policy_value_network::PolicyValueNetwork;
pub use residual_block::ResidualBlock;
pub use stem::StemBlock;
pub use tower::ResidualTower;
