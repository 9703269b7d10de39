use crate::error::ConfigError;

/// Input plane count of the original AlphaZero network.
pub const ALPHAZERO_INPUT_CHANNELS: i64 = 73;
/// Residual block count of the original AlphaZero network.
pub const ALPHAZERO_TOWER_DEPTH: i64 = 19;

pub const DEFAULT_NUM_FILTERS: i64 = 256;
pub const DEFAULT_POLICY_CHANNELS: i64 = 73;
pub const DEFAULT_VALUE_HIDDEN: i64 = 256;
pub const DEFAULT_BOARD_SIZE: i64 = 8;

/// Topology parameters for a [`PolicyValueNet`](crate::PolicyValueNet).
///
/// Fields are `i64` to match tch's integer width. The topology is fixed once
/// a network is built from it; only the learned parameters change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Number of planes in the input tensor.
    pub input_channels: i64,
    /// Exact number of residual blocks between the stem and the heads.
    pub tower_depth: i64,
    /// Channel width of the stem and every residual block.
    pub num_filters: i64,
    /// Move-encoding channels produced by the policy head.
    pub policy_channels: i64,
    /// Width of the value head's hidden dense layer.
    pub value_hidden: i64,
    /// Board height and width. The value head flattens to `board_size²`
    /// features, so inputs must match this resolution exactly.
    pub board_size: i64,
}

impl NetworkConfig {
    /// Config with the given input planes and tower depth, everything else
    /// at the reference defaults.
    pub fn new(input_channels: i64, tower_depth: i64) -> Self {
        NetworkConfig {
            input_channels,
            tower_depth,
            num_filters: DEFAULT_NUM_FILTERS,
            policy_channels: DEFAULT_POLICY_CHANNELS,
            value_hidden: DEFAULT_VALUE_HIDDEN,
            board_size: DEFAULT_BOARD_SIZE,
        }
    }

    /// The original AlphaZero topology: 73 input planes, 19 residual blocks.
    pub fn alphazero() -> Self {
        Self::new(ALPHAZERO_INPUT_CHANNELS, ALPHAZERO_TOWER_DEPTH)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_channels <= 0 {
            return Err(ConfigError::InputChannels(self.input_channels));
        }
        if self.tower_depth < 0 {
            return Err(ConfigError::TowerDepth(self.tower_depth));
        }
        if self.num_filters <= 0 {
            return Err(ConfigError::NumFilters(self.num_filters));
        }
        if self.policy_channels <= 0 {
            return Err(ConfigError::PolicyChannels(self.policy_channels));
        }
        if self.value_hidden <= 0 {
            return Err(ConfigError::ValueHidden(self.value_hidden));
        }
        if self.board_size <= 0 {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::alphazero()
    }
}
