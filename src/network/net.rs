use std::error::Error;

use log::debug;
use tch::{nn, Device, Tensor};

use crate::config::NetworkConfig;
use crate::error::{ConfigError, ShapeError};
use crate::network::policy_head::PolicyHead;
use crate::network::policy_value_network::PolicyValueNetwork;
use crate::network::stem::StemBlock;
use crate::network::tower::ResidualTower;
use crate::network::value_head::ValueHead;

/// The full policy-value network: stem, residual tower, and two heads that
/// read the tower output independently.
///
/// All parameters live in the owned [`nn::VarStore`], scoped under the
/// `stem`, `tower`, `policy`, and `value` paths. The same config always
/// yields the same variable name set, so external checkpointing can rely on
/// the decomposition.
///
/// Forward is a pure function of the input and the stored parameters;
/// concurrent forward calls are safe as long as no one is mutating the
/// parameters underneath them.
#[derive(Debug)]
pub struct PolicyValueNet {
    pub vs: nn::VarStore,
    config: NetworkConfig,
    stem: StemBlock,
    tower: ResidualTower,
    policy_head: PolicyHead,
    value_head: ValueHead,
}

impl PolicyValueNet {
    /// Builds the network on `device`. Invalid topology parameters fail with
    /// [`ConfigError`] before any parameter tensor is allocated.
    pub fn new(device: Device, config: NetworkConfig) -> Result<PolicyValueNet, ConfigError> {
        config.validate()?;

        let vs = nn::VarStore::new(device);
        let root = vs.root();

        let stem = StemBlock::new(&(&root / "stem"), config.input_channels, config.num_filters);
        let tower = ResidualTower::new(&(&root / "tower"), config.tower_depth, config.num_filters);
        let policy_head = PolicyHead::new(
            &(&root / "policy"),
            config.num_filters,
            config.policy_channels,
        );
        let value_head = ValueHead::new(
            &(&root / "value"),
            config.num_filters,
            config.value_hidden,
            config.board_size,
        );

        debug!(
            "built policy-value net: {} input planes, {} residual blocks, {} filters",
            config.input_channels, config.tower_depth, config.num_filters
        );

        Ok(PolicyValueNet {
            vs,
            config,
            stem,
            tower,
            policy_head,
            value_head,
        })
    }

    /// The original AlphaZero topology: 73 input planes, 19 residual blocks.
    pub fn alphazero(device: Device) -> Result<PolicyValueNet, ConfigError> {
        Self::new(device, NetworkConfig::alphazero())
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    fn check_input(&self, x: &Tensor) -> Result<(), ShapeError> {
        let size = x.size();
        if size.len() != 4 {
            return Err(ShapeError::Rank(size));
        }
        if size[1] != self.config.input_channels {
            return Err(ShapeError::Channels {
                expected: self.config.input_channels,
                actual: size,
            });
        }
        if size[2] != self.config.board_size || size[3] != self.config.board_size {
            return Err(ShapeError::Spatial {
                expected: self.config.board_size,
                actual: size,
            });
        }
        Ok(())
    }

    /// Save the learned parameters to a safetensors file.
    pub fn save(&self, path: &str) -> Result<(), Box<dyn Error>> {
        self.vs.save(path)?;
        Ok(())
    }

    /// Load learned parameters saved by [`save`](Self::save). The topology
    /// must match the one the file was written from.
    pub fn load(&mut self, path: &str) -> Result<(), Box<dyn Error>> {
        self.vs.load(path)?;
        Ok(())
    }
}

impl PolicyValueNetwork for PolicyValueNet {
    fn forward_t(&self, x: &Tensor, train: bool) -> Result<(Tensor, Tensor), ShapeError> {
        self.check_input(x)?;

        let t = self.tower.forward_t(&self.stem.forward_t(x, train)?, train)?;

        // Both heads read the same tower output; no stage mutates its input.
        let policy = self.policy_head.forward_t(&t, train)?;
        let value = self.value_head.forward_t(&t, train)?;

        Ok((policy, value))
    }
}

#[cfg(test)]
mod tests {
    use tch::{Device, Kind, Tensor};

    use super::*;
    use crate::error::ConfigError;

    fn small_config(input_channels: i64, tower_depth: i64) -> NetworkConfig {
        NetworkConfig {
            num_filters: 32,
            value_hidden: 64,
            ..NetworkConfig::new(input_channels, tower_depth)
        }
    }

    fn random_input(batch: i64, config: &NetworkConfig) -> Tensor {
        Tensor::randn(
            [batch, config.input_channels, config.board_size, config.board_size],
            (Kind::Float, Device::Cpu),
        )
    }

    #[test]
    fn test_alphazero_topology_shapes() {
        // Reference topology at reduced filter width: 73 input planes,
        // 19 residual blocks, a batch of 128 positions on an 8x8 board.
        let config = small_config(73, 19);
        let net = PolicyValueNet::new(Device::Cpu, config).unwrap();
        assert_eq!(net.config().tower_depth, 19);

        let x = random_input(128, &config);
        let (policy, value) = tch::no_grad(|| net.forward_t(&x, false)).unwrap();

        assert_eq!(policy.size(), [128, 73, 8, 8]);
        assert_eq!(value.size(), [128, 1]);
        assert!(value.abs().max().double_value(&[]) <= 1.);
    }

    #[test]
    fn test_value_always_bounded() {
        let config = small_config(17, 2);
        let net = PolicyValueNet::new(Device::Cpu, config).unwrap();

        let x = random_input(4, &config) * 1000.;
        let (_, value) = tch::no_grad(|| net.forward_t(&x, false)).unwrap();
        assert!(value.abs().max().double_value(&[]) <= 1.);
    }

    #[test]
    fn test_zero_depth_tower() {
        let config = small_config(17, 0);
        let net = PolicyValueNet::new(Device::Cpu, config).unwrap();

        let x = random_input(2, &config);
        let (policy, value) = tch::no_grad(|| net.forward_t(&x, false)).unwrap();
        assert_eq!(policy.size(), [2, config.policy_channels, 8, 8]);
        assert_eq!(value.size(), [2, 1]);
    }

    #[test]
    fn test_forward_is_deterministic() {
        let config = small_config(17, 2);
        let net = PolicyValueNet::new(Device::Cpu, config).unwrap();

        let x = random_input(3, &config);
        let (policy1, value1) = tch::no_grad(|| net.forward_t(&x, false)).unwrap();
        let (policy2, value2) = tch::no_grad(|| net.forward_t(&x, false)).unwrap();

        assert!(Tensor::allclose(&policy1, &policy2, 0., 0., false));
        assert!(Tensor::allclose(&value1, &value2, 0., 0., false));
    }

    #[test]
    fn test_invalid_config_fails_before_construction() {
        assert_eq!(
            PolicyValueNet::new(Device::Cpu, NetworkConfig::new(0, 19)).err(),
            Some(ConfigError::InputChannels(0))
        );
        assert_eq!(
            PolicyValueNet::new(Device::Cpu, NetworkConfig::new(-3, 19)).err(),
            Some(ConfigError::InputChannels(-3))
        );
        assert_eq!(
            PolicyValueNet::new(Device::Cpu, NetworkConfig::new(73, -1)).err(),
            Some(ConfigError::TowerDepth(-1))
        );
    }

    #[test]
    fn test_forward_rejects_wrong_channels() {
        let net = PolicyValueNet::new(Device::Cpu, small_config(17, 1)).unwrap();

        let x = Tensor::randn([2, 9, 8, 8], (Kind::Float, Device::Cpu));
        assert!(matches!(
            net.forward_t(&x, false),
            Err(ShapeError::Channels { expected: 17, .. })
        ));
    }

    #[test]
    fn test_forward_rejects_wrong_board_size() {
        let net = PolicyValueNet::new(Device::Cpu, small_config(17, 1)).unwrap();

        let x = Tensor::randn([2, 17, 6, 6], (Kind::Float, Device::Cpu));
        assert!(matches!(
            net.forward_t(&x, false),
            Err(ShapeError::Spatial { expected: 8, .. })
        ));
    }

    #[test]
    fn test_parameter_names_are_deterministic() {
        let net1 = PolicyValueNet::new(Device::Cpu, small_config(17, 2)).unwrap();
        let net2 = PolicyValueNet::new(Device::Cpu, small_config(17, 2)).unwrap();

        let mut names1: Vec<String> = net1.vs.variables().keys().cloned().collect();
        let mut names2: Vec<String> = net2.vs.variables().keys().cloned().collect();
        names1.sort();
        names2.sort();

        assert!(!names1.is_empty());
        assert_eq!(names1, names2);
        assert!(names1.iter().any(|name| name.starts_with("stem.")));
        assert!(names1.iter().any(|name| name.starts_with("tower.block0.")));
        assert!(names1.iter().any(|name| name.starts_with("policy.")));
        assert!(names1.iter().any(|name| name.starts_with("value.")));
    }

    #[test]
    fn test_save_load_round_trip() {
        let config = small_config(17, 1);
        let net = PolicyValueNet::new(Device::Cpu, config).unwrap();

        let path = std::env::temp_dir().join("alphazero_net_round_trip.safetensors");
        let path = path.to_str().unwrap();
        net.save(path).unwrap();

        let mut restored = PolicyValueNet::new(Device::Cpu, config).unwrap();
        restored.load(path).unwrap();

        let variables = net.vs.variables();
        let restored_variables = restored.vs.variables();
        assert_eq!(variables.len(), restored_variables.len());
        for (name, tensor) in &variables {
            let other = restored_variables.get(name).unwrap();
            assert_eq!(tensor.size(), other.size());
            assert!(Tensor::allclose(tensor, other, 1e-6, 1e-6, false));
        }

        let x = random_input(2, &config);
        let (policy, value) = tch::no_grad(|| net.forward_t(&x, false)).unwrap();
        let (restored_policy, restored_value) =
            tch::no_grad(|| restored.forward_t(&x, false)).unwrap();
        assert!(Tensor::allclose(&policy, &restored_policy, 1e-6, 1e-6, false));
        assert!(Tensor::allclose(&value, &restored_value, 1e-6, 1e-6, false));

        let _ = std::fs::remove_file(path);
    }
}
