use alphazero_net::{PolicyValueNet, PolicyValueNetwork, DEVICE};
use log::info;
use tch::{Kind, Tensor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    tch::manual_seed(123);

    if tch::Cuda::is_available() {
        info!("CUDA is available, running on GPU");
    } else {
        info!("CUDA not available, running on CPU");
    }

    let net = PolicyValueNet::alphazero(*DEVICE)?;
    let config = *net.config();
    info!(
        "constructed net: {} input planes, {} residual blocks",
        config.input_channels, config.tower_depth
    );

    let input = Tensor::randn(
        [1, config.input_channels, config.board_size, config.board_size],
        (Kind::Float, *DEVICE),
    );
    let (policy, value) = tch::no_grad(|| net.forward_t(&input, false))?;

    println!("policy logits: {:?}", policy.size());
    println!("value: {:.4}", value.double_value(&[0, 0]));

    Ok(())
}
