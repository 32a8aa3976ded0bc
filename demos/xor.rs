use backprop_net::{train_epoch, Network, NetworkConfig};
use log::info;

fn main() -> Result<(), backprop_net::NetError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut network = Network::new_random(NetworkConfig::new(2, vec![3, 1]).with_rate(0.5))?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let epochs = 10000;

    for epoch in 0..epochs {
        let loss = train_epoch(&mut network, &inputs, &expected_outputs, true)?;
        if epoch % 1000 == 0 {
            info!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    for input in &inputs {
        info!("Input: {:?} -> Output: {:.4}", input, network.predict(input)?[0]);
    }
    Ok(())
}
