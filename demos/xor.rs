use deepnet::Network;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> deepnet::Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut network = Network::new(2, &[2], 1, &mut rng)?;
    network.set_learning_rate(0.5);

    let inputs = [[1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]];
    let expected = [[1.0], [0.0], [1.0], [0.0]];

    let epochs = 10000;
    for epoch in 0..epochs {
        let mut loss = 0.0;
        for (input, target) in inputs.iter().zip(&expected) {
            loss += network.train(input, target)?.sum();
        }
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {:.6}", loss / inputs.len() as f64);
        }
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.feed(input)?[0]);
    }
    Ok(())
}
