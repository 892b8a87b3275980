//! Learns the ten digits drawn on a 3x5 grid, then reads back what each
//! output "looks like" by running the network in reverse.

use deepnet::train::{evaluate, train_loop, TrainConfig};
use deepnet::{NetworkSpec, Sample};
use rand::rngs::StdRng;
use rand::SeedableRng;

const DIGITS: [&str; 10] = [
    "###\
     #.#\
     #.#\
     #.#\
     ###",
    ".#.\
     ##.\
     .#.\
     .#.\
     ###",
    "###\
     ..#\
     ###\
     #..\
     ###",
    "###\
     ..#\
     .##\
     ..#\
     ###",
    "#.#\
     #.#\
     ###\
     ..#\
     ..#",
    "###\
     #..\
     ###\
     ..#\
     ###",
    "###\
     #..\
     ###\
     #.#\
     ###",
    "###\
     ..#\
     .#.\
     .#.\
     .#.",
    "###\
     #.#\
     ###\
     #.#\
     ###",
    "###\
     #.#\
     ###\
     ..#\
     ###",
];

fn samples() -> Vec<Sample> {
    DIGITS
        .iter()
        .enumerate()
        .map(|(label, art)| {
            let pixels = art.chars().map(|c| if c == '#' { 1.0 } else { 0.0 }).collect();
            Sample::new(label, pixels)
        })
        .collect()
}

fn main() -> deepnet::Result<()> {
    let mut spec = NetworkSpec::new("small_digits", 15, &[14, 14], 10);
    spec.learning_rate = 0.1;

    let mut rng = StdRng::seed_from_u64(42);
    let mut network = spec.build(&mut rng)?;
    let samples = samples();

    let mut config = TrainConfig::new(10_000);
    config.report_every = 2_000;
    let report = train_loop(&mut network, &samples, &config, &mut rng)?;
    println!("Trained {} steps, mean error {:.4}", report.iterations, report.mean_error);

    let evaluation = evaluate(&network, &samples)?;
    println!("Recognised {}/{} digits", evaluation.correct, evaluation.total);

    for sample in &samples {
        let output = network.feed(&sample.pixels)?;
        println!(
            "{} -> {}",
            sample.label,
            output.iter().map(|v| format!("{:.2}", v)).collect::<Vec<_>>().join(" ")
        );
    }

    let three = Sample::new(3, Vec::new()).target(10)?;
    let dream = network.inverse(&three)?;
    println!("Inverse of 3:");
    for row in dream.chunks(3) {
        let line: String = row.iter().map(|&v| if v > 0.5 { '#' } else { '.' }).collect();
        println!("{line}");
    }
    Ok(())
}
