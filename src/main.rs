//! deepnet command-line front end.
//!
//! Trains, tests and queries networks stored in the deepnet binary format.
//! Logging goes through `tracing`; set `RUST_LOG=debug` for more detail.
//!
//! Run with:
//!   cargo run --release -- train --spec net.json --data train.csv --out net.dat
//!   cargo run --release -- test --network net.dat --data test.csv
//!   cargo run --release -- predict --network net.dat --image digit.png
//!   cargo run --release -- inverse --network net.dat --label 3
//!   cargo run --release -- info --network net.dat

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deepnet::data::csv::{load_bitstring_csv, load_labelled_csv};
use deepnet::data::image::load_image_input;
use deepnet::data::malform::AugmentConfig;
use deepnet::network::largest_index;
use deepnet::train::{evaluate_augmented, train_loop, Evaluation, TrainConfig};
use deepnet::{ActivationFunction, Network, NetworkSpec, Sample};

#[derive(Parser)]
#[command(name = "deepnet")]
#[command(about = "Train and run feed-forward networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum DataFormat {
    /// `label,p0,p1,...` with pixels in 0..=255
    Labelled,
    /// `input_bits,output_bits`
    Bits,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a network on a CSV dataset and save it
    Train {
        /// Network description (JSON)
        #[arg(long)]
        spec: PathBuf,
        /// Training data
        #[arg(long)]
        data: PathBuf,
        #[arg(long, value_enum, default_value_t = DataFormat::Labelled)]
        format: DataFormat,
        /// Where to write the trained network
        #[arg(long)]
        out: PathBuf,
        /// Continue training the network already at --out
        #[arg(long)]
        resume: bool,
        #[arg(long, default_value_t = 100_000)]
        iterations: usize,
        /// Keep going past --iterations while the mean error is above this
        #[arg(long)]
        target_error: Option<f64>,
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Randomly translate each image before training on it
        #[arg(long)]
        shift: bool,
        /// Add pixel noise of this magnitude (0.1 when given without a value)
        #[arg(long, num_args = 0..=1, default_missing_value = "0.1")]
        noise: Option<f64>,
        /// Side length of square image inputs
        #[arg(long, default_value_t = 28)]
        side: usize,
        #[arg(long)]
        checkpoint_every: Option<usize>,
        #[arg(long, default_value_t = 1000)]
        report_every: usize,
        /// Seed for sampling and augmentation (and initialization, unless the --spec file pins a seed)
        #[arg(long)]
        seed: Option<u64>,
        /// Write a JSON training report here
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Measure per-class accuracy on a CSV dataset
    Test {
        #[arg(long)]
        network: PathBuf,
        #[arg(long)]
        data: PathBuf,
        #[arg(long, value_enum, default_value_t = DataFormat::Labelled)]
        format: DataFormat,
        /// Evaluate on randomly translated images, as in training
        #[arg(long)]
        shift: bool,
        #[arg(long, default_value_t = 28)]
        side: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Classify an image file
    Predict {
        #[arg(long)]
        network: PathBuf,
        #[arg(long)]
        image: PathBuf,
        #[arg(long, default_value_t = 28)]
        side: u32,
        /// Treat dark strokes on a light background as the foreground
        #[arg(long)]
        invert: bool,
    },
    /// Run the network backwards from a one-hot output and draw the result
    Inverse {
        #[arg(long)]
        network: PathBuf,
        #[arg(long)]
        label: usize,
        #[arg(long, default_value_t = 28)]
        side: usize,
    },
    /// Print a saved network's layout
    Info {
        #[arg(long)]
        network: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            spec,
            data,
            format,
            out,
            resume,
            iterations,
            target_error,
            max_iterations,
            shift,
            noise,
            side,
            checkpoint_every,
            report_every,
            seed,
            report,
        } => {
            let spec = load_spec(&spec)?;
            let mut rng = make_rng(seed);

            let mut network = if resume {
                let mut network = read_network(&out)?;
                network.set_activation(ActivationFunction::by_name(&spec.activation)?);
                network.set_learning_rate(spec.learning_rate);
                network
            } else {
                match spec.seed {
                    Some(s) => spec.build(&mut StdRng::seed_from_u64(s))?,
                    None => spec.build(&mut rng)?,
                }
            };

            let samples = load_samples(&data, format, network.input_size())?;

            let mut config = TrainConfig::new(iterations);
            config.target_error = target_error;
            config.max_iterations = max_iterations;
            config.augment = AugmentConfig { shift, noise };
            config.image_side = side;
            config.report_every = report_every;
            config.checkpoint_every = checkpoint_every;
            config.checkpoint_path = checkpoint_every.map(|_| out.clone());

            let summary = train_loop(&mut network, &samples, &config, &mut rng)?;

            network
                .write_to_file(&out)
                .with_context(|| format!("writing network to {}", out.display()))?;
            info!(path = %out.display(), "saved network");

            if let Some(path) = report {
                std::fs::write(&path, serde_json::to_string_pretty(&summary)?)
                    .with_context(|| format!("writing report to {}", path.display()))?;
            }

            println!(
                "Trained {} samples: mean error {:.4}, last error {:.4}, {} ms",
                summary.iterations, summary.mean_error, summary.last_error, summary.elapsed_ms
            );
        }

        Commands::Test {
            network,
            data,
            format,
            shift,
            side,
            seed,
        } => {
            let network = read_network(&network)?;
            let samples = load_samples(&data, format, network.input_size())?;
            let augment = AugmentConfig { shift, noise: None };

            let evaluation = evaluate_augmented(&network, &samples, &augment, side, &mut make_rng(seed))?;
            print_evaluation(&evaluation);
        }

        Commands::Predict {
            network,
            image,
            side,
            invert,
        } => {
            let network = read_network(&network)?;
            let input = load_image_input(&image, side, invert)
                .with_context(|| format!("reading image {}", image.display()))?;
            if input.len() != network.input_size() {
                bail!(
                    "image gives {} inputs, network expects {} (try --side)",
                    input.len(),
                    network.input_size()
                );
            }

            let output = network.feed(&input)?;
            for (label, value) in output.iter().enumerate() {
                println!("{:>3}: {:>6.2}%", label, value * 100.0);
            }
            println!("Prediction: {}", largest_index(&output));
        }

        Commands::Inverse { network, label, side } => {
            let network = read_network(&network)?;
            let target = Sample::new(label, Vec::new()).target(network.output_size())?;
            let input = network.inverse(&target)?;
            if side * side != input.len() {
                bail!("network input of {} values is not a {}x{} image", input.len(), side, side);
            }
            print!("{}", render(&input, side));
        }

        Commands::Info { network } => {
            let bytes = std::fs::read(&network).with_context(|| format!("reading {}", network.display()))?;
            let loaded = Network::from_bytes(&bytes)?;

            let mut hasher = DefaultHasher::new();
            bytes.hash(&mut hasher);

            println!("Input size: {}", loaded.input_size());
            println!("Output size: {}", loaded.output_size());
            println!("Hidden layers: {}", loaded.hidden_sizes().len());
            println!("Hidden layer sizes: {:?}", loaded.hidden_sizes());
            println!("Bytes: {}", bytes.len());
            println!("Hash: {:016x}", hasher.finish());
        }
    }

    Ok(())
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn load_spec(path: &Path) -> Result<NetworkSpec> {
    let path_str = path.to_str().context("spec path is not valid UTF-8")?;
    NetworkSpec::load_json(path_str).with_context(|| format!("loading spec {}", path.display()))
}

fn read_network(path: &Path) -> Result<Network> {
    Network::read_from_file(path).with_context(|| format!("loading network {}", path.display()))
}

fn load_samples(path: &Path, format: DataFormat, input_size: usize) -> Result<Vec<Sample>> {
    let samples = match format {
        DataFormat::Labelled => load_labelled_csv(path, input_size),
        DataFormat::Bits => load_bitstring_csv(path),
    }
    .with_context(|| format!("loading samples from {}", path.display()))?;

    if let Some(bad) = samples.iter().find(|s| s.pixels.len() != input_size) {
        bail!(
            "sample with label {} has {} inputs, network expects {}",
            bad.label,
            bad.pixels.len(),
            input_size
        );
    }
    Ok(samples)
}

fn print_evaluation(evaluation: &Evaluation) {
    for (label, stats) in evaluation.classes.iter().enumerate() {
        match evaluation.class_accuracy(label) {
            Some(acc) => println!(
                "Accuracy for {}: {:.0}% ({}/{})",
                label,
                acc * 100.0,
                stats.correct,
                stats.count
            ),
            None => println!("Accuracy for {}: no samples", label),
        }
    }
    println!(
        "Total accuracy: {:.1}% ({}/{}), mean error {:.4}",
        evaluation.accuracy() * 100.0,
        evaluation.correct,
        evaluation.total,
        evaluation.mean_error
    );
}

/// ASCII shading of a `side x side` image with values in `[0, 1]`.
fn render(pixels: &[f64], side: usize) -> String {
    const SHADES: &[u8] = b" .:-=+*#%@";
    let mut out = String::with_capacity(side * (side + 1));
    for row in pixels.chunks(side) {
        for &p in row {
            let idx = (p.clamp(0.0, 1.0) * (SHADES.len() - 1) as f64).round() as usize;
            out.push(SHADES[idx] as char);
        }
        out.push('\n');
    }
    out
}
