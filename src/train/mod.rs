pub mod evaluate;
pub mod loop_fn;
pub mod progress;
pub mod train_config;

pub use evaluate::{evaluate, evaluate_augmented, ClassStats, Evaluation};
pub use loop_fn::train_loop;
pub use progress::{TrainProgress, TrainReport};
pub use train_config::TrainConfig;
