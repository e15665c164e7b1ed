use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use neurotick::error::SimulationError;
use neurotick::network::Network;

#[derive(Parser, Debug)]
struct Args {
    /// The number of ticks to simulate
    #[arg(short = 't', long, default_value = "20")]
    num_ticks: u64,
    /// The distance between consecutive cells, in mm
    #[arg(long, default_value = "1.0")]
    distance: f64,
    /// The conduction velocity, in mm per tick
    #[arg(long, default_value = "0.5")]
    velocity: f64,
    /// The logging level
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<(), SimulationError> {
    let args = Args::parse();

    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(args.log_level))
        .map_err(|e| SimulationError::IOError(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| SimulationError::IOError(e.to_string()))?;

    log::info!("{:?}", args);

    // Build a three-cell chain and stimulate the middle cell
    let mut network = Network::chain(["A", "B", "C"], args.distance, args.velocity)?;
    network.stimulate(1)?;

    for tick in 0..args.num_ticks {
        println!("\nTick {}", tick);
        network.tick();
        for cell in network.cells_iter() {
            println!(
                "[{}] phase={}, potential={:.2}",
                cell.name(),
                cell.phase(),
                cell.potential()
            );
        }
    }

    Ok(())
}
