use breakbell_core::{IntervalSource, RandomIntervals, SeededIntervals};
use clap::Args;

#[derive(Args)]
pub struct IntervalArgs {
    /// How many intervals to draw
    #[arg(long, default_value = "1")]
    count: usize,
    /// Seed for a reproducible sequence
    #[arg(long)]
    seed: Option<u64>,
    /// Print a JSON array instead of one value per line
    #[arg(long)]
    json: bool,
}

pub fn run(args: IntervalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut source: Box<dyn IntervalSource> = match args.seed {
        Some(seed) => Box::new(SeededIntervals::new(seed)),
        None => Box::new(RandomIntervals),
    };
    let values: Vec<u64> = (0..args.count).map(|_| source.draw_interval()).collect();

    if args.json {
        println!("{}", serde_json::to_string(&values)?);
    } else {
        for value in values {
            println!("{value}");
        }
    }
    Ok(())
}
