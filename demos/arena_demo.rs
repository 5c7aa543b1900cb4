// Demonstration: run the capture arena and evaluate a baseline policy.
//
// Build/run from this repo root:
//   cargo run --example arena_demo -- --policy courier --episodes 20

use std::env;

use capture_arena::{
    Arena, ArenaConfig, CourierPolicy, EvaluationMetrics, Policy, RandomPolicy, Team,
};

fn main() {
    let args: Vec<String> = env::args().collect();
    let policy_name = arg_value(&args, "--policy").unwrap_or("courier");
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let config = ArenaConfig::default();
    if let Err(err) = config.validate() {
        eprintln!("Invalid configuration: {}", err);
        std::process::exit(2);
    }

    let mut arena = Arena::new(config, seed);
    arena.set_roster(&[(2, Team::Red), (2, Team::Blue)]);

    let mut policy: Box<dyn Policy> = match policy_name {
        "random" => Box::new(RandomPolicy::new()),
        "courier" => Box::new(CourierPolicy::new(arena.roster())),
        other => {
            eprintln!(
                "Unknown --policy '{}'; expected 'courier' or 'random'.",
                other
            );
            std::process::exit(2);
        }
    };

    let metrics = EvaluationMetrics::evaluate(&mut arena, policy.as_mut(), episodes);
    println!("Policy: {}", policy.name());
    println!("{}", metrics);
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
