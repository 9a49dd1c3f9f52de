use subsearch::config::{PosteriorUpdate, SearchConfig};
use subsearch::env_config::{exit_config_error, init_rayon_threads, search_config_or_exit};
use subsearch::logging::init_logging;
use subsearch::simulation::{
    compare_strategies, simulate_batch, simulate_batch_sequential, BatchSummary, SimulationResult,
};
use subsearch::strategy::StrategyKind;

struct Args {
    cfg: SearchConfig,
    strategy: Option<StrategyKind>,
    sequential: bool,
    json: bool,
    log_level: String,
}

const USAGE: &str = "Usage: subsearch-simulate [--trials N] [--prob P] [--seed S] [--strategy naive|bayes|both] [--update double|exact] [--max-sweeps N] [--sequential] [--json] [--log LEVEL]";

fn parse_value<T: std::str::FromStr>(flag: &str, raw: Option<&String>) -> T {
    let Some(raw) = raw else {
        eprintln!("Missing value for {}", flag);
        std::process::exit(1);
    };
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {} value: {}", flag, raw);
        std::process::exit(1);
    })
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut cfg = search_config_or_exit();
    let mut strategy: Option<StrategyKind> = None;
    let mut sequential = false;
    let mut json = false;
    let mut log_level = "warn".to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--trials" => {
                i += 1;
                cfg.num_trials = parse_value("--trials", args.get(i));
            }
            "--prob" => {
                i += 1;
                cfg.detection_prob = parse_value("--prob", args.get(i));
            }
            "--seed" => {
                i += 1;
                cfg.seed = parse_value("--seed", args.get(i));
            }
            "--max-sweeps" => {
                i += 1;
                cfg.max_sweeps = parse_value("--max-sweeps", args.get(i));
            }
            "--update" => {
                i += 1;
                cfg.posterior_update = parse_value::<PosteriorUpdate>("--update", args.get(i));
            }
            "--strategy" => {
                i += 1;
                let raw: String = parse_value("--strategy", args.get(i));
                strategy = if raw == "both" {
                    None
                } else {
                    Some(raw.parse().unwrap_or_else(|e| exit_config_error(&e)))
                };
            }
            "--log" => {
                i += 1;
                log_level = parse_value("--log", args.get(i));
            }
            "--sequential" => {
                sequential = true;
            }
            "--json" => {
                json = true;
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                println!();
                println!("Options:");
                println!("  --trials N         Number of trials (default: 10000)");
                println!("  --prob P           Detection probability on the target cell, in (0, 1] (default: 0.46)");
                println!("  --seed S           RNG seed (default: derived from the clock)");
                println!("  --strategy NAME    naive, bayes or both (default: both)");
                println!("  --update MODE      Bayesian posterior update: double or exact (default: double)");
                println!("  --max-sweeps N     Sweeps per trial before giving up (default: 10000)");
                println!("  --sequential       One random stream, trials in order (default: parallel)");
                println!("  --json             Print the summary as JSON");
                println!("  --log LEVEL        Log level unless RUST_LOG is set (default: warn)");
                println!();
                println!("Environment: SUBSEARCH_TRIALS, SUBSEARCH_DETECTION_PROB, SUBSEARCH_SEED,");
                println!("             SUBSEARCH_MAX_SWEEPS, SUBSEARCH_POSTERIOR_UPDATE, RAYON_NUM_THREADS");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{}", USAGE);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if let Err(e) = cfg.validate() {
        exit_config_error(&e);
    }

    Args {
        cfg,
        strategy,
        sequential,
        json,
        log_level,
    }
}

fn print_result(r: &SimulationResult) {
    println!("{} search:", r.strategy);
    println!("  Total searches: {}", r.total_searches);
    println!("  Mean:   {:.2}", r.mean);
    println!("  Std:    {:.2}", r.std_dev);
    println!("  Min:    {}", r.min);
    println!("  Max:    {}", r.max);
    println!("  Median: {}", r.median);
    println!("  Sweeps per trial:      {:.3}", r.mean_sweeps);
    println!("  Target tests per trial: {:.3}", r.mean_target_visits);
    println!(
        "  Time:   {:.2}s ({:.0} trials/s)",
        r.elapsed.as_secs_f64(),
        r.num_trials() as f64 / r.elapsed.as_secs_f64().max(1e-9)
    );
}

fn main() {
    let args = parse_args();
    init_logging(&args.log_level);
    if !args.sequential {
        init_rayon_threads();
    }

    let cfg = &args.cfg;
    if !args.json {
        println!(
            "Simulating {} trials (p={}, seed={}, update={}, {})",
            cfg.num_trials,
            cfg.detection_prob,
            cfg.seed,
            cfg.posterior_update,
            if args.sequential { "sequential" } else { "parallel" }
        );
    }

    match args.strategy {
        Some(kind) => {
            let run = if args.sequential {
                simulate_batch_sequential(cfg, kind)
            } else {
                simulate_batch(cfg, kind)
            };
            let result = run.unwrap_or_else(|e| {
                eprintln!("Simulation failed: {}", e);
                std::process::exit(1);
            });
            if args.json {
                let summary = BatchSummary::from(&result);
                match serde_json::to_string_pretty(&summary) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Failed to serialize summary: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print_result(&result);
            }
        }
        None => {
            let cmp = compare_strategies(cfg, args.sequential).unwrap_or_else(|e| {
                eprintln!("Simulation failed: {}", e);
                std::process::exit(1);
            });
            if args.json {
                match serde_json::to_string_pretty(&cmp) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Failed to serialize comparison: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                for s in [&cmp.naive, &cmp.bayes] {
                    println!(
                        "{:>8}: total {:>10}  mean {:>8.2}  median {:>5}  p90 {:>5}  sweeps {:.3}",
                        s.strategy.name(),
                        s.total_searches,
                        s.mean,
                        s.median,
                        s.percentiles.p90,
                        s.mean_sweeps
                    );
                }
                println!("Bayesian/naive mean cost: {:.3}", cmp.mean_ratio);
            }
        }
    }
}
