//! Prints the step-by-step trace for a descent run.
//!
//! ```sh
//! cargo run -p steepest-observers --example trace
//! cargo run -p steepest-observers --example trace -- "x**2 + 3*y**2" x,y 1,1 max
//! ```
//!
//! Arguments are the objective, comma-separated variable names, the
//! comma-separated initial point, and an optional `max` to run ascent.
//! Pass `--log` to print `tracing` events instead of the trace.

use std::{env, error::Error, process};

use steepest_core::SymbolicModel;
use steepest_observers::{LogObserver, TraceObserver};
use steepest_solvers::{Goal, classify::classify, descent};

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let log = args.iter().any(|arg| arg == "--log");
    args.retain(|arg| arg != "--log");
    if log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let objective = args
        .first()
        .map_or("2*x*y + 4*x - 2*x**2 - y**2", String::as_str);
    let variables: Vec<&str> = args
        .get(1)
        .map_or("x,y", String::as_str)
        .split(',')
        .map(str::trim)
        .collect();
    let initial = args
        .get(2)
        .map_or("0.5,0.5", String::as_str)
        .split(',')
        .map(|value| value.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()?;
    let goal = match args.get(3).map(String::as_str) {
        Some("max") => Goal::Maximize,
        _ => Goal::Minimize,
    };

    let model = SymbolicModel::parse(objective, &variables)?;
    let config = descent::Config::default();

    let mut trace = TraceObserver::new(&model, goal, &config);
    let solution = if log {
        descent::optimize(&model, goal, &initial, &config, LogObserver)?
    } else {
        descent::optimize(&model, goal, &initial, &config, &mut trace)?
    };
    let analysis = classify(&model, &solution.point).ok();

    if log {
        println!("{:?} after {} iterations", solution.status, solution.iters());
        println!("point: {:?}", solution.point);
    } else {
        print!("{}", trace.finish(&solution, analysis.as_ref()));
    }
    Ok(())
}
