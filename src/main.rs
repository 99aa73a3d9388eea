//! Dispatch simulator entry point: CLI wiring and config-driven runs.

mod cli;

use std::io;
use std::process;

use dispatch_sim::config::PlantConfig;
use dispatch_sim::io::export::export_csv;
use dispatch_sim::runner::{PlantRun, run_plant};
use tracing_subscriber::EnvFilter;

use cli::CliOptions;

fn load_config(opts: &CliOptions) -> PlantConfig {
    let loaded = match (&opts.scenario, &opts.preset) {
        (Some(path), _) => PlantConfig::from_toml_file(path),
        (None, Some(name)) => PlantConfig::from_preset(name),
        (None, None) => Ok(PlantConfig::baseline()),
    };
    match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn print_run(run: &PlantRun, quiet: bool) {
    println!(
        "Thresholds: price={:.3} demand={:.3} capacity={:.3} MWh",
        run.thresholds.price, run.thresholds.demand, run.storage_capacity
    );
    if !quiet {
        for record in &run.outcome.records {
            println!("{record}");
        }
        for warning in &run.outcome.warnings {
            println!("warning: {warning}");
        }
    }
    println!();
    for source in &run.production_by_source {
        println!("Production {:<8} {:.3} MWh", format!("{}:", source.name), source.energy);
    }
    println!("{}", run.summary);
}

#[cfg(feature = "api")]
fn serve_run(run: PlantRun, port: u16) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use dispatch_sim::api::{AppState, serve};

    let state = Arc::new(AppState { run });
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            process::exit(1);
        }
    };
    if let Err(e) = runtime.block_on(serve(state, addr)) {
        eprintln!("error: API server failed: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "api"))]
fn serve_run(_run: PlantRun, _port: u16) {
    eprintln!("error: --serve requires building with the `api` feature");
    process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let opts = match cli::parse_args() {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("error: {msg}");
            cli::print_usage();
            process::exit(2);
        }
    };

    let mut cfg = load_config(&opts);
    if let Some(seed) = opts.seed_override {
        cfg.simulation.seed = seed;
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("error: {e}");
        }
        process::exit(1);
    }

    let run = match run_plant(&cfg) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    print_run(&run, opts.quiet);

    if let Some(path) = &opts.decisions_out {
        if let Err(e) = export_csv(&run.outcome.records, path) {
            eprintln!("error: failed to write decisions CSV: {e}");
            process::exit(1);
        }
        println!("Decisions written to {}", path.display());
    }

    if opts.serve {
        serve_run(run, opts.port);
    }
}
