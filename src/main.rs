use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use rangealloc::allocator::{Allocator, ResourceAllocator};
use rangealloc::config::{Config, Pool};
use rangealloc::config_loader;
use rangealloc::range::{Range, RangeId};
use serde::Serialize;
use std::path::PathBuf;

/// Allocate identifiers (ports, IP addresses) from a configured pool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the pool configuration YAML file
    #[arg(short, long)]
    config: PathBuf,

    /// Number of identifiers to allocate
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Identifier to assign explicitly before allocating (repeatable)
    #[arg(short, long)]
    assign: Vec<String>,

    /// Identifier to release before allocating (repeatable)
    #[arg(short, long)]
    release: Vec<String>,

    /// Print each lease as a JSON line including its payload
    #[arg(long)]
    json: bool,
}

/// One allocated identifier with its range-specific payload
#[derive(Serialize)]
struct Lease<'a, V> {
    id: &'a RangeId,
    value: &'a V,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Configuration file: {:?}", args.config);
    let config = config_loader::load_config(&args.config)?;

    match config.pool.build()? {
        Pool::Port(range) => run(Allocator::new(range), &config, &args),
        Pool::Ip(range) => run(Allocator::new(range), &config, &args),
    }
}

fn run<R>(mut allocator: Allocator<R>, config: &Config, args: &Args) -> Result<()>
where
    R: Range,
    R::Value: Serialize,
{
    for id in config.reserved.iter().chain(&args.assign) {
        allocator
            .assign(id)
            .wrap_err_with(|| format!("Failed to assign '{}'", id))?;
    }
    for id in &args.release {
        allocator.release(id)?;
    }
    info!("{} identifier(s) held before allocation", allocator.len());

    for n in 0..args.count {
        let (id, value) = allocator
            .allocate()
            .wrap_err_with(|| format!("Allocation {} of {} failed", n + 1, args.count))?;

        if args.json {
            let line = serde_json::to_string(&Lease { id: &id, value: &value })
                .wrap_err("Failed to serialize lease")?;
            println!("{}", line);
        } else {
            println!("{}", id);
        }
    }

    info!("Allocation completed: {} identifier(s) held", allocator.len());
    Ok(())
}
