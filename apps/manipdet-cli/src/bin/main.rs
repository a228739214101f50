use std::env;
use std::path::PathBuf;

use tracing::info;

use manipdet_core::config::{Config, RunConfig};
use manipdet_core::logging;
use manipdet_core::report;
use manipdet_core::types::RunMode;
use manipdet_device::select_device;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <finetune|eval> [--model M] [--train-data D] [--gpu N] [--log-dir DIR]", prog);
        std::process::exit(1);
    }
    let mode = args.remove(0);
    (mode, args)
}

fn apply_overrides(run: &mut RunConfig, args: &[String]) -> anyhow::Result<()> {
    let mut it = args.iter();
    while let Some(flag) = it.next() {
        let value = it
            .next()
            .ok_or_else(|| anyhow::anyhow!("missing value for {}", flag))?;
        match flag.as_str() {
            "--model" => run.model = value.clone(),
            "--train-data" => run.train_data = Some(value.clone()),
            "--gpu" => run.gpu = value.parse()?,
            "--log-dir" => run.log_dir = PathBuf::from(value),
            "--batch-size" => run.batch_size = value.parse()?,
            "--learning-rate" => run.learning_rate = value.parse()?,
            "--seed" => run.seed = value.parse()?,
            other => anyhow::bail!("unknown flag: {}", other),
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (mode_arg, args) = parse_args();
    let mode = RunMode::parse(&mode_arg);

    let mut run = RunConfig::from_config(&config);
    apply_overrides(&mut run, &args)?;
    run.validate(&mode)?;

    let guard = logging::init_global(&run, &mode)?;
    info!("logging to {}", guard.path().display());

    report::report(&run);

    let selected = select_device(&run)?;
    match selected.index() {
        Some(index) => info!("run will execute on accelerator {}", index),
        None => info!("run will execute on the cpu"),
    }

    Ok(())
}
