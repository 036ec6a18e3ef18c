mod cli;
mod config;
mod runner;

use burn_ndarray::NdArray;
use clap::Parser;
use log::info;
use sc_core::{LogSink, Stepper, SystemClock};
use sc_model::{Field, ForecastModel, Grid, RelaxationModel};

use crate::cli::Cli;
use crate::config::RunConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    cli.apply(&mut config)?;

    let mut stepper = config.stepper.build(SystemClock::new(), LogSink)?;

    if cli.dump_plan {
        println!("{}", serde_json::to_string_pretty(stepper.plan())?);
        return Ok(());
    }

    let grid: Grid = config.grid.parse()?;
    let device = Default::default();
    let model = RelaxationModel::<NdArray>::new(
        config.model_increments()?,
        grid,
        config.climatology,
        config.tau_hours,
        &device,
    )?;
    let analysis = Field::synthetic(grid, config.analysis, &device);

    info!(
        "Running {} model on {} grid, steps {:?}",
        model.name(),
        grid,
        model.increments().as_slice()
    );

    let outputs = runner::run(&model, &analysis, &mut stepper)?;

    println!("{:>8} {:>8} {:>8} {:>10}", "lead", "reached", "dropped", "mean");
    for output in &outputs {
        println!(
            "{:>7}h {:>7}h {:>7}h {:>10.3}",
            output.lead_time,
            output.reached,
            output.residual(),
            output.mean
        );
    }

    Ok(())
}
