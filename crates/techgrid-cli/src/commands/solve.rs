use crate::cli::SolveArgs;
use crate::config::{self, SolverFileConfig};
use crate::error::{CliError, Result};
use crate::render;
use crate::utils::progress::CliProgressHandler;
use techgrid::{
    core::io::{self, layout::LayoutFile},
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::info;

pub fn run(args: SolveArgs) -> Result<()> {
    info!("Loading layout from {:?}", &args.input);
    let layout =
        LayoutFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;
    let (grid, mut catalog) = layout.into_problem()?;

    if let Some(path) = &args.catalog {
        info!("Appending modules from catalog {:?}", path);
        for module in io::catalog::load_modules(path)? {
            catalog
                .insert(module)
                .map_err(io::IoError::from)?;
        }
    }

    let file_config = match &args.config {
        Some(path) => SolverFileConfig::from_file(path)?,
        None => SolverFileConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let params = file_config.merge_with_cli(&args)?;
    let policy = config::resolve_policy(args.policy.as_deref(), file_config.policy.as_ref())?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting layout optimization...");
    info!("Invoking the core solve workflow...");
    let result = workflows::solve::run(&grid, &catalog, &params, &policy, &reporter)?;

    println!("{}", render::render_grid(&result.grid, &catalog));
    println!("Score: {:.3} ({})", result.score, result.outcome);
    println!(
        "Iterations: {}, temperature steps: {}, reheats: {}, elapsed: {:.1}s",
        result.stats.iterations,
        result.stats.temperature_steps,
        result.stats.reheats,
        result.stats.elapsed.as_secs_f64()
    );

    if let Some(output) = &args.output {
        LayoutFile::from_solution(&result.grid, &catalog).write_to_path(output)?;
        println!("✓ Solved layout written to: {}", output.display());
    }

    Ok(())
}
