use crate::cli::ScoreArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::render;
use techgrid::core::io::layout::LayoutFile;
use techgrid::core::scoring::score_grid;
use tracing::info;

pub fn run(args: ScoreArgs) -> Result<()> {
    info!("Loading layout from {:?}", &args.input);
    let layout =
        LayoutFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;
    let (grid, catalog) = layout.into_problem()?;
    let policy = config::resolve_policy(args.policy.as_deref(), None)?;

    let score = score_grid(&grid, &catalog, &policy);
    println!("{}", render::render_grid(&grid, &catalog));
    println!("Score: {:.3}", score);

    Ok(())
}
