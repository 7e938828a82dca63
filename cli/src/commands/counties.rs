use std::io::Write;

use anyhow::{Context, Result};
use geodrill::{Config, GeometryIndex};

use super::boundary_fetcher;

pub async fn run(_cli: &crate::cli::Cli, args: &crate::cli::CountiesArgs) -> Result<()> {
    let config = Config::from_env()?;
    let mut geometry = GeometryIndex::new(boundary_fetcher(&config, &args.sources)?);

    let counties = geometry.load_county_boundaries(&args.state).await
        .with_context(|| format!("[cli] Failed to load counties for {:?}", args.state))?;

    let mut stdout = std::io::stdout().lock();
    for county in counties.iter() {
        writeln!(stdout, "{}\t{}", county.id, county.name)?;
    }
    Ok(())
}
