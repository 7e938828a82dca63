use std::io::Write;

use anyhow::{Context, Result};
use geodrill::{place_labels, AlbersUsa, Config, GeometryIndex};

use super::boundary_fetcher;

pub async fn run(_cli: &crate::cli::Cli, args: &crate::cli::LabelsArgs) -> Result<()> {
    let config = Config::from_env()?;
    let mut geometry = GeometryIndex::new(boundary_fetcher(&config, &args.sources)?);

    let regions = geometry.load_national_boundaries().await
        .context("[cli] Failed to load state boundaries")?;
    let labels = place_labels(&regions, &AlbersUsa::standard()?);

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &labels)?;
    writeln!(stdout)?;
    Ok(())
}
