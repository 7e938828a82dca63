use anyhow::{bail, Context, Result};
use geodrill::{AlbersUsa, Config, DetailOutcome, GeometryIndex, HttpTelemetry, Session, StaticTelemetry};
use tracing::info;

use super::{boundary_fetcher, Telemetry};

pub async fn run(_cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    if args.width <= 0.0 || args.height <= 0.0 {
        bail!("[cli] Canvas size must be positive, got {}x{}", args.width, args.height);
    }

    let config = Config::from_env()?;
    let geometry = GeometryIndex::new(boundary_fetcher(&config, &args.sources)?);

    let telemetry = match &args.summary {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("[cli] Failed to read summary file {}", path.display()))?;
            Telemetry::File(StaticTelemetry::from_json(&bytes)?)
        }
        None => Telemetry::Http(HttpTelemetry::from_config(&config)?),
    };

    // Scale the default 960x500 canvas fit to the requested size.
    let scale = AlbersUsa::DEFAULT_SCALE * (args.width / 960.0).min(args.height / 500.0);
    let projection = AlbersUsa::new(scale, (args.width / 2.0, args.height / 2.0))?;
    let mut session = Session::new(geometry, telemetry, projection);
    let output = args.output.clone().unwrap_or("map.svg".into());

    match &args.state {
        None => {
            let view = session.national_view().await
                .context("[cli] Failed to load state boundaries")?;
            view.to_svg(&output, session.projection(), args.width, args.height)?;
        }
        Some(name) => {
            let ticket = session.select_state_by_name(name)?;
            if let DetailOutcome::Applied = session.load_detail(ticket).await {
                info!(state = %ticket.state, "state detail loaded");
            }

            let Some(view) = session.county_view().await
                .context("[cli] Failed to load county boundaries")? else {
                bail!("[cli] No state selected");
            };
            view.to_svg(&output, session.projection(), args.width, args.height)?;
        }
    }

    info!(path = %output.display(), "wrote map");
    Ok(())
}
