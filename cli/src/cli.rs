use std::path::PathBuf;

/// Drill-down map CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "geodrill", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render the national map, or one state's county map, to SVG
    Render(RenderArgs),

    /// Print national label placements as JSON
    Labels(LabelsArgs),

    /// List the counties of one state
    Counties(CountiesArgs),
}

/// Boundary file overrides shared by every command.
#[derive(clap::Args, Debug, Default)]
pub struct SourceArgs {
    /// State boundaries (GeoJSON or TopoJSON), defaults to GEODRILL_STATES_URL
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub states: Option<PathBuf>,

    /// County boundaries (GeoJSON or TopoJSON), defaults to GEODRILL_COUNTIES_URL
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub counties: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Drill into this state, e.g. "New York"
    #[arg(long)]
    pub state: Option<String>,

    #[command(flatten)]
    pub sources: SourceArgs,

    /// Summary records as a JSON file instead of the telemetry API
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub summary: Option<PathBuf>,

    /// Output SVG file, defaults to "./map.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = 960.0)]
    pub width: f64,

    #[arg(long, default_value_t = 500.0)]
    pub height: f64,
}

#[derive(clap::Args, Debug)]
pub struct LabelsArgs {
    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(clap::Args, Debug)]
pub struct CountiesArgs {
    /// State display name, e.g. "Texas"
    pub state: String,

    #[command(flatten)]
    pub sources: SourceArgs,
}
