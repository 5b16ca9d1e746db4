//! Terminal dashboard — fetches every record once, applies the selected
//! filters, and prints the filter controls, three bar charts, and the
//! matching records.
//!
//! Usage: `cargo run --bin dashboard -- --filter region=Asia --filter topic=oil`

use clap::Parser;
use insight_dashboard::client::{DashboardClient, DashboardSession};
use insight_dashboard::config::{ClientConfig, DEFAULT_API_URL};
use insight_dashboard::models::filter::FilterSelection;
use insight_dashboard::render;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dashboard", about = "Filter and chart the dataset served by the API")]
struct Args {
    /// Backend base URL.
    #[arg(long, env = "DASHBOARD_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Width of the longest bar, in cells.
    #[arg(long, default_value_t = 40)]
    bar_width: usize,

    /// Filter selection as FIELD=VALUE, repeatable. FIELD is one of end_year,
    /// topic, sector, region, pest, source, swot, country, city. A value of
    /// "All" or an empty value leaves the field unconstrained.
    #[arg(long = "filter", value_name = "FIELD=VALUE")]
    filters: Vec<FilterSelection>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "insight_dashboard=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = DashboardClient::new(ClientConfig::new(args.api_url.clone()));

    let mut session = DashboardSession::new();
    for selection in &args.filters {
        session.select(selection.field, selection.value.as_str());
    }

    session.load(&client).await;

    print!("{}", render::render_dashboard(&session, args.bar_width));
    Ok(())
}
