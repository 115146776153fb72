use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use sozelio::Provider;
use sozelio::core::config::{self, CliOverrides, SozelioConfig};
use sozelio::core::profile::Branch;
use std::fs::File;

#[derive(Parser)]
#[command(name = "sozelio", about = "Gamified exam prep for verbal subjects")]
struct Args {
    /// Content-generation provider (overrides config and SOZELIO_PROVIDER)
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Branch of the learner profile before onboarding
    #[arg(short, long, value_enum)]
    branch: Option<Branch>,

    /// Start as a premium learner (no ads before downloads)
    #[arg(long)]
    premium: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to sozelio.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("sozelio.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Config load failed, using defaults: {}", e);
            SozelioConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            provider: args.provider,
            branch: args.branch,
            premium: args.premium,
        },
    );

    log::info!(
        "Sözelio starting up: provider {:?}, model {}, course {:?}, branch {:?}",
        resolved.provider,
        resolved.model_name,
        resolved.course,
        resolved.branch
    );

    sozelio::tui::run(resolved)
}
