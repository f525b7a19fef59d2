use clap::Parser;
use festin_core::config::Config;
use festin_data::Source;

#[derive(Parser)]
#[command(name = "festin", about = "festin — tableau de bord des festivals de France")]
struct Cli {
    /// Write debug logs to /tmp/festin-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Load the dataset from this URL or local CSV file instead of the
    /// configured data.gouv.fr export.
    #[arg(long)]
    source: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/festin-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("festin debug log started — tail -f /tmp/festin-debug.log");
    }

    let config = Config::load()?;

    let source = match cli.source {
        Some(s) => Source::parse(&s),
        None => Source::Remote(config.dataset.url.clone()),
    };

    eprintln!("festin: chargement du jeu de données ({source})…");
    let dataset = festin_data::load_dataset(&source)?;

    festin_tui::run(dataset, config)
}
