use clap::{Parser, Subcommand};
use ramadan_card::app::App;
use ramadan_card::config;
use ramadan_card::export::{DirectorySink, ResvgRasterizer};
use ramadan_card::output::{self, WrittenFiles};
use ramadan_card::page;
use ramadan_card::random::{RandomSource, SystemRandom};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Shared flags for commands that render a card.
#[derive(clap::Args, Clone)]
struct RenderArgs {
    /// Write only the page snapshot, skip the PNG export
    #[arg(long)]
    no_download: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "ramadan-card")]
#[command(about = "Personalized Ramadan greeting cards")]
#[command(long_about = "\
Personalized Ramadan greeting cards

Enter a name, pick a design, and get a card with a randomly chosen greeting.
Each run writes a snapshot of the card page and a 3x PNG of the card:

  out/
  ├── index.html                        # Page snapshot (card, share link, toasts)
  ├── card.json                         # App state at the same instant
  └── Skaka-Ramadan-Card-<name>.png     # The downloadable card

Cards are shareable: the printed link carries the name and design, and
'ramadan-card open <link>' renders the same card again.

Run 'ramadan-card gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "out", global = true)]
    output: PathBuf,

    /// Seed the random message and particle choices
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Debug logging to stderr (otherwise RUST_LOG, default warn)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a card for a name
    Generate {
        /// Recipient name (at least 2 characters)
        #[arg(long)]
        name: String,
        /// Design id, see `templates`
        #[arg(long)]
        template: Option<String>,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render the card carried by a shared link
    Open {
        /// Link with `name` (and optionally `template`) query parameters
        url: String,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// List the available designs
    Templates,
    /// List the greeting messages
    Messages,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate {
            name,
            template,
            render,
        } => {
            let config = config::load_config(&cli.config)?;
            let mut app = App::new(&config, config.site.url()?, random_source(cli.seed));
            app.mount();
            app.set_name(name);
            if let Some(id) = template.as_deref() {
                if !app.select_template(id) {
                    return Err(
                        format!("unknown template '{id}' (see `ramadan-card templates`)").into(),
                    );
                }
            }
            app.generate().map_err(|reason| reason.to_string())?;
            app.advance(config.timing.transition_delay());
            render_card(&mut app, &cli.output, &render)?;
        }
        Command::Open { url, render } => {
            let config = config::load_config(&cli.config)?;
            let mut app = App::new(&config, Url::parse(&url)?, random_source(cli.seed));
            app.mount();
            app.advance(config.timing.transition_delay());
            if app.card().is_none() {
                return Err("link does not carry a usable name".into());
            }
            render_card(&mut app, &cli.output, &render)?;
        }
        Command::Templates => output::print_templates(),
        Command::Messages => output::print_messages(),
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ramadan_card=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SystemRandom::seeded(seed)),
        None => Box::new(SystemRandom::new()),
    }
}

/// Export the card (unless disabled), write the page snapshot and print the
/// summary. Fails after printing if the export failed.
fn render_card(app: &mut App, out: &Path, render: &RenderArgs) -> Result<(), Box<dyn Error>> {
    let card = if render.no_download {
        None
    } else {
        let rasterizer = ResvgRasterizer::new();
        let mut sink = DirectorySink::new(out);
        app.download(&rasterizer, &mut sink)
    };

    std::fs::create_dir_all(out)?;
    let page_path = out.join("index.html");
    std::fs::write(&page_path, page::render_page_html(app))?;
    let state_path = out.join("card.json");
    std::fs::write(&state_path, serde_json::to_string_pretty(&app.snapshot())?)?;

    output::print_card_output(
        app,
        WrittenFiles {
            page: Some(&page_path),
            state: Some(&state_path),
            card: card.as_deref(),
        },
    );

    if !render.no_download && card.is_none() {
        return Err("card export failed (run with --verbose for details)".into());
    }
    Ok(())
}
