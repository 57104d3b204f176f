use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use markup::{Config, Error};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "markup")]
#[command(about = "Render editor markup to HTML")]
struct Cli {
    /// Input markup file (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Output HTML file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to markup.toml in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wrap the fragment in a complete HTML page
    #[arg(long)]
    standalone: bool,

    /// Editor id used for the preview container with --standalone
    #[arg(long, default_value = "editor")]
    id: String,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(input: Option<&Path>) -> markup::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| Error::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(text)
        }
    }
}

fn write_output(output: Option<&Path>, html: &str) -> markup::Result<()> {
    match output {
        Some(path) => fs::write(path, html).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => io::stdout()
            .write_all(html.as_bytes())
            .map_err(|source| Error::Io {
                path: PathBuf::from("<stdout>"),
                source,
            }),
    }
}

fn run(cli: &Cli) -> markup::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load(Path::new("markup.toml")),
    };

    let text = read_input(cli.input.as_deref())?;
    let fragment = markup::render_with_config(&text, &config);

    let html = if cli.standalone {
        markup::standalone_page(&fragment, &cli.id, &config)
    } else {
        fragment
    };

    write_output(cli.output.as_deref(), &html)?;
    if let Some(output) = &cli.output {
        info!(path = %output.display(), "wrote preview");
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
