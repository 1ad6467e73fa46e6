use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use barath_render::{Config, CopyNotice, CopyTracker, WriterClipboard};
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "barath-render")]
#[command(about = "Render BarathAI chat messages to HTML, JSON or plain text")]
struct Cli {
    /// Input message file, `-` or omitted for stdin
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the code of block N to the output instead of rendering
    #[arg(long, value_name = "N")]
    copy_block: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Json,
    Text,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> barath_render::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::try_load(path)?,
        None => Config::compiled_default(),
    };
    let markdown = read_input(cli.input.as_ref())?;
    let mut out = open_output(cli.output.as_ref())?;

    if let Some(index) = cli.copy_block {
        let blocks = barath_render::parse_with_options(&markdown, &config.parse);
        let mut tracker = CopyTracker::from_config(&config.copy);
        let mut clipboard = WriterClipboard::new(out);
        match tracker.copy_block(&mut clipboard, &blocks, index, Instant::now()) {
            CopyNotice::Copied { block } => log::info!("copied block {}", block),
            CopyNotice::Failed { reason, .. } => {
                eprintln!("Copy failed: {}", reason);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let rendered = match cli.format {
        Format::Html => barath_render::markdown_to_html_with_config(&markdown, &config),
        Format::Json => barath_render::markdown_to_json(&markdown, &config)?,
        Format::Text => barath_render::markdown_to_text(&markdown, &config),
    };
    out.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn read_input(input: Option<&PathBuf>) -> io::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path),
        _ => {
            let mut markdown = String::new();
            io::stdin().read_to_string(&mut markdown)?;
            Ok(markdown)
        }
    }
}

fn open_output(output: Option<&PathBuf>) -> io::Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(io::stdout().lock()),
    })
}
