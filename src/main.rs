use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rstwiki::{convert_file_with, load_tree, RenderContext, WikiRenderer};

#[derive(Parser, Debug)]
#[command(name = "rstwiki")]
#[command(version, about = "Convert docutils XML document trees to wiki markup")]
struct Cli {
    /// Input docutils XML file (or a JSON tree with a .json extension)
    #[arg(value_name = "INPUT", required_unless_present = "dir", conflicts_with = "dir")]
    input: Option<PathBuf>,

    /// Output file; the markup is written to stdout when omitted
    #[arg(short, long, value_name = "OUTPUT", conflicts_with = "dir")]
    output: Option<PathBuf>,

    /// Convert every *.xml file in this directory
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Where to put the .wiki files in directory mode (defaults to DIR)
    #[arg(long, value_name = "OUT_DIR", requires = "dir")]
    out_dir: Option<PathBuf>,

    /// Heading level used for titles outside any section
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=6))]
    base_depth: u8,

    /// Log progress at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let context = RenderContext::new().with_heading_depth(cli.base_depth as usize);

    if let Some(dir) = &cli.dir {
        let out_dir = cli.out_dir.as_deref().unwrap_or(dir);
        return convert_directory(dir, out_dir, &context);
    }

    let Some(input) = &cli.input else {
        bail!("an INPUT file or --dir is required");
    };

    match &cli.output {
        Some(output) => convert_file_with(input, output, &context)
            .with_context(|| format!("Failed to convert {}", input.display()))?,
        None => {
            let root = load_tree(input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            WikiRenderer
                .render(&root, &context, &mut handle)
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

fn convert_directory(dir: &Path, out_dir: &Path, context: &RenderContext) -> Result<()> {
    let dir_str = dir
        .to_str()
        .with_context(|| format!("Directory path is not valid UTF-8: {}", dir.display()))?;
    // The directory part is literal; only the file name is a pattern
    let pattern = Path::new(&glob::Pattern::escape(dir_str)).join("*.xml");
    let pattern = pattern.to_string_lossy();

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut converted = 0;
    for entry in glob::glob(&pattern).context("Invalid directory pattern")? {
        let input = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "skipping unreadable path");
                continue;
            }
        };

        let stem = input
            .file_stem()
            .with_context(|| format!("No file name in {}", input.display()))?;
        let output = out_dir.join(format!("{}.wiki", stem.to_string_lossy()));

        convert_file_with(&input, &output, context)
            .with_context(|| format!("Failed to convert {}", input.display()))?;
        info!(input = %input.display(), output = %output.display(), "converted");
        converted += 1;
    }

    if converted == 0 {
        warn!(dir = %dir.display(), "no .xml files found");
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
