use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use classgraph_core::{count_source_files_with, extract_with_report, ExtractConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "classgraph",
    version,
    about = "Class diagram extraction from source trees",
    after_help = r#"Examples:
  classgraph count --root src/main/java
  classgraph extract --root src/main/java --pretty
  classgraph extract --root . --dependencies --report
"#
)]
struct Args {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the diagram and print it as JSON.
    Extract {
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
        /// Follow symbolic links while walking.
        #[arg(long)]
        follow_links: bool,
        /// Exclude files that contain syntax errors.
        #[arg(long)]
        strict: bool,
        /// Also infer dependency edges from method signatures.
        #[arg(long)]
        dependencies: bool,
        /// Print `{diagram, report}` instead of the bare diagram.
        #[arg(long)]
        report: bool,
        /// Extra ignore pattern (repeatable).
        #[arg(long = "ignore", value_name = "PATTERN")]
        ignore_patterns: Vec<String>,
    },
    /// Print the number of source files under the root.
    Count {
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Extract {
            root,
            pretty,
            follow_links,
            strict,
            dependencies,
            report,
            ignore_patterns,
        } => {
            // Flags only switch on; CLASSGRAPH_* may already have done so
            let mut config = ExtractConfig::from_env()
                .with_dependencies(dependencies)
                .with_ignore_patterns(ignore_patterns);
            if follow_links {
                config = config.with_follow_links(true);
            }
            if strict {
                config = config.with_strict_parse(true);
            }

            let extraction = extract_with_report(Some(&root), &config)
                .with_context(|| format!("extracting {}", root.display()))?;

            let json = match (report, pretty) {
                (true, true) => serde_json::to_string_pretty(&extraction)?,
                (true, false) => serde_json::to_string(&extraction)?,
                (false, true) => serde_json::to_string_pretty(&extraction.diagram)?,
                (false, false) => serde_json::to_string(&extraction.diagram)?,
            };
            println!("{}", json);
            Ok(())
        }
        Command::Count { root } => {
            let count = count_source_files_with(Some(&root), &ExtractConfig::from_env())
                .with_context(|| format!("counting files in {}", root.display()))?;
            println!("{}", count);
            Ok(())
        }
    }
}
