#![forbid(unsafe_code)]

//! xmlnorm CLI: normalize XML documents, show compiled stages, compare files.

use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xmlnorm::{Baseline, Configuration, ElementNode, Error, XmlNormalizer};

#[derive(Parser)]
#[command(
    name = "xmlnorm",
    about = "xmlnorm: canonical XML for stable diffs and golden-file tests",
    version
)]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ProfileArgs {
    /// Drop elements with this name, with their content (repeatable)
    #[arg(short = 'i', long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,

    /// Reorder CHILD elements beneath PARENT (repeatable)
    #[arg(
        short = 's',
        long = "sort",
        value_name = "PARENT=CHILD[,CHILD...]",
        value_parser = parse_sort_spec
    )]
    sort: Vec<ElementNode>,

    /// Indentation width of the output
    #[arg(long, default_value_t = 2)]
    indent: usize,
}

impl ProfileArgs {
    fn configuration(&self) -> Configuration {
        Configuration::new(
            self.ignore.iter().map(ElementNode::new).collect(),
            self.sort.clone(),
        )
    }

    fn normalizer(&self) -> Result<XmlNormalizer, Error> {
        XmlNormalizer::with_baseline(&self.configuration(), &Baseline::with_indent(self.indent))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize an XML document
    Normalize {
        /// Input XML file
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Print the compiled stage sequence for a profile
    Stages {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Normalize two documents and report whether they are identical
    Check {
        left: PathBuf,
        right: PathBuf,

        #[command(flatten)]
        profile: ProfileArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Normalize {
            file,
            output,
            profile,
        } => cmd_normalize(file, output, profile),
        Commands::Stages { profile } => cmd_stages(profile),
        Commands::Check {
            left,
            right,
            profile,
        } => cmd_check(left, right, profile),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "xmlnorm=debug" } else { "xmlnorm=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn cmd_normalize(file: PathBuf, output: Option<PathBuf>, profile: ProfileArgs) -> Result<(), Error> {
    let normalizer = profile.normalizer()?;
    tracing::info!(file = %file.display(), "normalizing");
    match output {
        Some(target) => normalizer.normalize_file(&file, &target),
        None => {
            let xml = read_file(&file)?;
            let canonical = normalizer.normalize_str(&xml)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(canonical.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn cmd_stages(profile: ProfileArgs) -> Result<(), Error> {
    let normalizer = profile.normalizer()?;
    for (i, stage) in normalizer.stages().iter().enumerate() {
        println!("{:>2}. {stage}", i + 1);
    }
    Ok(())
}

fn cmd_check(left: PathBuf, right: PathBuf, profile: ProfileArgs) -> Result<(), Error> {
    let normalizer = profile.normalizer()?;
    let a = normalizer.normalize_str(&read_file(&left)?)?;
    let b = normalizer.normalize_str(&read_file(&right)?)?;

    match first_difference(&a, &b) {
        None => {
            println!("OK");
            Ok(())
        }
        Some((line, l, r)) => {
            eprintln!("DIFFERENT at line {line}:");
            eprintln!("- {}: {l}", left.display());
            eprintln!("+ {}: {r}", right.display());
            process::exit(1);
        }
    }
}

// ── Utility functions ────────────────────────────────────────────────

fn read_file(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|e| Error::File {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse `PARENT=CHILD[,CHILD...]`.
fn parse_sort_spec(spec: &str) -> Result<ElementNode, String> {
    let (parent, children) = spec
        .split_once('=')
        .ok_or_else(|| format!("invalid sort spec: {spec} (expected PARENT=CHILD[,CHILD...])"))?;
    let children: Vec<&str> = children
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if parent.trim().is_empty() || children.is_empty() {
        return Err(format!("invalid sort spec: {spec} (expected PARENT=CHILD[,CHILD...])"));
    }
    Ok(ElementNode::with_children(parent.trim(), children))
}

/// 1-based line number and the two differing lines, if any.
fn first_difference<'a>(a: &'a str, b: &'a str) -> Option<(usize, &'a str, &'a str)> {
    let mut left = a.lines();
    let mut right = b.lines();
    let mut line = 1;
    loop {
        match (left.next(), right.next()) {
            (None, None) => return None,
            (l, r) if l == r => line += 1,
            (l, r) => return Some((line, l.unwrap_or("<end of file>"), r.unwrap_or("<end of file>"))),
        }
    }
}
