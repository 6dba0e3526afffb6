//! Sift CLI
//!
//! Shows how a document is tokenized, parsed and sanitized.
//!
//! Set `RUST_LOG=sift_html=debug` to see recovery decisions (stray close
//! tags, force-closed tags) as they happen.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use sift_html::{ParseOptions, SafeHtmlOptions, dump_tree, parse, safe_html, tokenize};
use tracing_subscriber::EnvFilter;

/// Sift: inspect a lenient, position-preserving parse of HTML-like markup
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree of a file
    sift ./index.html

    # Print the token stream of an inline snippet
    sift --tokens --html '<div a=1>x</div>'

    # Dump the tree as JSON, with attribute maps
    sift --json --attribute-map ./index.html

    # Keep only allow-listed tags and attributes
    sift --sanitize --html '<a href="javascript:x">hi</a>'
"#)]
struct Cli {
    /// Path to a markup file
    #[arg(value_name = "FILE", required_unless_present = "html")]
    path: Option<String>,

    /// Parse this string instead of reading a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the tree as JSON
    #[arg(long, conflicts_with = "sanitize")]
    json: bool,

    /// Build the name-to-attribute map on every tag
    #[arg(long)]
    attribute_map: bool,

    /// Print the sanitized markup instead of the tree
    #[arg(long)]
    sanitize: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let source = load_source(cli)?;

    if cli.tokens {
        print_header("Tokens");
        for token in tokenize(&source) {
            println!("{token}");
        }
        println!();
    }

    if cli.sanitize {
        print_header("Sanitized");
        println!("{}", safe_html(&source, &SafeHtmlOptions::default())?);
        return Ok(());
    }

    let options = if cli.attribute_map {
        ParseOptions::default().with_attribute_map()
    } else {
        ParseOptions::default()
    };
    let nodes = parse(&source, options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
    } else {
        print_header("Tree");
        print!("{}", dump_tree(&nodes));
    }
    Ok(())
}

/// Read the markup from `--html` or the file argument
fn load_source(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("reading {path}"))
    } else {
        anyhow::bail!("a file path or --html is required")
    }
}

fn print_header(title: &str) {
    println!("{}", format!("=== {title} ===").cyan().bold());
}
