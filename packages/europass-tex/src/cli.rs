//! Command-line interface for the converter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::RenderOptions;
use crate::container::load_xml;
use crate::converter::{convert_file, parse_tree};
use crate::cv::extract_cv;
use crate::error::Result;

/// Europass to LaTeX - Convert Europass CV documents to LaTeX.
#[derive(Parser)]
#[command(name = "europass-tex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a CV (.xml, or .pdf with the XML attached) to LaTeX.
    Convert {
        /// Input file
        input: PathBuf,

        /// Output .tex file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extra LaTeX file to \input before the end of the document (repeatable)
        #[arg(short, long = "include")]
        includes: Vec<String>,

        /// Do not emit a table of contents
        #[arg(long)]
        no_toc: bool,

        /// Section title color as six hex digits (default: 0e4194)
        #[arg(long)]
        accent_color: Option<String>,
    },

    /// Print the document tree (or the extracted CV) as YAML.
    Inspect {
        /// Input file
        input: PathBuf,

        /// Show the extracted CV sections instead of the raw tree
        #[arg(long)]
        cv: bool,
    },

    /// Print the text of the first field found under KEY.
    Field {
        /// Input file
        input: PathBuf,

        /// Field name, e.g. Surname
        key: String,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            includes,
            no_toc,
            accent_color,
        } => {
            let options = render_options(includes, no_toc, accent_color.as_deref())?;
            convert_command(&input, output.as_deref(), &options)
        }
        Commands::Inspect { input, cv } => inspect_command(&input, cv),
        Commands::Field { input, key } => field_command(&input, &key),
    }
}

/// Build render options from the convert flags.
fn render_options(
    includes: Vec<String>,
    no_toc: bool,
    accent_color: Option<&str>,
) -> Result<RenderOptions> {
    let mut options = RenderOptions {
        include_files: includes,
        table_of_contents: !no_toc,
        ..RenderOptions::default()
    };
    if let Some(color) = accent_color {
        options = options.with_accent_color(color)?;
    }
    Ok(options)
}

/// Execute the convert command.
fn convert_command(input: &Path, output: Option<&Path>, options: &RenderOptions) -> Result<()> {
    let latex = convert_file(input, options)?;

    let Some(output) = output else {
        print!("{latex}");
        return Ok(());
    };

    std::fs::write(output, &latex)?;
    tracing::debug!(path = %output.display(), bytes = latex.len(), "Wrote LaTeX");

    println!(
        "{} {} -> {}",
        style("Converted").green().bold(),
        style(input.display()).cyan(),
        output.display()
    );
    Ok(())
}

/// Execute the inspect command.
fn inspect_command(input: &Path, cv: bool) -> Result<()> {
    let tree = parse_tree(&load_xml(input)?)?;

    let yaml = if cv {
        serde_yaml_ng::to_string(&extract_cv(&tree)?)?
    } else {
        serde_yaml_ng::to_string(&tree)?
    };
    print!("{yaml}");
    Ok(())
}

/// Execute the field command.
fn field_command(input: &Path, key: &str) -> Result<()> {
    let tree = parse_tree(&load_xml(input)?)?;
    println!("{}", tree.text(key)?);
    Ok(())
}
