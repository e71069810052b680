//! docpeek CLI - document preview tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docpeek::{
    FileKind, PreviewArtifact, PreviewOptions, PreviewRequest, Previewer, SlideOptions,
};

#[derive(Parser)]
#[command(name = "docpeek")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Preview PDF, DOCX and PPTX submissions as PDF, HTML or PNG", long_about = None)]
struct Cli {
    /// TrueType font used for slide text
    #[arg(long, global = true, env = "DOCPEEK_FONT", value_name = "TTF")]
    font: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the preview artifact for a document
    Preview {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Declared file type (defaults to the file extension)
        #[arg(short = 't', long = "type", value_name = "EXT")]
        file_type: Option<String>,

        /// 1-based page or slide number
        #[arg(short, long, allow_negative_numbers = true)]
        page: Option<i64>,

        /// Output file (preview.<ext> if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document size and page/slide count
    Info {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Declared file type (defaults to the file extension)
        #[arg(short = 't', long = "type", value_name = "EXT")]
        file_type: Option<String>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview many documents in parallel
    Batch {
        /// Input documents
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let previewer = build_previewer(cli.font.as_deref());

    let result = match cli.command {
        Some(Commands::Preview {
            input,
            file_type,
            page,
            output,
        }) => cmd_preview(
            &previewer,
            &input,
            file_type.as_deref(),
            page,
            output.as_deref(),
        ),
        Some(Commands::Info {
            input,
            file_type,
            json,
        }) => cmd_info(&previewer, &input, file_type.as_deref(), json),
        Some(Commands::Batch { inputs, output }) => cmd_batch(&previewer, &inputs, &output),
        Some(Commands::Version) => {
            cmd_version(&previewer);
            Ok(())
        }
        None => {
            println!("{}", "Usage: docpeek <COMMAND> <FILE>".yellow());
            println!("       docpeek --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_previewer(font: Option<&Path>) -> Previewer {
    let mut slides = SlideOptions::new();
    if let Some(path) = font {
        slides = slides.with_font_path(path);
    }
    Previewer::with_options(PreviewOptions::new().with_slide_options(slides))
}

/// Declared type from the flag, else from the file extension.
fn declared_type(input: &Path, file_type: Option<&str>) -> Result<String, String> {
    match file_type {
        Some(t) => Ok(t.to_string()),
        None => input
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_string)
            .ok_or_else(|| format!("{} has no extension; pass --type", input.display())),
    }
}

fn default_output_name(artifact: &PreviewArtifact) -> String {
    format!("preview.{}", artifact.content_type.file_extension())
}

fn cmd_preview(
    previewer: &Previewer,
    input: &Path,
    file_type: Option<&str>,
    page: Option<i64>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file_type = declared_type(input, file_type)?;
    let data = fs::read(input)?;

    let request = PreviewRequest::new(&data, &file_type);
    let request = match page {
        Some(p) => request.with_page(p),
        None => request,
    };
    let artifact = previewer.preview(&request)?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_output_name(&artifact)));
    fs::write(&path, &artifact.content)?;

    println!(
        "{} {} ({}, {} bytes)",
        "Saved to".green(),
        path.display(),
        artifact.content_type,
        artifact.len()
    );
    Ok(())
}

fn cmd_info(
    previewer: &Previewer,
    input: &Path,
    file_type: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let file_type = declared_type(input, file_type)?;
    let data = fs::read(input).unwrap_or_else(|e| {
        log::warn!("Cannot read {}: {}", input.display(), e);
        Vec::new()
    });
    let info = previewer.describe(&data, &file_type);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Type".bold(), file_type);
    println!(
        "{}: {}",
        "Preview".bold(),
        docpeek::resolve_content_type(&file_type)
    );
    println!("{}: {} bytes", "Size".bold(), info.size_bytes);
    if let Some(pages) = info.page_count {
        println!("{}: {}", "Pages".bold(), format_count(pages));
    }
    if let Some(slides) = info.slide_count {
        println!("{}: {}", "Slides".bold(), format_count(slides));
    }

    Ok(())
}

fn format_count(count: i64) -> String {
    if count == docpeek::UNKNOWN_COUNT {
        "unknown".to_string()
    } else {
        count.to_string()
    }
}

fn cmd_batch(
    previewer: &Previewer,
    inputs: &[PathBuf],
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(inputs.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading files...");
    let mut loaded = Vec::with_capacity(inputs.len());
    for input in inputs {
        let file_type = declared_type(input, None)?;
        let data = fs::read(input)?;
        loaded.push((input, file_type, data));
        pb.inc(1);
    }

    pb.set_message("Rendering previews...");
    let requests: Vec<PreviewRequest<'_>> = loaded
        .iter()
        .map(|(_, file_type, data)| PreviewRequest::new(data, file_type))
        .collect();
    let results = previewer.preview_many(&requests);

    let mut written = Vec::new();
    let mut failed = 0;
    for ((input, _, _), result) in loaded.iter().zip(results) {
        match result {
            Ok(artifact) => {
                let name = batch_output_name(input, &artifact);
                fs::write(output.join(&name), &artifact.content)?;
                written.push(name);
            }
            Err(e) => {
                pb.println(format!("{} {}: {}", "Skipped".yellow(), input.display(), e));
                failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, name) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), name);
    }
    if failed > 0 {
        println!("{} {} file(s) skipped", "Warning:".yellow().bold(), failed);
    }

    Ok(())
}

fn batch_output_name(input: &Path, artifact: &PreviewArtifact) -> String {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    format!("{}.{}", stem, artifact.content_type.file_extension())
}

fn cmd_version(previewer: &Previewer) {
    println!("{} {}", "docpeek".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document preview tool");
    println!();
    for kind in FileKind::ALL {
        let status = if previewer.is_available(kind) {
            "available".green()
        } else {
            "unavailable".red()
        };
        println!("  {:<5} {}", kind.extension(), status);
    }
    println!();
    println!("License: MIT");
}
