//! mdpress CLI - branded Markdown-to-PDF generation

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use mdpress::{BrandingConfig, GenerateOptions, GenerationSummary, PageGeometry, Pipeline, Stage};

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(version)]
#[command(about = "Generate a branded, paginated PDF from a Markdown file", long_about = None)]
struct Cli {
    /// Input Markdown file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF path (defaults to the input path with .pdf)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Branding configuration JSON file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Client name shown on the title page and header
    #[arg(long, value_name = "NAME")]
    client: Option<String>,

    /// Document title (overrides the first heading)
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Logo for the title page
    #[arg(long, value_name = "FILE")]
    title_logo: Option<PathBuf>,

    /// Logo for the repeating page header
    #[arg(long, value_name = "FILE")]
    header_logo: Option<PathBuf>,

    /// Check rendered pages for header/content overlap
    #[arg(long)]
    validate_layout: bool,

    /// Verbose diagnostics
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a branding configuration without rendering anything
    Check {
        /// Branding configuration JSON file
        #[arg(value_name = "FILE")]
        config: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    } else {
        env_logger::init();
    }

    let result = match cli.command {
        Some(Commands::Check { ref config }) => cmd_check(config),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input.clone() {
                cmd_generate(&cli, &input)
            } else {
                println!("{}", "Usage: mdpress <FILE> [-o OUTPUT] [-c CONFIG]".yellow());
                println!("       mdpress --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        if cli.debug {
            eprintln!("{}: {:?}", "Error".red().bold(), e);
        } else {
            eprintln!("{}: {}", "Error".red().bold(), e);
        }
        std::process::exit(1);
    }
}

/// Load the branding config and layer CLI flag overrides on top.
fn resolve_branding(cli: &Cli) -> Result<BrandingConfig, mdpress::Error> {
    let mut branding = match cli.config {
        Some(ref path) => BrandingConfig::from_json_file(path)?,
        None => BrandingConfig::default(),
    };
    if let Some(ref client) = cli.client {
        branding = branding.with_client_name(client);
    }
    if let Some(ref title) = cli.title {
        branding = branding.with_title(title);
    }
    if let Some(ref logo) = cli.title_logo {
        branding = branding.with_title_logo(logo);
    }
    if let Some(ref logo) = cli.header_logo {
        branding = branding.with_header_logo(logo);
    }
    if cli.validate_layout {
        branding = branding.with_layout_validation(true);
    }
    Ok(branding)
}

fn cmd_generate(cli: &Cli, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let branding = resolve_branding(cli)?;

    let stage_count = if branding.validate_layout { 7 } else { 6 };
    let pb = ProgressBar::new(stage_count);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Starting...");

    let mut options = GenerateOptions::new(input, branding);
    if let Some(ref output) = cli.output {
        options = options.with_output(output);
    }

    let pb_stage = pb.clone();
    let summary = Pipeline::new(options)
        .with_observer(move |stage| match stage {
            Stage::Done | Stage::Failed => {}
            Stage::Idle => {}
            other => {
                pb_stage.set_message(other.to_string());
                pb_stage.inc(1);
            }
        })
        .run();

    match summary {
        Ok(summary) => {
            pb.finish_with_message("Done!");
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            pb.abandon_with_message("Failed");
            Err(e.into())
        }
    }
}

fn print_summary(summary: &GenerationSummary) {
    println!("\n{}", "Output:".green().bold());
    println!("  {} {}", "File".bold(), summary.output_path.display());
    println!("  {} {}", "Pages".bold(), summary.page_count);
    println!("  {} {}", "Size".bold(), human_size(summary.file_size));
    println!(
        "  {} {}/{} headings measured ({:.0}%)",
        "TOC".bold(),
        summary.headings_measured,
        summary.headings_total,
        summary.heading_coverage() * 100.0
    );

    if let Some(ref validation) = summary.validation {
        if validation.has_overlap {
            println!(
                "  {} header overlap on page {} ({:.1}px past the content margin)",
                "Warning:".yellow().bold(),
                validation.worst_page.unwrap_or(0),
                -validation.worst_clearance_px
            );
        } else {
            println!(
                "  {} no header overlap ({} pages sampled)",
                "Layout".bold(),
                validation.pages_sampled.len()
            );
        }
    }
}

fn cmd_check(config: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let branding = BrandingConfig::from_json_file(config)?;
    branding.validate()?;

    println!("{}", "Configuration OK".green().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Client".bold(), branding.client_name);
    println!("{}: {}", "Company".bold(), branding.company.name);
    println!("{}: {}", "Website".bold(), branding.company.website);
    println!("{}: {}", "Email".bold(), branding.company.email);
    if let Some(ref phone) = branding.company.phone {
        println!("{}: {}", "Phone".bold(), phone);
    }
    println!("{}: {}", "Title logo".bold(), branding.title_logo.display());
    println!("{}: {}", "Header logo".bold(), branding.header_logo.display());
    println!(
        "{}: {} / {}",
        "Colors".bold(),
        branding.colors.primary.to_css(),
        branding.colors.secondary.to_css()
    );
    if let Some(ref title) = branding.title_override {
        println!("{}: {}", "Title override".bold(), title);
    }

    let geometry = PageGeometry::default();
    let (width_in, height_in) = geometry.paper_size_in();
    let (top_in, bottom_in, side_in, _) = geometry.margins_in();
    println!();
    println!("{}", "Page geometry".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {:.2}in x {:.2}in", "Paper".bold(), width_in, height_in);
    println!(
        "{}: {:.2}in top, {:.2}in bottom, {:.2}in sides",
        "Margins".bold(),
        top_in,
        bottom_in,
        side_in
    );
    println!(
        "{}: {:.0}px per page",
        "Usable height".bold(),
        geometry.usable_height_px()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "mdpress".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Branded Markdown-to-PDF generator");
    println!();
    println!("License: MIT");
}

fn human_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
