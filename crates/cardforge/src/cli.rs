//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cardforge")]
#[command(version, about = "Batch card-image generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log each processing step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log internal detail (implies --verbose)
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render cards from the personal-info table
    Generate(GenerateArgs),

    /// Check environment health
    Doctor {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Personal-info table file
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Default SVG template file
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Directory rendered SVG files land in
    #[arg(long)]
    pub svg_dir: Option<PathBuf>,

    /// Directory rasterized PNG files land in
    #[arg(long)]
    pub png_dir: Option<PathBuf>,

    /// Directory holding per-person portrait images
    #[arg(long)]
    pub images_dir: Option<PathBuf>,

    /// Suffix appended to every derived filename stem
    #[arg(long)]
    pub suffix: Option<String>,

    /// Replace existing SVG and PNG files instead of skipping them
    #[arg(short, long)]
    pub overwrite: bool,

    /// PNG width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// PNG height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Wait for every rasterizer job and report its exit status
    #[arg(long)]
    pub wait: bool,
}

impl GenerateArgs {
    pub fn into_overrides(self) -> cardforge_core::config::Overrides {
        cardforge_core::config::Overrides {
            table: self.table,
            template: self.template,
            svg_dir: self.svg_dir,
            png_dir: self.png_dir,
            images_dir: self.images_dir,
            suffix: self.suffix,
            overwrite: self.overwrite,
            width: self.width,
            height: self.height,
            wait: self.wait,
        }
    }
}
