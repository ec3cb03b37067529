//! Headless exporter
//!
//! Replays a saved [`Scene`] onto a photo and writes the flattened export,
//! using the same session and compositor as the interactive editor.

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::Parser;

use crate::config::CompositorConfig;
use crate::photo::SitePhoto;
use crate::render::BoardFont;
use crate::session::{Scene, Session};

/// Command-line arguments for the headless exporter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Photo to annotate (any format the image crate decodes)
    pub photo: PathBuf,

    /// Scene JSON with viewport, signboard and strokes
    pub scene: PathBuf,

    /// Directory to write the export into (defaults to the Pictures folder)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Font for board text, overriding the configured one
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Run the export described by `args`, returning the written file
pub async fn run(args: &Args) -> anyhow::Result<PathBuf> {
    let config = match &args.config {
        Some(path) => CompositorConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CompositorConfig::load(),
    };

    let font = load_font(args.font.as_deref().or(config.font_path.as_deref()))?;
    let mut session = Session::new(config, font);

    let bytes = std::fs::read(&args.photo)
        .with_context(|| format!("Failed to read photo {}", args.photo.display()))?;
    let ticket = session.begin_load();
    let photo = SitePhoto::load(bytes)
        .await
        .with_context(|| format!("Failed to decode photo {}", args.photo.display()))?;
    session.finish_load(ticket, photo);

    let scene = Scene::load(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    let strokes = scene.apply(&mut session);
    log::info!("Scene applied with {strokes} stroke(s)");

    let exported = session.export().context("Failed to render export")?;

    let dir = match &args.output {
        Some(dir) => dir.clone(),
        None => default_output_dir()?,
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = exported
        .save_in(&dir)
        .with_context(|| format!("Failed to write export into {}", dir.display()))?;
    Ok(path)
}

fn load_font(path: Option<&Path>) -> anyhow::Result<Option<BoardFont>> {
    let Some(path) = path else {
        log::debug!("No font configured; using the bundled board font");
        return Ok(None);
    };
    let font = BoardFont::open(path)
        .with_context(|| format!("Failed to load font {}", path.display()))?;
    log::debug!("Using font {}", path.display());
    Ok(Some(font))
}

fn default_output_dir() -> anyhow::Result<PathBuf> {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
        .ok_or_else(|| anyhow!("No output directory given and no Pictures folder found"))
}
