use std::{
    cell::RefCell,
    collections::{BTreeMap, VecDeque},
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "catface", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace faces in a single image.
    Frame(FrameArgs),
    /// Replace faces in every image of a directory, in name order.
    Batch(BatchArgs),
    /// Write the keyed sprites of a sheet as PNGs.
    Sprites(SpritesArgs),
    /// Find the face detector model file.
    LocateCascade(LocateArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Sprite sheet image.
    #[arg(long)]
    sheet: PathBuf,

    /// Input frame.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON array of face rectangles: `[{"x":..,"y":..,"width":..,"height":..}]`.
    #[arg(long)]
    faces: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Sprite scale relative to the face.
    #[arg(long)]
    scale: Option<f64>,

    /// Sprite set offset (number of "change set" steps).
    #[arg(long, default_value_t = 0)]
    set: usize,

    /// Explicit sprite index per face, comma separated.
    #[arg(long, value_delimiter = ',')]
    cats: Vec<usize>,

    /// Effect configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw detection boxes before swapping.
    #[arg(long, default_value_t = false)]
    debug: bool,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Sprite sheet image.
    #[arg(long)]
    sheet: PathBuf,

    /// Directory of input frames (png/jpg).
    #[arg(long)]
    frames: PathBuf,

    /// JSON object mapping frame file names to face rectangle arrays.
    #[arg(long)]
    faces: PathBuf,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Effect configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dim a status band at the top of each frame (size from `info_panel` in the config).
    #[arg(long, default_value_t = false)]
    info_panel: bool,
}

#[derive(Parser, Debug)]
struct SpritesArgs {
    /// Sprite sheet image.
    #[arg(long)]
    sheet: PathBuf,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Effect configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LocateArgs {
    /// Model file to try before the default locations.
    #[arg(long)]
    path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Sprites(args) => cmd_sprites(args),
        Command::LocateCascade(args) => cmd_locate(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<catface::EffectConfig> {
    match path {
        Some(p) => catface::EffectConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(catface::EffectConfig::default()),
    }
}

fn load_sheet(path: &Path, cfg: &catface::EffectConfig) -> anyhow::Result<catface::SpriteSheet> {
    catface::load_sprite_sheet(path, cfg)
        .with_context(|| format!("load sprite sheet '{}'", path.display()))
}

fn create_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create output dir '{}'", dir.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let sheet = Arc::new(load_sheet(&args.sheet, &cfg)?);
    let faces: Vec<catface::FaceRect> = read_json(&args.faces)?;

    let mut session = catface::SessionState::new(sheet.len(), &cfg)?;
    if let Some(scale) = args.scale {
        session.set_scale(scale)?;
    }
    for _ in 0..args.set % sheet.len() {
        session.advance_set();
    }
    if args.debug != session.debug_overlay() {
        session.toggle_debug();
    }

    let mut frame = catface::load_image_file(&args.in_path)
        .with_context(|| format!("load frame '{}'", args.in_path.display()))?
        .to_rgb8();
    let pipeline = catface::FrameEffectPipeline::new(sheet, &cfg);
    let overrides = (!args.cats.is_empty()).then_some(args.cats.as_slice());
    let stats =
        pipeline.process_with_overrides(&mut frame, &faces, &session.snapshot(), overrides);

    if let Some(parent) = args.out.parent() {
        create_dir(parent)?;
    }
    frame
        .save(&args.out)
        .with_context(|| format!("write image '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} of {} faces replaced)",
        args.out.display(),
        stats.applied,
        stats.faces
    );
    Ok(())
}

/// Image files of `dir`, sorted by name.
fn list_frames(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("read dir '{}'", dir.display()))? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"));
        if is_image && path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Frames read from disk in name order. The name of the frame last handed out is shared with
/// the detector and the sink.
struct DirFrameSource {
    pending: VecDeque<PathBuf>,
    current: Rc<RefCell<String>>,
}

impl catface::FrameSource for DirFrameSource {
    fn next_frame(&mut self) -> catface::CatfaceResult<Option<image::RgbImage>> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };
        *self.current.borrow_mut() = file_name(&path);
        catface::load_image_file(&path)
            .map(|img| Some(img.to_rgb8()))
            .map_err(|e| catface::CatfaceError::capture(e.to_string()))
    }
}

/// Looks up precomputed faces by the current frame's file name.
struct NamedFaces {
    faces: BTreeMap<String, Vec<catface::FaceRect>>,
    current: Rc<RefCell<String>>,
}

impl catface::FaceDetector for NamedFaces {
    fn detect(&mut self, _frame: &image::RgbImage) -> catface::CatfaceResult<Vec<catface::FaceRect>> {
        Ok(self
            .faces
            .get(self.current.borrow().as_str())
            .cloned()
            .unwrap_or_default())
    }
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let sheet = Arc::new(load_sheet(&args.sheet, &cfg)?);
    let faces: BTreeMap<String, Vec<catface::FaceRect>> = read_json(&args.faces)?;

    let frames = list_frames(&args.frames)?;
    for name in faces.keys() {
        if !frames.iter().any(|p| file_name(p) == *name) {
            tracing::warn!(%name, "faces given for a frame that is not in the directory");
        }
    }

    create_dir(&args.out_dir)?;
    let session = catface::SharedSession::new(catface::SessionState::new(sheet.len(), &cfg)?);
    let pipeline = catface::FrameEffectPipeline::new(sheet, &cfg);
    let snapshots = catface::SnapshotWriter::new(cfg.snapshot_dir.clone());
    let mut frame_loop = catface::FrameLoop::new(pipeline, session, snapshots);
    if args.info_panel || cfg.info_panel.is_some() {
        frame_loop = frame_loop.with_info_panel(cfg.info_panel.unwrap_or_default());
    }

    let current = Rc::new(RefCell::new(String::new()));
    let mut source = DirFrameSource {
        pending: frames.into(),
        current: Rc::clone(&current),
    };
    let mut detector = NamedFaces {
        faces,
        current: Rc::clone(&current),
    };
    let out_dir = args.out_dir.clone();
    let mut sink = |frame: &image::RgbImage,
                    stats: &catface::FrameStats|
     -> catface::CatfaceResult<()> {
        let name = current.borrow().clone();
        let out = out_dir.join(&name);
        frame
            .save(&out)
            .map_err(|e| catface::CatfaceError::output(format!("write '{}': {e}", out.display())))?;
        tracing::debug!(%name, applied = stats.applied, "frame written");
        Ok(())
    };

    let totals = frame_loop.run(&mut source, &mut detector, &mut sink)?;
    eprintln!(
        "wrote {} frames to {} ({} dropped, {} faces replaced, {:.1} fps)",
        totals.frames,
        args.out_dir.display(),
        totals.dropped,
        totals.applied,
        totals.fps()
    );
    Ok(())
}

fn cmd_sprites(args: SpritesArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let sheet = load_sheet(&args.sheet, &cfg)?;
    create_dir(&args.out_dir)?;
    for sprite in sheet.iter() {
        let out = args.out_dir.join(format!("sprite_{:02}.png", sprite.index()));
        sprite
            .image()
            .save(&out)
            .with_context(|| format!("write sprite '{}'", out.display()))?;
    }
    eprintln!("wrote {} sprites to {}", sheet.len(), args.out_dir.display());
    Ok(())
}

fn cmd_locate(args: LocateArgs) -> anyhow::Result<()> {
    let search = catface::default_cascade_search_paths(catface::DEFAULT_CASCADE_NAME);
    let path = catface::locate_cascade(args.path.as_deref(), &search)?;
    println!("{}", path.display());
    Ok(())
}
