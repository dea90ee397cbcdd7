use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "catena", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Emit a scene script as JSON for the animation engine.
    Script(ScriptArgs),
    /// Render the final state of a scene as an SVG preview.
    Preview(PreviewArgs),
    /// Print the points of a centered zig-zag chain as JSON.
    Chain(ChainArgs),
    /// Print an arrow tip aligned to the end of a sampled path as JSON.
    Tip(TipArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Built-in scene.
    #[arg(long, value_enum)]
    scene: catena::SceneKind,

    /// Scene config JSON (defaults are used for missing fields).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ScriptArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output JSON path (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Output width in pixels (height follows 16:9).
    #[arg(long, default_value_t = 1280)]
    width_px: u32,
}

#[derive(Parser, Debug)]
struct ChainArgs {
    /// Number of bonds.
    #[arg(long, default_value_t = 7)]
    atoms: u32,

    /// Bond length.
    #[arg(long, default_value_t = 0.8)]
    length: f64,

    /// Alternating half angle in degrees.
    #[arg(long, default_value_t = 30.0)]
    half_angle_deg: f64,
}

#[derive(Parser, Debug)]
struct TipArgs {
    /// Path samples as space-separated "x,y" pairs; the last two set the tangent.
    #[arg(long, allow_hyphen_values = true)]
    points: String,

    /// Tip size.
    #[arg(long, default_value_t = 0.15)]
    size: f64,

    /// Angle in radians to use when the last two samples coincide (error if omitted).
    #[arg(long, allow_negative_numbers = true)]
    fallback_angle: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Script(args) => cmd_script(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Chain(args) => cmd_chain(args),
        Command::Tip(args) => cmd_tip(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_points(s: &str) -> anyhow::Result<Vec<catena::Point>> {
    s.split_whitespace()
        .map(|p| parse_point(p).map_err(anyhow::Error::msg))
        .collect()
}

fn parse_point(s: &str) -> Result<catena::Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got \"{s}\""))?;
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|e| format!("invalid x in \"{s}\": {e}"))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|e| format!("invalid y in \"{s}\": {e}"))?;
    Ok(catena::Point::new(x, y))
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<catena::Script> {
    let cfg = match &args.config {
        Some(path) => catena::SceneConfig::from_path(path)
            .with_context(|| format!("load scene config '{}'", path.display()))?,
        None => catena::SceneConfig::default(),
    };
    let script = catena::build_scene(args.scene, &cfg)
        .with_context(|| format!("build scene '{}'", args.scene.name()))?;
    Ok(script)
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_script(args: ScriptArgs) -> anyhow::Result<()> {
    let script = load_scene(&args.scene)?;
    let json = script.to_json_pretty()?;
    match &args.out {
        Some(path) => write_output(path, &json),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let script = load_scene(&args.scene)?;
    let opts = catena::PreviewOpts {
        width_px: args.width_px,
        ..catena::PreviewOpts::default()
    };
    let svg = catena::render_svg(&script, opts)?;
    write_output(&args.out, &svg)
}

fn cmd_chain(args: ChainArgs) -> anyhow::Result<()> {
    let cfg = catena::ChainConfig {
        atom_count: args.atoms,
        segment_length: args.length,
        half_angle_deg: args.half_angle_deg,
    };
    cfg.validate().context("invalid chain arguments")?;
    let chain = catena::ZigZagChainBuilder::new(cfg.segment_length, cfg.atom_count)
        .half_angle(cfg.half_angle_deg.to_radians())
        .build();
    println!("{}", serde_json::to_string_pretty(&chain)?);
    Ok(())
}

fn cmd_tip(args: TipArgs) -> anyhow::Result<()> {
    let points = parse_points(&args.points).context("parse --points")?;
    let samples = catena::PathSamples::new(points)?;
    let policy = match args.fallback_angle {
        Some(a) => catena::DegenerateTangent::Fallback(a),
        None => catena::DegenerateTangent::Reject,
    };
    let shape = catena::TipShape::half_head(args.size).context("invalid --size")?;
    let tip = catena::ArrowTip::align(&samples, shape, policy)?;
    println!("{}", serde_json::to_string_pretty(&tip)?);
    Ok(())
}
