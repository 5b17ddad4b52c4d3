use clap::Parser;
use log::info;
use modelview::app::run_cli;
use modelview::control::framing::FitMode;
use modelview::io::config::ViewerConfig;
use modelview::io::script::EventScript;
use std::path::PathBuf;

/// Frames 3D models and replays scripted pointer/touch navigation.
#[derive(Parser, Debug)]
#[command(name = "modelview", version)]
struct Cli {
    /// Model files to load (OBJ)
    #[arg(value_name = "MODEL")]
    models: Vec<PathBuf>,

    /// Viewer configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Input script to replay after framing (TOML)
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Overrides `framing.mode` from the configuration
    #[arg(long, value_enum)]
    fit_mode: Option<FitMode>,
}

fn main() -> modelview::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => {
            info!("Using default configuration");
            ViewerConfig::default()
        }
    };
    if let Some(mode) = cli.fit_mode {
        config.framing.mode = mode;
    }

    let script = cli.script.as_ref().map(EventScript::load).transpose()?;

    let session = run_cli(config, &cli.models, script.as_ref());
    if let Some(framing) = session.last_framing() {
        println!(
            "max_dim = {:.4}\nfit_distance = {:.4}\nfinal_distance = {:.4}",
            framing.max_dim, framing.distance, framing.final_distance
        );
    }
    let pose = session.camera().pose();
    println!(
        "position = [{:.4}, {:.4}, {:.4}]\ntarget = [{:.4}, {:.4}, {:.4}]\nfov = {:.2}",
        pose.position.x,
        pose.position.y,
        pose.position.z,
        pose.target.x,
        pose.target.y,
        pose.target.z,
        pose.fov
    );
    Ok(())
}
