use crate::io::config::ViewerConfig;
use crate::io::loader::load_model;
use crate::io::script::EventScript;
use crate::viewer::ViewerSession;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Runs a headless session: load every model, frame them, replay the script.
///
/// Models that fail to load are skipped with a warning; the session keeps
/// whatever did load.
pub fn run_cli(config: ViewerConfig, models: &[PathBuf], script: Option<&EventScript>) -> ViewerSession {
    info!("Starting headless session ({} model(s))...", models.len());
    let start_time = Instant::now();
    let mut session = ViewerSession::new(config);

    for path in models {
        match load_model(path) {
            Ok(node) => {
                session.add_object(node);
            }
            Err(e) => warn!("Skipping '{}': {}", path.display(), e),
        }
    }

    if session.objects().is_empty() {
        warn!("No model loaded; camera left at its configured pose");
    } else if let Some(framing) = session.last_framing() {
        info!(
            "Framed {} object(s) in {:.2?}: centre {:?}, distance {:.3}",
            session.objects().len(),
            start_time.elapsed(),
            framing.center,
            framing.final_distance
        );
    }

    if let Some(script) = script {
        script.replay(&mut session);
    }

    let pose = session.camera().pose();
    info!(
        "Final camera: position {:?}, target {:?}, fov {:.1}",
        pose.position, pose.target, pose.fov
    );
    session
}
