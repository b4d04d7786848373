//! AR drawing replay
//!
//! Plays a scripted sequence of touches and tracker events through a
//! drawing session and prints the resulting scene.
//!
//! Run with: cargo run -p ardraw_session -- <script.toml> [config.toml]

use ardraw_session::{
    render_tree, DrawingSession, Result, Script, ScriptedTracker, SessionConfig, SessionError,
};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let script_path = args
        .next()
        .ok_or_else(|| SessionError::Script("usage: ardraw-replay <script.toml> [config.toml]".into()))?;

    let config = match args.next() {
        Some(path) => SessionConfig::load(path)?,
        None => {
            let mut config = SessionConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            config
        }
    };

    let script = Script::load(&script_path)?;

    let mut session = DrawingSession::new(ScriptedTracker::new(), config);
    session.start();
    script.run(&mut session)?;

    let commands = session.commands();
    log::info!(
        "Replay finished: {} undoable, {} redoable, mode={}",
        commands.undo_count(),
        commands.redo_count(),
        session.mode()
    );

    print!("{}", render_tree(session.scene()));
    Ok(())
}
