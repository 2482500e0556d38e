//! Headless demo: a camera orbits the origin while scripted taps place images
//! and a scripted reset clears them.
//!
//! Usage: `anchorplace [config.ron|config.json]`

use anchorplace::core::SceneEvent;
use anchorplace::input::Trigger;
use anchorplace::prelude::*;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Scripted user input, one entry per frame (`None` = no input that frame)
const SCRIPT: &[Option<Trigger>] = &[
    None,
    Some(Trigger::Mouse(MouseButton::Left)),
    None,
    Some(Trigger::Key(KeyCode::Space)),
    Some(Trigger::Key(KeyCode::KeyW)),
    Some(Trigger::Mouse(MouseButton::Left)),
    None,
    Some(Trigger::Key(KeyCode::KeyR)),
    Some(Trigger::Key(KeyCode::Space)),
    Some(Trigger::Mouse(MouseButton::Left)),
    None,
    Some(Trigger::Key(KeyCode::KeyR)),
];

/// Colors for generated textures when no asset directory is present
const PALETTE: [[u8; 4]; 3] = [[250, 210, 40, 255], [180, 220, 255, 255], [60, 160, 90, 255]];

fn generated_textures(config: &SessionConfig) -> InMemoryTextures {
    config
        .textures
        .iter()
        .zip(PALETTE.iter().cycle())
        .fold(InMemoryTextures::new(), |textures, (name, color)| {
            textures.with(Texture::solid(name.as_str(), *color, 64))
        })
}

fn run<L: TextureLoader>(config: SessionConfig, loader: L) -> Result<(), SessionError> {
    let poses = ScriptedPoseSource::orbit(Vec3::ZERO, 1.5, 1.4, SCRIPT.len());
    let mut session = Session::new(config, poses, loader)?;
    let mapper = SignalMapper::with_defaults();

    session.start()?;

    for (frame, trigger) in SCRIPT.iter().enumerate() {
        session.pose_source_mut().advance();
        session.sync_pose();

        if let Some(trigger) = trigger {
            match mapper.signal_for(*trigger) {
                Some(signal) => match session.on_signal(signal) {
                    Ok(outcome) => log::info!("frame {frame}: {signal} -> {outcome:?}"),
                    // The session keeps running; only this attempt is lost
                    Err(e) => log::warn!("frame {frame}: {signal} failed: {e}"),
                },
                None => log::debug!("frame {frame}: {trigger:?} is unbound"),
            }
        }

        // Stand-in for a renderer mirroring scene membership
        let events: Vec<SceneEvent> = {
            let queue = session.controller_mut().events_mut();
            queue.swap();
            queue.drain().collect()
        };
        for event in events {
            match event {
                SceneEvent::EntityPlaced { entity, content, .. } => {
                    let model = session.controller().transform_of(entity).map(|t| t.matrix());
                    log::info!("  render: add {content} as {entity:?}, model {model:?}");
                }
                SceneEvent::SceneCleared { removed, .. } => {
                    log::info!("  render: remove {removed} children");
                }
            }
        }
    }

    let controller = session.controller();
    for entity in controller.placed_entities() {
        if let (Some(content), Some(transform)) =
            (controller.content_of(entity), controller.transform_of(entity))
        {
            log::info!("still placed: {content} at {:?}", transform.position);
        }
    }

    session.stop();
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SessionConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => SessionConfig::default(),
    };

    let result = if config.asset_root.is_dir() {
        log::info!("Loading textures from {}", config.asset_root.display());
        let loader = DiskTextureLoader::new(&config.asset_root);
        run(config, loader)
    } else {
        log::info!("No asset directory, using generated textures");
        let loader = generated_textures(&config);
        run(config, loader)
    };

    if let Err(e) = result {
        log::error!("Session error: {e}");
        std::process::exit(1);
    }
}
