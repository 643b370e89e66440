//! Headless demo driver
//!
//! Builds one texture per configured effect, registers them with an
//! [`EffectManager`] and runs a fixed number of frames, then pushes a
//! procedural texture through a short post-processing chain. Statistics go
//! to the log.

use std::path::{Path, PathBuf};

use texfx::manager::{DemoConfig, EffectManager};
use texfx::post;
use texfx::procedural;
use texfx::texture::{AddressMode, TextureHandle};
use texfx::util::FrameTimer;
use texfx::uv::UvPreset;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "texfx.json";

/// How often (in frames) progress is logged
const REPORT_INTERVAL: u32 = 60;

struct Options {
    config: PathBuf,
    frames: Option<u32>,
    resolution: Option<(u32, u32)>,
    write_config: Option<PathBuf>,
}

/// Parse command line arguments
fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        config: PathBuf::from(DEFAULT_CONFIG),
        frames: None,
        resolution: None,
        write_config: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    options.config = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            },
            "--frames" | "-n" => {
                if i + 1 < args.len() {
                    if let Ok(n) = args[i + 1].parse::<u32>() {
                        options.frames = Some(n);
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // WxH, e.g. 512x256
                    if let Some((w, h)) = args[i + 1].split_once('x') {
                        if let (Ok(w), Ok(h)) = (w.parse::<u32>(), h.parse::<u32>()) {
                            options.resolution = Some((w, h));
                        }
                    }
                    i += 1;
                }
            },
            "--write-config" => {
                if i + 1 < args.len() {
                    options.write_config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: texfx [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --config PATH, -c PATH    Demo configuration (default: {})",
                    DEFAULT_CONFIG
                );
                println!("  --frames N, -n N          Override the number of frames to run");
                println!("  --resolution WxH, -r WxH  Override the texture size");
                println!("  --write-config PATH       Write the effective configuration and exit");
                println!("  --help                    Show this help message");
                println!();
                println!("Logging follows RUST_LOG (default: info)");
                std::process::exit(0);
            },
            other => warn!(argument = other, "ignoring unknown argument"),
        }
        i += 1;
    }

    options
}

/// Load the config file, or fall back to the built-in demo when it is missing
fn load_config(path: &Path) -> Result<DemoConfig, String> {
    if path.exists() {
        info!(path = %path.display(), "loading config");
        DemoConfig::load(path).map_err(|e| e.to_string())
    } else {
        info!(path = %path.display(), "no config file, using built-in demo");
        Ok(DemoConfig::default())
    }
}

/// Cheap order-sensitive digest so runs can be compared from the log
fn checksum(texture: &TextureHandle) -> u64 {
    texture
        .snapshot()
        .map(|pixels| {
            pixels.iter().fold(0xcbf2_9ce4_8422_2325_u64, |h, &p| {
                (h ^ u64::from(p)).wrapping_mul(0x0100_0000_01b3)
            })
        })
        .unwrap_or(0)
}

/// Clouds, softened, darkened at the edges and drifted like a sky layer
fn run_post_chain(config: &DemoConfig, time: f32) -> Option<TextureHandle> {
    let sky = procedural::create_clouds(config.width, config.height, 4.0, 5)?;
    post::apply_blur(&sky, 1.5);
    post::adjust_contrast(&sky, 20.0);
    post::vignette(&sky, 0.6, 0.4);
    post::apply_uv_transform(&sky, &UvPreset::ScrollingClouds.matrix(time), AddressMode::Wrap);
    post::add_noise(&sky, 0.02, true, 7);
    Some(sky)
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = parse_args();
    let mut config = load_config(&options.config)?;
    if let Some(frames) = options.frames {
        config.frames = frames;
    }
    if let Some((width, height)) = options.resolution {
        config.width = width;
        config.height = height;
    }
    config.validate().map_err(|e| e.to_string())?;

    if let Some(path) = options.write_config {
        config.save(&path).map_err(|e| e.to_string())?;
        info!(path = %path.display(), "wrote config");
        return Ok(());
    }

    let mut manager = EffectManager::with_config(&config.manager);
    let mut textures = Vec::with_capacity(config.effects.len());
    for spec in &config.effects {
        let texture = TextureHandle::new(config.width, config.height).map_err(|e| e.to_string())?;
        spec.register(&mut manager, &texture);
        debug!(kind = spec.kind(), texture = ?texture.id(), "effect ready");
        textures.push((spec.kind(), texture));
    }
    info!(
        effects = manager.effect_count(),
        width = config.width,
        height = config.height,
        frames = config.frames,
        schedule = ?config.manager.schedule,
        "starting"
    );

    let mut timer = FrameTimer::new(REPORT_INTERVAL as usize);
    for frame in 1..=config.frames {
        timer.tick();
        manager.update(config.delta_time);

        if frame % REPORT_INTERVAL == 0 {
            let (min_ms, max_ms) = timer.min_max_ms();
            info!(
                frame,
                global_time = manager.global_time(),
                updates = manager.updates_this_frame(),
                avg_update_ms = manager.average_update_time_ms(),
                fps = timer.avg_fps(),
                min_ms,
                max_ms,
                "progress"
            );
        }
    }

    for (kind, texture) in &textures {
        let updated = manager
            .effect_info(texture)
            .map_or(0.0, |info| info.last_update_time);
        info!(kind, checksum = %format!("{:016x}", checksum(texture)), last_update = updated, "final texture");
    }

    match run_post_chain(&config, manager.global_time()) {
        Some(sky) => info!(checksum = %format!("{:016x}", checksum(&sky)), "post chain"),
        None => warn!("post chain skipped"),
    }

    info!(
        frames = manager.frame_count(),
        avg_update_ms = manager.average_update_time_ms(),
        avg_frame_ms = timer.avg_frame_time_ms(),
        "done"
    );

    for (_, texture) in &textures {
        if let Err(err) = texture.release() {
            warn!(%err, "texture release failed");
        }
    }
    manager.update(0.0);
    debug!(remaining = manager.effect_count(), "released textures");

    Ok(())
}
