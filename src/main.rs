//! Catcher demo driver
//!
//! Builds an environment from the registry and plays it with uniformly random
//! actions, logging each episode's total reward.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use catcher_env::registry::CATCHER_V0;
use catcher_env::{Action, EnvConfig, Environment, Registry, RenderMode, TimeLimit};

#[derive(Parser)]
#[command(name = "catcher", about = "Play the catcher environment with a random agent")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file (missing fields take their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Registered environment id
    #[arg(long, default_value = CATCHER_V0)]
    env_id: String,

    /// Render mode: off, human or rgb_array (overrides the config file)
    #[arg(short, long)]
    render_mode: Option<RenderMode>,

    /// Seed for the first reset and the action sampler
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of episodes to play
    #[arg(short, long, default_value = "1")]
    episodes: u32,

    /// Truncate episodes after this many steps
    #[arg(long)]
    max_steps: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = match &cli.config {
        Some(path) => EnvConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EnvConfig::default(),
    };
    if let Some(mode) = cli.render_mode {
        config.render_mode = mode;
    }

    let registry = Registry::with_builtin();
    let env = registry.make_with(&cli.env_id, config)?;
    let mut env = match cli.max_steps {
        Some(steps) => TimeLimit::new(env.into_inner(), Some(steps)),
        None => env,
    };
    let mut sampler = match cli.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };
    let action_space = env.action_space();
    let capture_frames = env.inner().config().render_mode == RenderMode::RgbArray;

    log::info!("Playing {} episode(s) of {}", cli.episodes, cli.env_id);

    let mut last_total = 0.0;
    for episode in 0..cli.episodes {
        // Only the first reset is seeded; later episodes continue the stream
        let seed = if episode == 0 { cli.seed } else { None };
        env.reset(seed)?;

        let mut total = 0.0;
        let mut steps = 0u64;
        loop {
            let action = Action::try_from(action_space.sample(&mut sampler))?;
            let transition = env.step(action)?;
            total += transition.reward;
            steps += 1;

            if capture_frames && let Some(frame) = env.render()? {
                log::trace!("Captured {:?} frame", frame.shape());
            }

            if transition.done() {
                let reason = if transition.terminated {
                    "terminated"
                } else {
                    "truncated"
                };
                log::info!(
                    "Episode {} {} after {} steps, reward {}",
                    episode + 1,
                    reason,
                    steps,
                    total
                );
                break;
            }
        }
        last_total = total;
    }

    let session = env.inner().session();
    log::info!(
        "Final episode reward {}; {} earlier episode(s) recorded, best {:?}, mean {:?}",
        last_total,
        session.len(),
        session.best(),
        session.mean()
    );
    println!("{}", serde_json::to_string(session)?);

    env.close();
    Ok(())
}
