//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use anyhow::ensure;
use clap::Parser;

use crate::services::AnimationSettings;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "hourglass-timer")]
#[command(about = "An hourglass countdown timer with a headless view host")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Length of one hourglass loop in milliseconds at normal speed
    #[arg(long, default_value = "2000")]
    pub cycle_ms: u64,

    /// Hourglass playback speed
    #[arg(long, default_value = "0.8")]
    pub speed: f64,

    /// Animation asset that must exist before a session can start
    #[arg(long)]
    pub animation: Option<PathBuf>,

    /// Do not simulate playback; an external renderer reports it via POST /animation
    #[arg(long)]
    pub external_animation: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Reject settings the animation player cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.cycle_ms > 0, "--cycle-ms must be positive");
        ensure!(
            self.speed.is_finite() && self.speed >= 0.001,
            "--speed must be at least 0.001, got {}",
            self.speed
        );
        Ok(())
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn animation_settings(&self) -> AnimationSettings {
        AnimationSettings {
            cycle: Duration::from_millis(self.cycle_ms),
            speed: self.speed,
            asset: self.animation.clone(),
            simulate: !self.external_animation,
        }
    }
}
