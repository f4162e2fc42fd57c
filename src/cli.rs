#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::scene::MotionSetting;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "nightbloom",
    version,
    about = "Animated night sky with a fan of growing sunflowers"
)]
pub struct Cli {
    /// Target FPS (15..60)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: u8,

    /// Show a still frame of the bloomed field
    #[arg(long)]
    pub no_animation: bool,

    /// Lower motion mode: no shooting stars, no sway
    #[arg(long)]
    pub reduced_motion: bool,

    /// Color output policy
    #[arg(long, value_enum, default_value_t = ColorArg::Auto, conflicts_with = "no_color")]
    pub color: ColorArg,

    /// Alias for --color never
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// Seed for a reproducible sky
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show the status line
    #[arg(long)]
    pub hud: bool,

    /// Write logs to this file (RUST_LOG filters, default info)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn effective_color_mode(&self) -> ColorArg {
        if self.no_color {
            ColorArg::Never
        } else {
            self.color
        }
    }

    /// Motion requested on the command line, if any. `--no-animation` wins
    /// over `--reduced-motion`.
    #[must_use]
    pub fn motion_override(&self) -> Option<MotionSetting> {
        if self.no_animation {
            Some(MotionSetting::Off)
        } else if self.reduced_motion {
            Some(MotionSetting::Reduced)
        } else {
            None
        }
    }

    /// Whether `--fps` was given a non-default value.
    #[must_use]
    pub fn fps_override(&self) -> Option<u8> {
        (self.fps != DEFAULT_FPS).then_some(self.fps)
    }
}

pub const DEFAULT_FPS: u8 = 30;
