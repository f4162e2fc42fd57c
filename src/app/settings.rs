use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    cli::{Cli, DEFAULT_FPS},
    scene::MotionSetting,
};

const CONFIG_DIR_ENV: &str = "NIGHTBLOOM_CONFIG_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub fps: u8,
    pub motion: MotionSetting,
    pub hud: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            motion: MotionSetting::Full,
            hud: false,
        }
    }
}

impl RuntimeSettings {
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        Self {
            fps: cli.fps,
            motion: cli.motion_override().unwrap_or_default(),
            hud: cli.hud,
        }
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(fps) = cli.fps_override() {
            self.fps = fps;
        }
        if let Some(motion) = cli.motion_override() {
            self.motion = motion;
        }
        if cli.hud {
            self.hud = true;
        }
        self.fps = self.fps.clamp(15, 60);
    }
}

pub fn load_runtime_settings(cli: &Cli, enable_disk: bool) -> (RuntimeSettings, Option<PathBuf>) {
    if !enable_disk {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    }
    let Some(path) = settings_path() else {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    };
    (load_runtime_settings_from(cli, &path), Some(path))
}

pub fn load_runtime_settings_from(cli: &Cli, path: &Path) -> RuntimeSettings {
    let mut settings = RuntimeSettings::from_cli_defaults(cli);
    if let Ok(content) = fs::read_to_string(path) {
        match serde_json::from_str::<RuntimeSettings>(&content) {
            Ok(saved) => settings = saved,
            Err(err) => debug!("ignoring unreadable settings at {}: {err}", path.display()),
        }
    }
    settings.apply_cli_overrides(cli);
    settings
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")?;
    restrict_permissions(path)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .context("restricting settings file permissions failed")
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> anyhow::Result<()> {
    Ok(())
}

fn settings_path() -> Option<PathBuf> {
    settings_path_from(
        std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn settings_path_from(config_dir: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(base) = config_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        return Some(base.join("settings.json"));
    }
    Some(home?.join(".config").join("nightbloom").join("settings.json"))
}
