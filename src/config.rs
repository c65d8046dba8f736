use anyhow::Result;
use byldr_input::PointerSettings;
use byldr_world::{PlayerTuning, SessionSettings, TargetingConfig};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/byldr.toml";

/// Everything tunable from `config/byldr.toml`. Missing keys take defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub session: SessionConfig,
    pub controls: PointerSettings,
    pub player: PlayerTuning,
    pub targeting: TargetingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed simulation rate for headless runs (ticks per second).
    pub tick_rate: f32,
    /// Longest frame the simulation will integrate in one tick, in seconds.
    pub max_frame_dt: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_frame_dt: 0.1,
        }
    }
}

impl SandboxConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SandboxConfig>(&contents) {
                Ok(cfg) => cfg.sanitized(),
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SandboxConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!("Config not found at {}. Using defaults", path.display());
                }
                SandboxConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Replace values the simulation cannot run with by their defaults.
    fn sanitized(mut self) -> Self {
        if !(self.session.tick_rate.is_finite() && self.session.tick_rate > 0.0) {
            warn!(
                tick_rate = self.session.tick_rate,
                "tick_rate must be positive; using default"
            );
            self.session.tick_rate = SessionConfig::default().tick_rate;
        }
        if !(self.session.max_frame_dt.is_finite() && self.session.max_frame_dt > 0.0) {
            warn!(
                max_frame_dt = self.session.max_frame_dt,
                "max_frame_dt must be positive; using default"
            );
            self.session.max_frame_dt = SessionConfig::default().max_frame_dt;
        }
        self
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            player: self.player,
            targeting: self.targeting,
            max_frame_dt: self.session.max_frame_dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!(
                "byldr-config-{}",
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap()
                    .as_nanos()
            ))
            .join(name)
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let cfg: SandboxConfig = toml::from_str(
            r#"
            [player]
            move_speed = 4.0

            [session]
            tick_rate = 30.0
            "#,
        )
        .expect("valid toml");
        assert_eq!(cfg.player.move_speed, 4.0);
        assert_eq!(cfg.player.gravity, 30.0);
        assert_eq!(cfg.session.tick_rate, 30.0);
        assert_eq!(cfg.session.max_frame_dt, 0.1);
        assert_eq!(cfg.targeting, TargetingConfig::default());
        assert_eq!(cfg.controls, PointerSettings::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = temp_path("byldr.toml");
        let mut cfg = SandboxConfig::default();
        cfg.player.jump_velocity = 9.0;
        cfg.controls.click_slop = 8.0;
        cfg.save_to_path(&path).expect("saved");

        assert_eq!(SandboxConfig::load_from_path(&path), cfg);
    }

    #[test]
    fn unreadable_or_invalid_files_fall_back_to_defaults() {
        let missing = temp_path("missing.toml");
        assert_eq!(SandboxConfig::load_from_path(&missing), SandboxConfig::default());

        let broken = temp_path("broken.toml");
        fs::create_dir_all(broken.parent().unwrap()).unwrap();
        fs::write(&broken, "player = [").unwrap();
        assert_eq!(SandboxConfig::load_from_path(&broken), SandboxConfig::default());
    }

    #[test]
    fn non_positive_rates_are_replaced() {
        let path = temp_path("rates.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[session]\ntick_rate = 0.0\nmax_frame_dt = -1.0\n").unwrap();
        let cfg = SandboxConfig::load_from_path(&path);
        assert_eq!(cfg.session, SessionConfig::default());
    }
}
