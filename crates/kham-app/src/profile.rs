use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use kham_config::Config;
use serde::{Deserialize, Serialize};

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Settings profiles stored as `<root>/profiles/<name>.json`
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<config dir>/kham`
    pub fn default_location() -> anyhow::Result<Self> {
        let dir = dirs::config_dir().context("No user config directory available")?;
        Ok(Self::new(dir.join("kham")))
    }

    fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    fn profile_file(&self, name: &str) -> PathBuf {
        self.profiles_dir().join(format!("{name}.json"))
    }

    /// Create the profiles folder and the main profile if missing
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.profiles_dir())?;

        let main_profile = self.profile_file("main");
        if !main_profile.exists() {
            self.save("main", &Config::new())?;
            tracing::info!("Created main profile at {}", main_profile.display());
        }

        Ok(())
    }

    /// Load a profile by name, falling back to main, then to defaults
    pub fn load(&self, name: &str) -> anyhow::Result<Config> {
        let profile_file = self.profile_file(name);

        if profile_file.exists() {
            return read_profile(&profile_file);
        }

        tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
        let main_file = self.profile_file("main");
        if main_file.exists() {
            read_profile(&main_file)
        } else {
            Ok(Config::new())
        }
    }

    pub fn save(&self, name: &str, config: &Config) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(self.profiles_dir())?;

        let profile = Profile {
            name: name.into(),
            value: config.clone(),
        };
        let file = self.profile_file(name);
        fs::write(&file, serde_json::to_string_pretty(&profile)?)
            .with_context(|| format!("Failed to write {}", file.display()))?;
        tracing::debug!("Saved profile {name}");
        Ok(file)
    }
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    Ok(profile.value)
}
