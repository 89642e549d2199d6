//! User settings for the stash binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stash_aggregator::{AggregatorConfig, SessionState};


/// How wide the aggregate grid is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthMode {
	/// Same width as the player inventory.
	Regular,
	#[default]
	Extended,
	/// As wide as the screen allows.
	Full,
}

impl WidthMode {
	pub const fn columns(self) -> usize {
		match self {
			Self::Regular => 12,
			Self::Extended => 18,
			Self::Full => 24,
		}
	}
}

/// Contents of the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Key that opens the aggregate view.
	pub open_key: String,
	pub width_mode: WidthMode,
	/// Swaps regular and loose quick-stacking.
	pub invert_shift_transfer: bool,
	pub background_effects: bool,
	pub aggregator: AggregatorConfig,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			open_key: "B".to_string(),
			width_mode: WidthMode::default(),
			invert_shift_transfer: false,
			background_effects: true,
			aggregator: AggregatorConfig::default(),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to access {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid TOML in {path}: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
	#[error("failed to encode session state: {0}")]
	Encode(#[from] toml::ser::Error),
}

impl Settings {
	/// Reads settings from `path`. A missing file yields the defaults.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		read_or_default(path)
	}
}

/// Reads the recalled session state. A missing file yields a fresh state.
pub fn load_state(path: &Path) -> Result<SessionState, ConfigError> {
	read_or_default(path)
}

pub fn save_state(path: &Path, state: &SessionState) -> Result<(), ConfigError> {
	let text = toml::to_string(state)?;
	std::fs::write(path, text).map_err(|source| ConfigError::Io {
		path: path.to_path_buf(),
		source,
	})
}

fn read_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
	let text = match std::fs::read_to_string(path) {
		Ok(text) => text,
		Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
			tracing::debug!(path = %path.display(), "no file, using defaults");
			return Ok(T::default());
		}
		Err(source) => {
			return Err(ConfigError::Io {
				path: path.to_path_buf(),
				source,
			});
		}
	};
	toml::from_str(&text).map_err(|source| ConfigError::Parse {
		path: path.to_path_buf(),
		source,
	})
}
