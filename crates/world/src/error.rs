use std::path::PathBuf;

/// Errors raised while loading a world snapshot.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
	#[error("failed to read world snapshot {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid world snapshot: {0}")]
	Parse(#[from] toml::de::Error),
}
