use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::{capacity::parse_capacity, cli::ClientArgs};

/// Reasons the launcher refuses to start a client.
///
/// The display text is the single line shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("missing required address option")]
    MissingAddress,
    #[error("missing required data directory option")]
    MissingDataDir,
    #[error("invalid capacity option")]
    InvalidCapacity,
    #[error("invalid replication percentage specified")]
    InvalidReplication,
    #[error("cannot resolve the current directory: {0}")]
    CurrentDir(String),
}

/// Validated settings handed to the client at startup.
///
/// Only the validation chain can build one, so every instance satisfies the
/// documented constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
    address: String,
    data_dir: PathBuf,
    capacity_bytes: u64,
    replication: u8,
    time_server: Option<String>,
}

impl ClientConfiguration {
    /// Validates `args`, resolving a relative data directory against the
    /// process working directory.
    pub fn from_args(args: ClientArgs) -> Result<Self, UsageError> {
        let cwd =
            std::env::current_dir().map_err(|err| UsageError::CurrentDir(err.to_string()))?;
        Self::from_args_in(args, &cwd)
    }

    /// Validates `args` with an explicit working directory.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// address, data directory, capacity, replication.
    pub fn from_args_in(args: ClientArgs, cwd: &Path) -> Result<Self, UsageError> {
        let address = args
            .address
            .filter(|address| !address.is_empty())
            .ok_or(UsageError::MissingAddress)?;
        let data_dir = args
            .data_dir
            .filter(|dir| !dir.is_empty())
            .ok_or(UsageError::MissingDataDir)?;
        let data_dir = normalize_data_dir(Path::new(&data_dir), cwd);
        let capacity = parse_capacity(&args.capacity)?;
        let replication = validate_replication(args.replication)?;

        // Only accepted configurations are logged.
        if capacity.truncated {
            warn!(
                capacity = %args.capacity,
                bytes = capacity.bytes,
                "capacity has no K/M/G suffix, its last character was ignored"
            );
        }

        Ok(Self {
            address,
            data_dir,
            capacity_bytes: capacity.bytes,
            replication,
            time_server: args.time_server,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes
    }

    pub fn replication(&self) -> u8 {
        self.replication
    }

    /// `None` when no time synchronization was configured.
    pub fn time_server(&self) -> Option<&str> {
        self.time_server.as_deref()
    }
}

fn validate_replication(percentage: i64) -> Result<u8, UsageError> {
    u8::try_from(percentage)
        .ok()
        .filter(|percentage| *percentage <= 100)
        .ok_or(UsageError::InvalidReplication)
}

/// Makes `raw` absolute against `cwd` and folds `.` and `..` components.
///
/// Purely lexical: symlinks are left alone and nothing is read from disk.
pub fn normalize_data_dir(raw: &Path, cwd: &Path) -> PathBuf {
    let joined = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        cwd.join(raw)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            // Popping at the root is a no-op, so `/..` stays `/`.
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
