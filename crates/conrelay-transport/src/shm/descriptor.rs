use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use conrelay_common::{ChannelKey, TransportError};
use tracing::debug;

use super::region::SharedRegion;
use super::signals::{initial_gate, SharedSignals};
use crate::channel::{Consumer, Producer};
use crate::frame::{RECORD_HEADER_LEN, SEGMENT_HEADER_LEN};
use crate::gate::SyncGate;
use crate::mailbox::Mailbox;

/// Which way a channel half carries data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Supervisor to remote (input).
    ToRemote,
    /// Remote to supervisor (screen patches).
    ToSupervisor,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::ToRemote, Direction::ToSupervisor];

    fn prefix(self) -> &'static str {
        match self {
            Direction::ToRemote => "p2c",
            Direction::ToSupervisor => "c2p",
        }
    }
}

/// What a resource file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Segment,
    Gate,
}

impl Purpose {
    fn suffix(self) -> &'static str {
        match self {
            Purpose::Segment => "segment",
            Purpose::Gate => "gate",
        }
    }
}

/// The channel directory both peers map their resources from.
///
/// The supervisor creates it and passes the path to the remote, which only
/// ever opens what already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDescriptor {
    dir: PathBuf,
}

impl ChannelDescriptor {
    /// Create `<base>/<key>` with both directions' segments and gates.
    pub fn create(
        base: &Path,
        key: &ChannelKey,
        capacity: usize,
    ) -> Result<Self, TransportError> {
        if capacity < SEGMENT_HEADER_LEN + RECORD_HEADER_LEN {
            return Err(TransportError::Map {
                path: base.to_path_buf(),
                reason: format!("segment capacity {capacity} cannot hold a record"),
            });
        }
        let dir = base.join(key.to_string());
        fs::create_dir(&dir)?;
        let descriptor = Self { dir };

        let mut segment = vec![0u8; capacity];
        segment[..SEGMENT_HEADER_LEN]
            .copy_from_slice(&(SEGMENT_HEADER_LEN as u32).to_le_bytes());
        for direction in Direction::ALL {
            create_file(&descriptor.resource(direction, Purpose::Segment), &segment)?;
            create_file(&descriptor.resource(direction, Purpose::Gate), &initial_gate())?;
        }
        debug!(dir = %descriptor.dir.display(), capacity, "channel created");
        Ok(descriptor)
    }

    /// Refer to an existing channel directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, TransportError> {
        let descriptor = Self { dir: dir.into() };
        for direction in Direction::ALL {
            for purpose in [Purpose::Segment, Purpose::Gate] {
                let path = descriptor.resource(direction, purpose);
                if !path.is_file() {
                    return Err(TransportError::Map {
                        path,
                        reason: "channel resource does not exist".into(),
                    });
                }
            }
        }
        Ok(descriptor)
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Path of one resource file. The single source of resource names.
    pub fn resource(&self, direction: Direction, purpose: Purpose) -> PathBuf {
        self.dir
            .join(format!("{}_{}", direction.prefix(), purpose.suffix()))
    }

    /// Where the supervisor leaves the effective configuration.
    pub fn config_path(&self) -> PathBuf {
        self.dir.join("config.toml")
    }

    pub fn gate(&self, direction: Direction) -> Result<SyncGate, TransportError> {
        let signals = SharedSignals::open(&self.resource(direction, Purpose::Gate))?;
        Ok(SyncGate::new(Arc::new(signals)))
    }

    pub fn producer(&self, direction: Direction) -> Result<Producer<SharedRegion>, TransportError> {
        let segment = SharedRegion::open(&self.resource(direction, Purpose::Segment))?;
        Ok(Producer::new(Mailbox::new(segment), self.gate(direction)?))
    }

    pub fn consumer(&self, direction: Direction) -> Result<Consumer<SharedRegion>, TransportError> {
        let segment = SharedRegion::open(&self.resource(direction, Purpose::Segment))?;
        Ok(Consumer::new(Mailbox::new(segment), self.gate(direction)?))
    }

    /// Delete the directory and everything in it.
    pub fn remove(&self) -> Result<(), TransportError> {
        fs::remove_dir_all(&self.dir)?;
        Ok(())
    }
}

fn create_file(path: &Path, contents: &[u8]) -> Result<(), TransportError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(contents)?;
    Ok(())
}
