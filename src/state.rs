//! Clock sequence, timestamp, and the persisted generator state.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::NodeId;

/// A 14-bit clock sequence that disambiguates UUIDs issued when the timestamp alone cannot.
///
/// The counter is bumped whenever the clock fails to advance past the last recorded timestamp,
/// which covers both multiple UUIDs within a single 100-nanosecond tick and a system clock set
/// backward.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ClockSeq(u16);

impl ClockSeq {
    /// The largest value a clock sequence can hold.
    pub const MAX: u16 = (1 << 14) - 1;

    /// Creates a clock sequence from the low 14 bits of `value`.
    pub const fn new(value: u16) -> Self {
        Self(value & Self::MAX)
    }

    /// Returns the counter value.
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Increments the counter, wrapping from 16383 to 0.
    pub fn increment(&mut self) {
        self.0 = (self.0 + 1) & Self::MAX;
    }
}

impl TryFrom<u16> for ClockSeq {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(format!("clock sequence {} exceeds 14 bits", value))
        }
    }
}

impl From<ClockSeq> for u16 {
    fn from(src: ClockSeq) -> Self {
        src.0
    }
}

/// Number of 100-nanosecond intervals between the UUID epoch (1582-10-15T00:00:00Z) and the Unix
/// epoch.
const UUID_EPOCH_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

/// A 60-bit UUIDv1 timestamp: the count of 100-nanosecond intervals since the UUID epoch.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Timestamp(u64);

impl Timestamp {
    /// The UUID epoch itself.
    pub const ZERO: Self = Self(0);

    /// The largest timestamp representable in 60 bits.
    pub const MAX: Self = Self((1 << 60) - 1);

    /// Creates a timestamp from a raw tick count, or returns `None` if it does not fit in 60 bits.
    pub const fn from_ticks(ticks: u64) -> Option<Self> {
        if ticks <= Self::MAX.0 {
            Some(Self(ticks))
        } else {
            None
        }
    }

    /// Returns the raw tick count.
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Returns the timestamp of the current system time.
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Converts a [`SystemTime`], clamping instants before the UUID epoch to [`Timestamp::ZERO`]
    /// and instants beyond 60 bits to [`Timestamp::MAX`].
    pub fn from_system_time(time: SystemTime) -> Self {
        let ticks = match time.duration_since(UNIX_EPOCH) {
            Ok(since) => (since.as_nanos() / 100).saturating_add(UUID_EPOCH_OFFSET as u128),
            Err(err) => (UUID_EPOCH_OFFSET as u128).saturating_sub(err.duration().as_nanos() / 100),
        };
        Self(ticks.min(Self::MAX.0 as u128) as u64)
    }

    /// Converts the timestamp back to a [`SystemTime`], or returns `None` if the platform cannot
    /// represent that instant.
    pub fn to_system_time(self) -> Option<SystemTime> {
        if self.0 >= UUID_EPOCH_OFFSET {
            UNIX_EPOCH.checked_add(ticks_to_duration(self.0 - UUID_EPOCH_OFFSET))
        } else {
            UNIX_EPOCH.checked_sub(ticks_to_duration(UUID_EPOCH_OFFSET - self.0))
        }
    }
}

fn ticks_to_duration(ticks: u64) -> Duration {
    Duration::new(ticks / 10_000_000, (ticks % 10_000_000) as u32 * 100)
}

impl TryFrom<u64> for Timestamp {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_ticks(value).ok_or_else(|| format!("timestamp {} exceeds 60 bits", value))
    }
}

impl From<Timestamp> for u64 {
    fn from(src: Timestamp) -> Self {
        src.0
    }
}

/// The state a generator carries between calls and across process restarts.
///
/// `last_timestamp` never regresses in stored state without a matching `clock_seq` increment.
/// `node` is fixed once the state has been created.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct GeneratorState {
    /// The current clock sequence.
    pub clock_seq: ClockSeq,

    /// The timestamp of the most recently generated UUID.
    pub last_timestamp: Timestamp,

    /// The node identifier embedded in every UUID.
    pub node: NodeId,
}
