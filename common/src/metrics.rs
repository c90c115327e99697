//! Metrics provider interface and snapshot types.
//!
//! Pages query a [`MetricsProvider`] for owned snapshots. Every query may
//! block briefly (it reads the OS) and may fail with a
//! [`MetricsError`]; the screens turn a failure into an "unavailable"
//! placeholder instead of failing the frame.

use core::net::Ipv4Addr;
use core::time::Duration;

use heapless::{String, Vec};

use crate::config::{MAX_CORES, MAX_PARTITIONS};
use crate::error::MetricsError;

/// Maximum stored length of a host name.
pub const HOSTNAME_LENGTH: usize = 32;

/// Maximum stored length of a partition device name.
pub const DEVICE_NAME_LENGTH: usize = 32;

/// Host identity and uptime.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct HostInfo {
    /// Host name, truncated to [`HOSTNAME_LENGTH`].
    pub hostname: String<HOSTNAME_LENGTH>,
    /// First non-loopback IPv4 address, if any.
    pub ipv4: Option<Ipv4Addr>,
    /// Time since boot.
    pub uptime: Duration,
}

/// CPU utilisation snapshot.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct CpuStats {
    /// Utilisation of all cores combined, 0-100.
    pub total_percent: f32,
    /// Utilisation of each core, 0-100.
    pub per_core: Vec<f32, MAX_CORES>,
    /// Current clock frequency, if the OS reports it.
    pub frequency_mhz: Option<f32>,
}

/// Capacity usage in bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Usage {
    /// Total capacity.
    pub total: u64,
    /// Bytes in use.
    pub used: u64,
    /// Bytes still available.
    pub free: u64,
}

impl Usage {
    /// Share of the capacity that is not available, 0-100.
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.total.saturating_sub(self.free) as f32 * 100.0 / self.total as f32
    }
}

/// RAM and swap snapshot.
///
/// For RAM, `free` is the memory available to new processes, not the kernel's
/// "MemFree".
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct MemoryStats {
    /// Physical memory.
    pub ram: Usage,
    /// Swap space.
    pub swap: Usage,
}

/// Usage of one mounted partition.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DiskUsage {
    /// Block device, e.g. `/dev/mmcblk0p2`.
    pub device: String<DEVICE_NAME_LENGTH>,
    /// Capacity usage.
    pub usage: Usage,
}

impl DiskUsage {
    /// Share of the user-visible capacity in use, 0-100.
    ///
    /// Blocks reserved for root count neither as used nor as free.
    pub fn percent(&self) -> f32 {
        let visible = self.usage.used.saturating_add(self.usage.free);
        if visible == 0 {
            return 0.0;
        }
        self.usage.used as f32 * 100.0 / visible as f32
    }
}

/// Mounted partitions, in mount order.
pub type Disks = Vec<DiskUsage, MAX_PARTITIONS>;

/// Source of system metrics.
pub trait MetricsProvider {
    /// Host name, address and uptime.
    fn host(&self) -> Result<HostInfo, MetricsError>;

    /// CPU utilisation and frequency.
    fn cpu(&self) -> Result<CpuStats, MetricsError>;

    /// RAM and swap usage.
    fn memory(&self) -> Result<MemoryStats, MetricsError>;

    /// Usage of each mounted partition.
    fn disks(&self) -> Result<Disks, MetricsError>;
}

/// Copy `src` into a bounded string, truncating on a character boundary.
pub fn truncated<const N: usize>(src: &str) -> String<N> {
    let mut out = String::new();
    for c in src.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
