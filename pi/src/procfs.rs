//! System metrics from `/proc`, sysfs and `statvfs`.
//!
//! Every query returns an owned snapshot. All reads are non-blocking: CPU load
//! is the busy share of the jiffies counted over a window of at least
//! [`CPU_SAMPLE_WINDOW`] (since boot for the first query), and queries inside
//! the window return the previous result.
//!
//! Sources that may be missing on some boards degrade instead of failing:
//! no cpufreq directory means no frequency, no non-loopback interface means
//! no address.
//!
//! The parsers are plain functions over the file contents so they can be
//! tested against captured text.

use std::cell::RefCell;
use std::fs;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use heapless::Vec as HVec;
use log::debug;
use nix::ifaddrs::getifaddrs;
use nix::net::if_::InterfaceFlags;
use nix::sys::statvfs::statvfs;
use sysdash_common::MetricsProvider;
use sysdash_common::error::MetricsError;
use sysdash_common::metrics::{CpuStats, DiskUsage, Disks, HostInfo, MemoryStats, Usage, truncated};

const PROC_STAT: &str = "/proc/stat";
const PROC_MEMINFO: &str = "/proc/meminfo";
const PROC_UPTIME: &str = "/proc/uptime";
const PROC_MOUNTS: &str = "/proc/mounts";
const PROC_HOSTNAME: &str = "/proc/sys/kernel/hostname";
const CPUFREQ: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq";

/// Shortest span of jiffies a CPU load figure is computed over.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

// =============================================================================
// CPU
// =============================================================================

/// Busy and idle jiffies of one CPU line in `/proc/stat`.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Jiffies {
    pub busy: u64,
    pub idle: u64,
}

impl Jiffies {
    /// Busy share of the time between `earlier` and `self`, in percent.
    pub fn percent_since(
        self,
        earlier: Self,
    ) -> f32 {
        let busy = self.busy.saturating_sub(earlier.busy);
        let idle = self.idle.saturating_sub(earlier.idle);
        let total = busy + idle;
        if total == 0 { 0.0 } else { busy as f32 * 100.0 / total as f32 }
    }
}

/// The aggregate and per-core counters of one `/proc/stat` read.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct CpuTimes {
    pub total: Jiffies,
    pub cores: Vec<Jiffies>,
}

/// Parse the `cpu` lines of `/proc/stat`.
///
/// Idle time counts `idle` and `iowait`; busy time counts `user`, `nice`,
/// `system`, `irq`, `softirq` and `steal`. Guest time is already part of
/// `user`.
pub fn parse_cpu_times(stat: &str) -> Result<CpuTimes, MetricsError> {
    let mut total = None;
    let mut cores = Vec::new();

    for line in stat.lines() {
        let mut fields = line.split_whitespace();
        let Some(label) = fields.next() else { continue };
        if !label.starts_with("cpu") {
            continue;
        }

        let values: Vec<u64> = fields
            .take(8)
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| MetricsError::Malformed("/proc/stat"))?;
        if values.len() < 4 {
            return Err(MetricsError::Malformed("/proc/stat"));
        }
        let field = |i: usize| values.get(i).copied().unwrap_or(0);
        let jiffies = Jiffies {
            busy: field(0) + field(1) + field(2) + field(5) + field(6) + field(7),
            idle: field(3) + field(4),
        };

        if label == "cpu" {
            total = Some(jiffies);
        } else {
            cores.push(jiffies);
        }
    }

    let total = total.ok_or(MetricsError::Malformed("/proc/stat"))?;
    Ok(CpuTimes { total, cores })
}

/// Turns successive `/proc/stat` reads into load figures.
///
/// A new figure is computed only once the stored counters are at least
/// `window` old; younger reads get the last figure again.
#[derive(Debug)]
pub struct CpuSampler {
    window: Duration,
    last: Option<(Instant, CpuTimes, CpuStats)>,
}

impl CpuSampler {
    pub const fn new(window: Duration) -> Self { Self { window, last: None } }

    pub fn update(
        &mut self,
        now: Instant,
        times: CpuTimes,
        frequency_mhz: Option<f32>,
    ) -> CpuStats {
        let previous = match &self.last {
            Some((taken, _, stats)) if now.saturating_duration_since(*taken) < self.window => return stats.clone(),
            Some((_, previous, _)) => previous.clone(),
            None => CpuTimes::default(),
        };

        let mut per_core = HVec::new();
        for (i, core) in times.cores.iter().enumerate() {
            let earlier = previous.cores.get(i).copied().unwrap_or_default();
            if per_core.push(core.percent_since(earlier)).is_err() {
                break;
            }
        }
        let stats = CpuStats {
            total_percent: times.total.percent_since(previous.total),
            per_core,
            frequency_mhz,
        };
        self.last = Some((now, times, stats.clone()));
        stats
    }
}

impl Default for CpuSampler {
    fn default() -> Self { Self::new(CPU_SAMPLE_WINDOW) }
}

/// Current clock of CPU 0 in MHz, from the cpufreq value in kHz.
pub fn parse_cpufreq(khz: &str) -> Option<f32> { khz.trim().parse::<u64>().ok().map(|khz| khz as f32 / 1000.0) }

// =============================================================================
// Memory
// =============================================================================

/// Parse `/proc/meminfo` into RAM and swap usage in bytes.
///
/// RAM `used` is `total - free - buffers - cached - reclaimable slab`, and
/// RAM `free` is what the kernel reports as available.
pub fn parse_meminfo(meminfo: &str) -> Result<MemoryStats, MetricsError> {
    let mut mem_total = None;
    let mut mem_free = None;
    let mut mem_available = None;
    let mut buffers = 0;
    let mut cached = 0;
    let mut reclaimable = 0;
    let mut swap_total = None;
    let mut swap_free = None;

    for line in meminfo.lines() {
        let Some((key, rest)) = line.split_once(':') else { continue };
        let Some(kib) = rest.split_whitespace().next().and_then(|v| v.parse::<u64>().ok()) else {
            continue;
        };
        let bytes = kib * 1024;
        match key {
            "MemTotal" => mem_total = Some(bytes),
            "MemFree" => mem_free = Some(bytes),
            "MemAvailable" => mem_available = Some(bytes),
            "Buffers" => buffers = bytes,
            "Cached" => cached = bytes,
            "SReclaimable" => reclaimable = bytes,
            "SwapTotal" => swap_total = Some(bytes),
            "SwapFree" => swap_free = Some(bytes),
            _ => {}
        }
    }

    let malformed = MetricsError::Malformed("/proc/meminfo");
    let total = mem_total.ok_or(malformed)?;
    let free = mem_free.ok_or(malformed)?;
    let swap_total = swap_total.ok_or(malformed)?;
    let swap_free = swap_free.ok_or(malformed)?;

    let used = total
        .saturating_sub(free)
        .saturating_sub(buffers)
        .saturating_sub(cached)
        .saturating_sub(reclaimable);

    Ok(MemoryStats {
        ram: Usage {
            total,
            used,
            free: mem_available.unwrap_or(free),
        },
        swap: Usage {
            total: swap_total,
            used: swap_total.saturating_sub(swap_free),
            free: swap_free,
        },
    })
}

// =============================================================================
// Uptime and Mounts
// =============================================================================

/// Parse the first field of `/proc/uptime`.
pub fn parse_uptime(uptime: &str) -> Result<Duration, MetricsError> {
    uptime
        .split_whitespace()
        .next()
        .and_then(|secs| secs.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
        .ok_or(MetricsError::Malformed("/proc/uptime"))
}

/// A block device and the first place it is mounted.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Mount {
    pub device: String,
    pub mount_point: String,
}

/// Block device mounts from `/proc/mounts`, first mount of each device only.
pub fn parse_mounts(mounts: &str) -> Vec<Mount> {
    let mut found: Vec<Mount> = Vec::new();
    for line in mounts.lines() {
        let mut fields = line.split_whitespace();
        let (Some(device), Some(mount_point)) = (fields.next(), fields.next()) else {
            continue;
        };
        if !device.starts_with("/dev/") || found.iter().any(|m| m.device == device) {
            continue;
        }
        found.push(Mount {
            device: device.to_owned(),
            mount_point: unescape_octal(mount_point),
        });
    }
    found
}

/// Undo the `\ooo` escapes the kernel uses for spaces and tabs in paths.
fn unescape_octal(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\'
            && let Some(code) = bytes.get(i + 1..i + 4).and_then(|digits| {
                std::str::from_utf8(digits).ok().and_then(|d| u8::from_str_radix(d, 8).ok())
            })
        {
            out.push(code);
            i += 4;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

// =============================================================================
// Provider
// =============================================================================

/// [`MetricsProvider`] backed by the running Linux kernel.
#[derive(Default)]
pub struct ProcMetrics {
    cpu: RefCell<CpuSampler>,
}

impl ProcMetrics {
    pub fn new() -> Self { Self::default() }
}

fn read(
    path: &'static str,
    what: &'static str,
) -> Result<String, MetricsError> {
    fs::read_to_string(path).map_err(|err| {
        debug!("reading {path}: {err}");
        MetricsError::Unavailable(what)
    })
}

/// First IPv4 address of an interface that is up and not loopback.
fn first_ipv4() -> Option<Ipv4Addr> {
    let addrs = getifaddrs().map_err(|err| debug!("getifaddrs: {err}")).ok()?;
    addrs
        .filter(|ifa| ifa.flags.contains(InterfaceFlags::IFF_UP) && !ifa.flags.contains(InterfaceFlags::IFF_LOOPBACK))
        .find_map(|ifa| {
            ifa.address
                .as_ref()
                .and_then(|addr| addr.as_sockaddr_in())
                .map(|sin| Ipv4Addr::from(sin.ip()))
        })
}

fn disk_usage(mount: &Mount) -> Option<Usage> {
    let stat = statvfs(mount.mount_point.as_str())
        .map_err(|err| debug!("statvfs {}: {err}", mount.mount_point))
        .ok()?;
    let fragment = u64::from(stat.fragment_size());
    let blocks = u64::from(stat.blocks());
    let free = u64::from(stat.blocks_free());
    let available = u64::from(stat.blocks_available());
    Some(Usage {
        total: blocks * fragment,
        used: blocks.saturating_sub(free) * fragment,
        free: available * fragment,
    })
}

impl MetricsProvider for ProcMetrics {
    fn host(&self) -> Result<HostInfo, MetricsError> {
        let hostname = read(PROC_HOSTNAME, "hostname")?;
        let uptime = parse_uptime(&read(PROC_UPTIME, "uptime")?)?;
        Ok(HostInfo {
            hostname: truncated(hostname.trim()),
            ipv4: first_ipv4(),
            uptime,
        })
    }

    fn cpu(&self) -> Result<CpuStats, MetricsError> {
        let times = parse_cpu_times(&read(PROC_STAT, "cpu")?)?;
        let frequency_mhz = fs::read_to_string(CPUFREQ).ok().and_then(|khz| parse_cpufreq(&khz));
        Ok(self.cpu.borrow_mut().update(Instant::now(), times, frequency_mhz))
    }

    fn memory(&self) -> Result<MemoryStats, MetricsError> { parse_meminfo(&read(PROC_MEMINFO, "memory")?) }

    fn disks(&self) -> Result<Disks, MetricsError> {
        let mounts = parse_mounts(&read(PROC_MOUNTS, "mounts")?);
        let mut disks = Disks::new();
        for mount in &mounts {
            let Some(usage) = disk_usage(mount) else { continue };
            let disk = DiskUsage {
                device: truncated(&mount.device),
                usage,
            };
            if disks.push(disk).is_err() {
                break;
            }
        }
        Ok(disks)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
