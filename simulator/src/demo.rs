//! Synthetic metrics for the simulator.
//!
//! Values drift along slow sine waves of the time since start, so every page
//! changes visibly while it is on screen.

use core::net::Ipv4Addr;
use std::time::{Duration, Instant};

use heapless::Vec;
use sysdash_common::MetricsProvider;
use sysdash_common::error::MetricsError;
use sysdash_common::metrics::{CpuStats, DiskUsage, Disks, HostInfo, MemoryStats, Usage, truncated};

const GIB: u64 = 1 << 30;
const MIB: u64 = 1 << 20;

/// Uptime shown at simulator start.
const BOOT_OFFSET: Duration = Duration::from_secs(3 * 24 * 3600 + 4 * 3600 + 5 * 60);

const RAM_TOTAL: u64 = 4 * GIB;
const SWAP_TOTAL: u64 = 512 * MIB;

/// A four-core board with 4 GiB of RAM and an SD card plus a USB disk.
pub struct DemoMetrics {
    start: Instant,
}

impl DemoMetrics {
    pub fn new() -> Self { Self { start: Instant::now() } }

    fn t(&self) -> f32 { self.start.elapsed().as_secs_f32() }
}

fn fake_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

fn usage(
    total: u64,
    fraction: f32,
) -> Usage {
    let used = (total as f64 * f64::from(fraction.clamp(0.0, 1.0))) as u64;
    Usage {
        total,
        used,
        free: total - used,
    }
}

impl MetricsProvider for DemoMetrics {
    fn host(&self) -> Result<HostInfo, MetricsError> {
        Ok(HostInfo {
            hostname: truncated("raspberrypi"),
            ipv4: Some(Ipv4Addr::new(192, 168, 1, 42)),
            uptime: BOOT_OFFSET + self.start.elapsed(),
        })
    }

    fn cpu(&self) -> Result<CpuStats, MetricsError> {
        let t = self.t();
        let mut per_core = Vec::new();
        for core in 0..4u8 {
            let load = fake_signal(t + f32::from(core) * 1.3, 2.0, 95.0, 0.4 + f32::from(core) * 0.15);
            per_core.push(load).ok();
        }
        let total = per_core.iter().sum::<f32>() / per_core.len() as f32;

        Ok(CpuStats {
            total_percent: total,
            per_core,
            frequency_mhz: Some(if total > 50.0 { 1800.0 } else { 600.0 }),
        })
    }

    fn memory(&self) -> Result<MemoryStats, MetricsError> {
        let t = self.t();
        Ok(MemoryStats {
            ram: usage(RAM_TOTAL, fake_signal(t, 0.2, 0.85, 0.1)),
            swap: usage(SWAP_TOTAL, fake_signal(t, 0.0, 0.3, 0.05)),
        })
    }

    fn disks(&self) -> Result<Disks, MetricsError> {
        let t = self.t();
        let mut disks = Disks::new();
        disks
            .push(DiskUsage {
                device: truncated("/dev/mmcblk0p2"),
                usage: usage(29 * GIB, fake_signal(t, 0.40, 0.42, 0.02)),
            })
            .ok();
        disks
            .push(DiskUsage {
                device: truncated("/dev/mmcblk0p1"),
                usage: usage(512 * MIB, 0.12),
            })
            .ok();
        disks
            .push(DiskUsage {
                device: truncated("/dev/sda1"),
                usage: usage(116 * GIB, 0.73),
            })
            .ok();
        Ok(disks)
    }
}
