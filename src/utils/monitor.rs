#[cfg(feature = "cli")]
use std::sync::atomic::{AtomicU64, Ordering};
#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct SessionStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub discoveries: u64,
    pub elapsed_time: Duration,
}

/// 以 sysinfo 追蹤本次互動 session 的資源用量與抓取次數
#[cfg(feature = "cli")]
pub struct SessionMonitor {
    system: Mutex<System>,
    pid: Pid,
    start_time: Instant,
    peak_memory: AtomicU64,
    discoveries: AtomicU64,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SessionMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        let pid = sysinfo::get_current_pid().expect("Failed to get current PID");
        system.refresh_all();

        Self {
            system: Mutex::new(system),
            pid,
            start_time: Instant::now(),
            peak_memory: AtomicU64::new(0),
            discoveries: AtomicU64::new(0),
            enabled,
        }
    }

    pub fn record_discovery(&self) {
        self.discoveries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> Option<SessionStats> {
        if !self.enabled {
            return None;
        }

        let mut system = self.system.lock().ok()?;
        system.refresh_all();

        let process = system.process(self.pid)?;
        let memory_mb = process.memory() / 1024 / 1024;

        let peak = self.peak_memory.fetch_max(memory_mb, Ordering::Relaxed);

        Some(SessionStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            peak_memory_mb: peak.max(memory_mb),
            discoveries: self.discoveries.load(Ordering::Relaxed),
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Session stats - Discoveries: {}, Time: {:?}, Peak memory: {}MB, CPU: {:.1}%",
                stats.discoveries,
                stats.elapsed_time,
                stats.peak_memory_mb,
                stats.cpu_usage
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SessionMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 為非CLI環境提供空實現
#[cfg(not(feature = "cli"))]
pub struct SessionMonitor;

#[cfg(not(feature = "cli"))]
impl SessionMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn record_discovery(&self) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
