#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub phase_time: Duration,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
}

/// 記錄每個階段的耗時與記憶體用量
#[cfg(feature = "cli")]
pub struct RunMonitor {
    system: Option<(System, Pid)>,
    started: Instant,
    phase_started: Instant,
    peak_memory_mb: u64,
    phases: Vec<PhaseStats>,
}

#[cfg(feature = "cli")]
impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let system = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => {
                    let mut system = System::new_with_specifics(RefreshKind::everything());
                    system.refresh_all();
                    Some((system, pid))
                }
                Err(e) => {
                    tracing::warn!("⚠️ Resource monitoring unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let now = Instant::now();
        Self {
            system,
            started: now,
            phase_started: now,
            peak_memory_mb: 0,
            phases: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.system.is_some()
    }

    fn memory_mb(&mut self) -> Option<u64> {
        let (system, pid) = self.system.as_mut()?;
        system.refresh_all();
        let memory_mb = system.process(*pid)?.memory() / 1024 / 1024;
        self.peak_memory_mb = self.peak_memory_mb.max(memory_mb);
        Some(memory_mb)
    }

    pub fn phase_done(&mut self, phase: &str) {
        let phase_time = self.phase_started.elapsed();
        self.phase_started = Instant::now();

        let Some(memory_usage_mb) = self.memory_mb() else {
            return;
        };

        tracing::info!(
            "📊 {} - Time: {:?}, Memory: {}MB, Peak: {}MB",
            phase,
            phase_time,
            memory_usage_mb,
            self.peak_memory_mb
        );
        self.phases.push(PhaseStats {
            phase: phase.to_string(),
            phase_time,
            memory_usage_mb,
            peak_memory_mb: self.peak_memory_mb,
        });
    }

    pub fn phases(&self) -> &[PhaseStats] {
        &self.phases
    }

    pub fn finish(&self) {
        if self.is_enabled() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                self.started.elapsed(),
                self.peak_memory_mb
            );
        }
    }
}

// 為非CLI環境提供空實現
#[cfg(not(feature = "cli"))]
pub struct RunMonitor;

#[cfg(not(feature = "cli"))]
impl RunMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn phase_done(&mut self, _phase: &str) {}

    pub fn finish(&self) {}
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_records_nothing() {
        let mut monitor = RunMonitor::new(false);
        monitor.phase_done("extract");
        assert!(!monitor.is_enabled());
        assert!(monitor.phases().is_empty());
    }

    #[test]
    fn test_enabled_monitor_records_phases() {
        let mut monitor = RunMonitor::new(true);
        monitor.phase_done("extract");
        monitor.phase_done("load");
        let names: Vec<_> = monitor.phases().iter().map(|p| p.phase.as_str()).collect();
        assert!(names.is_empty() || names == vec!["extract", "load"]);
    }
}
