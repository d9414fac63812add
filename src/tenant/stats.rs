//! Dashboard statistics for a tenant.
//!
//! Demo data only. Handlers depend on the `TenantStatsProvider` trait so
//! tests can swap in fixed numbers.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::Serialize;

/// Storage quota shown on every dashboard, in GB.
pub const STORAGE_TOTAL_GB: f64 = 10.0;

/// Headline numbers for a tenant dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenantStats {
    pub total_users: u32,
    pub active_sessions: u32,
    pub storage_used_gb: f64,
    pub storage_total_gb: f64,
}

/// Summary shown on the tenant home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeSummary {
    pub user_count: u32,
    /// Unix seconds.
    pub last_activity: u64,
}

/// One line of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub id: u32,
    pub kind: &'static str,
    pub message: &'static str,
    pub time: &'static str,
}

/// Source of dashboard data.
pub trait TenantStatsProvider: Send + Sync {
    fn stats(&self, tenant: &str) -> TenantStats;

    fn home_summary(&self, tenant: &str) -> HomeSummary;

    fn recent_activity(&self, _tenant: &str) -> Vec<ActivityEntry> {
        default_activity()
    }
}

fn default_activity() -> Vec<ActivityEntry> {
    vec![
        ActivityEntry { id: 1, kind: "user", message: "New user registration", time: "2 min ago" },
        ActivityEntry { id: 2, kind: "file", message: "File uploaded", time: "15 min ago" },
        ActivityEntry { id: 3, kind: "payment", message: "Payment received", time: "1 hour ago" },
        ActivityEntry { id: 4, kind: "system", message: "System backup completed", time: "2 hours ago" },
    ]
}

/// Fresh random numbers on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomStatsProvider;

impl TenantStatsProvider for RandomStatsProvider {
    fn stats(&self, _tenant: &str) -> TenantStats {
        let mut rng = rand::thread_rng();
        TenantStats {
            total_users: rng.gen_range(500..2500),
            active_sessions: rng.gen_range(200..1000),
            storage_used_gb: rng.gen_range(1.0..9.0),
            storage_total_gb: STORAGE_TOTAL_GB,
        }
    }

    fn home_summary(&self, _tenant: &str) -> HomeSummary {
        HomeSummary {
            user_count: rand::thread_rng().gen_range(100..1100),
            last_activity: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        }
    }
}

/// Always returns the same stats.
#[derive(Debug, Clone)]
pub struct FixedStatsProvider {
    pub stats: TenantStats,
    pub home: HomeSummary,
}

impl FixedStatsProvider {
    pub fn new(total_users: u32, active_sessions: u32, storage_used_gb: f64) -> Self {
        Self {
            stats: TenantStats {
                total_users,
                active_sessions,
                storage_used_gb,
                storage_total_gb: STORAGE_TOTAL_GB,
            },
            home: HomeSummary {
                user_count: total_users,
                last_activity: 0,
            },
        }
    }

    pub fn with_last_activity(mut self, last_activity: u64) -> Self {
        self.home.last_activity = last_activity;
        self
    }
}

impl TenantStatsProvider for FixedStatsProvider {
    fn stats(&self, _tenant: &str) -> TenantStats {
        self.stats.clone()
    }

    fn home_summary(&self, _tenant: &str) -> HomeSummary {
        self.home.clone()
    }
}
