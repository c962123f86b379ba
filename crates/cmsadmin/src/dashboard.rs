//! Read-only dashboard of aggregate counts.

use crate::models::DashboardStats;

/// Latest stats pushed by the coordinator.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    stats: Option<DashboardStats>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, stats: DashboardStats) {
        self.stats = Some(stats);
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    /// Label/value rows for display; empty until the first update.
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        let Some(stats) = &self.stats else {
            return Vec::new();
        };
        vec![
            ("Jobs", format!("{} 个", stats.jobs_count)),
            ("Products", format!("{} 个", stats.products_count)),
            ("Cases", format!("{} 个", stats.cases_count)),
            ("Recruitment quota", format!("{} 人", stats.total_quota)),
            ("Server time", stats.server_time.clone()),
        ]
    }
}
