//! Aggregate counts shown on the dashboard.

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};

use super::{lenient_string, CaseStudy, Job, Product};

/// Display-only aggregate counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default, alias = "totalJobsCount", deserialize_with = "lenient_count")]
    pub jobs_count: u64,
    #[serde(default, alias = "totalProductsCount", deserialize_with = "lenient_count")]
    pub products_count: u64,
    #[serde(default, alias = "totalCasesCount", deserialize_with = "lenient_count")]
    pub cases_count: u64,
    #[serde(
        default,
        alias = "totalRecruitmentQuota",
        deserialize_with = "lenient_count"
    )]
    pub total_quota: u64,
    #[serde(default, alias = "serverTime", deserialize_with = "lenient_string")]
    pub server_time: String,
}

impl DashboardStats {
    /// Derives the counts from record lists, for responses that carry no stats.
    pub fn from_records(jobs: &[Job], products: &[Product], cases: &[CaseStudy]) -> Self {
        Self {
            jobs_count: jobs.len() as u64,
            products_count: products.len() as u64,
            cases_count: cases.len() as u64,
            total_quota: jobs.iter().map(|job| quota_value(&job.quota)).sum(),
            server_time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Numeric value of a free-text quota: its leading digits, or 0.
pub fn quota_value(quota: &str) -> u64 {
    let digits: String = quota
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// PHP backends send counts as numbers or numeric strings.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .ok_or_else(|| D::Error::custom(format!("invalid count: {}", n))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid count: '{}'", s))),
        other => Err(D::Error::custom(format!("invalid count: {}", other))),
    }
}
