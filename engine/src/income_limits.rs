//! Area Median Income Limits
//!
//! Several housing-oriented programs cap eligibility at a percentage of the
//! county's Area Median Income (AMI). The authoritative numbers come from an
//! external service; the engine consumes them only through the
//! `IncomeLimits` trait so that calculators stay testable and a lookup
//! failure degrades to a failed "income limit unknown" condition instead of
//! aborting the batch.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Supported AMI percentage brackets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmiPercent {
    P30,
    P50,
    P80,
}

impl AmiPercent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmiPercent::P30 => "30%",
            AmiPercent::P50 => "50%",
            AmiPercent::P80 => "80%",
        }
    }
}

/// Errors raised by income-limit lookups
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IncomeLimitError {
    #[error("income limit service unavailable: {0}")]
    Unavailable(String),

    #[error("no income limit data for county '{0}'")]
    UnknownCounty(String),

    #[error("no income limit data for household size {0}")]
    UnknownHouseholdSize(u32),
}

/// Read-only AMI limit provider
pub trait IncomeLimits {
    /// Annual income limit in dollars for `county` at `percent` AMI, for a
    /// household of `household_size`, in calculation period `period`
    fn ami_limit(
        &self,
        county: &str,
        percent: AmiPercent,
        period: &str,
        household_size: u32,
    ) -> Result<i64, IncomeLimitError>;
}

/// Table-backed provider for jurisdictions shipping their own AMI tables
///
/// Limits are keyed by (county, percent); each entry is a by-household-size
/// vector (index 0 = household of one).
#[derive(Debug, Default)]
pub struct StaticIncomeLimits {
    tables: HashMap<(String, AmiPercent), Vec<i64>>,
}

impl StaticIncomeLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, county: &str, percent: AmiPercent, by_size: Vec<i64>) -> Self {
        self.tables.insert((county.to_string(), percent), by_size);
        self
    }
}

impl IncomeLimits for StaticIncomeLimits {
    fn ami_limit(
        &self,
        county: &str,
        percent: AmiPercent,
        _period: &str,
        household_size: u32,
    ) -> Result<i64, IncomeLimitError> {
        let table = self
            .tables
            .get(&(county.to_string(), percent))
            .ok_or_else(|| IncomeLimitError::UnknownCounty(county.to_string()))?;

        if household_size == 0 {
            return Err(IncomeLimitError::UnknownHouseholdSize(0));
        }
        table
            .get(household_size as usize - 1)
            .copied()
            .ok_or(IncomeLimitError::UnknownHouseholdSize(household_size))
    }
}

/// Read-through cache over another provider
///
/// Successful lookups are held for the TTL; failures are not cached, so a
/// transient outage heals on the next evaluation.
pub struct CachedIncomeLimits<P> {
    inner: P,
    ttl: Duration,
    entries: Mutex<HashMap<(String, AmiPercent, String, u32), (i64, Instant)>>,
}

impl<P: IncomeLimits> CachedIncomeLimits<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<P: IncomeLimits> IncomeLimits for CachedIncomeLimits<P> {
    fn ami_limit(
        &self,
        county: &str,
        percent: AmiPercent,
        period: &str,
        household_size: u32,
    ) -> Result<i64, IncomeLimitError> {
        let key = (
            county.to_string(),
            percent,
            period.to_string(),
            household_size,
        );

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((value, stored_at)) = entries.get(&key) {
            if stored_at.elapsed() < self.ttl {
                return Ok(*value);
            }
        }

        let value = self.inner.ami_limit(county, percent, period, household_size)?;
        entries.insert(key, (value, Instant::now()));
        Ok(value)
    }
}
