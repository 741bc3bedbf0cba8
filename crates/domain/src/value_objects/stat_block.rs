//! BoundedStat, UnboundedStat and ResourcePool - player stat storage
//!
//! Every mutation is a signed delta clamped in one step, so no caller can
//! observe a value outside its range.

use serde::{Deserialize, Serialize};

use super::stat::StatKind;
use crate::error::DomainError;

/// A `(current, max)` pair with `0 <= current <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoundedStatRaw", into = "BoundedStatRaw")]
pub struct BoundedStat {
    current: i32,
    max: i32,
}

#[derive(Serialize, Deserialize)]
struct BoundedStatRaw {
    current: i32,
    max: i32,
}

impl BoundedStat {
    pub fn new(current: i32, max: i32) -> Result<Self, DomainError> {
        if max < 0 {
            return Err(DomainError::validation(format!(
                "Bounded stat max cannot be negative: {}",
                max
            )));
        }
        if !(0..=max).contains(&current) {
            return Err(DomainError::validation(format!(
                "Bounded stat current {} outside [0, {}]",
                current, max
            )));
        }
        Ok(Self { current, max })
    }

    /// A stat at its maximum.
    pub fn full(max: i32) -> Result<Self, DomainError> {
        Self::new(max, max)
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.current == self.max
    }

    /// Apply `delta`, clamped into `[0, max]`. Returns the new value.
    pub fn apply_delta(&mut self, delta: i32) -> i32 {
        let next = (i64::from(self.current) + i64::from(delta)).clamp(0, i64::from(self.max));
        // clamped into [0, max] so it fits back into i32
        self.current = next as i32;
        self.current
    }
}

impl TryFrom<BoundedStatRaw> for BoundedStat {
    type Error = DomainError;

    fn try_from(raw: BoundedStatRaw) -> Result<Self, Self::Error> {
        Self::new(raw.current, raw.max)
    }
}

impl From<BoundedStat> for BoundedStatRaw {
    fn from(stat: BoundedStat) -> Self {
        Self {
            current: stat.current,
            max: stat.max,
        }
    }
}

/// A non-negative counter with no ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UnboundedStat(i64);

impl UnboundedStat {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value < 0 {
            return Err(DomainError::validation(format!(
                "Unbounded stat cannot be negative: {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Apply `delta`, flooring at 0. Returns the new value.
    pub fn apply_delta(&mut self, delta: i64) -> i64 {
        self.0 = self.0.saturating_add(delta).max(0);
        self.0
    }
}

impl TryFrom<i64> for UnboundedStat {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnboundedStat> for i64 {
    fn from(stat: UnboundedStat) -> i64 {
        stat.0
    }
}

/// The player's stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePool {
    blood_pool: BoundedStat,
    humanity: BoundedStat,
    influence: BoundedStat,
    resources: UnboundedStat,
    contacts: UnboundedStat,
}

impl Default for ResourcePool {
    /// Fresh-run values: blood (10,10), humanity (7,10), influence (3,10),
    /// resources 25000, contacts 5.
    fn default() -> Self {
        Self {
            blood_pool: BoundedStat { current: 10, max: 10 },
            humanity: BoundedStat { current: 7, max: 10 },
            influence: BoundedStat { current: 3, max: 10 },
            resources: UnboundedStat(25_000),
            contacts: UnboundedStat(5),
        }
    }
}

impl ResourcePool {
    pub fn new(
        blood_pool: BoundedStat,
        humanity: BoundedStat,
        influence: BoundedStat,
        resources: UnboundedStat,
        contacts: UnboundedStat,
    ) -> Self {
        Self {
            blood_pool,
            humanity,
            influence,
            resources,
            contacts,
        }
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Builder-style overrides (used when seeding a run)
    // ──────────────────────────────────────────────────────────────────────────

    pub fn with_resources(mut self, resources: UnboundedStat) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_contacts(mut self, contacts: UnboundedStat) -> Self {
        self.contacts = contacts;
        self
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Read accessors
    // ──────────────────────────────────────────────────────────────────────────

    pub fn blood_pool(&self) -> BoundedStat {
        self.blood_pool
    }

    pub fn humanity(&self) -> BoundedStat {
        self.humanity
    }

    pub fn influence(&self) -> BoundedStat {
        self.influence
    }

    pub fn resources(&self) -> UnboundedStat {
        self.resources
    }

    pub fn contacts(&self) -> UnboundedStat {
        self.contacts
    }

    /// Current value of any stat.
    pub fn get(&self, kind: StatKind) -> i64 {
        match kind {
            StatKind::BloodPool => i64::from(self.blood_pool.current()),
            StatKind::Humanity => i64::from(self.humanity.current()),
            StatKind::Influence => i64::from(self.influence.current()),
            StatKind::Resources => self.resources.value(),
            StatKind::Contacts => self.contacts.value(),
        }
    }

    /// Maximum for bounded stats, `None` for unbounded ones.
    pub fn max(&self, kind: StatKind) -> Option<i64> {
        match kind {
            StatKind::BloodPool => Some(i64::from(self.blood_pool.max())),
            StatKind::Humanity => Some(i64::from(self.humanity.max())),
            StatKind::Influence => Some(i64::from(self.influence.max())),
            StatKind::Resources | StatKind::Contacts => None,
        }
    }

    pub fn get_named(&self, name: &str) -> Result<i64, DomainError> {
        let kind: StatKind = name.parse()?;
        Ok(self.get(kind))
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Mutation
    // ──────────────────────────────────────────────────────────────────────────

    /// Apply a signed delta with the clamp rule for the stat's kind. Returns the new value.
    pub fn apply_delta(&mut self, kind: StatKind, delta: i64) -> i64 {
        match kind {
            StatKind::BloodPool => i64::from(self.blood_pool.apply_delta(saturate_i32(delta))),
            StatKind::Humanity => i64::from(self.humanity.apply_delta(saturate_i32(delta))),
            StatKind::Influence => i64::from(self.influence.apply_delta(saturate_i32(delta))),
            StatKind::Resources => self.resources.apply_delta(delta),
            StatKind::Contacts => self.contacts.apply_delta(delta),
        }
    }

    /// Resolve `name` first; an unknown name mutates nothing.
    pub fn apply_named(&mut self, name: &str, delta: i64) -> Result<i64, DomainError> {
        let kind: StatKind = name.parse()?;
        Ok(self.apply_delta(kind, delta))
    }
}

// Bounded stats never exceed i32 range, so saturating the delta cannot change the clamped result.
fn saturate_i32(delta: i64) -> i32 {
    delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_stat_rejects_out_of_range_construction() {
        assert!(BoundedStat::new(11, 10).is_err());
        assert!(BoundedStat::new(-1, 10).is_err());
        assert!(BoundedStat::new(0, -1).is_err());
        assert!(BoundedStat::new(0, 0).is_ok());
    }

    #[test]
    fn blood_pool_never_goes_negative() {
        let mut blood = BoundedStat::full(10).unwrap();
        for _ in 0..20 {
            blood.apply_delta(-1);
            assert!((0..=10).contains(&blood.current()));
        }
        assert_eq!(blood, BoundedStat::new(0, 10).unwrap());
    }

    #[test]
    fn bounded_stat_clamps_at_max() {
        let mut humanity = BoundedStat::new(7, 10).unwrap();
        assert_eq!(humanity.apply_delta(i32::MAX), 10);
        assert_eq!(humanity.apply_delta(i32::MIN), 0);
    }

    #[test]
    fn unbounded_stat_floors_at_zero() {
        let mut resources = UnboundedStat::new(500).unwrap();
        assert_eq!(resources.apply_delta(-1000), 0);
        assert_eq!(resources.apply_delta(5000), 5000);
    }

    #[test]
    fn pool_apply_named_rejects_unknown_without_mutation() {
        let mut pool = ResourcePool::default();
        let before = pool.clone();
        assert_eq!(
            pool.apply_named("willpower", 3),
            Err(DomainError::UnknownStat("willpower".to_string()))
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn pool_apply_named_routes_to_kind() {
        let mut pool = ResourcePool::default();
        assert_eq!(pool.apply_named("bloodPool", 5).unwrap(), 10);
        assert_eq!(pool.apply_named("humanity", -2).unwrap(), 5);
        assert_eq!(pool.apply_named("contacts", 1).unwrap(), 6);
        assert_eq!(pool.get(StatKind::Resources), 25_000);
        assert_eq!(pool.max(StatKind::Influence), Some(10));
        assert_eq!(pool.max(StatKind::Resources), None);
    }

    #[test]
    fn pool_deserialization_enforces_invariants() {
        let json = r#"{
            "bloodPool": {"current": 12, "max": 10},
            "humanity": {"current": 7, "max": 10},
            "influence": {"current": 3, "max": 10},
            "resources": 100,
            "contacts": 1
        }"#;
        assert!(serde_json::from_str::<ResourcePool>(json).is_err());

        let json = json.replace("\"current\": 12", "\"current\": 9");
        let pool: ResourcePool = serde_json::from_str(&json).unwrap();
        assert_eq!(pool.blood_pool().current(), 9);

        let negative = json.replace("\"resources\": 100", "\"resources\": -5");
        assert!(serde_json::from_str::<ResourcePool>(&negative).is_err());
    }
}
