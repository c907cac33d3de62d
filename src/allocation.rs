//! Monthly contribution allocation across goals
//!
//! An `Allocation` is one scenario: goal id -> monthly contribution. It is an
//! immutable value; every change produces a new allocation.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::MIN_MEANINGFUL_CONTRIBUTION;
use crate::error::{PlannerError, Result};
use crate::money::Money;

/// Serialized as a JSON object of goal id to amount. Decoding goes through
/// [`Allocation::from_entries`], so negative amounts and repeated keys are
/// rejected there as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Allocation {
    amounts: BTreeMap<String, Money>,
}

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (goal id, amount) pairs, rejecting negative amounts and
    /// repeated goal ids.
    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Money)>,
        K: Into<String>,
    {
        let mut amounts = BTreeMap::new();

        for (goal_id, amount) in entries {
            let goal_id = goal_id.into();
            check_amount(&goal_id, amount)?;
            if amounts.contains_key(&goal_id) {
                return Err(PlannerError::DuplicateAllocation(goal_id));
            }
            amounts.insert(goal_id, amount);
        }

        Ok(Self { amounts })
    }

    /// Monthly contribution for a goal; zero when the goal has no entry
    pub fn amount_for(&self, goal_id: &str) -> Money {
        self.amounts.get(goal_id).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, goal_id: &str) -> bool {
        self.amounts.contains_key(goal_id)
    }

    pub fn total_allocated(&self) -> Money {
        self.amounts.values().copied().sum()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Money> {
        self.amounts.iter()
    }

    pub fn goal_ids(&self) -> impl Iterator<Item = &str> {
        self.amounts.keys().map(String::as_str)
    }

    /// Goals receiving at least the minimum meaningful contribution
    pub fn funded_goal_ids(&self) -> Vec<&str> {
        self.amounts
            .iter()
            .filter(|(_, amount)| **amount >= MIN_MEANINGFUL_CONTRIBUTION)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Copy of this allocation with one entry set to `amount`
    pub fn with_amount(&self, goal_id: impl Into<String>, amount: Money) -> Result<Self> {
        let goal_id = goal_id.into();
        check_amount(&goal_id, amount)?;

        let mut amounts = self.amounts.clone();
        amounts.insert(goal_id, amount);
        Ok(Self { amounts })
    }

    /// Copy of this allocation with one entry removed
    pub fn without(&self, goal_id: &str) -> Self {
        let mut amounts = self.amounts.clone();
        amounts.remove(goal_id);
        Self { amounts }
    }

    /// Same as `with_amount` without the sign check. Callers guarantee the
    /// amount is non-negative.
    pub(crate) fn replaced(&self, goal_id: &str, amount: Money) -> Self {
        let mut amounts = self.amounts.clone();
        amounts.insert(goal_id.to_string(), amount);
        Self { amounts }
    }
}

impl<'a> IntoIterator for &'a Allocation {
    type Item = (&'a String, &'a Money);
    type IntoIter = btree_map::Iter<'a, String, Money>;

    fn into_iter(self) -> Self::IntoIter {
        self.amounts.iter()
    }
}

impl<'de> Deserialize<'de> for Allocation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AllocationVisitor)
    }
}

struct AllocationVisitor;

impl<'de> Visitor<'de> for AllocationVisitor {
    type Value = Allocation;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of goal id to monthly contribution")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Allocation, A::Error>
    where
        A: MapAccess<'de>,
    {
        // Keep every entry so repeated keys reach from_entries
        let mut entries: Vec<(String, Money)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry()? {
            entries.push(entry);
        }
        Allocation::from_entries(entries).map_err(de::Error::custom)
    }
}

fn check_amount(goal_id: &str, amount: Money) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(PlannerError::NegativeAllocation {
            goal_id: goal_id.to_string(),
            amount,
        });
    }
    Ok(())
}
