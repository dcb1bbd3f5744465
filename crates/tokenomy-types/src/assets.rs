//! Per-asset balances of an account

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::decimal::DecimalValue;
use crate::error::MalformedNumber;

/// Key prefix the exchange uses for held (locked) balances
pub const FROZEN_PREFIX: &str = "frozen_";

/// Available and frozen balances keyed by asset ticker
///
/// Built from the raw balance map the exchange returns: `frozen_<asset>`
/// entries go to [`frozen_balances`](Self::frozen_balances) under `<asset>`,
/// everything else goes to [`balances`](Self::balances).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserAssets {
    /// Balance available for trading or withdrawal
    pub balances: BTreeMap<String, DecimalValue>,
    /// Balance held by open orders or pending withdrawals
    pub frozen_balances: BTreeMap<String, DecimalValue>,
}

impl UserAssets {
    /// Split a raw balance map into available and frozen balances
    pub fn from_raw<I, K>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, DecimalValue)>,
        K: Into<String>,
    {
        let mut assets = Self::default();

        for (key, value) in raw {
            let key = key.into();
            match key.strip_prefix(FROZEN_PREFIX) {
                Some(asset) => {
                    assets.frozen_balances.insert(asset.to_string(), value);
                }
                None => {
                    assets.balances.insert(key, value);
                }
            }
        }

        assets
    }

    /// Like [`from_raw`](Self::from_raw) for string values, failing on the
    /// first literal that is not a decimal
    pub fn try_from_strings<I, K, V>(raw: I) -> Result<Self, MalformedNumber>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let parsed = raw
            .into_iter()
            .map(|(k, v)| DecimalValue::parse(v.as_ref()).map(|d| (k.into(), d)))
            .collect::<Result<Vec<(String, DecimalValue)>, _>>()?;

        Ok(Self::from_raw(parsed))
    }

    /// Available balance of an asset (zero when absent)
    pub fn available(&self, asset: &str) -> DecimalValue {
        self.balances.get(asset).cloned().unwrap_or_default()
    }

    /// Frozen balance of an asset (zero when absent)
    pub fn frozen(&self, asset: &str) -> DecimalValue {
        self.frozen_balances.get(asset).cloned().unwrap_or_default()
    }

    /// Available plus frozen balance of an asset
    pub fn total(&self, asset: &str) -> DecimalValue {
        self.available(asset) + self.frozen(asset)
    }

    /// Assets with a non-zero available or frozen balance
    pub fn non_zero_assets(&self) -> Vec<&str> {
        let mut assets: Vec<&str> = self
            .balances
            .iter()
            .chain(self.frozen_balances.iter())
            .filter(|(_, v)| !v.is_zero())
            .map(|(k, _)| k.as_str())
            .collect();
        assets.sort_unstable();
        assets.dedup();
        assets
    }
}

impl<'de> Deserialize<'de> for UserAssets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, DecimalValue>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw))
    }
}
