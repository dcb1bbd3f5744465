//! Trading pairs and the registry used to validate them
//!
//! Pair identifiers are opaque (`ten_btc`). The registry is the only thing
//! that decides validity; identifiers are never split or parsed. The base and
//! quote tickers of a pair come from the same static table as its id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::InvalidPairName;

/// Identifiers of the pairs supported by the exchange
pub mod pairs {
    pub const BCHABC_BTC: &str = "bchabc_btc";
    pub const BCHSV_BTC: &str = "bchsv_btc";
    pub const BTT_BTC: &str = "btt_btc";
    pub const EOS_BTC: &str = "eos_btc";
    pub const ETC_BTC: &str = "etc_btc";
    pub const ETH_BTC: &str = "eth_btc";
    pub const HNST_BTC: &str = "hnst_btc";
    pub const LTC_BTC: &str = "ltc_btc";
    pub const LRN_BTC: &str = "lrn_btc";
    pub const LYFE_BTC: &str = "lyfe_btc";
    pub const XMR_BTC: &str = "xmr_btc";
    pub const ONT_BTC: &str = "ont_btc";
    pub const PXG_BTC: &str = "pxg_btc";
    pub const NPXS_BTC: &str = "npxs_btc";
    pub const SIX_BTC: &str = "six_btc";
    pub const XLM_BTC: &str = "xlm_btc";
    pub const STQ_BTC: &str = "stq_btc";
    pub const TEN_BTC: &str = "ten_btc";
    pub const TRX_BTC: &str = "trx_btc";
    pub const VEX_BTC: &str = "vex_btc";
    pub const ZEC_BTC: &str = "zec_btc";

    pub const BTC_IDK: &str = "btc_idk";
    pub const USDT_IDK: &str = "usdt_idk";

    pub const HART_ETH: &str = "hart_eth";
    pub const INX_ETH: &str = "inx_eth";
    pub const NPXS_ETH: &str = "npxs_eth";
    pub const STQ_ETH: &str = "stq_eth";
    pub const TEN_ETH: &str = "ten_eth";
    pub const TRX_ETH: &str = "trx_eth";
    pub const VEX_ETH: &str = "vex_eth";

    pub const BTC_USDT: &str = "btc_usdt";
    pub const DAX_USDT: &str = "dax_usdt";
    pub const ETH_USDT: &str = "eth_usdt";
    pub const TEN_USDT: &str = "ten_usdt";

    pub const SIX_TEN: &str = "six_ten";
    pub const STQ_TEN: &str = "stq_ten";
}

/// (id, base, quote)
const SUPPORTED: &[(&str, &str, &str)] = &[
    (pairs::BCHABC_BTC, "bchabc", "btc"),
    (pairs::BCHSV_BTC, "bchsv", "btc"),
    (pairs::BTT_BTC, "btt", "btc"),
    (pairs::EOS_BTC, "eos", "btc"),
    (pairs::ETC_BTC, "etc", "btc"),
    (pairs::ETH_BTC, "eth", "btc"),
    (pairs::HNST_BTC, "hnst", "btc"),
    (pairs::LTC_BTC, "ltc", "btc"),
    (pairs::LRN_BTC, "lrn", "btc"),
    (pairs::LYFE_BTC, "lyfe", "btc"),
    (pairs::XMR_BTC, "xmr", "btc"),
    (pairs::ONT_BTC, "ont", "btc"),
    (pairs::PXG_BTC, "pxg", "btc"),
    (pairs::NPXS_BTC, "npxs", "btc"),
    (pairs::SIX_BTC, "six", "btc"),
    (pairs::XLM_BTC, "xlm", "btc"),
    (pairs::STQ_BTC, "stq", "btc"),
    (pairs::TEN_BTC, "ten", "btc"),
    (pairs::TRX_BTC, "trx", "btc"),
    (pairs::VEX_BTC, "vex", "btc"),
    (pairs::ZEC_BTC, "zec", "btc"),
    (pairs::BTC_IDK, "btc", "idk"),
    (pairs::USDT_IDK, "usdt", "idk"),
    (pairs::HART_ETH, "hart", "eth"),
    (pairs::INX_ETH, "inx", "eth"),
    (pairs::NPXS_ETH, "npxs", "eth"),
    (pairs::STQ_ETH, "stq", "eth"),
    (pairs::TEN_ETH, "ten", "eth"),
    (pairs::TRX_ETH, "trx", "eth"),
    (pairs::VEX_ETH, "vex", "eth"),
    (pairs::BTC_USDT, "btc", "usdt"),
    (pairs::DAX_USDT, "dax", "usdt"),
    (pairs::ETH_USDT, "eth", "usdt"),
    (pairs::TEN_USDT, "ten", "usdt"),
    (pairs::SIX_TEN, "six", "ten"),
    (pairs::STQ_TEN, "stq", "ten"),
];

/// A tradable market: opaque id plus its base and quote tickers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingPair {
    id: String,
    base: String,
    quote: String,
}

impl TradingPair {
    /// Create a pair entry
    pub fn new(id: impl Into<String>, base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Wire identifier (e.g., "ten_btc")
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Ticker of the traded asset (e.g., "ten")
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Ticker of the pricing asset (e.g., "btc")
    pub fn quote(&self) -> &str {
        &self.quote
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl AsRef<str> for TradingPair {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

/// Immutable set of known pairs
///
/// Built once and shared by reference. The table is compiled in rather than
/// fetched, so it can lag behind the exchange: a negative lookup means
/// "unsupported or unknown", not a server error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRegistry {
    pairs: HashMap<String, TradingPair>,
}

impl PairRegistry {
    /// Registry of every pair the client ships with
    pub fn supported() -> Self {
        Self::from_pairs(
            SUPPORTED
                .iter()
                .map(|(id, base, quote)| TradingPair::new(*id, *base, *quote)),
        )
    }

    /// Registry over a custom list of pairs
    ///
    /// Entries with an empty id are skipped; later duplicates replace earlier ones.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = TradingPair>,
    {
        let iter = pairs.into_iter();
        let mut map = HashMap::with_capacity(iter.size_hint().0);
        for pair in iter.filter(|p| !p.id.is_empty()) {
            map.insert(pair.id.clone(), pair);
        }
        Self { pairs: map }
    }

    /// Returns true if `pair_id` names a known pair
    pub fn is_valid(&self, pair_id: &str) -> bool {
        self.pairs.contains_key(pair_id)
    }

    /// Look up a pair by id
    pub fn get(&self, pair_id: &str) -> Option<&TradingPair> {
        self.pairs.get(pair_id)
    }

    /// Look up a pair, failing with [`InvalidPairName`] when unknown or empty
    pub fn validate(&self, pair_id: &str) -> Result<&TradingPair, InvalidPairName> {
        self.get(pair_id)
            .ok_or_else(|| InvalidPairName(pair_id.to_string()))
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the registry holds no pairs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over all pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &TradingPair> {
        self.pairs.values()
    }
}

impl Default for PairRegistry {
    fn default() -> Self {
        Self::supported()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_pairs() {
        let registry = PairRegistry::supported();
        assert_eq!(registry.len(), SUPPORTED.len());
        assert_eq!(registry.len(), 36);

        for (id, _, _) in SUPPORTED {
            assert!(registry.is_valid(id), "{id} should be valid");
        }
    }

    #[test]
    fn test_unknown_pairs_are_invalid() {
        let registry = PairRegistry::supported();
        for id in ["", "TEN_BTC", "btc_ten", "ten-btc", "ten_btc ", "doge_btc", "ten"] {
            assert!(!registry.is_valid(id), "{id:?} should be invalid");
        }
    }

    #[test]
    fn test_pair_components_come_from_table() {
        let registry = PairRegistry::supported();
        let pair = registry.get(pairs::TEN_BTC).unwrap();
        assert_eq!(pair.id(), "ten_btc");
        assert_eq!(pair.base(), "ten");
        assert_eq!(pair.quote(), "btc");

        let pair = registry.get(pairs::USDT_IDK).unwrap();
        assert_eq!(pair.base(), "usdt");
        assert_eq!(pair.quote(), "idk");
    }

    #[test]
    fn test_validate() {
        let registry = PairRegistry::supported();
        assert!(registry.validate(pairs::ETH_USDT).is_ok());
        assert_eq!(registry.validate(""), Err(InvalidPairName(String::new())));
        assert_eq!(
            registry.validate("abc_xyz"),
            Err(InvalidPairName("abc_xyz".to_string()))
        );
    }

    #[test]
    fn test_custom_registry() {
        let registry = PairRegistry::from_pairs([
            TradingPair::new("ten_idk", "ten", "idk"),
            TradingPair::new("", "x", "y"),
        ]);
        assert_eq!(registry.len(), 1);
        assert!(registry.is_valid("ten_idk"));
        assert!(!registry.is_valid(pairs::TEN_BTC));
        assert!(!registry.is_valid(""));
    }
}
