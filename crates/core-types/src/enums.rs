use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of assets the service keeps price history for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetId {
    Btc,
    Doge,
    Eth,
    Ltc,
    Xrp,
}

impl AssetId {
    /// Every supported asset, in the order aggregate queries visit them.
    pub const ALL: [AssetId; 5] = [
        AssetId::Btc,
        AssetId::Doge,
        AssetId::Eth,
        AssetId::Ltc,
        AssetId::Xrp,
    ];

    /// The upper-case ticker symbol, as used in file names and JSON.
    pub fn symbol(&self) -> &'static str {
        match self {
            AssetId::Btc => "BTC",
            AssetId::Doge => "DOGE",
            AssetId::Eth => "ETH",
            AssetId::Ltc => "LTC",
            AssetId::Xrp => "XRP",
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Case-insensitive: `"btc"`, `"bTc"` and `"BTC"` all resolve to [`AssetId::Btc`].
impl FromStr for AssetId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetId::ALL
            .into_iter()
            .find(|asset| asset.symbol().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownAsset(s.to_string()))
    }
}
