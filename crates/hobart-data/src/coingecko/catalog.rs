//! Coin catalog entries.

use serde::Deserialize;

/// One tradable asset from the CoinGecko catalog.
///
/// The `id` is the provider-assigned unique key (e.g. `"bitcoin"`); the
/// ticker `symbol` (e.g. `"btc"`) is not unique; many assets share one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    /// Provider-assigned unique identifier
    pub id: String,
    /// Ticker symbol (not unique)
    pub symbol: String,
    /// Human-readable name
    pub name: String,
}

/// Ordered-unique list of ticker symbols across the catalog.
///
/// Used to populate the symbol selector: duplicates collapse to the first
/// occurrence, catalog order is otherwise preserved.
pub fn unique_symbols(assets: &[Asset]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    assets
        .iter()
        .filter(|a| seen.insert(a.symbol.as_str()))
        .map(|a| a.symbol.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: &str, symbol: &str, name: &str) -> Asset {
        Asset {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_asset_deserialization() {
        let json = r#"[
            {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin"},
            {"id": "batcoin", "symbol": "btc", "name": "Batcoin"},
            {"id": "ethereum", "symbol": "eth", "name": "Ethereum"}
        ]"#;

        let assets: Vec<Asset> = serde_json::from_str(json).unwrap();
        assert_eq!(assets.len(), 3);
        assert_eq!(assets[0].id, "bitcoin");
        assert_eq!(assets[1].symbol, "btc");
        assert_eq!(assets[2].name, "Ethereum");
    }

    #[test]
    fn test_unique_symbols_collapses_duplicates() {
        let assets = vec![
            asset("bitcoin", "btc", "Bitcoin"),
            asset("batcoin", "btc", "Batcoin"),
            asset("ethereum", "eth", "Ethereum"),
        ];

        assert_eq!(unique_symbols(&assets), vec!["btc", "eth"]);
    }

    #[test]
    fn test_unique_symbols_preserves_order() {
        let assets = vec![
            asset("zcash", "zec", "Zcash"),
            asset("aave", "aave", "Aave"),
            asset("zcash-classic", "zec", "Zcash Classic"),
        ];

        assert_eq!(unique_symbols(&assets), vec!["zec", "aave"]);
    }

    #[test]
    fn test_unique_symbols_empty() {
        assert!(unique_symbols(&[]).is_empty());
    }
}
