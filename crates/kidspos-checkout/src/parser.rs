//! # Request Parser
//!
//! Turns a comma-separated identifier string into concrete line items.
//!
//! ## Token Handling
//! ```text
//! "  1, 2 ,,1 "  ──trim/drop empties──►  ["1", "2", "1"]
//!      │
//!      ├── all digits      -> Catalog::resolve_by_id
//!      └── anything else   -> Catalog::resolve_by_barcode
//! ```
//!
//! Parsing is all-or-nothing: the first token that fails aborts the
//! whole request, and output preserves input order and multiplicity.
//! Scanning the same item twice yields two line items; merging is the
//! calculator's job, not the parser's.

use tracing::debug;

use crate::error::{ParseError, ParseResult};
use kidspos_core::{Catalog, LineItem};

/// Parses a comma-separated identifier list into line items.
///
/// Numeric tokens resolve by item id, anything else by barcode, so both
/// scanner call sites share one parser. Side effects are limited to
/// read-only Catalog lookups.
pub async fn parse<C>(identifiers: &str, catalog: &C) -> ParseResult<Vec<LineItem>>
where
    C: Catalog + ?Sized,
{
    let tokens: Vec<&str> = identifiers
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut line_items = Vec::with_capacity(tokens.len());

    for token in tokens {
        if token.chars().any(char::is_whitespace) {
            return Err(ParseError::MalformedIdentifier(token.to_string()));
        }

        // Numeric tokens are tried as item ids first; barcodes are
        // numeric too (EAN-13), so an id miss falls through to a
        // barcode lookup before the token is declared unknown.
        let item = if token.chars().all(|c| c.is_ascii_digit()) {
            let id: i64 = token
                .parse()
                .map_err(|_| ParseError::MalformedIdentifier(token.to_string()))?;
            match catalog.resolve_by_id(id).await {
                Some(item) => Some(item),
                None => catalog.resolve_by_barcode(token).await,
            }
        } else {
            catalog.resolve_by_barcode(token).await
        };

        match item {
            Some(item) => line_items.push(LineItem::from_item(&item)),
            None => return Err(ParseError::ItemNotFound(token.to_string())),
        }
    }

    debug!(count = line_items.len(), "Parsed item identifiers");
    Ok(line_items)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kidspos_core::Item;
    use std::collections::HashMap;

    struct StubCatalog {
        items: HashMap<i64, Item>,
    }

    impl StubCatalog {
        fn with_items(specs: &[(i64, i64)]) -> Self {
            let items = specs
                .iter()
                .map(|&(id, price)| {
                    (
                        id,
                        Item {
                            id,
                            barcode: format!("49{id:011}"),
                            name: format!("item-{id}"),
                            price,
                        },
                    )
                })
                .collect();
            StubCatalog { items }
        }
    }

    #[async_trait]
    impl Catalog for StubCatalog {
        async fn resolve_by_id(&self, id: i64) -> Option<Item> {
            self.items.get(&id).cloned()
        }

        async fn resolve_by_barcode(&self, barcode: &str) -> Option<Item> {
            self.items.values().find(|i| i.barcode == barcode).cloned()
        }
    }

    #[tokio::test]
    async fn test_parse_preserves_order_and_multiplicity() {
        let catalog = StubCatalog::with_items(&[(1, 100), (2, 200)]);

        let items = parse("1,2,1", &catalog).await.unwrap();
        assert_eq!(
            items.iter().map(|i| i.item_id).collect::<Vec<_>>(),
            vec![1, 2, 1]
        );
        assert_eq!(items[0].price, 100);
        assert_eq!(items[1].price, 200);
    }

    #[tokio::test]
    async fn test_parse_trims_and_drops_empty_tokens() {
        let catalog = StubCatalog::with_items(&[(1, 100), (2, 200)]);

        let items = parse("  1 , 2 ,, ", &catalog).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_parse_resolves_barcodes() {
        let catalog = StubCatalog::with_items(&[(7, 150)]);

        let items = parse("4900000000007", &catalog).await.unwrap();
        assert_eq!(items[0].item_id, 7);
    }

    #[tokio::test]
    async fn test_parse_empty_input() {
        let catalog = StubCatalog::with_items(&[]);

        assert_eq!(parse("", &catalog).await, Err(ParseError::EmptyInput));
        assert_eq!(parse(" , , ", &catalog).await, Err(ParseError::EmptyInput));
    }

    #[tokio::test]
    async fn test_parse_malformed_token() {
        let catalog = StubCatalog::with_items(&[(1, 100)]);

        assert_eq!(
            parse("1 2,1", &catalog).await,
            Err(ParseError::MalformedIdentifier("1 2".to_string()))
        );
    }

    #[tokio::test]
    async fn test_parse_unknown_item_is_all_or_nothing() {
        let catalog = StubCatalog::with_items(&[(1, 100)]);

        assert_eq!(
            parse("1,99999", &catalog).await,
            Err(ParseError::ItemNotFound("99999".to_string()))
        );
    }
}
