//! Product seed loading.
//!
//! The store starts empty; an operator can point `STITCH_SEED` at a JSON
//! array of product drafts to load a catalog at startup.

use std::path::Path;

use stitch_commerce::catalog::ProductDraft;
use stitch_commerce::error::CommerceError;
use stitch_store::Store;
use thiserror::Error;

/// Errors that can occur while loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rejected seed product: {0}")]
    Commerce(#[from] CommerceError),
}

/// Load a JSON array of product drafts into the store's ledger. Returns
/// the number of products inserted.
pub fn load(store: &Store, path: &Path) -> Result<usize, SeedError> {
    let raw = std::fs::read_to_string(path)?;
    let drafts: Vec<ProductDraft> = serde_json::from_str(&raw)?;
    let count = drafts.len();
    for draft in drafts {
        store.ledger().insert(draft)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_inserts_every_draft() {
        let path = std::env::temp_dir().join("stitch-seed-test.json");
        std::fs::write(
            &path,
            r#"[{
                "title": "Cotton Tee",
                "description": "Everyday tee.",
                "price": { "amount_cents": 1500, "currency": "USD" },
                "stock": 10,
                "sizes": ["S", "M", "L"],
                "category": "shirts",
                "featured": true
            }]"#,
        )
        .unwrap();

        let store = Store::new();
        let count = load(&store, &path).unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.ledger().list().len(), 1);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_rejects_invalid_draft() {
        let path = std::env::temp_dir().join("stitch-seed-bad-test.json");
        std::fs::write(
            &path,
            r#"[{
                "title": "",
                "description": "No title.",
                "price": { "amount_cents": 1500, "currency": "USD" },
                "stock": 10,
                "sizes": ["S"],
                "category": "shirts",
                "featured": false
            }]"#,
        )
        .unwrap();

        let store = Store::new();
        assert!(matches!(
            load(&store, &path),
            Err(SeedError::Commerce(CommerceError::Validation(_)))
        ));

        std::fs::remove_file(&path).ok();
    }
}
