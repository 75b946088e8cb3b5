use std::collections::BTreeMap;

use solana_program::{msg, pubkey::Pubkey};

use crate::error::DscEngineError;

/// A supported collateral asset together with its services
#[derive(Debug, Clone)]
pub struct CollateralAsset<A, F> {
    pub mint: Pubkey,
    pub token: A,
    pub price_feed: F,
}

/// Supported collateral in registration order
///
/// Fixed at construction. Iteration order is the order assets were passed in.
#[derive(Debug, Clone)]
pub struct AssetRegistry<A, F> {
    assets: Vec<CollateralAsset<A, F>>,
    index: BTreeMap<Pubkey, usize>,
}

impl<A, F> AssetRegistry<A, F> {
    pub fn new(tokens: Vec<(Pubkey, A)>, price_feeds: Vec<F>) -> Result<Self, DscEngineError> {
        if tokens.len() != price_feeds.len() {
            msg!(
                "Asset list has {} entries but price feed list has {}",
                tokens.len(),
                price_feeds.len()
            );
            return Err(DscEngineError::ConstructionMismatch);
        }

        let mut assets = Vec::with_capacity(tokens.len());
        let mut index = BTreeMap::new();

        for ((mint, token), price_feed) in tokens.into_iter().zip(price_feeds) {
            if index.insert(mint, assets.len()).is_some() {
                msg!("Collateral asset {} registered twice", mint);
                return Err(DscEngineError::DuplicateAsset);
            }
            assets.push(CollateralAsset {
                mint,
                token,
                price_feed,
            });
        }

        Ok(Self { assets, index })
    }

    pub fn is_supported(&self, mint: &Pubkey) -> bool {
        self.index.contains_key(mint)
    }

    pub fn get(&self, mint: &Pubkey) -> Result<&CollateralAsset<A, F>, DscEngineError> {
        self.index
            .get(mint)
            .map(|&i| &self.assets[i])
            .ok_or(DscEngineError::UnsupportedAsset)
    }

    pub fn get_mut(&mut self, mint: &Pubkey) -> Result<&mut CollateralAsset<A, F>, DscEngineError> {
        match self.index.get(mint) {
            Some(&i) => Ok(&mut self.assets[i]),
            None => Err(DscEngineError::UnsupportedAsset),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollateralAsset<A, F>> {
        self.assets.iter()
    }

    pub fn mints(&self) -> Vec<Pubkey> {
        self.assets.iter().map(|asset| asset.mint).collect()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order_is_stable() {
        let mints: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let tokens = mints.iter().map(|m| (*m, ())).collect();
        let registry = AssetRegistry::new(tokens, vec![(); 4]).unwrap();

        assert_eq!(registry.mints(), mints);
        assert!(registry.is_supported(&mints[2]));
        assert!(!registry.is_supported(&Pubkey::new_unique()));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let tokens = vec![(Pubkey::new_unique(), ()), (Pubkey::new_unique(), ())];
        let result = AssetRegistry::new(tokens, vec![()]);
        assert_eq!(result.err(), Some(DscEngineError::ConstructionMismatch));
    }

    #[test]
    fn test_duplicate_asset_rejected() {
        let mint = Pubkey::new_unique();
        let result = AssetRegistry::new(vec![(mint, ()), (mint, ())], vec![(), ()]);
        assert_eq!(result.err(), Some(DscEngineError::DuplicateAsset));
    }

    #[test]
    fn test_unknown_asset_lookup() {
        let registry: AssetRegistry<(), ()> = AssetRegistry::new(vec![], vec![]).unwrap();
        assert!(registry.is_empty());
        assert_eq!(
            registry.get(&Pubkey::new_unique()).err(),
            Some(DscEngineError::UnsupportedAsset)
        );
    }
}
