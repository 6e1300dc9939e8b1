use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::asset::Asset;
use crate::error::SelectionError;
use crate::variant::{parse_name, Variant};

/// Groups keyed by base name, in first-seen order.
pub type GroupMap = IndexMap<String, AssetGroup>;

/// All variants of one logical icon.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetGroup {
    base_name: String,
    variants: BTreeMap<Variant, Asset>,
    selected: Variant,
}

impl AssetGroup {
    fn new(base_name: &str, variant: Variant, asset: Asset) -> Self {
        let mut variants = BTreeMap::new();
        variants.insert(variant, asset);
        Self {
            base_name: base_name.to_string(),
            variants,
            selected: variant,
        }
    }

    /// Add a variant, re-pointing the selection if the new variant is preferred.
    ///
    /// A second asset for an already present variant replaces the first.
    fn insert(&mut self, variant: Variant, asset: Asset) {
        self.variants.insert(variant, asset);
        if variant.preferred_over(self.selected) {
            self.selected = variant;
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn selected_variant(&self) -> Variant {
        self.selected
    }

    /// The asset currently displayed for this group.
    pub fn selected_asset(&self) -> &Asset {
        // `selected` is only ever set to a key that was inserted
        &self.variants[&self.selected]
    }

    /// Available variants, most preferred first.
    pub fn variants(&self) -> impl Iterator<Item = (Variant, &Asset)> {
        self.variants.iter().map(|(variant, asset)| (*variant, asset))
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    pub fn has_variant(&self, variant: Variant) -> bool {
        self.variants.contains_key(&variant)
    }

    /// Switch the displayed variant.
    pub fn select(&mut self, variant: Variant) -> Result<&Asset, SelectionError> {
        if !self.variants.contains_key(&variant) {
            return Err(SelectionError::UnknownVariant {
                group: self.base_name.clone(),
                variant: variant.to_string(),
            });
        }
        self.selected = variant;
        Ok(self.selected_asset())
    }

    pub fn size(&self) -> u64 {
        self.selected_asset().size
    }

    pub fn dimensions(&self) -> &str {
        &self.selected_asset().dimensions
    }

    pub fn url(&self) -> &str {
        &self.selected_asset().url
    }
}

/// Partition assets into groups by base name.
pub fn group_assets<'a>(assets: impl IntoIterator<Item = &'a Asset>) -> GroupMap {
    let mut groups = GroupMap::new();

    for asset in assets {
        let (base_name, variant) = parse_name(&asset.name);
        match groups.get_mut(base_name) {
            Some(group) => group.insert(variant, asset.clone()),
            None => {
                groups.insert(
                    base_name.to_string(),
                    AssetGroup::new(base_name, variant, asset.clone()),
                );
            }
        }
    }

    groups
}
