//! Min-max feature scaling fitted over a catalog snapshot.
//!
//! Bounds are corpus-relative, so a `ScalerSet` must be fitted again whenever
//! the active candidate set changes. Fitting is a pure function of the
//! catalog; nothing is cached between snapshots.

use data_loader::{Book, Catalog};
use std::collections::HashMap;

/// Numeric book features that can be scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericFeature {
    Year,
    Pages,
    AgeRestriction,
}

impl NumericFeature {
    pub const ALL: [NumericFeature; 3] = [
        NumericFeature::Year,
        NumericFeature::Pages,
        NumericFeature::AgeRestriction,
    ];

    /// Raw value of this feature for a book
    pub fn value(self, book: &Book) -> f32 {
        match self {
            NumericFeature::Year => book.year as f32,
            NumericFeature::Pages => book.pages as f32,
            NumericFeature::AgeRestriction => book.age_restriction as f32,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NumericFeature::Year => "year",
            NumericFeature::Pages => "pages",
            NumericFeature::AgeRestriction => "age_restriction",
        }
    }
}

/// Min-max bounds of one feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    pub min: f32,
    pub max: f32,
}

impl MinMaxScaler {
    /// Fit bounds over a set of values. Returns `None` for an empty set.
    pub fn fit(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        values.into_iter().fold(None, |bounds, value| {
            Some(match bounds {
                None => Self { min: value, max: value },
                Some(Self { min, max }) => Self {
                    min: min.min(value),
                    max: max.max(value),
                },
            })
        })
    }

    /// Map a raw value to `(value - min) / (max - min)`.
    ///
    /// Values outside the fitted range are not clamped. A zero range (every
    /// value identical) normalizes to `0.0`.
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (value - self.min) / range
    }
}

/// One fitted scaler per numeric feature
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalerSet {
    scalers: HashMap<NumericFeature, MinMaxScaler>,
}

impl ScalerSet {
    /// Fit the given features over a catalog snapshot
    pub fn fit(catalog: &Catalog, features: &[NumericFeature]) -> Self {
        let scalers = features
            .iter()
            .filter_map(|&feature| {
                MinMaxScaler::fit(catalog.iter().map(|book| feature.value(book)))
                    .map(|scaler| (feature, scaler))
            })
            .collect();
        Self { scalers }
    }

    /// Fit every numeric feature over a catalog snapshot
    pub fn fit_all(catalog: &Catalog) -> Self {
        Self::fit(catalog, &NumericFeature::ALL)
    }

    pub fn get(&self, feature: NumericFeature) -> Option<&MinMaxScaler> {
        self.scalers.get(&feature)
    }

    /// Normalize a raw value of `feature`.
    ///
    /// Features that were not fitted (or were fitted over an empty catalog)
    /// normalize to `0.0`.
    pub fn normalize(&self, feature: NumericFeature, value: f32) -> f32 {
        self.get(feature)
            .map(|scaler| scaler.normalize(value))
            .unwrap_or(0.0)
    }

    /// Normalized value of `feature` for a book
    pub fn normalize_book(&self, feature: NumericFeature, book: &Book) -> f32 {
        self.normalize(feature, feature.value(book))
    }
}
