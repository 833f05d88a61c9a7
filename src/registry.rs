use std::collections::BTreeMap;

use crate::analyses;
use crate::analysis::Analysis;
use crate::error::{LensError, LensResult};
use crate::logging::log_debug;

/// All known analyses, keyed by feature id.
pub struct FeatureRegistry {
    features: BTreeMap<u32, Box<dyn Analysis>>,
}

impl FeatureRegistry {
    /// Index the given analyses. Two analyses claiming the same id is a
    /// programming error and fails the whole registry.
    pub fn new(analyses: Vec<Box<dyn Analysis>>) -> LensResult<Self> {
        let mut features: BTreeMap<u32, Box<dyn Analysis>> = BTreeMap::new();

        for analysis in analyses {
            let id = analysis.feature_id();
            if id == 0 {
                return Err(LensError::InvalidFeatureId(analysis.name().to_string()));
            }
            if let Some(existing) = features.get(&id) {
                return Err(LensError::DuplicateFeature {
                    id,
                    name: analysis.name().to_string(),
                    existing: existing.name().to_string(),
                });
            }
            log_debug(&format!("Registered feature {}: {}", id, analysis.name()));
            features.insert(id, analysis);
        }

        Ok(Self { features })
    }

    /// The analyses shipped with the binary.
    pub fn builtin() -> LensResult<Self> {
        Self::new(analyses::builtin()?)
    }

    pub fn get(&self, id: u32) -> Option<&dyn Analysis> {
        self.features.get(&id).map(|analysis| analysis.as_ref())
    }

    pub fn ids(&self) -> Vec<u32> {
        self.features.keys().copied().collect()
    }

    /// Analyses in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Analysis> {
        self.features.values().map(|analysis| analysis.as_ref())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
