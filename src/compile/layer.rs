use crate::{artwork::source::NodeId, foundation::core::Bounds};

/// Index of a [`Layer`] in [`crate::CompiledDocument::layers`] (scan order).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct LayerId(pub u32);

impl LayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Visual features that require extra state in generated drawing code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Features {
    pub has_alpha: bool,
    pub has_gradients: bool,
    pub has_patterns: bool,
}

impl Features {
    pub fn merge(&mut self, other: Self) {
        self.has_alpha |= other.has_alpha;
        self.has_gradients |= other.has_gradients;
        self.has_patterns |= other.has_patterns;
    }
}

/// Bounds and features gathered while walking one art subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScanAccumulator {
    pub bounds: Bounds,
    pub features: Features,
}

/// One visible top-level layer of the host document.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Layer {
    /// Raw host layer name, including any option list.
    pub name: String,
    pub bounds: Bounds,
    #[serde(skip)]
    pub art: Option<NodeId>,
    pub crop: bool,
    #[serde(flatten)]
    pub features: Features,
}

impl Layer {
    pub fn new(name: impl Into<String>, art: Option<NodeId>, scanned: ScanAccumulator) -> Self {
        Self {
            name: name.into(),
            bounds: scanned.bounds,
            art,
            crop: false,
            features: scanned.features,
        }
    }
}
