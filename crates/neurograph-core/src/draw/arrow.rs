//! Edge endpoint markers.

use serde::Serialize;

/// Marker drawn where an edge meets a node.
///
/// Every projection is directed, so every edge carries a head marker; the
/// kind of marker encodes the synapse category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrowHead {
    /// Open chevron, used for generic synapses
    #[default]
    Open,
    /// Filled triangle, used for excitatory synapses
    Filled,
    /// Filled dot, used for inhibitory synapses
    Round,
}

impl ArrowHead {
    /// Short name used when building SVG marker ids.
    pub fn marker_name(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Filled => "filled",
            Self::Round => "round",
        }
    }
}
