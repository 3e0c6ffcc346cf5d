//! Normalized network model.
//!
//! These records are produced by the loader and never change afterwards.
//! Every optional JSON field has already been defaulted or resolved, so a
//! [`NetworkModel`] can be consumed without re-validating anything.

use std::fmt;

use indexmap::IndexMap;

use neurograph_core::color::Color;

/// A named group of cells of one component type.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    id: String,
    component: String,
    size: u64,
    color: Option<Color>,
}

impl Population {
    pub(crate) fn new(id: String, component: String, size: u64, color: Option<Color>) -> Self {
        Self {
            id,
            component,
            size,
            color,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Component (cell type) name.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Number of cells, always at least 1.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Explicit display color from the population's `properties.color`.
    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

/// A metadata value that is either numeric or a unit-bearing string such as `"2ms"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

impl Quantity {
    /// Numeric value, parsing text quantities that are plain numbers.
    ///
    /// ```
    /// # use neurograph_model::Quantity;
    /// assert_eq!(Quantity::Text("-0.5".into()).as_f64(), Some(-0.5));
    /// assert_eq!(Quantity::Text("2ms".into()).as_f64(), None);
    /// ```
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Quantity {
    /// Whole numbers keep one decimal place so `1.0` stays `1.0` rather than `1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Declared sign of a projection's synapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Excitatory,
    Inhibitory,
}

/// Whether a projection also connects target back to source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Bidirectional,
}

/// A directed connection pattern between two populations.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub(crate) id: String,
    pub(crate) source: String,
    pub(crate) target: String,
    pub(crate) synapse: Option<String>,
    pub(crate) weight: Option<Quantity>,
    pub(crate) delay: Option<Quantity>,
    pub(crate) probability: Option<Quantity>,
    pub(crate) sign: Option<Sign>,
    pub(crate) connections: Option<usize>,
    pub(crate) direction: Direction,
}

impl Projection {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Presynaptic population id.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Postsynaptic population id.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Synapse component name, e.g. `ampaSyn`.
    pub fn synapse(&self) -> Option<&str> {
        self.synapse.as_deref()
    }

    pub fn weight(&self) -> Option<&Quantity> {
        self.weight.as_ref()
    }

    pub fn delay(&self) -> Option<&Quantity> {
        self.delay.as_ref()
    }

    /// Connection probability, from `probability` or `random_connectivity.probability`.
    pub fn probability(&self) -> Option<&Quantity> {
        self.probability.as_ref()
    }

    /// Explicitly declared sign.
    pub fn sign(&self) -> Option<Sign> {
        self.sign
    }

    /// Number of entries in an explicit connection list.
    pub fn connections(&self) -> Option<usize> {
        self.connections
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// An external stimulus attached to one population.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub(crate) id: String,
    pub(crate) input_source: String,
    pub(crate) population: String,
    pub(crate) weight: Option<Quantity>,
}

impl Input {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the input source definition.
    pub fn input_source(&self) -> &str {
        &self.input_source
    }

    /// Target population id.
    pub fn population(&self) -> &str {
        &self.population
    }

    pub fn weight(&self) -> Option<&Quantity> {
        self.weight.as_ref()
    }
}

/// A loaded network: populations in document order, projections and inputs.
///
/// Every projection and input refers to a population present in
/// [`populations`](Self::populations).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NetworkModel {
    pub(crate) id: Option<String>,
    pub(crate) notes: Option<String>,
    pub(crate) populations: IndexMap<String, Population>,
    pub(crate) projections: Vec<Projection>,
    pub(crate) inputs: Vec<Input>,
}

impl NetworkModel {
    /// Network id, when the document names one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Free-form notes attached to the network.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn populations(&self) -> &IndexMap<String, Population> {
        &self.populations
    }

    pub fn population(&self, id: &str) -> Option<&Population> {
        self.populations.get(id)
    }

    pub fn projections(&self) -> &[Projection] {
        &self.projections
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }
}

impl std::str::FromStr for NetworkModel {
    type Err = crate::LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::from_str(s)
    }
}
