//! JSON document → [`NetworkModel`] normalization.

use std::{collections::HashSet, fs, path::Path};

use indexmap::IndexMap;
use log::{debug, info, trace};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use neurograph_core::color::Color;

use crate::{
    error::{ElementRef, LoadError, ParseError, SchemaError},
    model::{Direction, Input, NetworkModel, Population, Projection, Quantity, Sign},
};

/// Component name used when a population does not declare one.
pub const DEFAULT_COMPONENT: &str = "cell";

/// Size used when a population does not declare one.
pub const DEFAULT_POPULATION_SIZE: u64 = 1;

#[derive(Debug, Deserialize)]
struct RawPopulation {
    component: Option<String>,
    size: Option<serde_json::Number>,
    properties: Option<RawProperties>,
}

#[derive(Debug, Deserialize)]
struct RawProperties {
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawProjection {
    id: Option<String>,
    #[serde(alias = "presynaptic")]
    source: Option<String>,
    #[serde(alias = "postsynaptic")]
    target: Option<String>,
    synapse: Option<String>,
    weight: Option<RawQuantity>,
    delay: Option<RawQuantity>,
    probability: Option<RawQuantity>,
    random_connectivity: Option<RawRandomConnectivity>,
    sign: Option<RawQuantity>,
    connections: Option<Vec<Value>>,
    directionality: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRandomConnectivity {
    probability: Option<RawQuantity>,
}

#[derive(Debug, Deserialize)]
struct RawInput {
    input_source: Option<String>,
    population: Option<String>,
    weight: Option<RawQuantity>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Number(f64),
    Text(String),
}

impl From<RawQuantity> for Quantity {
    fn from(raw: RawQuantity) -> Self {
        match raw {
            RawQuantity::Number(value) => Quantity::Number(value),
            RawQuantity::Text(text) => Quantity::Text(text),
        }
    }
}

/// Load a network model from a JSON file.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] if the file cannot be read or is not valid
/// JSON, and [`LoadError::Schema`] if the document is not a valid network.
pub fn load(path: impl AsRef<Path>) -> Result<NetworkModel, LoadError> {
    let path = path.as_ref();
    info!(path:% = path.display(); "Loading network model");

    let text = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    trace!(bytes = text.len(); "Model file read");

    from_str(&text)
}

/// Load a network model from JSON text.
///
/// # Errors
///
/// See [`load`].
pub fn from_str(text: &str) -> Result<NetworkModel, LoadError> {
    let document: Value = serde_json::from_str(text).map_err(ParseError::from)?;
    let model = normalize(document)?;

    debug!(
        network_id:? = model.id(),
        populations = model.populations().len(),
        projections = model.projections().len(),
        inputs = model.inputs().len();
        "Network model normalized"
    );

    Ok(model)
}

fn normalize(document: Value) -> Result<NetworkModel, SchemaError> {
    let Value::Object(root) = document else {
        return Err(SchemaError::NotAnObject);
    };
    let (id, mut network) = locate_network(root)?;

    let notes = network
        .get("notes")
        .and_then(Value::as_str)
        .map(str::to_string);

    let populations = match network.remove("populations") {
        Some(Value::Object(entries)) => normalize_populations(entries)?,
        Some(_) => {
            return Err(SchemaError::MalformedSection {
                section: "populations",
                expected: "an object",
            });
        }
        None => {
            return Err(SchemaError::MissingSection {
                section: "populations",
            });
        }
    };

    let projections = match network.remove("projections") {
        Some(Value::Object(entries)) => entries
            .into_iter()
            .map(|(key, value)| normalize_projection(Some(key), None, value, &populations))
            .collect::<Result<Vec<_>, _>>()?,
        Some(Value::Array(entries)) => entries
            .into_iter()
            .enumerate()
            .map(|(index, value)| normalize_projection(None, Some(index), value, &populations))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(SchemaError::MalformedSection {
                section: "projections",
                expected: "an object or an array",
            });
        }
        None => {
            return Err(SchemaError::MissingSection {
                section: "projections",
            });
        }
    };

    let input_sources: Option<HashSet<String>> = match network.remove("input_sources") {
        Some(Value::Object(entries)) => Some(entries.into_iter().map(|(key, _)| key).collect()),
        Some(Value::Null) | None => None,
        Some(_) => {
            return Err(SchemaError::MalformedSection {
                section: "input_sources",
                expected: "an object",
            });
        }
    };

    let inputs = match network.remove("inputs") {
        Some(Value::Object(entries)) => entries
            .into_iter()
            .map(|(key, value)| normalize_input(key, value, &populations, input_sources.as_ref()))
            .collect::<Result<Vec<_>, _>>()?,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            return Err(SchemaError::MalformedSection {
                section: "inputs",
                expected: "an object",
            });
        }
    };

    Ok(NetworkModel {
        id,
        notes,
        populations,
        projections,
        inputs,
    })
}

/// Find the network object: either the document itself, or the single
/// entry a NeuroMLlite document wraps it in.
fn locate_network(
    root: Map<String, Value>,
) -> Result<(Option<String>, Map<String, Value>), SchemaError> {
    if root.contains_key("populations") {
        let id = root.get("id").and_then(Value::as_str).map(str::to_string);
        return Ok((id, root));
    }

    if root.len() == 1 {
        if let Some((key, Value::Object(network))) = root.into_iter().next() {
            if network.contains_key("populations") {
                trace!(network_id = key.as_str(); "Unwrapped network object");
                return Ok((Some(key), network));
            }
        }
    }

    Err(SchemaError::MissingSection {
        section: "populations",
    })
}

fn parse_entry<T: DeserializeOwned>(element: &ElementRef, value: Value) -> Result<T, SchemaError> {
    serde_json::from_value(value).map_err(|err| SchemaError::MalformedEntry {
        element: element.clone(),
        reason: err.to_string(),
    })
}

fn normalize_populations(
    entries: Map<String, Value>,
) -> Result<IndexMap<String, Population>, SchemaError> {
    let mut populations = IndexMap::with_capacity(entries.len());

    for (id, value) in entries {
        let element = ElementRef::Population(id.clone());
        let raw: RawPopulation = parse_entry(&element, value)?;

        let size = population_size(&id, raw.size)?;
        let color = raw
            .properties
            .and_then(|properties| properties.color)
            .map(|color| parse_color(&element, &color))
            .transpose()?;
        let component = raw
            .component
            .unwrap_or_else(|| DEFAULT_COMPONENT.to_string());

        trace!(population = id.as_str(), component = component.as_str(), size = size; "Population normalized");
        populations.insert(id.clone(), Population::new(id, component, size, color));
    }

    Ok(populations)
}

fn population_size(id: &str, size: Option<serde_json::Number>) -> Result<u64, SchemaError> {
    let Some(size) = size else {
        return Ok(DEFAULT_POPULATION_SIZE);
    };

    if let Some(count) = size.as_u64() {
        if count == 0 {
            return Err(SchemaError::NonPositiveSize {
                population: id.to_string(),
                size: 0.0,
            });
        }
        return Ok(count);
    }

    let value = size.as_f64().unwrap_or(f64::NAN);
    if value <= 0.0 {
        return Err(SchemaError::NonPositiveSize {
            population: id.to_string(),
            size: value,
        });
    }
    if value.is_finite() && value.fract() == 0.0 && value <= u64::MAX as f64 {
        return Ok(value as u64);
    }

    Err(SchemaError::InvalidField {
        element: ElementRef::Population(id.to_string()),
        field: "size",
        reason: format!("expected a whole number of cells, found {size}"),
    })
}

/// Parse a NeuroMLlite `"r g b"` / `"r g b a"` color, falling back to CSS syntax.
fn parse_color(element: &ElementRef, text: &str) -> Result<Color, SchemaError> {
    let components: Result<Vec<f32>, _> = text.split_whitespace().map(str::parse).collect();

    let parsed = match components.as_deref() {
        Ok([r, g, b]) => Color::from_unit_rgba(*r, *g, *b, 1.0),
        Ok([r, g, b, a]) => Color::from_unit_rgba(*r, *g, *b, *a),
        _ => Color::new(text),
    };

    parsed.map_err(|reason| SchemaError::InvalidField {
        element: element.clone(),
        field: "properties.color",
        reason,
    })
}

fn normalize_projection(
    key: Option<String>,
    index: Option<usize>,
    value: Value,
    populations: &IndexMap<String, Population>,
) -> Result<Projection, SchemaError> {
    let provisional_id = key
        .clone()
        .unwrap_or_else(|| format!("projection[{}]", index.unwrap_or_default()));
    let raw: RawProjection = parse_entry(&ElementRef::Projection(provisional_id.clone()), value)?;

    let id = key.or(raw.id).unwrap_or(provisional_id);
    let element = ElementRef::Projection(id.clone());

    let source = resolve_population(&element, "source", raw.source, populations)?;
    let target = resolve_population(&element, "target", raw.target, populations)?;

    let sign = raw
        .sign
        .map(|sign| parse_sign(&element, sign))
        .transpose()?;
    let direction = parse_direction(&element, raw.directionality.as_deref())?;
    let probability = raw
        .probability
        .or_else(|| raw.random_connectivity.and_then(|rc| rc.probability))
        .map(Quantity::from);

    trace!(projection = id.as_str(), source = source.as_str(), target = target.as_str(); "Projection normalized");

    Ok(Projection {
        id,
        source,
        target,
        synapse: raw.synapse,
        weight: raw.weight.map(Quantity::from),
        delay: raw.delay.map(Quantity::from),
        probability,
        sign,
        connections: raw.connections.map(|connections| connections.len()),
        direction,
    })
}

fn resolve_population(
    element: &ElementRef,
    field: &'static str,
    population: Option<String>,
    populations: &IndexMap<String, Population>,
) -> Result<String, SchemaError> {
    let Some(population) = population.filter(|id| !id.is_empty()) else {
        return Err(SchemaError::MissingField {
            element: element.clone(),
            field,
        });
    };

    if !populations.contains_key(&population) {
        return Err(SchemaError::UndefinedPopulation {
            element: element.clone(),
            population,
        });
    }

    Ok(population)
}

fn parse_sign(element: &ElementRef, sign: RawQuantity) -> Result<Sign, SchemaError> {
    match sign {
        RawQuantity::Number(value) if value < 0.0 => Ok(Sign::Inhibitory),
        RawQuantity::Number(_) => Ok(Sign::Excitatory),
        RawQuantity::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "excitatory" | "exc" | "+" | "positive" => Ok(Sign::Excitatory),
            "inhibitory" | "inh" | "-" | "negative" => Ok(Sign::Inhibitory),
            _ => Err(SchemaError::InvalidField {
                element: element.clone(),
                field: "sign",
                reason: format!("expected `excitatory` or `inhibitory`, found `{text}`"),
            }),
        },
    }
}

fn parse_direction(
    element: &ElementRef,
    directionality: Option<&str>,
) -> Result<Direction, SchemaError> {
    match directionality {
        None | Some("forward" | "directed" | "unidirectional") => Ok(Direction::Forward),
        Some("bidirectional" | "reciprocal") => Ok(Direction::Bidirectional),
        Some(other) => Err(SchemaError::InvalidField {
            element: element.clone(),
            field: "directionality",
            reason: format!("expected `unidirectional` or `bidirectional`, found `{other}`"),
        }),
    }
}

fn normalize_input(
    id: String,
    value: Value,
    populations: &IndexMap<String, Population>,
    input_sources: Option<&HashSet<String>>,
) -> Result<Input, SchemaError> {
    let element = ElementRef::Input(id.clone());
    let raw: RawInput = parse_entry(&element, value)?;

    let population = resolve_population(&element, "population", raw.population, populations)?;
    let Some(input_source) = raw.input_source else {
        return Err(SchemaError::MissingField {
            element,
            field: "input_source",
        });
    };

    if input_sources.is_some_and(|sources| !sources.contains(&input_source)) {
        return Err(SchemaError::UndefinedInputSource {
            element,
            input_source,
        });
    }

    Ok(Input {
        id,
        input_source,
        population,
        weight: raw.weight.map(Quantity::from),
    })
}
