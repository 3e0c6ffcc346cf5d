//! Color handling for neurograph diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and the [`Palette`] used to give every component type
//! its own node color.
//!
//! # Palette assignment
//!
//! A component name is mapped onto the palette with [`stable_hash`], a 64-bit
//! FNV-1a hash, so the preferred slot of a name never changes between runs or
//! toolchains. [`Palette::assign`] resolves collisions between distinct names
//! by probing for the next free slot. Once every slot is taken the remaining
//! names fall back to their preferred slot and colors are reused.

use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};
use serde::{Serialize, Serializer};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#ff0000",
    /// "rgb(255, 0, 0)" or "red".
    ///
    /// # Examples
    ///
    /// ```
    /// use neurograph_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Create a color from unit-range RGBA components.
    ///
    /// Components are clamped to `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use neurograph_core::color::Color;
    ///
    /// let yellow = Color::from_unit_rgba(1.0, 1.0, 0.0, 0.5).unwrap();
    /// assert!((yellow.alpha() - 0.5).abs() < 0.001);
    /// ```
    pub fn from_unit_rgba(r: f32, g: f32, b: f32, a: f32) -> Result<Self, String> {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(&format!(
            "rgba({}, {}, {}, {})",
            channel(r),
            channel(g),
            channel(b),
            a.clamp(0.0, 1.0)
        ))
    }

    /// Returns a sanitized, ID-safe string representation of this color.
    ///
    /// The result is usable inside SVG marker ids: it contains only
    /// alphanumeric characters and underscores and starts with a letter.
    pub fn to_id_safe_string(self) -> String {
        let mut sanitized = self
            .to_string()
            .replace('#', "hex")
            .replace(['(', ')', ',', ' ', ';', '.', '/', '%'], "_");

        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized = format!("c_{sanitized}");
        }

        sanitized
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

/// Formats the color as `#rrggbb`. Opacity is carried separately through
/// [`Color::alpha`].
impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        write!(f, "#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

/// The ten-color categorical palette used for component types.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// 64-bit FNV-1a hash of `name`.
///
/// Unlike `std`'s default hasher the result is fixed for all time, which keeps
/// palette slots stable across builds.
pub fn stable_hash(name: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    name.bytes().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

/// An ordered, non-empty list of colors that names are mapped onto.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Create a palette from a list of colors.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty.
    pub fn new(colors: Vec<Color>) -> Result<Self, String> {
        if colors.is_empty() {
            return Err("palette must contain at least one color".to_string());
        }
        Ok(Self { colors })
    }

    /// Number of colors in the palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; palettes are never empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The preferred palette slot for `name`.
    pub fn slot_for(&self, name: &str) -> usize {
        (stable_hash(name) % self.colors.len() as u64) as usize
    }

    /// The color in the preferred slot for `name`, ignoring collisions.
    ///
    /// # Examples
    ///
    /// ```
    /// use neurograph_core::color::Palette;
    ///
    /// let palette = Palette::default();
    /// assert_eq!(palette.color_for("pyramidal"), palette.color_for("pyramidal"));
    /// ```
    pub fn color_for(&self, name: &str) -> Color {
        self.colors[self.slot_for(name)]
    }

    /// Assign a color to every distinct name.
    ///
    /// Names are processed in sorted order so the result depends only on the
    /// set of names. A name whose preferred slot is already taken probes the
    /// following slots; when the palette is exhausted it keeps its preferred
    /// slot and shares the color.
    pub fn assign<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> HashMap<String, Color> {
        let mut distinct: Vec<&str> = names.into_iter().collect();
        distinct.sort_unstable();
        distinct.dedup();

        let mut taken = vec![false; self.colors.len()];
        let mut assigned = HashMap::with_capacity(distinct.len());

        for name in distinct {
            let preferred = self.slot_for(name);
            let slot = (0..self.colors.len())
                .map(|offset| (preferred + offset) % self.colors.len())
                .find(|&slot| !taken[slot])
                .unwrap_or(preferred);
            taken[slot] = true;
            assigned.insert(name.to_string(), self.colors[slot]);
        }

        assigned
    }
}

impl Default for Palette {
    fn default() -> Self {
        let colors = DEFAULT_PALETTE
            .iter()
            .map(|hex| Color::new(hex).expect("palette entries are valid hex colors"))
            .collect();
        Self { colors }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_from_unit_rgba() {
        let red = Color::from_unit_rgba(1.0, 0.0, 0.0, 1.0).unwrap();
        assert!((red.alpha() - 1.0).abs() < 0.001);

        let clamped = Color::from_unit_rgba(2.0, -1.0, 0.0, 1.0).unwrap();
        assert_eq!(clamped, red);
    }

    #[test]
    fn test_color_displays_as_hex() {
        assert_eq!(Color::new("#17becf").unwrap().to_string(), "#17becf");
        assert_eq!(Color::new("red").unwrap().to_string(), "#ff0000");
        assert_eq!(
            Color::from_unit_rgba(0.0, 0.0, 1.0, 0.5).unwrap().to_string(),
            "#0000ff"
        );

        for color in &Palette::default().colors {
            assert_eq!(Color::new(&color.to_string()).unwrap(), *color);
        }
        assert_eq!(
            Color::new("#17becf").unwrap().to_id_safe_string(),
            "hex17becf"
        );
    }

    #[test]
    fn test_color_to_id_safe_string() {
        let safe_id = Color::new("rgba(10, 20, 30, 0.5)")
            .unwrap()
            .to_id_safe_string();
        assert!(safe_id.chars().all(|c| c.is_alphanumeric() || c == '_'));
        assert!(safe_id.chars().next().unwrap().is_alphabetic());
    }

    #[test]
    fn test_stable_hash_known_values() {
        // Reference values of 64-bit FNV-1a.
        assert_eq!(stable_hash(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(stable_hash("a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_palette_rejects_empty() {
        assert!(Palette::new(Vec::new()).is_err());
    }

    #[test]
    fn test_assign_distinct_while_palette_is_large_enough() {
        let palette = Palette::default();
        let names = ["exc", "inh", "pyr", "basket", "chandelier", "stellate"];
        let assigned = palette.assign(names);

        let colors: HashSet<Color> = assigned.values().copied().collect();
        assert_eq!(colors.len(), names.len());
    }

    #[test]
    fn test_assign_reuses_colors_when_exhausted() {
        let palette = Palette::new(vec![
            Color::new("red").unwrap(),
            Color::new("blue").unwrap(),
        ])
        .unwrap();
        let assigned = palette.assign(["a", "b", "c", "d"]);

        assert_eq!(assigned.len(), 4);
        let colors: HashSet<Color> = assigned.values().copied().collect();
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn test_assign_ignores_input_order() {
        let palette = Palette::default();
        let forward = palette.assign(["x", "y", "z", "x"]);
        let backward = palette.assign(["z", "y", "x"]);
        assert_eq!(forward, backward);
    }

    proptest! {
        #[test]
        fn prop_color_for_is_stable(name in "[a-zA-Z_][a-zA-Z0-9_]{0,16}") {
            let palette = Palette::default();
            prop_assert_eq!(palette.color_for(&name), palette.color_for(&name));
            prop_assert!(palette.slot_for(&name) < palette.len());
        }
    }
}
