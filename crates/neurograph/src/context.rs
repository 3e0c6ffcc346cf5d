//! Caller-owned drawing target.
//!
//! A [`RenderContext`] holds the canvas settings and, once something has been
//! drawn into it, the finished SVG document. Each draw call takes a context
//! and hands it back, so no drawing state outlives the caller's value.

use std::{fs::File, io::Write, path::Path};

use log::{error, info};
use svg::Document;

use neurograph_core::color::Color;

use crate::{config::StyleConfig, error::ConfigError, error::NeurographError, export};

/// Canvas settings plus the most recent drawing.
#[derive(Debug, Clone)]
pub struct RenderContext {
    margin: f32,
    background: Option<Color>,
    document: Option<Document>,
}

impl RenderContext {
    /// An empty context with a 40px margin and a transparent background.
    pub fn new() -> Self {
        Self {
            margin: 40.0,
            background: None,
            document: None,
        }
    }

    /// An empty context with the canvas settings of `style`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the style is invalid.
    pub fn from_style(style: &StyleConfig) -> Result<Self, ConfigError> {
        style.validate()?;
        Ok(Self {
            margin: style.margin(),
            background: style.background_color()?,
            document: None,
        })
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn is_drawn(&self) -> bool {
        self.document.is_some()
    }

    /// The drawn document as SVG text.
    pub fn to_svg_string(&self) -> Option<String> {
        self.document.as_ref().map(ToString::to_string)
    }

    pub(crate) fn set_document(&mut self, document: Document) {
        self.document = Some(document);
    }

    /// Writes the drawn document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NeurographError::Export`] if nothing has been drawn yet or
    /// the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), NeurographError> {
        let path = path.as_ref();
        let Some(document) = &self.document else {
            return Err(export::Error::Render("nothing has been drawn".to_string()).into());
        };

        info!(path:% = path.display(); "Creating SVG file");
        let mut file = File::create(path).map_err(|err| {
            error!(path:% = path.display(), err:err; "Failed to create SVG file");
            export::Error::Io(err)
        })?;

        write!(file, "{document}").map_err(|err| {
            error!(path:% = path.display(), err:err; "Failed to write SVG content");
            export::Error::Io(err)
        })?;

        Ok(())
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}
