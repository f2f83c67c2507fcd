//! Rendering a finished font resource into an output format

pub mod c_header;
pub mod json;

pub use c_header::CHeaderEmitter;
pub use json::JsonEmitter;

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::layout::FontResource;

/// Serializes a font resource under a symbol name.
pub trait ResourceEmitter {
    fn emit(&self, name: &str, resource: &FontResource, out: &mut dyn Write) -> io::Result<()>;

    /// Render into an in-memory buffer.
    fn emit_to_vec(&self, name: &str, resource: &FontResource) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.emit(name, resource, &mut buffer)?;
        Ok(buffer)
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// C header for the epdiy display driver
    #[default]
    C,
    /// JSON dump of the resource
    Json,
}

impl OutputFormat {
    pub fn emitter(self) -> Box<dyn ResourceEmitter> {
        match self {
            Self::C => Box::new(CHeaderEmitter),
            Self::Json => Box::new(JsonEmitter::default()),
        }
    }
}
