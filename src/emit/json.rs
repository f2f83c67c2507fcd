//! JSON output, mainly for inspecting a build

use std::io::{self, Write};

use serde::Serialize;

use super::ResourceEmitter;
use crate::layout::FontResource;

#[derive(Debug, Clone, Copy)]
pub struct JsonEmitter {
    pub pretty: bool,
}

impl Default for JsonEmitter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Serialize)]
struct NamedResource<'a> {
    name: &'a str,
    #[serde(flatten)]
    resource: &'a FontResource,
}

impl ResourceEmitter for JsonEmitter {
    fn emit(&self, name: &str, resource: &FontResource, out: &mut dyn Write) -> io::Result<()> {
        let named = NamedResource { name, resource };
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &named)?;
        } else {
            serde_json::to_writer(&mut *out, &named)?;
        }
        writeln!(out)
    }
}
