//! JSON export of the diagram description.

use crate::{
    emit::Diagram,
    export::{Error, Exporter},
};

/// Writes the [`Diagram`] as pretty-printed JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export_diagram(&self, diagram: &Diagram) -> Result<Vec<u8>, Error> {
        let mut bytes =
            serde_json::to_vec_pretty(diagram).map_err(|err| Error::Render(err.to_string()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
