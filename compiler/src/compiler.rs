use tracing::debug;

use crate::error::IdlError;
use crate::parser::parse_unit;
use crate::resolver::resolve_unit;
use crate::types::{Backend, Unit};

/// Compile one schema document into a fully resolved `Unit`.
/// Returns `Err(IdlError)` if parsing or type resolution fails; no
/// partial unit is ever returned.
pub fn compile_unit(text: &str, name: &str, backend: Backend) -> Result<Unit, IdlError> {
    let mut unit = parse_unit(text, name, backend)?;
    resolve_unit(&mut unit)?;
    debug!(unit = %unit.name, backend = ?unit.backend, "compiled unit");
    Ok(unit)
}
