use tracing::debug;

use crate::error::IdlError;
use crate::types::Unit;

/// Phase 2: every type name referenced by a field, sequence element,
/// dictionary key/value or method/signal param must be present in the
/// registry, and dictionaries that did not supply a `csymbol` get one
/// synthesized from their key/value internal symbols. Fails with
/// `UnknownType` before a unit ever reaches the caller.
pub fn resolve_unit(unit: &mut Unit) -> Result<(), IdlError> {
    synthesize_dictionary_symbols(unit)?;

    for def in &unit.structs {
        for field in &def.fields {
            unit.registry.resolve(&field.type_)?;
        }
    }
    for def in &unit.sequences {
        unit.registry.resolve(&def.element_type)?;
    }
    for def in &unit.dictionaries {
        unit.registry.resolve(&def.key_type)?;
        unit.registry.resolve(&def.value_type)?;
    }
    for interface in &unit.interfaces {
        for method in &interface.methods {
            for param in &method.params {
                unit.registry.resolve(&param.type_)?;
            }
        }
        for signal in &interface.signals {
            for param in &signal.params {
                unit.registry.resolve(&param.type_)?;
            }
        }
    }

    debug!(unit = %unit.name, "resolved all type references");
    Ok(())
}

/// A dictionary with no explicit symbol maps to a generic map of its
/// key/value internal symbols. This is the one descriptor symbol that
/// is derived from two other resolved descriptors.
fn synthesize_dictionary_symbols(unit: &mut Unit) -> Result<(), IdlError> {
    for index in 0..unit.dictionaries.len() {
        if !unit.dictionaries[index].csymbol.is_empty() {
            continue;
        }
        let symbol = {
            let def = &unit.dictionaries[index];
            let key = unit.registry.resolve(&def.key_type)?;
            let value = unit.registry.resolve(&def.value_type)?;
            format!("std::map<{},{}>", key.symbol_internal(), value.symbol_internal())
        };
        unit.dictionaries[index].csymbol = symbol;
        let desc = unit.dictionaries[index].descriptor();
        unit.registry.replace(desc);
    }
    Ok(())
}
