//! Wire and introspection signature computation.
//!
//! Signatures are computed on demand against a filled registry; the
//! separator in introspection strings is the literal two-character
//! `\0` escape that ends up inside generated string literals.

use crate::error::IdlError;
use crate::registry::TypeRegistry;
use crate::types::{Direction, Method, Param, Signal, TypeDesc, TypeKind};

/// Wire signature of a registered type name.
pub fn type_signature(registry: &TypeRegistry, name: &str) -> Result<String, IdlError> {
    descriptor_signature(registry, registry.resolve(name)?)
}

/// Wire signature of a resolved descriptor.
pub fn descriptor_signature(registry: &TypeRegistry, desc: &TypeDesc) -> Result<String, IdlError> {
    match &desc.kind {
        TypeKind::Primitive { sig } => Ok(sig.to_string()),
        TypeKind::Struct { fields } => {
            let mut sig = String::from("(");
            for field in fields {
                sig.push_str(&type_signature(registry, &field.type_)?);
            }
            sig.push(')');
            Ok(sig)
        }
        TypeKind::Sequence { element } => Ok(format!("a{}", type_signature(registry, element)?)),
        TypeKind::Dictionary { key, value } => Ok(format!(
            "e{{{}{}}}",
            type_signature(registry, key)?,
            type_signature(registry, value)?
        )),
        // Enums travel as their symbolic name, never as the ordinal.
        TypeKind::Enum => Ok("s".to_string()),
        TypeKind::Opaque => Err(IdlError::OpaqueSignature(desc.name.clone())),
    }
}

fn return_param(params: &[Param]) -> Option<&Param> {
    params.iter().find(|p| p.has_hint("return"))
}

impl Method {
    /// `direction\0type\0name\0` triples in declared order. Bind params
    /// are resolved locally and never cross the wire.
    pub fn introspect_signature(&self, registry: &TypeRegistry) -> Result<String, IdlError> {
        let mut sig = String::new();
        for param in &self.params {
            if param.direction == Direction::Bind {
                continue;
            }
            let param_sig = type_signature(registry, &param.type_)?;
            sig.push_str(&format!(
                "{}\\0{}\\0{}\\0",
                param.direction, param_sig, param.name
            ));
        }
        Ok(sig)
    }

    /// Tuple signature of all params with the given direction.
    pub fn directional_signature(
        &self,
        registry: &TypeRegistry,
        direction: Direction,
    ) -> Result<String, IdlError> {
        let mut sig = String::from("(");
        for param in &self.params {
            if param.direction == direction {
                sig.push_str(&type_signature(registry, &param.type_)?);
            }
        }
        sig.push(')');
        Ok(sig)
    }

    /// Type of the param hinted `return`; `void` when none is.
    pub fn return_type(&self) -> &str {
        return_param(&self.params).map_or("void", |p| p.type_.as_str())
    }

    /// Name of the param hinted `return`; `ret` when none is.
    pub fn return_name(&self) -> &str {
        return_param(&self.params).map_or("ret", |p| p.name.as_str())
    }
}

impl Signal {
    /// `type\0name\0` pairs in declared order.
    pub fn introspect_signature(&self, registry: &TypeRegistry) -> Result<String, IdlError> {
        let mut sig = String::new();
        for param in &self.params {
            let param_sig = type_signature(registry, &param.type_)?;
            sig.push_str(&format!("{}\\0{}\\0", param_sig, param.name));
        }
        Ok(sig)
    }

    /// Tuple signature of the full param list.
    pub fn signature(&self, registry: &TypeRegistry) -> Result<String, IdlError> {
        let mut sig = String::from("(");
        for param in &self.params {
            sig.push_str(&type_signature(registry, &param.type_)?);
        }
        sig.push(')');
        Ok(sig)
    }

    pub fn return_type(&self) -> &str {
        return_param(&self.params).map_or("void", |p| p.type_.as_str())
    }

    pub fn return_name(&self) -> &str {
        return_param(&self.params).map_or("ret", |p| p.name.as_str())
    }
}
