use std::collections::HashMap;

use crate::error::IdlError;
use crate::types::{Backend, Conversion, TypeDesc};

/// Type names seeded into every registry before parsing begins.
pub const BUILTIN_TYPES: [&str; 12] = [
    "void", "int", "uint8", "int16", "uint16", "int32", "uint32", "int64", "uint64", "bool",
    "double", "string",
];

/// Single source of truth mapping type name to descriptor, scoped to
/// one `Unit`. Filled during parsing, queried afterwards; never shared
/// between units.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDesc>,
}

impl TypeRegistry {
    pub fn with_builtins(backend: Backend) -> TypeRegistry {
        let mut registry = TypeRegistry::default();
        registry.seed_builtins(backend);
        registry
    }

    fn seed(&mut self, name: &str, symbol: &str, sig: char) {
        self.types
            .insert(name.to_string(), TypeDesc::primitive(name, symbol, sig));
    }

    fn seed_rich(&mut self, name: &str, symbol: &str, internal: &str, sig: char, to: &str, from: &str) {
        let mut desc = TypeDesc::primitive(name, symbol, sig);
        desc.symbol_internal = Some(internal.to_string());
        desc.conversion = Some(Conversion {
            to_internal: to.to_string(),
            from_internal: from.to_string(),
        });
        self.types.insert(name.to_string(), desc);
    }

    /// Install the builtin primitives. Wire codes are fixed; only the
    /// host representation of `string`, `int64` and `uint64` follows
    /// the backend.
    fn seed_builtins(&mut self, backend: Backend) {
        self.seed("void", "void", 'i');
        self.seed("int", "int", 'i');
        self.seed("uint8", "uint8_t", 'y');
        self.seed("int16", "int16_t", 'n');
        self.seed("uint16", "uint16_t", 'q');
        self.seed("int32", "int32_t", 'i');
        self.seed("uint32", "uint32_t", 'u');
        self.seed("bool", "bool", 'b');
        self.seed("double", "double", 'd');

        match backend {
            Backend::Plain => {
                self.seed("int64", "int64_t", 'x');
                self.seed("uint64", "uint64_t", 't');
                self.seed("string", "std::string", 's');
            }
            Backend::Rich => {
                self.seed_rich(
                    "int64",
                    "int64_t",
                    "qlonglong",
                    'x',
                    "static_cast<qlonglong>({})",
                    "static_cast<int64_t>({})",
                );
                self.seed_rich(
                    "uint64",
                    "uint64_t",
                    "qulonglong",
                    't',
                    "static_cast<qulonglong>({})",
                    "static_cast<uint64_t>({})",
                );
                self.seed_rich(
                    "string",
                    "std::string",
                    "QString",
                    's',
                    "QString::fromStdString({})",
                    "{}.toStdString()",
                );
            }
        }
    }

    /// Insert a declared type. A name that is already present, builtin
    /// names included, is a fatal authoring error.
    pub fn register(&mut self, desc: TypeDesc) -> Result<(), IdlError> {
        if self.types.contains_key(&desc.name) {
            return Err(IdlError::DuplicateType(desc.name.clone()));
        }
        self.types.insert(desc.name.clone(), desc);
        Ok(())
    }

    /// Swap in an updated descriptor for an existing name. Used by the
    /// resolver when it synthesizes a dictionary symbol.
    pub(crate) fn replace(&mut self, desc: TypeDesc) {
        self.types.insert(desc.name.clone(), desc);
    }

    pub fn resolve(&self, name: &str) -> Result<&TypeDesc, IdlError> {
        self.types
            .get(name)
            .ok_or_else(|| IdlError::UnknownType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
