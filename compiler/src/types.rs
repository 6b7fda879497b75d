use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::IdlError;
use crate::registry::TypeRegistry;

/// Primitive-type profile selected by the caller before parsing.
///
/// The profile only affects which descriptors `TypeRegistry` seeds for
/// `string`, `int64` and `uint64`; wire signatures never change with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Host representation equals the public symbol, no conversions.
    Plain,
    /// Framework-integrated representations with explicit conversions.
    Rich,
}

impl FromStr for Backend {
    type Err = IdlError;

    fn from_str(text: &str) -> Result<Self, IdlError> {
        match text {
            "plain" => Ok(Backend::Plain),
            "rich" => Ok(Backend::Rich),
            other => Err(IdlError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
    Bind,
}

impl Direction {
    /// Attribute text to direction; anything unrecognized reads as `in`.
    pub fn from_attr(text: &str) -> Direction {
        match text {
            "out" => Direction::Out,
            "bind" => Direction::Bind,
            _ => Direction::In,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Bind => "bind",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub type_: String,
    pub direction: Direction,
    pub hints: Vec<String>,
}

impl Param {
    pub fn has_hint(&self, hint: &str) -> bool {
        self.hints.iter().any(|h| h == hint)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    pub name: String,
    pub csymbol: String,
    pub qname: String,
    pub condition: String,
    pub params: Vec<Param>,
    pub num_in_args: usize,
    pub num_out_args: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    pub name: String,
    pub csymbol: String,
    pub qname: String,
    pub params: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interface {
    pub name: String,
    pub csymbol: String,
    pub qname: String,
    pub condition: String,
    pub namespace: Option<String>,
    pub namespace_list: Vec<String>,
    pub methods: Vec<Method>,
    pub signals: Vec<Signal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub type_: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructDef {
    pub name: String,
    pub qname: String,
    pub csymbol: String,
    pub condition: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceDef {
    pub name: String,
    pub qname: String,
    pub csymbol: String,
    pub condition: String,
    /// Container kind tag, passed through to emission untouched.
    pub container: String,
    pub element_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictionaryDef {
    pub name: String,
    pub qname: String,
    pub csymbol: String,
    pub condition: String,
    pub key_type: String,
    pub value_type: String,
}

impl StructDef {
    pub fn descriptor(&self) -> TypeDesc {
        TypeDesc {
            name: self.name.clone(),
            qname: self.qname.clone(),
            symbol: self.csymbol.clone(),
            symbol_internal: None,
            conversion: None,
            kind: TypeKind::Struct { fields: self.fields.clone() },
        }
    }
}

impl SequenceDef {
    pub fn descriptor(&self) -> TypeDesc {
        TypeDesc {
            name: self.name.clone(),
            qname: self.qname.clone(),
            symbol: self.csymbol.clone(),
            symbol_internal: None,
            conversion: None,
            kind: TypeKind::Sequence { element: self.element_type.clone() },
        }
    }
}

impl DictionaryDef {
    pub fn descriptor(&self) -> TypeDesc {
        TypeDesc {
            name: self.name.clone(),
            qname: self.qname.clone(),
            symbol: self.csymbol.clone(),
            symbol_internal: None,
            conversion: None,
            kind: TypeKind::Dictionary {
                key: self.key_type.clone(),
                value: self.value_type.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    pub name: String,
    pub csymbol: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDef {
    pub name: String,
    pub qname: String,
    pub csymbol: String,
    pub condition: String,
    pub values: Vec<EnumValue>,
}

impl EnumDef {
    pub fn descriptor(&self) -> TypeDesc {
        TypeDesc {
            name: self.name.clone(),
            qname: self.qname.clone(),
            symbol: self.csymbol.clone(),
            symbol_internal: None,
            conversion: None,
            kind: TypeKind::Enum,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportItem {
    pub name: String,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Import {
    pub condition: String,
    pub includes: Vec<ImportItem>,
    pub namespaces: Vec<ImportItem>,
}

/// To/from-internal conversion expressions; `{}` marks the value slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub to_internal: String,
    pub from_internal: String,
}

/// The shape of a registered type, dispatched exhaustively by the
/// signature engine. The set of kinds is fixed by the schema vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeKind {
    Primitive { sig: char },
    Struct { fields: Vec<Field> },
    Sequence { element: String },
    Dictionary { key: String, value: String },
    Enum,
    /// Declared via `<type>`; supplied by an import, has no signature.
    Opaque,
}

/// Resolved descriptor for one registered type name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDesc {
    pub name: String,
    pub qname: String,
    pub symbol: String,
    pub symbol_internal: Option<String>,
    pub conversion: Option<Conversion>,
    pub kind: TypeKind,
}

impl TypeDesc {
    pub fn primitive(name: &str, symbol: &str, sig: char) -> TypeDesc {
        TypeDesc {
            name: name.to_string(),
            qname: name.to_string(),
            symbol: symbol.to_string(),
            symbol_internal: None,
            conversion: None,
            kind: TypeKind::Primitive { sig },
        }
    }

    /// The symbol used in generated code signatures.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The backend-specific marshaling symbol; the public symbol when
    /// no override exists.
    pub fn symbol_internal(&self) -> &str {
        self.symbol_internal.as_deref().unwrap_or(&self.symbol)
    }

    pub fn to_internal(&self, expr: &str) -> String {
        match &self.conversion {
            Some(conversion) => conversion.to_internal.replace("{}", expr),
            None => expr.to_string(),
        }
    }

    pub fn from_internal(&self, expr: &str) -> String {
        match &self.conversion {
            Some(conversion) => conversion.from_internal.replace("{}", expr),
            None => expr.to_string(),
        }
    }
}

/// One compiled schema document: the fully resolved model handed to
/// the emission layer. Read-only once `compile_unit` returns.
#[derive(Debug, Serialize)]
pub struct Unit {
    pub name: String,
    pub namespace: Option<String>,
    pub namespace_list: Vec<String>,
    pub guard: String,
    pub backend: Backend,
    pub interfaces: Vec<Interface>,
    pub structs: Vec<StructDef>,
    pub sequences: Vec<SequenceDef>,
    pub dictionaries: Vec<DictionaryDef>,
    pub enums: Vec<EnumDef>,
    pub imports: Vec<Import>,
    #[serde(skip)]
    pub(crate) registry: TypeRegistry,
}

impl Unit {
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }
}
