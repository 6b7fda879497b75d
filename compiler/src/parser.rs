use tracing::debug;

use crate::{
    error::IdlError,
    registry::TypeRegistry,
    types::{
        Backend, DictionaryDef, Direction, EnumDef, EnumValue, Field, Import, ImportItem,
        Interface, Method, Param, SequenceDef, Signal, StructDef, TypeDesc, TypeKind, Unit,
    },
    utils::{qname_of, quote},
    xml::{self, Element},
};

/// Phase 1: read the document, walk the `unit` element depth-first and
/// build the model, registering composite types as they are declared.
/// Type references are not checked here; that is the resolver's job.
pub fn parse_unit(text: &str, name: &str, backend: Backend) -> Result<Unit, IdlError> {
    let document = xml::read_document(text)?;
    let unit_element = document
        .find("unit")
        .ok_or_else(|| IdlError::MalformedDocument("document has no <unit> element".to_string()))?;
    build_unit(unit_element, name, backend)
}

fn build_unit(element: &Element, name: &str, backend: Backend) -> Result<Unit, IdlError> {
    let namespace_attr = element.attr("namespace");
    let (namespace, namespace_list, guard_prefix) = if namespace_attr.is_empty() {
        (None, Vec::new(), String::new())
    } else {
        (
            Some(namespace_attr.to_string()),
            namespace_attr.split('.').map(str::to_string).collect(),
            namespace_attr.replace('.', "_") + "_",
        )
    };
    let guard = (guard_prefix + name).to_uppercase();

    let mut unit = Unit {
        name: name.to_string(),
        namespace,
        namespace_list,
        guard,
        backend,
        interfaces: Vec::new(),
        structs: Vec::new(),
        sequences: Vec::new(),
        dictionaries: Vec::new(),
        enums: Vec::new(),
        imports: Vec::new(),
        registry: TypeRegistry::with_builtins(backend),
    };

    for child in &element.children {
        match child.name.as_str() {
            "interface" => unit.interfaces.push(build_interface(child)),
            "struct" => {
                let def = build_struct(child);
                unit.registry.register(def.descriptor())?;
                unit.structs.push(def);
            }
            "sequence" => {
                let def = build_sequence(child);
                unit.registry.register(def.descriptor())?;
                unit.sequences.push(def);
            }
            "dictionary" => {
                let def = build_dictionary(child);
                unit.registry.register(def.descriptor())?;
                unit.dictionaries.push(def);
            }
            "enum" => {
                let def = build_enum(child)?;
                unit.registry.register(def.descriptor())?;
                unit.enums.push(def);
            }
            "import" => unit.imports.push(build_import(child)),
            "type" => unit.registry.register(build_opaque(child))?,
            // Unknown elements are skipped so newer schemas still compile.
            other => debug!(element = other, "ignoring unrecognized element"),
        }
    }

    debug!(
        unit = %unit.name,
        interfaces = unit.interfaces.len(),
        types = unit.registry.len(),
        "parsed unit"
    );
    Ok(unit)
}

fn build_interface(element: &Element) -> Interface {
    let namespace_attr = element.attr("namespace");
    let mut interface = Interface {
        name: element.attr("name").to_string(),
        csymbol: element.attr("csymbol").to_string(),
        qname: qname_of(element.attr("name")),
        condition: element.attr("condition").to_string(),
        namespace: if namespace_attr.is_empty() {
            None
        } else {
            Some(namespace_attr.to_string())
        },
        namespace_list: if namespace_attr.is_empty() {
            Vec::new()
        } else {
            namespace_attr.split('.').map(str::to_string).collect()
        },
        methods: Vec::new(),
        signals: Vec::new(),
    };

    for child in &element.children {
        match child.name.as_str() {
            "method" => interface.methods.push(build_method(child)),
            "signal" => interface.signals.push(build_signal(child)),
            _ => {}
        }
    }
    interface
}

fn build_arg(element: &Element, direction: Direction) -> Param {
    let hint = element.attr("hint");
    Param {
        name: element.attr("name").to_string(),
        type_: element.attr("type").to_string(),
        direction,
        hints: if hint.is_empty() {
            Vec::new()
        } else {
            hint.split(',').map(str::to_string).collect()
        },
    }
}

fn build_method(element: &Element) -> Method {
    let mut method = Method {
        name: element.attr("name").to_string(),
        csymbol: element.attr("csymbol").to_string(),
        qname: qname_of(element.attr("name")),
        condition: element.attr("condition").to_string(),
        params: Vec::new(),
        num_in_args: 0,
        num_out_args: 0,
    };

    for child in &element.children {
        if child.name != "arg" {
            continue;
        }
        let param = build_arg(child, Direction::from_attr(child.attr("direction")));
        match param.direction {
            Direction::In => method.num_in_args += 1,
            Direction::Out => method.num_out_args += 1,
            Direction::Bind => {}
        }
        method.params.push(param);
    }
    method
}

fn build_signal(element: &Element) -> Signal {
    let mut signal = Signal {
        name: element.attr("name").to_string(),
        csymbol: element.attr("csymbol").to_string(),
        qname: qname_of(element.attr("name")),
        params: Vec::new(),
    };

    for child in &element.children {
        if child.name == "arg" {
            // Signal args carry no direction marker; every one is outbound.
            signal.params.push(build_arg(child, Direction::Out));
        }
    }
    signal
}

fn build_struct(element: &Element) -> StructDef {
    let mut fields = Vec::new();
    for child in &element.children {
        if child.name == "field" {
            fields.push(Field {
                name: child.attr("name").to_string(),
                type_: child.attr("type").to_string(),
            });
        }
    }

    StructDef {
        name: element.attr("name").to_string(),
        qname: qname_of(element.attr("name")),
        csymbol: element.attr("csymbol").to_string(),
        condition: element.attr("condition").to_string(),
        fields,
    }
}

fn build_sequence(element: &Element) -> SequenceDef {
    SequenceDef {
        name: element.attr("name").to_string(),
        qname: qname_of(element.attr("name")),
        csymbol: element.attr("csymbol").to_string(),
        condition: element.attr("condition").to_string(),
        container: element.attr("container").to_string(),
        element_type: element.attr("type").to_string(),
    }
}

fn build_dictionary(element: &Element) -> DictionaryDef {
    DictionaryDef {
        name: element.attr("name").to_string(),
        qname: qname_of(element.attr("name")),
        csymbol: element.attr("csymbol").to_string(),
        condition: element.attr("condition").to_string(),
        key_type: element.attr("key_type").to_string(),
        value_type: element.attr("value_type").to_string(),
    }
}

fn build_enum(element: &Element) -> Result<EnumDef, IdlError> {
    let mut values = Vec::new();
    let mut counter: i64 = 0;

    for child in &element.children {
        if child.name != "value" {
            continue;
        }
        let explicit = child.attr("value");
        if !explicit.is_empty() {
            counter = explicit.parse().map_err(|_| {
                IdlError::MalformedDocument(format!(
                    "invalid enum value {} for {}",
                    quote(explicit),
                    quote(child.attr("name"))
                ))
            })?;
        }
        values.push(EnumValue {
            name: child.attr("name").to_string(),
            csymbol: child.attr("csymbol").to_string(),
            value: counter,
        });
        counter += 1;
    }

    Ok(EnumDef {
        name: element.attr("name").to_string(),
        qname: qname_of(element.attr("name")),
        csymbol: element.attr("csymbol").to_string(),
        condition: element.attr("condition").to_string(),
        values,
    })
}

fn build_import(element: &Element) -> Import {
    let mut import = Import {
        condition: element.attr("condition").to_string(),
        includes: Vec::new(),
        namespaces: Vec::new(),
    };

    for child in &element.children {
        let item = ImportItem {
            name: child.attr("name").to_string(),
            condition: child.attr("condition").to_string(),
        };
        match child.name.as_str() {
            "include" => import.includes.push(item),
            "namespace" => import.namespaces.push(item),
            _ => {}
        }
    }
    import
}

fn build_opaque(element: &Element) -> TypeDesc {
    TypeDesc {
        name: element.attr("name").to_string(),
        qname: qname_of(element.attr("name")),
        symbol: element.attr("csymbol").to_string(),
        symbol_internal: None,
        conversion: None,
        kind: TypeKind::Opaque,
    }
}
