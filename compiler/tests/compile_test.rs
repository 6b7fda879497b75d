#![cfg(test)]

use busidl_compiler::{
    compile_unit,
    error::IdlError,
    types::{Backend, Direction},
};

const UNIT_XML: &str = r#"
<unit namespace="org.example">
  <import condition="HAVE_CONTEXT">
    <include name="context.hh"/>
    <namespace name="example" condition="HAVE_NAMESPACE"/>
  </import>
  <type name="Context" csymbol="example::Context"/>
  <enum name="Color" csymbol="Color">
    <value name="red"/>
    <value name="green" value="5"/>
    <value name="blue" csymbol="COLOR_BLUE"/>
  </enum>
  <struct name="Pixel" csymbol="Pixel">
    <field name="x" type="int32"/>
    <field name="y" type="int32"/>
    <field name="color" type="Color"/>
  </struct>
  <sequence name="PixelList" csymbol="std::list&lt;Pixel&gt;" container="list" type="Pixel"/>
  <dictionary name="PixelMap" key_type="string" value_type="Pixel"/>
  <interface name="org.example.Screen" csymbol="Screen" condition="HAVE_SCREEN">
    <method name="Ping" csymbol="ping">
      <arg name="msg" type="string" direction="in"/>
      <arg name="ok" type="bool" direction="out"/>
      <arg name="ctx" type="Context" direction="bind"/>
    </method>
    <method name="GetPixels" csymbol="get_pixels" condition="HAVE_PIXELS">
      <arg name="pixels" type="PixelList" direction="out" hint="return"/>
    </method>
    <signal name="Redraw" csymbol="redraw">
      <arg name="area" type="Pixel"/>
      <arg name="count" type="int32"/>
    </signal>
  </interface>
</unit>
"#;

#[test]
fn test_parse_unit() {
    let unit = compile_unit(UNIT_XML, "Test", Backend::Plain).expect("compile_unit failed");

    assert_eq!(unit.name, "Test");
    assert_eq!(unit.namespace.as_deref(), Some("org.example"));
    assert_eq!(unit.namespace_list, ["org", "example"]);
    assert_eq!(unit.guard, "ORG_EXAMPLE_TEST");
    assert_eq!(unit.backend, Backend::Plain);

    // Interface
    assert_eq!(unit.interfaces.len(), 1);
    let interface = &unit.interfaces[0];
    assert_eq!(interface.name, "org.example.Screen");
    assert_eq!(interface.csymbol, "Screen");
    assert_eq!(interface.qname, "org_example_Screen");
    assert_eq!(interface.condition, "HAVE_SCREEN");
    assert!(interface.namespace.is_none());
    assert_eq!(unit.interface("org.example.Screen").unwrap().csymbol, "Screen");

    // Methods
    assert_eq!(interface.methods.len(), 2);
    let ping = &interface.methods[0];
    assert_eq!(ping.name, "Ping");
    assert_eq!(ping.csymbol, "ping");
    assert_eq!(ping.params.len(), 3);
    assert_eq!(ping.num_in_args, 1);
    assert_eq!(ping.num_out_args, 1);
    assert_eq!(ping.params[0].name, "msg");
    assert_eq!(ping.params[0].type_, "string");
    assert_eq!(ping.params[0].direction, Direction::In);
    assert_eq!(ping.params[1].direction, Direction::Out);
    assert_eq!(ping.params[2].direction, Direction::Bind);

    let get_pixels = &interface.methods[1];
    assert_eq!(get_pixels.condition, "HAVE_PIXELS");
    assert_eq!(get_pixels.num_in_args, 0);
    assert_eq!(get_pixels.num_out_args, 1);
    assert!(get_pixels.params[0].has_hint("return"));

    // Signal
    assert_eq!(interface.signals.len(), 1);
    let redraw = &interface.signals[0];
    assert_eq!(redraw.name, "Redraw");
    assert_eq!(redraw.params.len(), 2);
    assert_eq!(redraw.params[0].name, "area");
    assert_eq!(redraw.params[1].type_, "int32");

    // Composite types
    assert_eq!(unit.structs.len(), 1);
    assert_eq!(unit.structs[0].fields.len(), 3);
    assert_eq!(unit.sequences.len(), 1);
    assert_eq!(unit.sequences[0].container, "list");
    assert_eq!(unit.sequences[0].element_type, "Pixel");
    assert_eq!(unit.sequences[0].csymbol, "std::list<Pixel>");
    assert_eq!(unit.dictionaries.len(), 1);
    assert_eq!(unit.enums.len(), 1);

    // Imports
    assert_eq!(unit.imports.len(), 1);
    let import = &unit.imports[0];
    assert_eq!(import.condition, "HAVE_CONTEXT");
    assert_eq!(import.includes.len(), 1);
    assert_eq!(import.includes[0].name, "context.hh");
    assert_eq!(import.includes[0].condition, "");
    assert_eq!(import.namespaces.len(), 1);
    assert_eq!(import.namespaces[0].condition, "HAVE_NAMESPACE");
}

#[test]
fn test_enum_numbering() {
    let unit = compile_unit(UNIT_XML, "Test", Backend::Plain).expect("compile_unit failed");

    let color = &unit.enums[0];
    assert_eq!(color.values.len(), 3);
    assert_eq!(color.values[0].name, "red");
    assert_eq!(color.values[0].value, 0);
    assert_eq!(color.values[1].name, "green");
    assert_eq!(color.values[1].value, 5);
    assert_eq!(color.values[2].name, "blue");
    assert_eq!(color.values[2].value, 6);
    assert_eq!(color.values[2].csymbol, "COLOR_BLUE");
}

#[test]
fn test_dictionary_symbol_synthesis() {
    let unit = compile_unit(UNIT_XML, "Test", Backend::Plain).expect("compile_unit failed");

    // No csymbol in the schema, so the symbol is derived from the
    // key/value internal symbols.
    assert_eq!(unit.dictionaries[0].csymbol, "std::map<std::string,Pixel>");
    let desc = unit.registry().resolve("PixelMap").expect("resolve failed");
    assert_eq!(desc.symbol(), "std::map<std::string,Pixel>");
}

#[test]
fn test_interface_namespace_override() {
    let xml = r#"
    <unit namespace="org.example">
      <interface name="I" csymbol="I" namespace="alt.space">
        <method name="Noop" csymbol="noop"/>
      </interface>
    </unit>
    "#;
    let unit = compile_unit(xml, "Test", Backend::Plain).expect("compile_unit failed");

    let interface = &unit.interfaces[0];
    assert_eq!(interface.namespace.as_deref(), Some("alt.space"));
    assert_eq!(interface.namespace_list, ["alt", "space"]);
    // The unit namespace is untouched by the override.
    assert_eq!(unit.namespace.as_deref(), Some("org.example"));
}

#[test]
fn test_invalid_enum_value_is_rejected() {
    let xml = r#"
    <unit>
      <enum name="Mode" csymbol="Mode">
        <value name="a" value="abc"/>
      </enum>
    </unit>
    "#;
    let err = compile_unit(xml, "Test", Backend::Plain).unwrap_err();
    match err {
        IdlError::MalformedDocument(msg) => {
            assert!(msg.contains("abc"), "message should name the bad value: {msg}");
        }
        other => panic!("expected MalformedDocument, got {other:?}"),
    }
}

#[test]
fn test_guard_without_namespace() {
    let unit = compile_unit("<unit/>", "DBus", Backend::Plain).expect("compile_unit failed");
    assert!(unit.namespace.is_none());
    assert!(unit.namespace_list.is_empty());
    assert_eq!(unit.guard, "DBUS");
}

#[test]
fn test_unknown_elements_are_ignored() {
    let xml = r#"
    <unit>
      <annotation name="org.example.Hidden"/>
      <interface name="I" csymbol="I">
        <property name="ignored"/>
        <method name="Noop" csymbol="noop"/>
      </interface>
    </unit>
    "#;
    let unit = compile_unit(xml, "Test", Backend::Plain).expect("compile_unit failed");
    assert_eq!(unit.interfaces.len(), 1);
    assert_eq!(unit.interfaces[0].methods.len(), 1);
    assert!(unit.interfaces[0].methods[0].params.is_empty());
}

#[test]
fn test_unknown_type_aborts_compilation() {
    let xml = r#"
    <unit>
      <struct name="Broken" csymbol="Broken">
        <field name="gizmo" type="Frob"/>
      </struct>
    </unit>
    "#;
    let err = compile_unit(xml, "Test", Backend::Plain).unwrap_err();
    match err {
        IdlError::UnknownType(name) => assert_eq!(name, "Frob"),
        other => panic!("expected UnknownType, got {other:?}"),
    }
}

#[test]
fn test_missing_type_attribute_defers_to_unknown_type() {
    // A missing required attribute reads as "", which then fails to
    // resolve rather than failing at the point of omission.
    let xml = r#"
    <unit>
      <interface name="I" csymbol="I">
        <method name="M" csymbol="m">
          <arg name="x" direction="in"/>
        </method>
      </interface>
    </unit>
    "#;
    let err = compile_unit(xml, "Test", Backend::Plain).unwrap_err();
    match err {
        IdlError::UnknownType(name) => assert_eq!(name, ""),
        other => panic!("expected UnknownType, got {other:?}"),
    }
}

#[test]
fn test_duplicate_type_is_rejected() {
    let xml = r#"
    <unit>
      <enum name="Mode" csymbol="Mode"><value name="a"/></enum>
      <struct name="Mode" csymbol="Mode"/>
    </unit>
    "#;
    let err = compile_unit(xml, "Test", Backend::Plain).unwrap_err();
    match err {
        IdlError::DuplicateType(name) => assert_eq!(name, "Mode"),
        other => panic!("expected DuplicateType, got {other:?}"),
    }
}

#[test]
fn test_builtin_name_cannot_be_redeclared() {
    let xml = r#"
    <unit>
      <struct name="string" csymbol="NotAString"/>
    </unit>
    "#;
    let err = compile_unit(xml, "Test", Backend::Plain).unwrap_err();
    match err {
        IdlError::DuplicateType(name) => assert_eq!(name, "string"),
        other => panic!("expected DuplicateType, got {other:?}"),
    }
}
