//! Scenario tests A-E of the testable-properties list: hand-built models
//! run straight through the emitter, asserting on the substrings a correct
//! implementation must produce. No parser is involved — models are built
//! with `zonegen_model::ModelBuilder`, per the Open Question recorded in
//! the design notes.

use zonegen_emit::{EmitOptions, emit_model};
use zonegen_model::ModelBuilder;

#[test]
fn scenario_a_smoke_empty_interface() {
    let mut b = ModelBuilder::new();
    let root = b.root();
    let ns = b.namespace(root, "app");
    b.interface(ns, "Foo");
    let model = b.build();

    let streams = emit_model(&model, &EmitOptions::new("app")).unwrap();
    assert!(streams.header.as_str().contains("class Foo"));
    assert!(streams.header.as_str().contains("static uint64_t get_id(uint64_t rpc_version)"));
}

#[test]
fn scenario_b_basic_value_params_marshal_by_name() {
    let mut b = ModelBuilder::new();
    let root = b.root();
    let iface = b.interface(root, "Calc");
    let method = b.method(iface, "add", "int");
    b.add_param(method, "int", "a", &["in"]);
    b.add_param(method, "int", "b", &["in"]);
    let model = b.build();

    let streams = emit_model(&model, &EmitOptions::new("app")).unwrap();
    assert!(streams.proxy.as_str().contains("\"a\""));
    assert!(streams.proxy.as_str().contains("\"b\""));
    assert!(streams.header.as_str().contains("virtual int add(int a, int b) = 0;"));
}

#[test]
fn scenario_c_interface_in_param_binds_via_proxy_and_stub() {
    let mut b = ModelBuilder::new();
    let root = b.root();
    let bar = b.interface(root, "Bar");
    let foo = b.interface(root, "Foo");
    let method = b.method(foo, "use", "int");
    b.add_param(method, "rpc::shared_ptr<Bar>", "b", &["in"]);
    let _ = bar;
    let model = b.build();

    let streams = emit_model(&model, &EmitOptions::new("app")).unwrap();
    assert!(streams.proxy.as_str().contains("proxy_bind_in_param"));
    assert!(streams.stub.as_str().contains("stub_bind_in_param"));
}

#[test]
fn scenario_d_out_interface_reference_binds_out_param() {
    let mut b = ModelBuilder::new();
    let root = b.root();
    b.interface(root, "Bar");
    let foo = b.interface(root, "Foo");
    let method = b.method(foo, "make", "int");
    b.add_param(method, "rpc::shared_ptr<Bar>&", "b", &["out"]);
    let model = b.build();

    let streams = emit_model(&model, &EmitOptions::new("app")).unwrap();
    assert!(streams.stub.as_str().contains("stub_bind_out_param"));
    assert!(streams.proxy.as_str().contains("proxy_bind_out_param"));
}

#[test]
fn scenario_e_classifier_reject_aborts_emission() {
    let mut b = ModelBuilder::new();
    let root = b.root();
    let foo = b.interface(root, "Foo");
    let method = b.method(foo, "bad", "int");
    b.add_param(method, "int*&", "x", &["const", "out"]);
    let model = b.build();

    let result = emit_model(&model, &EmitOptions::new("app"));
    assert!(result.is_err());
}

#[test]
fn namespace_wrapping_from_options_brackets_the_whole_model() {
    let mut b = ModelBuilder::new();
    let root = b.root();
    b.interface(root, "Foo");
    let model = b.build();

    let mut options = EmitOptions::new("app");
    options.namespaces = vec!["outer".to_string(), "inner".to_string()];
    let streams = emit_model(&model, &options).unwrap();
    assert!(streams.header.as_str().contains("namespace outer"));
    assert!(streams.header.as_str().contains("namespace inner"));
}

#[test]
fn proxy_header_forward_declares_every_interface() {
    let mut b = ModelBuilder::new();
    let root = b.root();
    let ns = b.namespace(root, "app");
    b.interface(ns, "Foo");
    b.interface(ns, "Bar");
    let model = b.build();

    let streams = emit_model(&model, &EmitOptions::new("app")).unwrap();
    assert!(streams.proxy_header.as_str().contains("namespace app {"));
    assert!(streams.proxy_header.as_str().contains("class Foo;"));
    assert!(streams.proxy_header.as_str().contains("class Bar;"));
}

#[test]
fn register_stubs_lists_every_non_imported_interface() {
    let mut b = ModelBuilder::new();
    let root = b.root();
    b.interface(root, "Foo");
    b.interface(root, "Bar");
    let model = b.build();

    let streams = emit_model(&model, &EmitOptions::new("app")).unwrap();
    assert!(streams.stub_header.as_str().contains("app_register_stubs"));
    assert!(streams.stub_header.as_str().contains("Foo::get_id"));
    assert!(streams.stub_header.as_str().contains("Bar::get_id"));
}
