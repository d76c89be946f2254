//! The tree-walking emitter: drives the four output streams from a
//! resolved [`Model`] — header class + serialiser policies, proxy/stub
//! method bodies, and the four-encoding marshal switch.

use std::fmt::Write as _;

use tracing::{debug, instrument};
use zonegen_classify::{Classified, classify};
use zonegen_core::{EntityId, EntityKind, Model};

use crate::error::EmitError;
use crate::protocol::{Encoding, ProtocolVersion};
use crate::render::{self, ParamCtx};
use crate::slot::Slot;
use crate::writer::Streams;

/// Resolved compile-time configuration every emission phase reads.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Used to build the `<module>_register_stubs` symbol name.
    pub module_name: String,
    /// Outer-to-inner namespace wrapping applied around every generated
    /// declaration (the `-n`/`--namespace` flag, repeatable).
    pub namespaces: Vec<String>,
    /// Whether the generated proxy runs in a host zone. Governs whether a
    /// `Reference`-role in-parameter is legal (`ReferenceFromGuest`
    /// otherwise) — see the classifier's decision table.
    pub caller_is_host: bool,
}

impl EmitOptions {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            namespaces: Vec::new(),
            caller_is_host: true,
        }
    }
}

/// Emits every declaration reachable from `model`'s root into the four
/// output streams.
#[instrument(skip(model, options), fields(module = %options.module_name))]
pub fn emit_model(model: &Model, options: &EmitOptions) -> Result<Streams, EmitError> {
    let mut streams = Streams::new();
    let mut stub_registrations = Vec::new();

    for ns in options.namespaces.iter() {
        streams.line_all(format!("namespace {ns}"));
        streams.line_all("{");
        streams.header.indent();
        streams.proxy.indent();
        streams.stub.indent();
        streams.stub_header.indent();
    }

    for child in model.get(model.root()).children.clone() {
        emit_entity(model, child, &mut streams, options, &mut stub_registrations)?;
    }

    for _ in &options.namespaces {
        streams.header.dedent();
        streams.proxy.dedent();
        streams.stub.dedent();
        streams.stub_header.dedent();
        streams.line_all("}");
    }

    emit_register_stubs(&mut streams, options, &stub_registrations);
    emit_proxy_header_forward_decls(&mut streams, &stub_registrations);

    debug!(interfaces = stub_registrations.len(), "emitted model");
    Ok(streams)
}

/// Writes one forward declaration per interface into the proxy-header
/// stream, each wrapped in its own namespace nest. Reopening a namespace
/// per declaration is valid C++ and keeps this independent of the other
/// streams' single shared namespace-wrapping loop.
fn emit_proxy_header_forward_decls(streams: &mut Streams, registrations: &[StubRegistration]) {
    for reg in registrations {
        let segments: Vec<&str> = reg.qualified_name.split("::").collect();
        let (namespaces, name) = segments.split_at(segments.len() - 1);

        for ns in namespaces {
            streams.proxy_header.open_block(format!("namespace {ns} {{"));
        }
        streams.proxy_header.line(format!("class {};", name[0]));
        for _ in namespaces {
            streams.proxy_header.close_block("}");
        }
    }
}

struct StubRegistration {
    qualified_name: String,
}

fn emit_entity(
    model: &Model,
    id: EntityId,
    streams: &mut Streams,
    options: &EmitOptions,
    registrations: &mut Vec<StubRegistration>,
) -> Result<(), EmitError> {
    let entity = model.get(id);
    match entity.kind {
        EntityKind::Namespace | EntityKind::Library => emit_namespace(model, id, streams, options, registrations),
        EntityKind::Struct => emit_struct(model, id, streams),
        EntityKind::Interface => emit_interface(model, id, streams, options, registrations),
        EntityKind::Enum => emit_enum(model, id, streams),
        EntityKind::Typedef => emit_typedef(model, id, streams),
        _ => Ok(()),
    }
}

fn emit_namespace(
    model: &Model,
    id: EntityId,
    streams: &mut Streams,
    options: &EmitOptions,
    registrations: &mut Vec<StubRegistration>,
) -> Result<(), EmitError> {
    let entity = model.get(id);
    let opened = !entity.name.is_empty();
    if opened {
        streams.line_all(format!("namespace {}", entity.name));
        streams.line_all("{");
        streams.header.indent();
        streams.proxy.indent();
        streams.stub.indent();
        streams.stub_header.indent();
    }
    for child in entity.children.clone() {
        emit_entity(model, child, streams, options, registrations)?;
    }
    if opened {
        streams.header.dedent();
        streams.proxy.dedent();
        streams.stub.dedent();
        streams.stub_header.dedent();
        streams.line_all("}");
    }
    Ok(())
}

fn emit_enum(model: &Model, id: EntityId, streams: &mut Streams) -> Result<(), EmitError> {
    let entity = model.get(id);
    streams.header.open_block(format!("enum class {} {{", entity.name));
    for value_id in model.functions(id) {
        if model.get(value_id).kind != EntityKind::EnumValue {
            continue;
        }
        let value = model.get(value_id);
        let default = value
            .function()
            .and_then(|f| f.default_value.as_deref())
            .map(|v| format!(" = {v}"))
            .unwrap_or_default();
        streams.header.line(format!("{}{},", value.name, default));
    }
    streams.header.close_block("};");
    Ok(())
}

fn emit_typedef(model: &Model, id: EntityId, streams: &mut Streams) -> Result<(), EmitError> {
    let entity = model.get(id);
    let target = entity
        .class()
        .and_then(|c| c.alias_target.as_deref())
        .unwrap_or("void");
    streams.header.line(format!("using {} = {};", entity.name, target));
    Ok(())
}

fn emit_struct(model: &Model, id: EntityId, streams: &mut Streams) -> Result<(), EmitError> {
    let entity = model.get(id);
    if entity.is_imported {
        streams
            .header
            .line(format!("// {} is declared by imported library {:?}", entity.name, entity.import_lib));
        return Ok(());
    }

    let bases = entity.class().map(|c| c.base_classes.clone()).unwrap_or_default();
    let base_clause = bases
        .iter()
        .map(|b| format!(": public {}", model.get(*b).name))
        .collect::<Vec<_>>()
        .join(", ");
    let decl = if base_clause.is_empty() {
        format!("struct {} {{", entity.name)
    } else {
        format!("struct {} {} {{", entity.name, base_clause)
    };
    streams.header.open_block(decl);

    for field_id in model.functions(id) {
        if model.get(field_id).kind != EntityKind::FunctionVariable {
            continue;
        }
        let field = model.get(field_id);
        let Some(data) = field.function() else { continue };
        let array = data
            .array_size
            .as_deref()
            .map(|n| format!("[{n}]"))
            .unwrap_or_default();
        streams.header.line(format!("{} {}{};", data.return_type, field.name, array));
    }

    let fingerprint = zonegen_fingerprint::fingerprint(model, id)?;
    streams.header.line("");
    streams.header.open_block("static uint64_t get_id(uint64_t rpc_version) {");
    streams.header.line("if (rpc_version >= 2)");
    streams.header.line(format!("\treturn {fingerprint}ull;"));
    streams.header.line("return 0;");
    streams.header.close_block("}");

    streams.header.close_block("};");
    Ok(())
}

fn emit_interface(
    model: &Model,
    id: EntityId,
    streams: &mut Streams,
    options: &EmitOptions,
    registrations: &mut Vec<StubRegistration>,
) -> Result<(), EmitError> {
    let entity = model.get(id);
    if entity.is_imported {
        streams
            .header
            .line(format!("// {} is declared by imported library {:?}", entity.name, entity.import_lib));
        return Ok(());
    }

    let name = entity.name.clone();
    let qualified_name = if options.namespaces.is_empty() {
        model.qualified_name(id)
    } else {
        format!("{}::{}", options.namespaces.join("::"), model.qualified_name(id))
    };
    let methods: Vec<EntityId> = model.functions(id).filter(|m| model.get(*m).kind == EntityKind::FunctionMethod).collect();

    emit_interface_header(model, id, &name, streams, &methods)?;
    emit_interface_proxy(model, id, &name, streams, &methods, options)?;
    emit_interface_stub(model, id, &name, streams, &methods, options)?;

    registrations.push(StubRegistration { qualified_name });
    Ok(())
}

fn param_declaration(p: &zonegen_core::Parameter) -> String {
    format!("{} {}", p.type_name, p.name)
}

fn emit_interface_header(
    model: &Model,
    id: EntityId,
    name: &str,
    streams: &mut Streams,
    methods: &[EntityId],
) -> Result<(), EmitError> {
    let fingerprint = zonegen_fingerprint::fingerprint(model, id)?;
    let legacy = zonegen_fingerprint::legacy_hash_v1(model, id);

    streams.header.open_block(format!("class {name} {{"));
    streams.header.line("public:");
    streams.header.line(format!("virtual ~{name}() = default;"));
    streams.header.line("");
    streams.header.open_block("static uint64_t get_id(uint64_t rpc_version) {");
    streams.header.line("if (rpc_version >= 2)");
    streams.header.line(format!("\treturn {fingerprint}ull;"));
    streams.header.line(format!("return {legacy}ull;"));
    streams.header.close_block("}");
    streams.header.line("");

    for &m in methods {
        let method = model.get(m);
        let data = method.function().expect("method carries function data");
        let params = data
            .parameters
            .iter()
            .map(param_declaration)
            .collect::<Vec<_>>()
            .join(", ");
        streams
            .header
            .line(format!("virtual {} {}({}) = 0;", data.return_type, method.name, params));
    }

    emit_serialiser_policies(model, methods, streams);

    streams.header.close_block("};");
    Ok(())
}

/// Nested pure-static serialiser policy classes, one per marshalling role.
/// `buffered_proxy_serialiser` only carries methods whose parameters are
/// all in-only, non-interface, non-pointer — i.e. safe to marshal without
/// any interface-descriptor bookkeeping.
fn emit_serialiser_policies(model: &Model, methods: &[EntityId], streams: &mut Streams) {
    for policy in ["proxy_serialiser", "stub_deserialiser", "stub_serialiser", "proxy_deserialiser"] {
        streams.header.line("template<typename Serialiser, typename... ExtraArgs>");
        streams.header.open_block(format!("struct {policy} {{"));
        for &m in methods {
            let method = model.get(m);
            streams.header.line(format!(
                "static void {}(Serialiser&, ExtraArgs&&...);",
                method.name
            ));
        }
        streams.header.close_block("};");
    }

    let buffered: Vec<EntityId> = methods
        .iter()
        .copied()
        .filter(|&m| {
            let data = model.get(m).function().expect("method carries function data");
            data.parameters.iter().all(|p| {
                let (_, modifiers) = zonegen_core::text::strip_reference_modifiers(&p.type_name);
                let in_only = zonegen_core::text::is_in(&p.attributes) && !zonegen_core::text::is_out(&p.attributes);
                in_only && !modifiers.contains('*')
            })
        })
        .collect();

    streams.header.line("template<typename Serialiser, typename... ExtraArgs>");
    streams.header.open_block("struct buffered_proxy_serialiser {");
    for m in buffered {
        let method = model.get(m);
        streams.header.line(format!(
            "static void {}(Serialiser&, ExtraArgs&&...);",
            method.name
        ));
    }
    streams.header.close_block("};");
}

/// Emits the `<Name>_proxy` class. The proxy always marshals its in-params
/// with a single fixed binary encoding and sends once per protocol
/// version it was built for — the stub, not the proxy, is what switches
/// on the wire encoding (see [`emit_stub_demarshal_in`]/[`emit_stub_marshal_out`]).
fn emit_interface_proxy(
    model: &Model,
    id: EntityId,
    name: &str,
    streams: &mut Streams,
    methods: &[EntityId],
    options: &EmitOptions,
) -> Result<(), EmitError> {
    streams.proxy.open_block(format!("class {name}_proxy : public {name} {{"));
    streams.proxy.line("rpc::shared_ptr<rpc::object_proxy> __rpc_sp;");
    streams.proxy.line("public:");

    for (index, &m) in methods.iter().enumerate() {
        let method = model.get(m);
        let data = method.function().expect("method carries function data");
        let params = data
            .parameters
            .iter()
            .map(param_declaration)
            .collect::<Vec<_>>()
            .join(", ");
        streams
            .proxy
            .open_block(format!("{} {}({}) override {{", data.return_type, method.name, params));

        let classified: Vec<(String, Classified)> = data
            .parameters
            .iter()
            .map(|p| {
                let c = classify(model, id, &p.type_name, &p.attributes, options.caller_is_host)?;
                Ok((p.name.clone(), c))
            })
            .collect::<Result<_, EmitError>>()?;

        streams.proxy.line("auto __rpc_ret = rpc::error::OK();");
        streams.proxy.line("std::vector<char> __rpc_in_buf;");
        streams.proxy.line("std::vector<char> __rpc_out_buf(24); // short string optimisation size");
        streams.proxy.line(format!("const int __rpc_method_id = {index};"));

        emit_proxy_locals(streams, &classified);

        streams.proxy.line(format!("#ifdef {}", ProtocolVersion::V2.macro_name()));
        streams.proxy.line("bool __rpc_has_sent = false;");
        streams
            .proxy
            .open_block("if (__rpc_sp->get_remote_rpc_version() == rpc::VERSION_2) {");
        emit_proxy_version_branch(streams, &classified);
        streams.proxy.line("__rpc_has_sent = true;");
        streams.proxy.close_block("}");
        streams.proxy.line("#endif");

        streams.proxy.line(format!("#ifdef {}", ProtocolVersion::V1.macro_name()));
        streams
            .proxy
            .open_block("if (!__rpc_has_sent || __rpc_ret == rpc::error::INVALID_VERSION()) {");
        streams
            .proxy
            .open_block("if (__rpc_sp->get_remote_rpc_version() == rpc::VERSION_1) {");
        emit_proxy_version_branch(streams, &classified);
        streams.proxy.close_block("}");
        streams.proxy.close_block("}");
        streams.proxy.line("#endif");

        streams
            .proxy
            .line("if (__rpc_ret >= rpc::error::MIN() && __rpc_ret <= rpc::error::MAX())");
        streams.proxy.open_block("{");
        streams.proxy.line("return __rpc_ret;");
        streams.proxy.close_block("}");

        emit_proxy_marshal_out(streams, &classified);
        emit_proxy_cleanup(streams, &classified);
        streams.proxy.line("return __rpc_ret;");

        streams.proxy.close_block("}");
    }

    streams.proxy.close_block("};");
    Ok(())
}

/// Declarations that live for the whole method body, independent of
/// which protocol version ends up sending: out-parameter storage and the
/// stub bindings an interface in-param needs before it can be marshalled.
fn emit_proxy_locals(streams: &mut Streams, classified: &[(String, Classified)]) {
    let mut count = 0u64;
    for (pname, c) in classified {
        let mut ctx = ParamCtx::new(pname, &c.element_type, &mut count);
        if let Some(frag) = render::render(c.role, Slot::ProxyPrepareIn, &mut ctx) {
            streams.proxy.line(frag);
        }
        if let Some(frag) = render::render(c.role, Slot::ProxyOutDeclaration, &mut ctx) {
            streams.proxy.line(frag);
        }
    }
}

/// One version branch's body: bind interface in-params, marshal-in with a
/// fixed binary encoding, and send. Called once under `#ifdef RPC_V2` and
/// once under `#ifdef RPC_V1` by the caller.
fn emit_proxy_version_branch(streams: &mut Streams, classified: &[(String, Classified)]) {
    for (pname, c) in classified {
        let mut count = 0u64;
        let mut ctx = ParamCtx::new(pname, &c.element_type, &mut count);
        if let Some(frag) = render::render(c.role, Slot::ProxyPrepareInInterfaceId, &mut ctx) {
            streams.proxy.line(frag);
        }
    }

    let mut count = 0u64;
    let mut marshal_in = String::new();
    for (pname, c) in classified {
        let mut ctx = ParamCtx::new(pname, &c.element_type, &mut count);
        if let Some(frag) = render::render(c.role, Slot::ProxyMarshalIn, &mut ctx) {
            let _ = write!(marshal_in, "{frag}");
        }
    }
    streams
        .proxy
        .line(format!("__rpc_in_buf = rpc::to_yas_buffer(\"in\"{marshal_in});"));
    streams.proxy.line(
        "__rpc_ret = __rpc_sp->send(__rpc_method_id, __rpc_in_buf.size(), __rpc_in_buf.data(), __rpc_out_buf);",
    );
}

/// Deserialises `__rpc_out_buf` back into the declared out-parameter
/// locals, then lets [`Slot::ProxyValueReturn`] write them through the
/// caller's references/pointers. A no-op when the method has no out
/// parameters. Always one fixed binary encoding — unlike the stub, the
/// proxy never switches on [`Encoding`] (see module docs).
fn emit_proxy_marshal_out(streams: &mut Streams, classified: &[(String, Classified)]) {
    let mut count = 0u64;
    let mut marshal_out = String::new();
    for (pname, c) in classified {
        let mut ctx = ParamCtx::new(pname, &c.element_type, &mut count);
        if let Some(frag) = render::render(c.role, Slot::ProxyMarshalOut, &mut ctx) {
            let _ = write!(marshal_out, "{frag}");
        }
    }

    if !marshal_out.is_empty() {
        streams.proxy.open_block("try {");
        streams
            .proxy
            .line(format!("rpc::from_yas_buffer(__rpc_out_buf, \"out\"{marshal_out});"));
        streams.proxy.close_block("}");
        streams.proxy.open_block("catch (...) {");
        streams.proxy.line("return rpc::error::PROXY_DESERIALISATION_ERROR();");
        streams.proxy.close_block("}");
    }

    let mut count = 0u64;
    for (pname, c) in classified {
        let mut ctx = ParamCtx::new(pname, &c.element_type, &mut count);
        if let Some(frag) = render::render(c.role, Slot::ProxyValueReturn, &mut ctx) {
            streams.proxy.line(frag);
        }
    }
}

fn emit_proxy_cleanup(streams: &mut Streams, classified: &[(String, Classified)]) {
    let mut count = 0u64;
    for (pname, c) in classified {
        let mut ctx = ParamCtx::new(pname, &c.element_type, &mut count);
        if let Some(frag) = render::render(c.role, Slot::ProxyCleanIn, &mut ctx) {
            streams.proxy.line(frag);
        }
    }
}

#[instrument(skip(model, streams, methods, options), fields(interface = name))]
fn emit_interface_stub(
    model: &Model,
    id: EntityId,
    name: &str,
    streams: &mut Streams,
    methods: &[EntityId],
    options: &EmitOptions,
) -> Result<(), EmitError> {
    streams
        .stub
        .open_block(format!("class {name}_stub : public rpc::i_interface_stub {{"));
    streams.stub.line("std::weak_ptr<rpc::object_stub> target_stub_;");
    streams.stub.line("public:");
    streams.stub.open_block(
        "int call(uint64_t protocol_version, rpc::encoding encoding, uint64_t caller_channel_zone_id, \
         uint64_t caller_zone_id, rpc::method method_id, const std::vector<char>& in_buf, std::vector<char>& out_buf) {",
    );
    streams.stub.open_block("switch (method_id.get_val()) {");

    for (index, &m) in methods.iter().enumerate() {
        let method = model.get(m);
        let data = method.function().expect("method carries function data");
        streams.stub.line(format!("case {index}:"));
        streams.stub.indent();

        let classified: Vec<(String, Classified)> = data
            .parameters
            .iter()
            .map(|p| {
                let c = classify(model, id, &p.type_name, &p.attributes, options.caller_is_host)?;
                Ok((p.name.clone(), c))
            })
            .collect::<Result<_, EmitError>>()?;

        streams.stub.line("int __rpc_ret = rpc::error::OK();");
        streams.stub.open_block("try {");

        let mut count = 0u64;
        for (pname, c) in &classified {
            let mut ctx = ParamCtx::new(pname, &c.element_type, &mut count);
            if let Some(frag) = render::render(c.role, Slot::StubDemarshalDeclaration, &mut ctx) {
                streams.stub.line(format!("{frag};"));
            }
        }

        emit_stub_demarshal_in(streams, &classified);

        streams.stub.close_block("}");
        streams.stub.open_block("catch (...) {");
        streams.stub.line("return rpc::error::STUB_DESERIALISATION_ERROR();");
        streams.stub.close_block("}");

        for (pname, c) in &classified {
            let mut local_count = 0u64;
            let mut ctx = ParamCtx::new(pname, &c.element_type, &mut local_count);
            if let Some(frag) = render::render(c.role, Slot::StubParamWrap, &mut ctx) {
                streams.stub.line(frag);
            }
        }

        let args = classified
            .iter()
            .map(|(pname, c)| {
                let mut local_count = 0u64;
                let mut ctx = ParamCtx::new(pname, &c.element_type, &mut local_count);
                render::render(c.role, Slot::StubParamCast, &mut ctx).unwrap_or_else(|| pname.clone())
            })
            .collect::<Vec<_>>()
            .join(", ");

        streams.stub.line("if (__rpc_ret == rpc::error::OK())");
        streams.stub.open_block("{");
        streams.stub.open_block("try {");
        streams
            .stub
            .line(format!("__rpc_ret = target_stub_.lock()->get_object()->{}({args});", method.name));
        streams.stub.close_block("}");
        streams.stub.open_block("catch (...) {");
        streams.stub.line("return rpc::error::EXCEPTION();");
        streams.stub.close_block("}");
        streams.stub.close_block("}");

        for (pname, c) in &classified {
            let mut local_count = 0u64;
            let mut ctx = ParamCtx::new(pname, &c.element_type, &mut local_count);
            if let Some(frag) = render::render(c.role, Slot::StubAddRefOut, &mut ctx) {
                streams.stub.line(frag);
            }
        }

        emit_stub_marshal_out(streams, &classified);

        streams.stub.dedent();
    }

    streams.stub.close_block("}");
    streams.stub.close_block("}");
    streams.stub.close_block("};");

    Ok(())
}

/// Builds the `"in"` `YAS_OBJECT_NVP` mapping from every parameter's
/// [`Slot::StubMarshalIn`] fragment and deserialises `in_buf` into it,
/// dispatching on `encoding` across all four [`Encoding::ALL`] variants —
/// a no-op when the method has no in-parameters to demarshal.
fn emit_stub_demarshal_in(streams: &mut Streams, classified: &[(String, Classified)]) {
    let mut count = 0u64;
    let mut fields = String::new();
    for (pname, c) in classified {
        let mut ctx = ParamCtx::new(pname, &c.element_type, &mut count);
        if let Some(frag) = render::render(c.role, Slot::StubMarshalIn, &mut ctx) {
            let _ = write!(fields, "{frag}");
        }
    }
    if fields.is_empty() {
        return;
    }

    streams.stub.open_block("switch (encoding) {");
    for encoding in Encoding::ALL {
        streams.stub.line(format!("case {}:", encoding.case_label()));
        streams.stub.indent();
        streams.stub.line(format!(
            "rpc::from_yas_buffer<{}>(in_buf, \"in\"{fields});",
            encoding.yas_flags()
        ));
        streams.stub.line("break;");
        streams.stub.dedent();
    }
    streams.stub.line("default:");
    streams.stub.indent();
    streams.stub.line("return rpc::error::STUB_DESERIALISATION_ERROR();");
    streams.stub.dedent();
    streams.stub.close_block("}");
}

/// Builds the `"out"` `YAS_OBJECT_NVP` mapping from every parameter's
/// [`Slot::StubMarshalOut`] fragment and serialises it into `out_buf`,
/// dispatching on `encoding`. When a method has no out-parameters, writes
/// the literal empty-object encoding of whichever wire format was
/// requested (just `{}` for `yas_json`) instead of an empty buffer.
fn emit_stub_marshal_out(streams: &mut Streams, classified: &[(String, Classified)]) {
    let mut count = 0u64;
    let mut fields = String::new();
    for (pname, c) in classified {
        let mut ctx = ParamCtx::new(pname, &c.element_type, &mut count);
        if let Some(frag) = render::render(c.role, Slot::StubMarshalOut, &mut ctx) {
            let _ = write!(fields, "{frag}");
        }
    }

    if fields.is_empty() {
        streams.stub.line(format!("if (encoding == {})", Encoding::Json.case_label()));
        streams.stub.open_block("{");
        streams.stub.line("out_buf = std::vector<char>{'{', '}'};");
        streams.stub.close_block("}");
        streams.stub.line("return __rpc_ret;");
        return;
    }

    streams.stub.open_block("switch (encoding) {");
    for encoding in Encoding::ALL {
        streams.stub.line(format!("case {}:", encoding.case_label()));
        streams.stub.indent();
        streams.stub.line(format!(
            "out_buf = rpc::to_yas_buffer<{}>(\"out\"{fields});",
            encoding.yas_flags()
        ));
        streams.stub.line("break;");
        streams.stub.dedent();
    }
    streams.stub.line("default:");
    streams.stub.indent();
    streams.stub.line("return rpc::error::STUB_DESERIALISATION_ERROR();");
    streams.stub.dedent();
    streams.stub.close_block("}");
    streams.stub.line("return __rpc_ret;");
}

fn emit_register_stubs(streams: &mut Streams, options: &EmitOptions, registrations: &[StubRegistration]) {
    streams.stub_header.open_block(format!(
        "void {}_register_stubs(rpc::service& service) {{",
        options.module_name
    ));
    for reg in registrations {
        streams.stub_header.line(format!(
            "service.register_stub_factory({0}::get_id, {0}::get_id);",
            reg.qualified_name
        ));
    }
    streams.stub_header.close_block("}");
}
