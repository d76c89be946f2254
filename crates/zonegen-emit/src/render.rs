//! The `(role, slot)` render table: one function per [`AbiRole`], matched
//! over every [`Slot`]. By the time [`render`] is called the classifier has
//! already rejected every illegal attribute/modifier combination for that
//! role, so these functions only need the pieces of context that change the
//! *shape* of the fragment, not its legality — no redundant `is_out`/`is_const`
//! re-checks.
//!
//! Slots the role does not participate in return `None`.

use crate::slot::Slot;
use zonegen_classify::AbiRole;

/// Parameter-shaped context a single `render` call needs. `count` is a
/// running index shared across all of one method's interface in-parameters.
pub struct ParamCtx<'a> {
    pub name: &'a str,
    pub object_type: &'a str,
    pub count: &'a mut u64,
}

impl<'a> ParamCtx<'a> {
    pub fn new(name: &'a str, object_type: &'a str, count: &'a mut u64) -> Self {
        Self { name, object_type, count }
    }
}

pub fn render(role: AbiRole, slot: Slot, ctx: &mut ParamCtx) -> Option<String> {
    match role {
        AbiRole::ByValue => render_by_value(slot, ctx),
        AbiRole::Reference => render_reference(slot, ctx),
        AbiRole::Move => render_move(slot, ctx),
        AbiRole::Pointer => render_pointer(slot, ctx),
        AbiRole::PointerReference => render_pointer_reference(slot, ctx),
        AbiRole::PointerToPointer => render_pointer_to_pointer(slot, ctx),
        AbiRole::Interface => render_interface(slot, ctx),
        AbiRole::InterfaceReference => render_interface_reference(slot, ctx),
    }
}

fn render_by_value(slot: Slot, ctx: &mut ParamCtx) -> Option<String> {
    let ParamCtx { name, object_type, .. } = ctx;
    match slot {
        Slot::ProxyMarshalIn => Some(format!("  ,(\"{name}\", {name})")),
        Slot::ProxyMarshalOut => Some(format!("  ,(\"{name}\", {name})")),
        Slot::StubDemarshalDeclaration => Some(format!("{object_type} {name}_")),
        Slot::StubMarshalIn => Some(format!("  ,(\"{name}\", {name}_)")),
        Slot::StubParamCast => Some(format!("{name}_")),
        Slot::StubMarshalOut => Some(format!("  ,(\"{name}\", {name}_)")),
        _ => None,
    }
}

fn render_reference(slot: Slot, ctx: &mut ParamCtx) -> Option<String> {
    let ParamCtx { name, object_type, .. } = ctx;
    match slot {
        Slot::ProxyMarshalIn => Some(format!("  ,(\"{name}\", {name})")),
        Slot::ProxyMarshalOut => Some(format!("  ,(\"{name}\", {name})")),
        Slot::StubDemarshalDeclaration => Some(format!("{object_type} {name}_{{}}")),
        Slot::StubMarshalIn => Some(format!("  ,(\"{name}\", {name}_)")),
        Slot::StubParamCast => Some(format!("{name}_")),
        _ => None,
    }
}

fn render_move(slot: Slot, ctx: &mut ParamCtx) -> Option<String> {
    let ParamCtx { name, object_type, .. } = ctx;
    match slot {
        Slot::ProxyMarshalIn => Some(format!("  ,(\"{name}\", {name})")),
        Slot::ProxyMarshalOut => Some(format!("  ,(\"{name}\", {name})")),
        Slot::StubDemarshalDeclaration => Some(format!("{object_type} {name}_")),
        Slot::StubMarshalIn => Some(format!("  ,(\"{name}\", {name}_)")),
        Slot::StubParamCast => Some(format!("std::move({name}_)")),
        Slot::StubMarshalOut => Some(format!("  ,(\"{name}\", {name}_)")),
        _ => None,
    }
}

fn render_pointer(slot: Slot, ctx: &mut ParamCtx) -> Option<String> {
    let ParamCtx { name, object_type, .. } = ctx;
    match slot {
        Slot::ProxyMarshalIn => Some(format!("  ,(\"{name}\", (uint64_t){name})")),
        Slot::ProxyMarshalOut => Some(format!("  ,(\"_{}\", (uint64_t) {name})", ctx_count_read(ctx))),
        Slot::StubDemarshalDeclaration => Some(format!("uint64_t {name}_")),
        Slot::StubMarshalIn => Some(format!("  ,(\"{name}\", {name}_)")),
        Slot::StubParamCast => Some(format!("({object_type}*){name}_")),
        _ => None,
    }
}

fn render_pointer_reference(slot: Slot, ctx: &mut ParamCtx) -> Option<String> {
    let ParamCtx { name, object_type, .. } = ctx;
    match slot {
        Slot::ProxyMarshalIn => Some(format!("  ,(\"{name}\", {name}_)")),
        Slot::ProxyMarshalOut => Some(format!("  ,(\"{name}\", {name}_)")),
        Slot::StubDemarshalDeclaration => Some(format!("{object_type}* {name}_ = nullptr")),
        Slot::StubParamCast => Some(format!("{name}_")),
        Slot::ProxyOutDeclaration => Some(format!("uint64_t {name}_ = 0;")),
        Slot::StubMarshalOut => Some(format!("  ,(\"_{}\", (uint64_t){name}_)", ctx_count_read(ctx))),
        Slot::ProxyValueReturn => Some(format!("{name} = ({object_type}*){name}_;")),
        _ => None,
    }
}

fn render_pointer_to_pointer(slot: Slot, ctx: &mut ParamCtx) -> Option<String> {
    let ParamCtx { name, object_type, .. } = ctx;
    match slot {
        Slot::ProxyMarshalIn => Some(format!("  ,(\"{name}\", {name}_)")),
        Slot::ProxyMarshalOut => Some(format!("  ,(\"{name}\", {name}_)")),
        Slot::StubDemarshalDeclaration => Some(format!("{object_type}* {name}_ = nullptr")),
        Slot::StubParamCast => Some(format!("&{name}_")),
        Slot::ProxyValueReturn => Some(format!("*{name} = ({object_type}*){name}_;")),
        Slot::ProxyOutDeclaration => Some(format!("uint64_t {name}_ = 0;")),
        Slot::StubMarshalOut => Some(format!("  ,(\"_{}\", (uint64_t){name}_)", ctx_count_read(ctx))),
        _ => None,
    }
}

fn render_interface(slot: Slot, ctx: &mut ParamCtx) -> Option<String> {
    match slot {
        Slot::ProxyPrepareIn => {
            let name = ctx.name;
            Some(format!("rpc::shared_ptr<rpc::object_stub> {name}_stub_;"))
        }
        Slot::ProxyPrepareInInterfaceId => {
            let name = ctx.name;
            Some(format!(
                "auto {name}_stub_id_ = proxy_bind_in_param(__rpc_sp->get_remote_rpc_version(), {name}, {name}_stub_);"
            ))
        }
        Slot::ProxyMarshalIn => {
            let name = ctx.name.to_string();
            let tag = *ctx.count;
            *ctx.count += 1;
            Some(format!(",(\"_{tag}\", {name}_stub_id_)"))
        }
        Slot::ProxyMarshalOut => {
            let name = ctx.name;
            Some(format!("  ,(\"{name}\", {name}_)"))
        }
        Slot::ProxyCleanIn => {
            let name = ctx.name;
            Some(format!("if({name}_stub_) {name}_stub_->release_from_service();"))
        }
        Slot::StubDemarshalDeclaration => {
            let name = ctx.name;
            Some(format!(
                "rpc::interface_descriptor {name}_object_;\n\tuint64_t {name}_zone_ = 0"
            ))
        }
        Slot::StubMarshalIn => {
            let name = ctx.name.to_string();
            let tag = *ctx.count;
            *ctx.count += 1;
            Some(format!("  ,(\"_{tag}\", {name}_object_)"))
        }
        Slot::StubParamWrap => {
            let name = ctx.name;
            let object_type = ctx.object_type;
            Some(format!(
                "{object_type} {name};\n\
                 if(__rpc_ret == rpc::error::OK() && {name}_object_.destination_zone_id.is_set() && {name}_object_.object_id.is_set())\n\
                 {{\n\
                 \tauto& zone_ = target_stub_.lock()->get_zone();\n\
                 \t__rpc_ret = rpc::stub_bind_in_param(protocol_version, zone_, caller_channel_zone_id, caller_zone_id, {name}_object_, {name});\n\
                 }}"
            ))
        }
        Slot::StubParamCast => Some(ctx.name.to_string()),
        Slot::StubMarshalOut => {
            let name = ctx.name;
            Some(format!("  ,(\"{name}\", (uint64_t){name})"))
        }
        Slot::ProxyValueReturn | Slot::ProxyOutDeclaration => {
            let name = ctx.name;
            Some(format!("  rpc::interface_descriptor {name}_;"))
        }
        _ => None,
    }
}

fn render_interface_reference(slot: Slot, ctx: &mut ParamCtx) -> Option<String> {
    match slot {
        Slot::ProxyPrepareIn => {
            let name = ctx.name;
            Some(format!("rpc::shared_ptr<rpc::object_stub> {name}_stub_;"))
        }
        Slot::ProxyPrepareInInterfaceId => {
            let name = ctx.name;
            Some(format!(
                "auto {name}_stub_id_ = proxy_bind_in_param(__rpc_sp->get_remote_rpc_version(), {name}, {name}_stub_);"
            ))
        }
        Slot::ProxyMarshalIn => {
            let name = ctx.name.to_string();
            let tag = *ctx.count;
            *ctx.count += 1;
            Some(format!(",(\"_{tag}\", {name}_stub_id_)"))
        }
        Slot::ProxyMarshalOut => {
            let name = ctx.name;
            Some(format!("  ,(\"{name}\", {name}_)"))
        }
        Slot::ProxyCleanIn => {
            let name = ctx.name;
            Some(format!("if({name}_stub_) {name}_stub_->release_from_service();"))
        }
        Slot::StubDemarshalDeclaration => {
            let name = ctx.name;
            let object_type = ctx.object_type;
            Some(format!("{object_type} {name}"))
        }
        Slot::StubParamCast => Some(ctx.name.to_string()),
        Slot::ProxyValueReturn => {
            let name = ctx.name;
            Some(format!(
                "rpc::proxy_bind_out_param(__rpc_sp, {name}_, __rpc_sp->get_zone_id().as_caller(), {name});"
            ))
        }
        Slot::ProxyOutDeclaration => {
            let name = ctx.name;
            Some(format!("rpc::interface_descriptor {name}_;"))
        }
        Slot::StubAddRefOutPredeclare => {
            let name = ctx.name;
            Some(format!("rpc::interface_descriptor {name}_;"))
        }
        Slot::StubAddRefOut => {
            let name = ctx.name;
            Some(format!(
                "{name}_ = zone_.stub_bind_out_param(protocol_version, caller_channel_zone_id, caller_zone_id, {name});"
            ))
        }
        Slot::StubMarshalOut => {
            let name = ctx.name;
            Some(format!("  ,(\"{name}\", {name}_)"))
        }
        _ => None,
    }
}

fn ctx_count_read(ctx: &ParamCtx) -> u64 {
    *ctx.count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(name: &'a str, object_type: &'a str, count: &'a mut u64) -> ParamCtx<'a> {
        ParamCtx::new(name, object_type, count)
    }

    #[test]
    fn by_value_demarshal_declaration_uses_trailing_underscore_name() {
        let mut count = 0;
        let mut c = ctx("a", "int", &mut count);
        assert_eq!(
            render(AbiRole::ByValue, Slot::StubDemarshalDeclaration, &mut c),
            Some("int a_".to_string())
        );
    }

    #[test]
    fn move_param_cast_wraps_in_std_move() {
        let mut count = 0;
        let mut c = ctx("x", "Widget", &mut count);
        assert_eq!(
            render(AbiRole::Move, Slot::StubParamCast, &mut c),
            Some("std::move(x_)".to_string())
        );
    }

    #[test]
    fn interface_marshal_in_consumes_and_advances_the_shared_counter() {
        let mut count = 0;
        {
            let mut c = ctx("b", "Bar", &mut count);
            assert_eq!(
                render(AbiRole::Interface, Slot::ProxyMarshalIn, &mut c),
                Some(",(\"_0\", b_stub_id_)".to_string())
            );
        }
        assert_eq!(count, 1);
    }

    #[test]
    fn slots_a_role_does_not_participate_in_return_none() {
        let mut count = 0;
        let mut c = ctx("x", "int", &mut count);
        assert_eq!(render(AbiRole::ByValue, Slot::ProxyPrepareIn, &mut c), None);
    }

    #[test]
    fn pointer_pointer_value_return_dereferences_the_out_param() {
        let mut count = 0;
        let mut c = ctx("p", "Widget", &mut count);
        assert_eq!(
            render(AbiRole::PointerToPointer, Slot::ProxyValueReturn, &mut c),
            Some("*p = (Widget*)p_;".to_string())
        );
    }
}
