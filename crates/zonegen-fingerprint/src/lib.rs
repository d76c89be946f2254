//! Stable fingerprint generator (component D).
//!
//! Produces the `u64` digest used as a version-2 interface identifier.
//! The canonical seed-string construction below walks the entity tree
//! clause by clause, with the recursion stack threaded as an explicit
//! parameter instead of a shared mutable collection, so a cycle is
//! detected by membership check rather than by a sentinel return value.

use sha3::{Digest, Sha3_256};
use zonegen_core::{
    EntityId, EntityKind, Model,
    error::CoreError,
    text::{get_template_param, strip_reference_modifiers},
};

/// Computes the structural fingerprint of `id` within `model`.
///
/// Deterministic for a fixed entity in a fixed model; depends only on
/// structural shape reachable from `id`. Returns `0` only transiently,
/// during cycle detection inside the recursion — never as the final
/// top-level result for a well-formed, non-empty-seed entity in practice,
/// though it is not excluded by construction (an entity with an empty seed
/// and no attributes would also hash to some fixed non-zero value, since
/// sha3("") != 0).
///
/// Fails if any reachable parameter or field type is malformed (unbalanced
/// template brackets, an unterminated `shared_ptr<`) — a fingerprint built
/// over a type the compiler couldn't parse is meaningless, so this
/// propagates rather than silently falling back to the raw text.
pub fn fingerprint(model: &Model, id: EntityId) -> Result<u64, CoreError> {
    let mut stack = Vec::new();
    fingerprint_with_stack(model, id, &mut stack)
}

/// The legacy protocol-v1 identifier: a portable 64-bit FNV-1a hash of the
/// entity's fully qualified name.
///
/// `std::hash<std::string>` is not portable across standard library
/// implementations or platforms, so this uses a documented stable hash
/// instead — see the Open Question in DESIGN.md.
pub fn legacy_hash_v1(model: &Model, id: EntityId) -> u64 {
    fnv1a64(model.qualified_name(id).as_bytes())
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;
    let mut hash = OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

fn fingerprint_with_stack(model: &Model, id: EntityId, stack: &mut Vec<EntityId>) -> Result<u64, CoreError> {
    if stack.contains(&id) {
        // Recursive self-reference: callers substitute the fully qualified
        // name textually instead of recursing forever.
        return Ok(0);
    }
    stack.push(id);
    let seed = build_seed(model, id, stack);
    stack.pop();
    Ok(digest_u64(&seed?))
}

fn digest_u64(seed: &str) -> u64 {
    let mut hasher = Sha3_256::new();
    hasher.update(seed.as_bytes());
    let hash = hasher.finalize();
    u64::from_le_bytes(hash[0..8].try_into().expect("sha3-256 output is 32 bytes"))
}

fn build_seed(model: &Model, id: EntityId, stack: &mut Vec<EntityId>) -> Result<String, CoreError> {
    let entity = model.get(id);
    let mut seed: String = entity.attributes.concat();

    if matches!(entity.kind, EntityKind::Interface | EntityKind::Library) {
        for owner in model.owner_chain(id) {
            seed = format!("{}::{}", model.get(owner).name, seed);
        }
        if matches!(entity.kind, EntityKind::Library) {
            seed.push_str("i_");
        }
        seed.push_str(&entity.name);
        seed.push('{');
        for func_id in model.functions(id) {
            append_function_seed(model, id, func_id, stack, &mut seed)?;
        }
        seed.push('}');
    }

    let is_template = entity.class().is_some_and(|c| c.is_template);
    if !is_template && matches!(entity.kind, EntityKind::Struct) {
        seed.push_str("struct");
        seed.push_str(&model.qualified_name(id));
        let bases = entity.class().map(|c| c.base_classes.as_slice()).unwrap_or(&[]);
        if !bases.is_empty() {
            seed.push_str(" : ");
            for (i, base) in bases.iter().enumerate() {
                if i != 0 {
                    seed.push_str(", ");
                }
                // Ground-truth quirk: base classes are fingerprinted with a
                // *fresh* recursion stack, not the inherited one.
                let base_id = fingerprint_with_stack(model, *base, &mut Vec::new())?;
                seed.push_str(&base_id.to_string());
                seed.push(' ');
            }
        }
        seed.push('{');
        let mut first = true;
        for field_id in model.functions(id) {
            if model.get(field_id).kind != EntityKind::FunctionVariable {
                continue;
            }
            if !first {
                seed.push_str(", ");
            }
            first = false;
            append_field_seed(model, id, field_id, stack, &mut seed)?;
        }
        seed.push('}');
    }

    Ok(seed)
}

fn append_function_seed(
    model: &Model,
    owner_id: EntityId,
    func_id: EntityId,
    stack: &mut Vec<EntityId>,
    seed: &mut String,
) -> Result<(), CoreError> {
    let func = model.get(func_id);
    if func.attributes.iter().any(|a| a == "no_fingerprint") {
        return Ok(());
    }

    seed.push('[');
    for attr in &func.attributes {
        if attr == "_deprecated" {
            continue;
        }
        seed.push_str(attr);
    }
    seed.push(']');

    match func.kind {
        EntityKind::CppQuote => {
            if func.is_imported {
                return Ok(());
            }
            let mut hasher = Sha3_256::new();
            hasher.update(func.name.as_bytes());
            let hash = hasher.finalize();
            let truncated = u64::from_le_bytes(hash[0..8].try_into().unwrap());
            seed.push_str("#cpp_quote");
            seed.push_str(&truncated.to_string());
        }
        EntityKind::FunctionPublicMarker => seed.push_str("public:"),
        EntityKind::FunctionPrivateMarker => seed.push_str("private:"),
        _ => {
            seed.push_str(&func.name);
            seed.push('(');
            if let Some(data) = func.function() {
                for param in &data.parameters {
                    seed.push('[');
                    seed.push_str(&param.attributes.concat());
                    seed.push(']');
                    append_rendered_type(model, owner_id, &param.type_name, stack, seed)?;
                    seed.push(' ');
                    seed.push_str(&param.name);
                    seed.push(',');
                }
            }
            seed.push(')');
        }
    }
    Ok(())
}

fn append_field_seed(
    model: &Model,
    owner_id: EntityId,
    field_id: EntityId,
    stack: &mut Vec<EntityId>,
    seed: &mut String,
) -> Result<(), CoreError> {
    let field = model.get(field_id);
    let data = field.function().expect("struct field must carry function data");
    append_rendered_type(model, owner_id, &data.return_type, stack, seed)?;
    seed.push(' ');
    seed.push_str(&field.name);
    if let Some(array_size) = &data.array_size {
        seed.push('[');
        seed.push_str(array_size);
        seed.push(']');
    }
    Ok(())
}

/// Renders one parameter/field type into `seed`, followed by its reference
/// modifier string (the caller appends the trailing space and name).
fn append_rendered_type(
    model: &Model,
    context: EntityId,
    type_name: &str,
    stack: &mut Vec<EntityId>,
    seed: &mut String,
) -> Result<(), CoreError> {
    let (base, reference_modifiers) = strip_reference_modifiers(type_name);
    let template_param = get_template_param(base)?;
    if !template_param.is_empty() {
        let substituted = extract_substituted_templates(model, context, stack, template_param)?;
        let rendered = substitute_template_params(base, &substituted)?;
        seed.push_str(&rendered);
    } else if let Some(resolved) = zonegen_resolve::resolve(model, base, context) {
        if resolved != context {
            let id = fingerprint_with_stack(model, resolved, stack)?;
            seed.push_str(&id.to_string());
        } else {
            seed.push_str(base);
        }
    } else {
        seed.push_str(base);
    }
    seed.push_str(reference_modifiers);
    Ok(())
}

/// Scans `text` for maximal identifier runs (alphanumeric, `_`, `:`),
/// resolving each one against `context` and replacing it with its own
/// fingerprint (or its fully qualified name, if that fingerprint is `0`).
/// Non-identifier characters pass through verbatim.
pub fn extract_substituted_templates(
    model: &Model,
    context: EntityId,
    stack: &mut Vec<EntityId>,
    text: &str,
) -> Result<String, CoreError> {
    let mut out = String::new();
    let mut buf = String::new();
    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            buf.push(ch);
        } else {
            out.push_str(&resolve_identifier(model, context, stack, &buf)?);
            buf.clear();
            out.push(ch);
        }
    }
    out.push_str(&resolve_identifier(model, context, stack, &buf)?);
    Ok(out)
}

fn resolve_identifier(model: &Model, context: EntityId, stack: &mut Vec<EntityId>, name: &str) -> Result<String, CoreError> {
    if name.is_empty() {
        return Ok(String::new());
    }
    match zonegen_resolve::resolve(model, name, context) {
        Some(resolved) if resolved != context => {
            let id = fingerprint_with_stack(model, resolved, stack)?;
            Ok(if id == 0 {
                model.qualified_name(resolved)
            } else {
                id.to_string()
            })
        }
        _ => Ok(name.to_string()),
    }
}

/// Finds the outermost `<...>` in `type_name` and replaces its interior
/// with `replacement`, leaving deeper angle-brackets (now inside
/// `replacement`, already rendered) untouched.
pub fn substitute_template_params(type_name: &str, replacement: &str) -> Result<String, CoreError> {
    let mut output = String::new();
    let mut depth = 0i32;
    for ch in type_name.chars() {
        match ch {
            '<' => {
                depth += 1;
                if depth == 1 {
                    output.push('<');
                    output.push_str(replacement);
                    continue;
                }
            }
            '>' => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            output.push(ch);
        }
    }
    if depth != 0 {
        return Err(CoreError::MalformedTemplate {
            text: type_name.to_string(),
        });
    }
    Ok(output)
}
