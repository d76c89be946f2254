//! Parameter classifier (component E).
//!
//! Maps a `(type, reference-form, attributes)` triple to one of eight ABI
//! roles. Each role's `out`/`const` legality guard is the source of one row
//! of [`ClassifyError`].

use thiserror::Error;
use zonegen_core::{
    EntityId, EntityKind, Model,
    error::CoreError,
    text::{extract_shared_ptr_inner, is_const, is_out, strip_reference_modifiers},
};

/// The ABI role a parameter plays across the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiRole {
    ByValue,
    Reference,
    Move,
    Pointer,
    PointerReference,
    PointerToPointer,
    Interface,
    InterfaceReference,
}

/// The fully classified shape of one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub role: AbiRole,
    /// The type with reference modifiers and any `shared_ptr<...>` wrapper
    /// stripped away — the element type the emitter actually marshals.
    pub element_type: String,
    /// The reference-modifier string this parameter carried (`""`, `&`,
    /// `&&`, `*`, `*&`, or `**`).
    pub reference_modifiers: String,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ClassifyError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("reference-modifier string '{modifier}' on '{type_name}' is outside {{&, &&, *, *&, **}}")]
    UnsupportedModifier { type_name: String, modifier: String },

    #[error("interface parameter '{type_name}' cannot be passed by pointer ('{modifier}')")]
    InterfaceByPointer { type_name: String, modifier: String },

    #[error("'&' in-parameter '{type_name}' requires a host caller")]
    ReferenceFromGuest { type_name: String },

    #[error("'&' parameter '{type_name}' does not support out values")]
    ReferenceOut { type_name: String },

    #[error("'&&' parameter '{type_name}' cannot be marked out or const")]
    MoveOutOrConst { type_name: String },

    #[error("'*' parameter '{type_name}' cannot be marked out")]
    PointerOut { type_name: String },

    #[error("'*&' parameter '{type_name}' cannot be marked both const and out")]
    ConstOutPointerRef { type_name: String },

    #[error("'out' parameter '{type_name}' has no reference modifier")]
    OutWithoutIndirection { type_name: String },
}

/// Whether the parameter participates in an "in" transfer — false only
/// when the parameter is out-only (carries `out` but not `in`).
pub fn is_in_param(attributes: &[String]) -> bool {
    !(is_out(attributes) && !zonegen_core::text::is_in(attributes))
}

/// Whether the parameter carries the `out` attribute at all.
pub fn is_out_param(attributes: &[String]) -> bool {
    is_out(attributes)
}

/// Classifies `type_name`/`attributes` as seen at `context` (the entity
/// whose scope type names are resolved against).
pub fn classify(
    model: &Model,
    context: EntityId,
    type_name: &str,
    attributes: &[String],
    caller_is_host: bool,
) -> Result<Classified, ClassifyError> {
    let (stripped, reference_modifiers) = strip_reference_modifiers(type_name);
    let inner = extract_shared_ptr_inner(stripped)?;
    let wrapped_in_shared_ptr = inner != stripped;
    let is_interface = wrapped_in_shared_ptr
        && zonegen_resolve::resolve(model, inner, context)
            .is_some_and(|id| model.get(id).kind == EntityKind::Interface);

    let element_type = if wrapped_in_shared_ptr { inner } else { stripped }.to_string();
    let out = is_out(attributes);
    let const_ = is_const(attributes);

    let role = match reference_modifiers {
        "" => {
            if out {
                return Err(ClassifyError::OutWithoutIndirection {
                    type_name: type_name.to_string(),
                });
            }
            if is_interface {
                AbiRole::Interface
            } else {
                AbiRole::ByValue
            }
        }
        "&" => {
            if is_interface {
                if out {
                    AbiRole::InterfaceReference
                } else {
                    AbiRole::Interface
                }
            } else if out {
                return Err(ClassifyError::ReferenceOut {
                    type_name: type_name.to_string(),
                });
            } else if zonegen_core::text::has_attribute(attributes, "by_value") {
                AbiRole::ByValue
            } else if caller_is_host {
                AbiRole::Reference
            } else {
                return Err(ClassifyError::ReferenceFromGuest {
                    type_name: type_name.to_string(),
                });
            }
        }
        "&&" => {
            if out || const_ {
                return Err(ClassifyError::MoveOutOrConst {
                    type_name: type_name.to_string(),
                });
            }
            AbiRole::Move
        }
        "*" => {
            if is_interface {
                return Err(ClassifyError::InterfaceByPointer {
                    type_name: type_name.to_string(),
                    modifier: reference_modifiers.to_string(),
                });
            }
            if out {
                return Err(ClassifyError::PointerOut {
                    type_name: type_name.to_string(),
                });
            }
            AbiRole::Pointer
        }
        "*&" => {
            if is_interface {
                return Err(ClassifyError::InterfaceByPointer {
                    type_name: type_name.to_string(),
                    modifier: reference_modifiers.to_string(),
                });
            }
            if out && const_ {
                return Err(ClassifyError::ConstOutPointerRef {
                    type_name: type_name.to_string(),
                });
            }
            AbiRole::PointerReference
        }
        "**" => {
            if is_interface {
                return Err(ClassifyError::InterfaceByPointer {
                    type_name: type_name.to_string(),
                    modifier: reference_modifiers.to_string(),
                });
            }
            AbiRole::PointerToPointer
        }
        other => {
            return Err(ClassifyError::UnsupportedModifier {
                type_name: type_name.to_string(),
                modifier: other.to_string(),
            });
        }
    };

    Ok(Classified {
        role,
        element_type,
        reference_modifiers: reference_modifiers.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonegen_model::ModelBuilder;

    fn model_with_interface() -> (Model, EntityId, EntityId) {
        let mut b = ModelBuilder::new();
        let root = b.root();
        let bar = b.interface(root, "Bar");
        let foo = b.interface(root, "Foo");
        (b.build(), foo, bar)
    }

    #[test]
    fn by_value_for_plain_type() {
        let (model, foo, _bar) = model_with_interface();
        let attrs = vec!["in".to_string()];
        let classified = classify(&model, foo, "int", &attrs, true).unwrap();
        assert_eq!(classified.role, AbiRole::ByValue);
    }

    #[test]
    fn interface_role_for_shared_ptr_in_param() {
        let (model, foo, _bar) = model_with_interface();
        let attrs = vec!["in".to_string()];
        let classified = classify(&model, foo, "rpc::shared_ptr<Bar>", &attrs, true).unwrap();
        assert_eq!(classified.role, AbiRole::Interface);
        assert_eq!(classified.element_type, "Bar");
    }

    #[test]
    fn interface_reference_for_out_shared_ptr_ref() {
        let (model, foo, _bar) = model_with_interface();
        let attrs = vec!["out".to_string()];
        let classified = classify(&model, foo, "rpc::shared_ptr<Bar>&", &attrs, true).unwrap();
        assert_eq!(classified.role, AbiRole::InterfaceReference);
    }

    #[test]
    fn reference_requires_host_caller() {
        let (model, foo, _bar) = model_with_interface();
        let attrs = vec!["in".to_string()];
        assert!(classify(&model, foo, "int&", &attrs, true).is_ok());
        assert!(matches!(
            classify(&model, foo, "int&", &attrs, false),
            Err(ClassifyError::ReferenceFromGuest { .. })
        ));
    }

    #[test]
    fn move_rejects_out_and_const() {
        let (model, foo, _bar) = model_with_interface();
        assert!(matches!(
            classify(&model, foo, "int&&", &["out".to_string()], true),
            Err(ClassifyError::MoveOutOrConst { .. })
        ));
        assert!(matches!(
            classify(&model, foo, "int&&", &["const".to_string(), "in".to_string()], true),
            Err(ClassifyError::MoveOutOrConst { .. })
        ));
        assert!(classify(&model, foo, "int&&", &["in".to_string()], true).is_ok());
    }

    #[test]
    fn pointer_rejects_out() {
        let (model, foo, _bar) = model_with_interface();
        assert!(matches!(
            classify(&model, foo, "int*", &["out".to_string()], true),
            Err(ClassifyError::PointerOut { .. })
        ));
    }

    #[test]
    fn pointer_reference_rejects_const_out() {
        let (model, foo, _bar) = model_with_interface();
        assert!(matches!(
            classify(&model, foo, "int*&", &["const".to_string(), "out".to_string()], true),
            Err(ClassifyError::ConstOutPointerRef { .. })
        ));
        assert!(classify(&model, foo, "int*&", &["out".to_string()], true).is_ok());
    }

    #[test]
    fn interface_by_pointer_is_rejected_in_every_indirection() {
        let (model, foo, _bar) = model_with_interface();
        for modifier in ["*", "*&", "**"] {
            let type_name = format!("rpc::shared_ptr<Bar>{modifier}");
            assert!(matches!(
                classify(&model, foo, &type_name, &["in".to_string()], true),
                Err(ClassifyError::InterfaceByPointer { .. })
            ));
        }
    }

    #[test]
    fn out_without_indirection_is_rejected() {
        let (model, foo, _bar) = model_with_interface();
        assert!(matches!(
            classify(&model, foo, "int", &["out".to_string()], true),
            Err(ClassifyError::OutWithoutIndirection { .. })
        ));
    }

    #[test]
    fn unsupported_modifier_is_rejected() {
        let (model, foo, _bar) = model_with_interface();
        assert!(matches!(
            classify(&model, foo, "int&*", &["in".to_string()], true),
            Err(ClassifyError::UnsupportedModifier { .. })
        ));
    }

    #[test]
    fn in_param_and_out_param_predicates() {
        assert!(is_in_param(&["in".to_string()]));
        assert!(!is_in_param(&["out".to_string()]));
        assert!(is_in_param(&["in".to_string(), "out".to_string()]));
        assert!(is_out_param(&["out".to_string()]));
        assert!(!is_out_param(&["in".to_string()]));
    }
}
