//! Shared entity arena, attribute/type-string utilities, and error taxonomy
//! for the `zonegen` cross-zone RPC IDL compiler.
//!
//! This crate holds nothing specific to resolution, fingerprinting,
//! classification, or emission — those live in their own crates and depend
//! on this one.

pub mod entity;
pub mod error;
pub mod text;

pub use entity::{ClassData, Entity, EntityId, EntityKind, FunctionData, Model, Parameter, TemplateParam};
pub use error::CoreError;
