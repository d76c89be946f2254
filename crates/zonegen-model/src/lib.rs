//! Fluent builder for constructing [`zonegen_core::Model`] trees directly,
//! bypassing the textual IDL lexer/parser that spec treats as an external
//! collaborator (out of scope for this compiler).
//!
//! Used by every other crate's test suite, and by any future driver that
//! wants to feed a model in from something other than IDL text (e.g. a
//! language server that already holds a parsed AST).

use zonegen_core::{ClassData, Entity, EntityId, EntityKind, FunctionData, Model, Parameter, TemplateParam};

/// Wraps a [`Model`] with convenience constructors for each entity kind.
///
/// Every `add_*` method returns the new entity's [`EntityId`] so callers can
/// immediately attach children (methods, fields, parameters) to it.
pub struct ModelBuilder {
    model: Model,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self { model: Model::new() }
    }

    pub fn root(&self) -> EntityId {
        self.model.root()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn build(self) -> Model {
        self.model
    }

    pub fn namespace(&mut self, owner: EntityId, name: &str) -> EntityId {
        self.model.insert(owner, EntityKind::Namespace, name)
    }

    pub fn interface(&mut self, owner: EntityId, name: &str) -> EntityId {
        self.model.insert(owner, EntityKind::Interface, name)
    }

    pub fn library(&mut self, owner: EntityId, name: &str) -> EntityId {
        self.model.insert(owner, EntityKind::Library, name)
    }

    pub fn struct_(&mut self, owner: EntityId, name: &str) -> EntityId {
        self.model.insert(owner, EntityKind::Struct, name)
    }

    pub fn enum_(&mut self, owner: EntityId, name: &str) -> EntityId {
        self.model.insert(owner, EntityKind::Enum, name)
    }

    pub fn typedef(&mut self, owner: EntityId, name: &str, alias_target: &str) -> EntityId {
        let id = self.model.insert(owner, EntityKind::Typedef, name);
        self.class_mut(id).alias_target = Some(alias_target.to_string());
        id
    }

    /// Adds a method to an interface or library, with no parameters yet —
    /// use [`ModelBuilder::add_param`] to attach them.
    pub fn method(&mut self, owner: EntityId, name: &str, return_type: &str) -> EntityId {
        let id = self.model.insert(owner, EntityKind::FunctionMethod, name);
        self.function_mut(id).return_type = return_type.to_string();
        id
    }

    /// Adds a field to a struct.
    pub fn field(&mut self, owner: EntityId, name: &str, type_name: &str) -> EntityId {
        let id = self.model.insert(owner, EntityKind::FunctionVariable, name);
        self.function_mut(id).return_type = type_name.to_string();
        id
    }

    pub fn enum_value(&mut self, owner: EntityId, name: &str) -> EntityId {
        self.model.insert(owner, EntityKind::EnumValue, name)
    }

    pub fn cpp_quote(&mut self, owner: EntityId, quote_text: &str) -> EntityId {
        self.model.insert(owner, EntityKind::CppQuote, quote_text)
    }

    pub fn public_marker(&mut self, owner: EntityId) -> EntityId {
        self.model.insert(owner, EntityKind::FunctionPublicMarker, "")
    }

    pub fn private_marker(&mut self, owner: EntityId) -> EntityId {
        self.model.insert(owner, EntityKind::FunctionPrivateMarker, "")
    }

    pub fn add_param(
        &mut self,
        function_id: EntityId,
        type_name: &str,
        name: &str,
        attributes: &[&str],
    ) -> &mut Self {
        let param = Parameter::new(type_name, name)
            .with_attributes(attributes.iter().map(|a| a.to_string()));
        self.function_mut(function_id).parameters.push(param);
        self
    }

    pub fn set_attributes(&mut self, id: EntityId, attributes: &[&str]) -> &mut Self {
        self.model.get_mut(id).attributes = attributes.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn set_array_size(&mut self, id: EntityId, size: &str) -> &mut Self {
        self.function_mut(id).array_size = Some(size.to_string());
        self
    }

    pub fn set_default_value(&mut self, id: EntityId, value: &str) -> &mut Self {
        self.function_mut(id).default_value = Some(value.to_string());
        self
    }

    pub fn set_base_classes(&mut self, id: EntityId, bases: &[EntityId]) -> &mut Self {
        self.class_mut(id).base_classes = bases.to_vec();
        self
    }

    pub fn set_template(&mut self, id: EntityId, params: Vec<TemplateParam>) -> &mut Self {
        let data = self.class_mut(id);
        data.is_template = true;
        data.template_params = params;
        self
    }

    pub fn set_imported(&mut self, id: EntityId, import_lib: &str) -> &mut Self {
        let entity = self.model.get_mut(id);
        entity.is_imported = true;
        entity.import_lib = Some(import_lib.to_string());
        self
    }

    fn class_mut(&mut self, id: EntityId) -> &mut ClassData {
        self.entity_mut(id)
            .class_mut()
            .expect("entity kind does not carry class data")
    }

    fn function_mut(&mut self, id: EntityId) -> &mut FunctionData {
        self.entity_mut(id)
            .function_mut()
            .expect("entity kind does not carry function data")
    }

    fn entity_mut(&mut self, id: EntityId) -> &mut Entity {
        self.model.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_interface_with_method_and_param() {
        let mut b = ModelBuilder::new();
        let root = b.root();
        let iface = b.interface(root, "Foo");
        let method = b.method(iface, "add", "int");
        b.add_param(method, "int", "a", &["in"]);
        b.add_param(method, "int", "b", &["in"]);

        let model = b.build();
        let functions: Vec<_> = model.functions(iface).collect();
        assert_eq!(functions.len(), 1);
        let f = model.get(functions[0]).function().unwrap();
        assert_eq!(f.parameters.len(), 2);
        assert_eq!(f.parameters[0].name, "a");
    }
}
