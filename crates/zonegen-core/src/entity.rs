//! The semantic model (component B): an owning arena of [`Entity`] values
//! addressed by stable [`EntityId`]s.
//!
//! Every cross-reference (owner, children, base classes) is an index into
//! one flat `Vec<Entity>`, so the graph can be cyclic (interfaces referring
//! to each other) without any reference counting or unsafe code.

use serde::{Deserialize, Serialize};

/// A stable, arena-relative handle to an [`Entity`].
///
/// `EntityId(0)` is always the model's root namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    pub const ROOT: EntityId = EntityId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind tag of an [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Namespace,
    Struct,
    Interface,
    Library,
    Enum,
    Typedef,
    FunctionMethod,
    FunctionVariable,
    FunctionPublicMarker,
    FunctionPrivateMarker,
    CppQuote,
    Constexpr,
    EnumValue,
}

impl EntityKind {
    /// Whether this kind is one of the "class entity" kinds that own a
    /// [`ClassData`] payload and participate in scope resolution.
    pub fn is_class_entity(self) -> bool {
        matches!(
            self,
            EntityKind::Namespace
                | EntityKind::Struct
                | EntityKind::Interface
                | EntityKind::Library
                | EntityKind::Enum
                | EntityKind::Typedef
        )
    }

    /// Whether this kind is one of the "function entity" kinds that own a
    /// [`FunctionData`] payload.
    pub fn is_function_entity(self) -> bool {
        matches!(
            self,
            EntityKind::FunctionMethod
                | EntityKind::FunctionVariable
                | EntityKind::FunctionPublicMarker
                | EntityKind::FunctionPrivateMarker
                | EntityKind::CppQuote
                | EntityKind::Constexpr
                | EntityKind::EnumValue
        )
    }
}

/// One `{type-keyword, name}` template parameter descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParam {
    pub type_keyword: String,
    pub name: String,
}

/// Fields specific to namespace/struct/interface/library/enum/typedef entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassData {
    pub base_classes: Vec<EntityId>,
    pub is_template: bool,
    pub template_params: Vec<TemplateParam>,
    /// Alias target string, set only for `Typedef` entities.
    pub alias_target: Option<String>,
}

/// One method/field parameter: a type string (including reference
/// modifiers), a name, and its own attribute list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub type_name: String,
    pub name: String,
    pub attributes: Vec<String>,
}

impl Parameter {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = String>) -> Self {
        self.attributes = attributes.into_iter().collect();
        self
    }
}

/// Fields specific to function/variable/marker/quote/constexpr/enum-value
/// entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionData {
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    /// Array-size string, set for struct fields declared as arrays.
    pub array_size: Option<String>,
    /// Default-value string, set for fields, constexprs, and enum values.
    pub default_value: Option<String>,
}

/// One node of the semantic model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub name: String,
    pub attributes: Vec<String>,
    pub owner: Option<EntityId>,
    pub children: Vec<EntityId>,
    pub is_imported: bool,
    pub import_lib: Option<String>,
    pub class: Option<ClassData>,
    pub function: Option<FunctionData>,
}

impl Entity {
    fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        let class = kind.is_class_entity().then(ClassData::default);
        let function = kind.is_function_entity().then(FunctionData::default);
        Self {
            kind,
            name: name.into(),
            attributes: Vec::new(),
            owner: None,
            children: Vec::new(),
            is_imported: false,
            import_lib: None,
            class,
            function,
        }
    }

    pub fn class(&self) -> Option<&ClassData> {
        self.class.as_ref()
    }

    pub fn class_mut(&mut self) -> Option<&mut ClassData> {
        self.class.as_mut()
    }

    pub fn function(&self) -> Option<&FunctionData> {
        self.function.as_ref()
    }

    pub fn function_mut(&mut self) -> Option<&mut FunctionData> {
        self.function.as_mut()
    }
}

/// The owning arena for one compilation unit's semantic model.
///
/// Built once (by a parser, or in tests by [`crate::builder`]-style code),
/// then treated as immutable by the resolver, fingerprinter, classifier, and
/// emitter — see spec's lifecycle note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    entities: Vec<Entity>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates a model containing only the root namespace at `EntityId::ROOT`.
    pub fn new() -> Self {
        Self {
            entities: vec![Entity::new(EntityKind::Namespace, "")],
        }
    }

    pub fn root(&self) -> EntityId {
        EntityId::ROOT
    }

    pub fn get(&self, id: EntityId) -> &Entity {
        &self.entities[id.index()]
    }

    pub fn get_mut(&mut self, id: EntityId) -> &mut Entity {
        &mut self.entities[id.index()]
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Inserts a new entity as a child of `owner`, returning its id.
    pub fn insert(&mut self, owner: EntityId, kind: EntityKind, name: impl Into<String>) -> EntityId {
        let mut entity = Entity::new(kind, name);
        entity.owner = Some(owner);
        let id = EntityId(self.entities.len() as u32);
        self.entities.push(entity);
        self.get_mut(owner).children.push(id);
        id
    }

    /// The owner chain from `id`'s immediate owner up to (excluding) the
    /// root, outermost first — i.e. `["a", "b"]` for `a::b::Thing`.
    pub fn owner_chain(&self, id: EntityId) -> Vec<EntityId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).owner;
        while let Some(owner) = current {
            if owner == EntityId::ROOT {
                break;
            }
            chain.push(owner);
            current = self.get(owner).owner;
        }
        chain.reverse();
        chain
    }

    /// The fully qualified `::`-joined name of `id`, not including the
    /// (unnamed) model root.
    pub fn qualified_name(&self, id: EntityId) -> String {
        let mut segments: Vec<&str> = self
            .owner_chain(id)
            .into_iter()
            .map(|o| self.get(o).name.as_str())
            .collect();
        segments.push(&self.get(id).name);
        segments.join("::")
    }

    /// Children of `id` whose kind is a class entity (the search space for
    /// the scope resolver), in declaration order.
    pub fn class_children(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.get(id)
            .children
            .iter()
            .copied()
            .filter(move |c| self.get(*c).kind.is_class_entity())
    }

    /// Direct (non-scope-walking) lookup of a class-entity child of `id`
    /// named `name`, used by the classifier's interface test.
    pub fn find_class(&self, id: EntityId, name: &str) -> Option<EntityId> {
        self.class_children(id).find(|c| self.get(*c).name == name)
    }

    /// All function-entity children of `id`, in declaration order —
    /// an interface or library's methods, or a struct's fields.
    pub fn functions(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.get(id)
            .children
            .iter()
            .copied()
            .filter(move |c| self.get(*c).kind.is_function_entity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_joins_owner_chain() {
        let mut model = Model::new();
        let ns = model.insert(model.root(), EntityKind::Namespace, "outer");
        let iface = model.insert(ns, EntityKind::Interface, "Foo");
        assert_eq!(model.qualified_name(iface), "outer::Foo");
    }

    #[test]
    fn find_class_is_direct_not_recursive() {
        let mut model = Model::new();
        let ns = model.insert(model.root(), EntityKind::Namespace, "outer");
        let inner = model.insert(ns, EntityKind::Namespace, "inner");
        let _iface = model.insert(inner, EntityKind::Interface, "Foo");

        assert!(model.find_class(ns, "Foo").is_none());
        assert!(model.find_class(inner, "Foo").is_some());
    }
}
