//! Schema types describing provider, resource, and data source structure.
//!
//! Schemas declare the shape of a value tree: which attributes exist, their
//! semantic types, whether they are required/optional/computed, defaults,
//! validators, and plan modifiers. The reconciler and the planning engine are
//! both driven off these declarations.

use std::collections::HashMap;

use crate::values::Value;

/// The semantic type of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeType {
    /// A string value.
    String,
    /// A 64-bit integer.
    Int64,
    /// A 64-bit floating point number.
    Float64,
    /// A boolean value.
    Bool,
    /// An ordered list of values of a single type.
    List(Box<AttributeType>),
    /// A map from string keys to values of a single type.
    Map(Box<AttributeType>),
    /// An object with a fixed set of attributes.
    Object(HashMap<String, AttributeType>),
}

impl AttributeType {
    /// Create a list type.
    pub fn list(element_type: AttributeType) -> Self {
        Self::List(Box::new(element_type))
    }

    /// Create a map type.
    pub fn map(element_type: AttributeType) -> Self {
        Self::Map(Box::new(element_type))
    }

    /// Create an object type.
    pub fn object<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (S, AttributeType)>,
        S: Into<String>,
    {
        Self::Object(attributes.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Describes how an attribute can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeFlags {
    /// The attribute is required in configuration.
    pub required: bool,
    /// The attribute is optional in configuration.
    pub optional: bool,
    /// The attribute is computed by the provider (filled from the remote).
    pub computed: bool,
    /// The attribute is sensitive and never appears in diagnostics or logs.
    pub sensitive: bool,
}

impl AttributeFlags {
    /// Flags for a required attribute.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Default::default()
        }
    }

    /// Flags for an optional attribute.
    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Default::default()
        }
    }

    /// Flags for a computed attribute (read-only, set by the provider).
    pub fn computed() -> Self {
        Self {
            computed: true,
            ..Default::default()
        }
    }

    /// Flags for an optional+computed attribute (user may set it, provider
    /// fills it otherwise).
    pub fn optional_computed() -> Self {
        Self {
            optional: true,
            computed: true,
            ..Default::default()
        }
    }

    /// Mark the attribute as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// A composable value validator attached to an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// String length must be at least this many characters.
    LengthAtLeast(usize),
    /// The string must be one of the listed values.
    OneOf(Vec<String>),
    /// The sequence must hold at least this many elements.
    SizeAtLeast(usize),
}

/// A plan modifier attached to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanModifier {
    /// A computed attribute whose prior state is known and whose planned value
    /// is unknown resolves to the prior value during planning.
    UseStateForUnknown,
    /// Any change to this attribute forces delete-then-create.
    RequiresReplace,
}

/// Describes a single attribute in a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// The semantic type of the attribute.
    pub attr_type: AttributeType,
    /// Flags describing how the attribute can be used.
    pub flags: AttributeFlags,
    /// Human-readable description of the attribute.
    pub description: Option<String>,
    /// Default applied when the declared value is null and the attribute is
    /// optional+computed.
    pub default: Option<Value>,
    /// Validators run during config validation.
    pub validators: Vec<Validator>,
    /// Plan modifiers observed by the planning engine.
    pub plan_modifiers: Vec<PlanModifier>,
}

impl Attribute {
    /// Create a new attribute with the given type and flags.
    pub fn new(attr_type: AttributeType, flags: AttributeFlags) -> Self {
        Self {
            attr_type,
            flags,
            description: None,
            default: None,
            validators: Vec::new(),
            plan_modifiers: Vec::new(),
        }
    }

    /// Create a required string attribute.
    pub fn required_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::required())
    }

    /// Create an optional string attribute.
    pub fn optional_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::optional())
    }

    /// Create a computed string attribute.
    pub fn computed_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::computed())
    }

    /// Create an optional+computed string attribute.
    pub fn optional_computed_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::optional_computed())
    }

    /// Create a required int64 attribute.
    pub fn required_int64() -> Self {
        Self::new(AttributeType::Int64, AttributeFlags::required())
    }

    /// Create an optional int64 attribute.
    pub fn optional_int64() -> Self {
        Self::new(AttributeType::Int64, AttributeFlags::optional())
    }

    /// Create an optional bool attribute.
    pub fn optional_bool() -> Self {
        Self::new(AttributeType::Bool, AttributeFlags::optional())
    }

    /// Create an optional list-of-strings attribute.
    pub fn optional_string_list() -> Self {
        Self::new(
            AttributeType::list(AttributeType::String),
            AttributeFlags::optional(),
        )
    }

    /// Set the description for this attribute.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a default value, applied when the declared value is null.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Attach a validator to this attribute.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Mark this attribute as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.flags.sensitive = true;
        self
    }

    /// Resolve unknown planned values from prior state.
    pub fn use_state_for_unknown(mut self) -> Self {
        self.plan_modifiers.push(PlanModifier::UseStateForUnknown);
        self
    }

    /// Force replacement when this attribute changes.
    pub fn requires_replace(mut self) -> Self {
        self.plan_modifiers.push(PlanModifier::RequiresReplace);
        self
    }

    /// Whether a change to this attribute forces delete-then-create.
    pub fn forces_replacement(&self) -> bool {
        self.plan_modifiers.contains(&PlanModifier::RequiresReplace)
    }

    /// Whether unknown planned values resolve from prior state.
    pub fn keeps_state_for_unknown(&self) -> bool {
        self.plan_modifiers.contains(&PlanModifier::UseStateForUnknown)
    }
}

/// The nesting mode for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockNestingMode {
    /// A single nested block (at most one).
    #[default]
    Single,
    /// A list of nested blocks (zero or more, ordered).
    List,
    /// A map of nested blocks keyed by string.
    Map,
}

/// A nested block within a schema.
///
/// Blocks model complex nested structures with their own attribute sets,
/// such as the `schedule` block of a backup policy or the `criteria` block
/// of a guardrail.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// The attributes within this block.
    pub attributes: HashMap<String, Attribute>,
    /// Nested blocks within this block.
    pub blocks: HashMap<String, NestedBlock>,
    /// Human-readable description of the block.
    pub description: Option<String>,
}

impl Block {
    /// Create a new empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute to this block.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }

    /// Add a nested block to this block.
    pub fn with_block(mut self, name: impl Into<String>, block: NestedBlock) -> Self {
        self.blocks.insert(name.into(), block);
        self
    }

    /// Set the description for this block.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A nested block with its nesting mode and constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedBlock {
    /// The block definition.
    pub block: Block,
    /// How the block is nested.
    pub nesting_mode: BlockNestingMode,
    /// Minimum number of blocks required.
    pub min_items: u32,
    /// Maximum number of blocks allowed (0 = unlimited).
    pub max_items: u32,
}

impl NestedBlock {
    /// Create a single nested block (0 or 1 allowed).
    pub fn single(block: Block) -> Self {
        Self {
            block,
            nesting_mode: BlockNestingMode::Single,
            min_items: 0,
            max_items: 1,
        }
    }

    /// Create a list of nested blocks.
    pub fn list(block: Block) -> Self {
        Self {
            block,
            nesting_mode: BlockNestingMode::List,
            min_items: 0,
            max_items: 0,
        }
    }

    /// Create a map of nested blocks.
    pub fn map(block: Block) -> Self {
        Self {
            block,
            nesting_mode: BlockNestingMode::Map,
            min_items: 0,
            max_items: 0,
        }
    }

    /// Set the minimum number of blocks required.
    pub fn with_min_items(mut self, min: u32) -> Self {
        self.min_items = min;
        self
    }

    /// Set the maximum number of blocks allowed.
    pub fn with_max_items(mut self, max: u32) -> Self {
        self.max_items = max;
        self
    }
}

/// Schema for a resource or data source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    /// The version of this schema.
    pub version: u64,
    /// The root block containing all attributes and nested blocks.
    pub block: Block,
}

impl Schema {
    /// Create a new schema with the given version.
    pub fn new(version: u64) -> Self {
        Self {
            version,
            block: Block::new(),
        }
    }

    /// Create a schema at version 0.
    pub fn v0() -> Self {
        Self::new(0)
    }

    /// Add an attribute to the schema.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.block.attributes.insert(name.into(), attr);
        self
    }

    /// Add a nested block to the schema.
    pub fn with_block(mut self, name: impl Into<String>, block: NestedBlock) -> Self {
        self.block.blocks.insert(name.into(), block);
        self
    }

    /// Look up a root-level attribute declaration.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.block.attributes.get(name)
    }

    /// Whether the attribute at `name` is sensitive.
    pub fn is_sensitive(&self, name: &str) -> bool {
        self.attribute(name).map(|a| a.flags.sensitive).unwrap_or(false)
    }
}

/// Schema for the whole provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderSchema {
    /// Schema for provider configuration.
    pub provider: Schema,
    /// Schemas for each resource type.
    pub resources: HashMap<String, Schema>,
    /// Schemas for each data source type.
    pub data_sources: HashMap<String, Schema>,
}

impl ProviderSchema {
    /// Create a new empty provider schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider configuration schema.
    pub fn with_provider_config(mut self, schema: Schema) -> Self {
        self.provider = schema;
        self
    }

    /// Add a resource schema.
    pub fn with_resource(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.resources.insert(name.into(), schema);
        self
    }

    /// Add a data source schema.
    pub fn with_data_source(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.data_sources.insert(name.into(), schema);
        self
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// An error that prevents the operation from completing.
    Error,
    /// A warning that doesn't prevent the operation.
    Warning,
}

/// A diagnostic message returned to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: DiagnosticSeverity,
    /// A short, stable summary of the issue.
    pub summary: String,
    /// A detailed, actionable description.
    pub detail: Option<String>,
    /// The attribute path where the issue occurred.
    pub attribute: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Add detail to this diagnostic.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the attribute path for this diagnostic.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}

/// Whether a diagnostic list contains at least one error.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics
        .iter()
        .any(|d| matches!(d.severity, DiagnosticSeverity::Error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_flags() {
        let required = AttributeFlags::required();
        assert!(required.required);
        assert!(!required.optional);
        assert!(!required.computed);

        let optional_computed = AttributeFlags::optional_computed();
        assert!(optional_computed.optional);
        assert!(optional_computed.computed);

        let sensitive = AttributeFlags::required().sensitive();
        assert!(sensitive.sensitive);
    }

    #[test]
    fn test_attribute_builders() {
        let attr = Attribute::required_string()
            .with_description("Display name")
            .with_validator(Validator::LengthAtLeast(1))
            .requires_replace();

        assert_eq!(attr.attr_type, AttributeType::String);
        assert!(attr.flags.required);
        assert!(attr.forces_replacement());
        assert_eq!(attr.validators, vec![Validator::LengthAtLeast(1)]);
    }

    #[test]
    fn test_use_state_for_unknown_modifier() {
        let attr = Attribute::computed_string().use_state_for_unknown();
        assert!(attr.keeps_state_for_unknown());
        assert!(!attr.forces_replacement());
    }

    #[test]
    fn test_default_value() {
        let attr = Attribute::optional_computed_string().with_default(Value::string("Active"));
        assert_eq!(attr.default, Some(Value::string("Active")));
    }

    #[test]
    fn test_schema_builder() {
        let schema = Schema::v0()
            .with_attribute("name", Attribute::required_string())
            .with_attribute("id", Attribute::computed_string())
            .with_block(
                "schedule",
                NestedBlock::single(
                    Block::new().with_attribute("frequency", Attribute::required_string()),
                ),
            );

        assert_eq!(schema.version, 0);
        assert!(schema.attribute("name").is_some());
        assert!(schema.block.blocks.contains_key("schedule"));
    }

    #[test]
    fn test_sensitive_lookup() {
        let schema = Schema::v0()
            .with_attribute("secret_key", Attribute::required_string().sensitive())
            .with_attribute("name", Attribute::required_string());
        assert!(schema.is_sensitive("secret_key"));
        assert!(!schema.is_sensitive("name"));
        assert!(!schema.is_sensitive("absent"));
    }

    #[test]
    fn test_provider_schema() {
        let provider_schema = ProviderSchema::new()
            .with_provider_config(
                Schema::v0().with_attribute("access_key", Attribute::required_string().sensitive()),
            )
            .with_resource(
                "firefly_project",
                Schema::v0().with_attribute("name", Attribute::required_string()),
            )
            .with_data_source(
                "firefly_projects",
                Schema::v0().with_attribute("search", Attribute::optional_string()),
            );

        assert!(provider_schema.resources.contains_key("firefly_project"));
        assert!(provider_schema.data_sources.contains_key("firefly_projects"));
    }

    #[test]
    fn test_diagnostic() {
        let err = Diagnostic::error("Invalid schedule")
            .with_detail("days_of_week must be non-empty for weekly schedules")
            .with_attribute("schedule.days_of_week");

        assert_eq!(err.severity, DiagnosticSeverity::Error);
        assert_eq!(err.attribute, Some("schedule.days_of_week".to_string()));
        assert!(has_errors(std::slice::from_ref(&err)));
        assert!(!has_errors(&[Diagnostic::warning("slow")]));
    }
}
