//! Dynamic forms driven by a declarative item schema.
//!
//! - `schema`: item types, defaults, loading and diagnostics
//! - `control`: type → input control mapping
//! - `validate`: per-item validators with localized messages
//! - `visibility`: pluggable conditional visibility
//! - `session`: reactive value state for one form

pub mod control;
pub mod schema;
pub mod session;
pub mod validate;
pub mod visibility;

pub use control::{Control, OptionSource, RenderedField, control_for, render_fields};
pub use schema::{
    DynamicFormItemSchema, FormItemType, FormValues, SchemaDiagnostic, SelectOption, check_schema,
    get_default_values, load_schema,
};
pub use session::{FormChange, FormSession};
pub use validate::{FieldError, ValidationErrors, Validator, validate, validator_for};
pub use visibility::{AlwaysVisible, AuthTypePrefixVisibility, VisibilityPredicate, visible_items};
