//! Customer form: field schema, validation, and interaction state.

mod schema;
mod state;
mod validation;

pub use schema::{FieldDescriptor, FieldKind, FieldName, customer_fields, descriptor};
pub use state::{FormError, FormMode, FormState, Submission};
pub use validation::{FieldError, FieldErrors, FormValues, validate, validate_field};
