//! Form synthesis for IBFS report parameters.
//!
//! Turns the [`ParameterSchema`](ibirs_client::ParameterSchema) discovered
//! by `ibirs-client` into a [`FormSpec`]: concrete input controls with
//! labels, initial values and type-specific constraints, ready for any
//! rendering surface. Synthesis is pure; the only ambient input is the
//! clock, for the date and month picker defaults.
//!
//! ```
//! use ibirs_client::ParameterSchema;
//! use ibirs_form::synthesize;
//!
//! let form = synthesize(&ParameterSchema::default());
//! assert!(form.is_empty());
//! assert!(form.submission(&form.initial_values()).is_empty());
//! ```

pub mod control;
pub mod format;
pub mod rules;
pub mod synthesize;

pub use control::{ControlKind, ControlSpec, FormSpec, ValueMap};
pub use format::FormatCode;
pub use rules::{prompt_action, PromptAction};
pub use synthesize::synthesize;
