//! # interview-state
//!
//! Schema-driven field state for interview forms.
//!
//! [`StateFactory`] compiles a question schema into a tree of
//! [`FieldState`]s. Leaf states hold raw user input; object states derive
//! their value, touched flag and validity from their children. Derived
//! properties are recomputed on read, so nothing is ever observed stale
//! after a write.
//!
//! [`InterviewForm`] wraps the root object state and owns the submit
//! boundary. The [`component`] module tells a UI shell what to render for
//! each node.
//!
//! ```rust,ignore
//! let factory = StateFactory::default();
//! let mut state = factory.create_state(&schema)?;
//! state.set_value(json!({ "name": "  Ada  " }));
//! assert_eq!(state.valid_value(), json!({ "name": "Ada" }));
//! ```

pub mod component;
pub mod factory;
pub mod field;
pub mod form;
pub mod template;

pub use component::{
    apply_checkbox_selection, button_options, checkbox_selection, component_for,
    displayable_component, is_required, press_button, select_options, ButtonOption,
    FieldComponent, SelectOption, SelectStyle,
};
pub use factory::{state_shape, StateFactory, StateShape};
pub use field::{FieldState, FieldVariant};
pub use form::{InterviewForm, SubmitOutcome, SubmittingFlag};
pub use template::FieldTemplate;
