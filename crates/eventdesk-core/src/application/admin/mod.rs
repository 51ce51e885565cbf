//! UI-agnostic admin behaviour: form planning and page scaffolds.

pub mod form;
pub mod pages;

pub use form::{FormErrors, FormMode, FormPlan, PlannedField};
pub use pages::{
    FormScaffold, ListQuery, ListScaffold, ListView, MutationOutcome, Navigation, Toast, ToastKind,
};
