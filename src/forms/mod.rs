//! Form binding
//!
//! Binds validated web-form field values onto model values for create and
//! update. Validation and field rendering stay with the form layer;
//! persistence stays with the driver. The adapter only moves declared
//! fields, so undeclared form data can never reach a model.

mod adapter;
mod model;

pub use adapter::ModelForm;
pub use model::FormModel;

#[cfg(test)]
mod tests;
