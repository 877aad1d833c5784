//! Reusable UI components

pub mod input_field;

pub use input_field::{calculate_input_field_height, render_input_field, InputFieldConfig};
