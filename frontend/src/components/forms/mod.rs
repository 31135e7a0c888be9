pub mod fields;

pub use fields::{
    error_for, CheckboxField, FieldChange, MultiSelectField, SelectField, TextAreaField, TextField,
};
