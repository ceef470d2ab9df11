//! The contract every editable entity implements.
//!
//! Billboards, categories, colors, sizes and products share one set of REST
//! handlers (`routes::api::entities`) and one set of dashboard pages
//! (`routes::entities`). Each implementation only says how to talk to its
//! repository and how to map its form; tables and form pre-fill come from the
//! record type.

use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::str::FromStr;

use serde::Serialize;
use sqlx::PgPool;

use storeboard_core::forms::EntityInput;
use storeboard_core::{Editable, EntityKind, FieldErrors, ListRecord, StoreId};

use crate::db::RepositoryError;

/// An editable, store-scoped entity.
pub trait Resource: Send + Sync + 'static {
    const KIND: EntityKind;

    /// Row id.
    type Id: Copy + Display + FromStr + Send + Sync + 'static;
    /// Request body and form draft.
    type Input: EntityInput + Default;
    /// Validated input with its references parsed.
    type Draft: Send + Sync;
    /// What the API returns and the list page shows.
    type Record: ListRecord + Editable<Input = Self::Input> + Serialize + Send + Sync + 'static;

    /// Validate a body and parse its references.
    ///
    /// # Errors
    ///
    /// Returns one message per failing field.
    fn prepare(input: &Self::Input) -> Result<Self::Draft, FieldErrors>;

    fn list(
        pool: &PgPool,
        store_id: StoreId,
    ) -> impl Future<Output = Result<Vec<Self::Record>, RepositoryError>> + Send;

    fn get(
        pool: &PgPool,
        store_id: StoreId,
        id: Self::Id,
    ) -> impl Future<Output = Result<Option<Self::Record>, RepositoryError>> + Send;

    fn create(
        pool: &PgPool,
        store_id: StoreId,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Self::Record, RepositoryError>> + Send;

    fn update(
        pool: &PgPool,
        store_id: StoreId,
        id: Self::Id,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Self::Record, RepositoryError>> + Send;

    fn delete(
        pool: &PgPool,
        store_id: StoreId,
        id: Self::Id,
    ) -> impl Future<Output = Result<Self::Record, RepositoryError>> + Send;

    /// Read a submitted HTML form.
    fn from_form(form: &HashMap<String, String>) -> Self::Input;

    /// Choices for the form's select fields.
    fn load_options(
        pool: &PgPool,
        store_id: StoreId,
    ) -> impl Future<Output = Result<FormOptions, RepositoryError>> + Send {
        let _ = (pool, store_id);
        async { Ok(FormOptions::default()) }
    }

    /// Form fields, filled from `input`.
    fn fields(input: &Self::Input, options: &FormOptions) -> Vec<FormField>;
}

/// Select choices loaded for a form.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    pub billboards: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
    pub colors: Vec<SelectOption>,
    pub sizes: Vec<SelectOption>,
}

/// One `<option>`.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: &'static str,
}

impl SelectOption {
    #[must_use]
    pub fn new(value: impl Display, label: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
            selected: "",
        }
    }
}

/// How a field is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Text,
    Url,
    Number,
    Color,
    Textarea,
    Select,
    Checkbox,
}

impl Widget {
    /// Template switch value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text | Self::Url | Self::Number | Self::Color => "input",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
        }
    }

    /// `type` attribute of an `<input>`.
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Text | Self::Color | Self::Textarea | Self::Select => "text",
        }
    }
}

/// One form field as the template sees it.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: &'static str,
    pub input_type: &'static str,
    pub value: String,
    pub placeholder: &'static str,
    pub description: &'static str,
    pub checked: &'static str,
    pub options: Vec<SelectOption>,
    /// Hex color previewed next to the input.
    pub swatch: Option<String>,
    pub error: Option<String>,
}

impl FormField {
    #[must_use]
    pub fn new(widget: Widget, name: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            label,
            widget: widget.as_str(),
            input_type: widget.input_type(),
            value: value.into(),
            placeholder: "",
            description: "",
            checked: "",
            options: Vec::new(),
            swatch: None,
            error: None,
        }
    }

    #[must_use]
    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    #[must_use]
    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Select field; the option matching `value` is pre-selected.
    #[must_use]
    pub fn select(
        name: &'static str,
        label: &'static str,
        value: &str,
        options: &[SelectOption],
    ) -> Self {
        let options = options
            .iter()
            .cloned()
            .map(|mut option| {
                if option.value == value {
                    option.selected = "selected";
                }
                option
            })
            .collect();
        Self {
            options,
            ..Self::new(Widget::Select, name, label, value)
        }
    }

    /// Checkbox submitting `true` when ticked.
    #[must_use]
    pub fn checkbox(name: &'static str, label: &'static str, checked: bool) -> Self {
        Self {
            checked: if checked { "checked" } else { "" },
            ..Self::new(Widget::Checkbox, name, label, "true")
        }
    }

    #[must_use]
    pub fn swatch(mut self, color: &str) -> Self {
        if !color.trim().is_empty() {
            self.swatch = Some(color.trim().to_string());
        }
        self
    }
}

/// Attach validation messages to their fields.
#[must_use]
pub fn with_errors(mut fields: Vec<FormField>, errors: &FieldErrors) -> Vec<FormField> {
    for field in &mut fields {
        field.error = errors.get(field.name).map(ToString::to_string);
    }
    fields
}

/// Value of a submitted text field, or empty.
#[must_use]
pub fn form_text(form: &HashMap<String, String>, name: &str) -> String {
    form.get(name).cloned().unwrap_or_default()
}

/// Whether a submitted checkbox was ticked.
#[must_use]
pub fn form_flag(form: &HashMap<String, String>, name: &str) -> bool {
    form.get(name)
        .is_some_and(|value| matches!(value.as_str(), "true" | "on" | "1"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_marks_current_value() {
        let options = vec![SelectOption::new("a", "A"), SelectOption::new("b", "B")];
        let field = FormField::select("billboardId", "Billboard", "b", &options);
        let selected: Vec<&str> = field.options.iter().map(|o| o.selected).collect();
        assert_eq!(selected, vec!["", "selected"]);
        assert_eq!(field.widget, "select");
    }

    #[test]
    fn test_with_errors_attaches_by_name() {
        let mut errors = FieldErrors::new();
        errors.add("label", "Label is required");
        let fields = with_errors(
            vec![
                FormField::new(Widget::Text, "label", "Label", ""),
                FormField::new(Widget::Url, "imageUrl", "Image URL", "https://x"),
            ],
            &errors,
        );
        assert_eq!(fields.first().and_then(|f| f.error.as_deref()), Some("Label is required"));
        assert!(fields.get(1).is_some_and(|f| f.error.is_none()));
    }

    #[test]
    fn test_form_flag() {
        let mut form = HashMap::new();
        form.insert("isFeatured".to_string(), "true".to_string());
        assert!(form_flag(&form, "isFeatured"));
        assert!(!form_flag(&form, "isArchived"));
    }

    #[test]
    fn test_checkbox_attr() {
        assert_eq!(FormField::checkbox("isArchived", "Archived", true).checked, "checked");
        assert_eq!(FormField::checkbox("isArchived", "Archived", false).checked, "");
    }
}
