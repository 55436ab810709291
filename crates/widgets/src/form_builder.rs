//! Forms generated from a JSON field schema:
//!
//! ```json
//! {"fields": [{"name": "email", "type": "text", "label": "Email", "required": true}]}
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use egui::{Color32, RichText, Ui};
use serde::Deserialize;
use theme::{style, ComponentKind, Restyle, StyleSheet, Theme, ThemeHandle, Themed};
use tracing::debug;

use crate::{
    button::Button,
    error::FormError,
    input::Input,
    paint::{sheet_color_or, sheet_px},
};

pub const REQUIRED_MESSAGE: &str = "This field is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Password,
    /// Any other declared type renders as plain text.
    #[default]
    #[serde(other)]
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug)]
struct FormField {
    schema: FieldSchema,
    input: Themed<Input>,
    error: Option<String>,
}

#[derive(Debug)]
pub struct FormBuilder {
    fields: Vec<FormField>,
    submit: Themed<Button>,
    label_style: StyleSheet,
    error_style: StyleSheet,
}

impl FormBuilder {
    pub fn new(engine: &ThemeHandle, schema: FormSchema) -> Themed<Self> {
        let fields = schema
            .fields
            .into_iter()
            .map(|schema| {
                let input = match schema.kind {
                    FieldKind::Password => Input::password(""),
                    FieldKind::Text => Input::new(""),
                };
                FormField {
                    schema,
                    input: input.themed(engine),
                    error: None,
                }
            })
            .collect::<Vec<_>>();
        debug!(fields = fields.len(), "built form");

        Self {
            fields,
            submit: Button::new("Submit").themed(engine),
            label_style: StyleSheet::new(),
            error_style: StyleSheet::new(),
        }
        .themed(engine)
    }

    pub fn from_json_str(engine: &ThemeHandle, json: &str) -> Result<Themed<Self>, FormError> {
        let schema: FormSchema = serde_json::from_str(json)?;
        Ok(Self::new(engine, schema))
    }

    pub fn from_json_file(
        engine: &ThemeHandle,
        path: impl AsRef<Path>,
    ) -> Result<Themed<Self>, FormError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| FormError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(engine, &json)
    }

    fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.schema.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.schema.name.as_str()).collect()
    }

    /// `None` for unknown fields and fields without a label.
    pub fn label_text(&self, name: &str) -> Option<String> {
        let schema = &self.field(name)?.schema;
        if schema.label.is_empty() {
            return None;
        }
        Some(format!("{}{}", schema.label, if schema.required { "*" } else { "" }))
    }

    pub fn is_password(&self, name: &str) -> bool {
        self.field(name)
            .is_some_and(|field| field.input.borrow().is_password())
    }

    pub fn value(&self, name: &str) -> Option<String> {
        Some(self.field(name)?.input.borrow().text().to_string())
    }

    /// Sets a field's value; the field's error is cleared.
    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.schema.name == name) {
            field.input.borrow_mut().set_text(value);
            field.error = None;
        }
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.field(name)?.error.as_deref()
    }

    /// Validates every field. Returns the values only when all are valid.
    pub fn submit(&mut self) -> Option<BTreeMap<String, String>> {
        let mut valid = true;
        for field in &mut self.fields {
            let empty = field.input.borrow().text().is_empty();
            if field.schema.required && empty {
                field.error = Some(REQUIRED_MESSAGE.to_string());
                valid = false;
            }
        }
        if !valid {
            debug!("form has invalid fields");
            return None;
        }

        Some(
            self.fields
                .iter()
                .map(|field| {
                    (
                        field.schema.name.clone(),
                        field.input.borrow().text().to_string(),
                    )
                })
                .collect(),
        )
    }

    pub fn label_style(&self) -> &StyleSheet {
        &self.label_style
    }

    pub fn error_style(&self) -> &StyleSheet {
        &self.error_style
    }

    /// Returns the submitted values on a valid submit.
    pub fn show(&mut self, ui: &mut Ui) -> Option<BTreeMap<String, String>> {
        let label_color = sheet_color_or(&self.label_style, "form label", "color", Color32::BLACK);
        let label_size = sheet_px(&self.label_style, "form label", "font-size").unwrap_or(14.0);
        let error_color = sheet_color_or(&self.error_style, "form label.error", "color", Color32::RED);
        let error_size = sheet_px(&self.error_style, "form label.error", "font-size").unwrap_or(12.0);

        egui::Grid::new(ui.id().with("form_grid"))
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for field in &mut self.fields {
                    let label = field.schema.label.clone()
                        + if field.schema.required { "*" } else { "" };
                    if field.schema.label.is_empty() {
                        ui.label("");
                    } else {
                        ui.label(RichText::new(label).color(label_color).size(label_size));
                    }

                    let changed = field.input.borrow_mut().show(ui).response.changed();
                    if changed {
                        field.error = None;
                    }
                    ui.end_row();

                    if let Some(error) = &field.error {
                        ui.label("");
                        ui.label(RichText::new(error).color(error_color).size(error_size));
                        ui.end_row();
                    }
                }
            });

        ui.add_space(8.0);
        let clicked = self.submit.borrow().show(ui).clicked();
        if clicked {
            self.submit()
        } else {
            None
        }
    }
}

impl Restyle for FormBuilder {
    fn component_kind(&self) -> ComponentKind {
        ComponentKind::Form
    }

    fn restyle(&mut self, theme: &Theme) {
        self.label_style = style::form_label(theme);
        self.error_style = style::form_error(theme);
    }
}

#[cfg(test)]
#[path = "tests/form_builder_tests.rs"]
mod tests;
