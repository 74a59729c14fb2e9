//! Config editor form state
//!
//! One input per known configuration field, in [`CONFIG_FIELDS`] order.
//! Number and text fields are edited as raw text and parsed on submit;
//! boolean fields are toggled in place.

use aprsmon_core::{
    parse_input, ConfigRecord, ConfigValue, FieldKind, FieldSpec, CONFIG_FIELDS,
};

/// Where the form is in its fetch/submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    /// Waiting for `GET /api/config`
    #[default]
    Loading,
    /// Populated and editable
    Ready,
    /// `GET /api/config` failed; fields hold whatever was there before
    LoadFailed,
    /// `POST /api/config` in flight
    Submitting,
}

/// One editable input
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub spec: &'static FieldSpec,
    pub input: String,
    pub error: Option<String>,
}

impl FormField {
    fn new(spec: &'static FieldSpec) -> Self {
        let input = match spec.kind {
            FieldKind::Boolean => "false".to_string(),
            _ => String::new(),
        };
        Self {
            spec,
            input,
            error: None,
        }
    }

    pub fn is_boolean(&self) -> bool {
        self.spec.kind == FieldKind::Boolean
    }

    /// Checkbox state of a boolean field.
    pub fn checked(&self) -> bool {
        self.input == "true"
    }
}

/// State of the config editor modal
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigForm {
    pub fields: Vec<FormField>,
    pub selected: usize,
    pub status: FormStatus,
}

impl Default for ConfigForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigForm {
    pub fn new() -> Self {
        Self {
            fields: CONFIG_FIELDS.iter().map(FormField::new).collect(),
            selected: 0,
            status: FormStatus::Loading,
        }
    }

    /// Fill every input from a fetched record. Keys the backend did not
    /// send come back empty.
    pub fn populate(&mut self, record: &ConfigRecord) {
        for field in &mut self.fields {
            field.input = match (field.spec.kind, record.get(field.spec.key)) {
                (FieldKind::Boolean, value) => value
                    .map(ConfigValue::as_bool)
                    .unwrap_or(false)
                    .to_string(),
                (_, Some(value)) => value.to_input_text(),
                (_, None) => String::new(),
            };
            field.error = None;
        }
        self.status = FormStatus::Ready;
    }

    pub fn selected_field(&self) -> Option<&FormField> {
        self.fields.get(self.selected)
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.status, FormStatus::Ready | FormStatus::LoadFailed)
    }

    pub fn select_next(&mut self) {
        if !self.fields.is_empty() {
            self.selected = (self.selected + 1) % self.fields.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.fields.is_empty() {
            self.selected = (self.selected + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Type into the selected input. Space toggles a boolean field.
    pub fn insert_char(&mut self, c: char) {
        let Some(field) = self.fields.get_mut(self.selected) else {
            return;
        };
        if field.is_boolean() {
            if c == ' ' {
                self.toggle();
            }
            return;
        }
        field.input.push(c);
        field.error = None;
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.selected) {
            if !field.is_boolean() {
                field.input.pop();
                field.error = None;
            }
        }
    }

    /// Flip the selected boolean field. Returns `false` when the selected
    /// field is not a boolean.
    pub fn toggle(&mut self) -> bool {
        match self.fields.get_mut(self.selected) {
            Some(field) if field.is_boolean() => {
                field.input = (!field.checked()).to_string();
                true
            }
            _ => false,
        }
    }

    /// Parse every input into a record.
    ///
    /// Invalid inputs get an inline error and the first one is selected;
    /// nothing is returned until all fields parse.
    pub fn build_record(&mut self) -> Option<ConfigRecord> {
        let mut record = ConfigRecord::new();
        let mut first_invalid = None;

        for (index, field) in self.fields.iter_mut().enumerate() {
            match parse_input(field.spec, &field.input) {
                Ok(value) => {
                    field.error = None;
                    // Keys come from CONFIG_FIELDS, so `set` cannot reject them
                    let _ = record.set(field.spec.key, value);
                }
                Err(e) => {
                    field.error = Some(e.to_string());
                    first_invalid.get_or_insert(index);
                }
            }
        }

        match first_invalid {
            Some(index) => {
                self.selected = index;
                None
            }
            None => Some(record),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }
}
