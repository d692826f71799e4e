use crate::config::{Config, EventLimits, ValidationRules};

/// Input type as declared in markup (`<input type=...>`, `<textarea>`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Text,
    Email,
    Password,
    TextArea,
    Other,
}

impl InputKind {
    /// Maps an `<input type>` attribute value; missing means `text`.
    pub fn from_type_attr(value: Option<&str>) -> Self {
        match value.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
            None | Some("") | Some("text") => Self::Text,
            Some("email") => Self::Email,
            Some("password") => Self::Password,
            Some(_) => Self::Other,
        }
    }
}

/// A form control and its current value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Input {
    pub name: String,
    pub kind: InputKind,
    pub value: String,
    pub required: bool,
}

impl Input {
    pub fn new(name: impl Into<String>, kind: InputKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: String::new(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// Why an input was rejected; `Display` is the inline message.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("Name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("Message must be at most {max} characters")]
    MessageTooLong { max: usize },
}

/// Applies the site's validation rules to single inputs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FormValidator {
    rules: ValidationRules,
    limits: EventLimits,
}

impl FormValidator {
    pub fn new(config: &Config) -> Self {
        Self {
            rules: *config.validation(),
            limits: *config.limits(),
        }
    }

    /// Checks the trimmed value: required first, then the type-specific rule.
    /// Empty optional inputs always pass.
    pub fn validate_input(&self, input: &Input) -> Result<(), FieldError> {
        let value = input.value.trim();
        if value.is_empty() {
            return if input.required {
                Err(FieldError::Required)
            } else {
                Ok(())
            };
        }

        let len = value.chars().count();
        match input.kind {
            InputKind::Email if !self.rules.is_valid_email(value) => Err(FieldError::InvalidEmail),
            InputKind::Password if len < self.rules.min_password_length => {
                Err(FieldError::PasswordTooShort {
                    min: self.rules.min_password_length,
                })
            }
            InputKind::Text if len < self.rules.min_name_length => Err(FieldError::NameTooShort {
                min: self.rules.min_name_length,
            }),
            InputKind::Text if len > self.rules.max_name_length => Err(FieldError::NameTooLong {
                max: self.rules.max_name_length,
            }),
            InputKind::TextArea if len > self.limits.max_message_length => {
                Err(FieldError::MessageTooLong {
                    max: self.limits.max_message_length,
                })
            }
            _ => Ok(()),
        }
    }
}

/// A form opted into validation, with inline errors per input.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FormState {
    id: Option<String>,
    inputs: Vec<Input>,
    errors: Vec<Option<FieldError>>,
}

impl FormState {
    pub fn new(id: Option<String>, inputs: Vec<Input>) -> Self {
        let errors = vec![None; inputs.len()];
        Self { id, inputs, errors }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    /// Updates the value of the input called `name`. Returns whether it exists.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.position(name) {
            Some(index) => {
                self.inputs[index].value = value.into();
                true
            }
            None => false,
        }
    }

    /// Inline error currently displayed for `name`.
    pub fn error(&self, name: &str) -> Option<&FieldError> {
        self.position(name)
            .and_then(|index| self.errors[index].as_ref())
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(Option::is_some)
    }

    /// Clears the input's previous error, then validates it.
    pub fn validate_input(&mut self, validator: &FormValidator, name: &str) -> Option<bool> {
        let index = self.position(name)?;
        Some(self.validate_at(validator, index))
    }

    /// Validates every input (no short-circuit) and reports overall validity.
    pub fn validate(&mut self, validator: &FormValidator) -> bool {
        let mut valid = true;
        for index in 0..self.inputs.len() {
            if !self.validate_at(validator, index) {
                valid = false;
            }
        }
        valid
    }

    pub fn clear_errors(&mut self) {
        self.errors.iter_mut().for_each(|error| *error = None);
    }

    fn validate_at(&mut self, validator: &FormValidator, index: usize) -> bool {
        self.errors[index] = None;
        match validator.validate_input(&self.inputs[index]) {
            Ok(()) => true,
            Err(error) => {
                self.errors[index] = Some(error);
                false
            }
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|input| input.name == name)
    }
}
