//! Per-item value validation with localized messages.

use serde_json::Value;
use thiserror::Error;

use super::schema::{DynamicFormItemSchema, FormItemType, FormValues};
use crate::i18n::{I18n, Message};

/// Value rule derived from an item's type and `required` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Number { integer: bool },
    Boolean,
    String { required: bool },
    StringArray { required: bool },
    /// Array of `{role, content}` objects
    PromptMessages { required: bool },
    /// Array of uploaded file keys
    FileKeys { required: bool },
}

pub fn validator_for(item: &DynamicFormItemSchema) -> Validator {
    let required = item.required;
    match item.item_type {
        FormItemType::Integer => Validator::Number { integer: true },
        FormItemType::Float => Validator::Number { integer: false },
        FormItemType::Boolean => Validator::Boolean,
        FormItemType::StringArray => Validator::StringArray { required },
        FormItemType::PromptEditor => Validator::PromptMessages { required },
        FormItemType::FileArray => Validator::FileKeys { required },
        FormItemType::String
        | FormItemType::Text
        | FormItemType::File
        | FormItemType::Select
        | FormItemType::LlmModelSelector
        | FormItemType::KnowledgeBaseSelector
        | FormItemType::Unknown => Validator::String { required },
    }
}

fn is_prompt_message(value: &Value) -> bool {
    value.get("role").is_some_and(Value::is_string) && value.get("content").is_some_and(Value::is_string)
}

fn check_array(
    value: Option<&Value>,
    required: bool,
    element_ok: fn(&Value) -> bool,
    mismatch: Message,
) -> Result<(), Message> {
    match value {
        Some(Value::Array(elements)) if elements.iter().all(element_ok) => {
            if required && elements.is_empty() {
                Err(Message::FieldRequired)
            } else {
                Ok(())
            }
        }
        None | Some(Value::Null) if required => Err(Message::FieldRequired),
        _ => Err(mismatch),
    }
}

impl Validator {
    /// Check one value. A missing value is a type mismatch unless the rule
    /// is a required string or array, which reports the required message.
    pub fn check(&self, value: Option<&Value>) -> Result<(), Message> {
        match *self {
            Self::Number { integer } => match value {
                Some(Value::Number(_)) if !integer => Ok(()),
                Some(Value::Number(n)) => {
                    let whole = n.is_i64()
                        || n.is_u64()
                        || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0);
                    if whole { Ok(()) } else { Err(Message::ExpectedInteger) }
                }
                _ if integer => Err(Message::ExpectedInteger),
                _ => Err(Message::ExpectedNumber),
            },
            Self::Boolean => match value {
                Some(Value::Bool(_)) => Ok(()),
                _ => Err(Message::ExpectedBoolean),
            },
            Self::String { required } => match value {
                Some(Value::String(s)) if required && s.is_empty() => Err(Message::FieldRequired),
                Some(Value::String(_)) => Ok(()),
                None | Some(Value::Null) if required => Err(Message::FieldRequired),
                _ => Err(Message::ExpectedString),
            },
            Self::StringArray { required } => {
                check_array(value, required, Value::is_string, Message::ExpectedStringArray)
            }
            Self::FileKeys { required } => {
                check_array(value, required, Value::is_string, Message::ExpectedStringArray)
            }
            Self::PromptMessages { required } => check_array(
                value,
                required,
                is_prompt_message,
                Message::ExpectedPromptMessages,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors of one validation pass, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First message reported for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Validate `values` against `items`, returning every failing field.
pub fn validate<'a, I>(items: I, values: &FormValues, i18n: &I18n) -> Result<(), ValidationErrors>
where
    I: IntoIterator<Item = &'a DynamicFormItemSchema>,
{
    let errors: Vec<FieldError> = items
        .into_iter()
        .filter_map(|item| {
            validator_for(item)
                .check(values.get(&item.name))
                .err()
                .map(|message| FieldError {
                    field: item.name.clone(),
                    message: i18n.text(message).to_string(),
                })
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
