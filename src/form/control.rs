//! Which input control renders each form item type.

use serde::Serialize;

use super::schema::{DynamicFormItemSchema, FormItemType, SelectOption};
use crate::i18n::Locale;

/// Where a select control gets its choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "from", content = "options", rename_all = "snake_case")]
pub enum OptionSource {
    /// Options listed in the schema item
    Static(Vec<SelectOption>),
    LlmModels,
    KnowledgeBases,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Control {
    NumberInput { integer: bool },
    Toggle,
    TextInput { multiline: bool },
    MultiValueInput,
    Select { source: OptionSource },
    /// Ordered list of `{role, content}` messages
    PromptEditor,
    FilePicker {
        multiple: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        accept: Option<String>,
    },
}

impl Control {
    /// Short human-readable name, used by the CLI.
    pub fn describe(&self) -> String {
        match self {
            Self::NumberInput { integer: true } => "integer input".to_string(),
            Self::NumberInput { integer: false } => "number input".to_string(),
            Self::Toggle => "toggle".to_string(),
            Self::TextInput { multiline: true } => "multiline text input".to_string(),
            Self::TextInput { multiline: false } => "text input".to_string(),
            Self::MultiValueInput => "multi-value input".to_string(),
            Self::Select {
                source: OptionSource::Static(options),
            } => format!("select ({} options)", options.len()),
            Self::Select {
                source: OptionSource::LlmModels,
            } => "select (llm models)".to_string(),
            Self::Select {
                source: OptionSource::KnowledgeBases,
            } => "select (knowledge bases)".to_string(),
            Self::PromptEditor => "prompt editor".to_string(),
            Self::FilePicker { multiple, accept } => {
                let kind = if *multiple { "multi-file picker" } else { "file picker" };
                match accept {
                    Some(accept) => format!("{} [{}]", kind, accept),
                    None => kind.to_string(),
                }
            }
        }
    }
}

pub fn control_for(item: &DynamicFormItemSchema) -> Control {
    match item.item_type {
        FormItemType::Integer => Control::NumberInput { integer: true },
        FormItemType::Float => Control::NumberInput { integer: false },
        FormItemType::Boolean => Control::Toggle,
        FormItemType::String | FormItemType::Unknown => Control::TextInput { multiline: false },
        FormItemType::Text => Control::TextInput { multiline: true },
        FormItemType::StringArray => Control::MultiValueInput,
        FormItemType::Select => Control::Select {
            source: OptionSource::Static(item.options.clone()),
        },
        FormItemType::LlmModelSelector => Control::Select {
            source: OptionSource::LlmModels,
        },
        FormItemType::KnowledgeBaseSelector => Control::Select {
            source: OptionSource::KnowledgeBases,
        },
        FormItemType::PromptEditor => Control::PromptEditor,
        FormItemType::File => Control::FilePicker {
            multiple: false,
            accept: item.accept.clone(),
        },
        FormItemType::FileArray => Control::FilePicker {
            multiple: true,
            accept: item.accept.clone(),
        },
    }
}

/// A form item resolved for display in one locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub control: Control,
}

pub fn render_field(item: &DynamicFormItemSchema, locale: Locale) -> RenderedField {
    let label = match item.label.resolve(locale) {
        "" => item.name.clone(),
        text => text.to_string(),
    };
    RenderedField {
        name: item.name.clone(),
        label,
        description: item
            .description
            .as_ref()
            .map(|d| d.resolve(locale).to_string())
            .filter(|d| !d.is_empty()),
        required: item.required,
        control: control_for(item),
    }
}

pub fn render_fields<'a, I>(items: I, locale: Locale) -> Vec<RenderedField>
where
    I: IntoIterator<Item = &'a DynamicFormItemSchema>,
{
    items
        .into_iter()
        .map(|item| render_field(item, locale))
        .collect()
}
