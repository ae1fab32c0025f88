//! Form item schema types, default values and schema diagnostics.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SchemaError;
use crate::i18n::I18nText;

/// Values of a form keyed by item name.
pub type FormValues = serde_json::Map<String, Value>;

/// Closed set of form item types. Unrecognized type strings map to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormItemType {
    Integer,
    Float,
    Boolean,
    String,
    Text,
    StringArray,
    File,
    FileArray,
    Select,
    LlmModelSelector,
    PromptEditor,
    KnowledgeBaseSelector,
    #[default]
    Unknown,
}

impl FormItemType {
    pub const ALL: [FormItemType; 13] = [
        Self::Integer,
        Self::Float,
        Self::Boolean,
        Self::String,
        Self::Text,
        Self::StringArray,
        Self::File,
        Self::FileArray,
        Self::Select,
        Self::LlmModelSelector,
        Self::PromptEditor,
        Self::KnowledgeBaseSelector,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Text => "text",
            Self::StringArray => "array[string]",
            Self::File => "file",
            Self::FileArray => "array[file]",
            Self::Select => "select",
            Self::LlmModelSelector => "llm-model-selector",
            Self::PromptEditor => "prompt-editor",
            Self::KnowledgeBaseSelector => "knowledge-base-selector",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .unwrap_or(Self::Unknown)
    }
}

/// Accepts any `type` value; only strings can name a known type.
fn lenient_item_type<'de, D>(deserializer: D) -> Result<FormItemType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawType {
        Name(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match RawType::deserialize(deserializer)? {
        RawType::Name(name) => FormItemType::parse(&name),
        RawType::Other(_) => FormItemType::Unknown,
    })
}

impl From<String> for FormItemType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<FormItemType> for String {
    fn from(t: FormItemType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for FormItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One choice of a `select` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
    #[serde(default)]
    pub label: I18nText,
}

/// Declarative description of one form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicFormItemSchema {
    #[serde(default)]
    pub id: String,
    /// Key of this item in the form values
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_item_type")]
    pub item_type: FormItemType,
    #[serde(default)]
    pub default: Value,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub label: I18nText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<I18nText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    /// Accepted file types for file pickers, e.g. ".pdf,.txt"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
}

impl DynamicFormItemSchema {
    pub fn new(name: &str, item_type: FormItemType) -> Self {
        Self {
            id: name.to_string(),
            name: name.to_string(),
            item_type,
            default: Value::Null,
            required: false,
            label: I18nText::en(name),
            description: None,
            options: Vec::new(),
            accept: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = default;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }
}

/// Map each item name to its default. Later items win on duplicate names.
pub fn get_default_values(items: &[DynamicFormItemSchema]) -> FormValues {
    let mut values = FormValues::new();
    for item in items {
        values.insert(item.name.clone(), item.default.clone());
    }
    values
}

/// A configuration problem found by [`check_schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaDiagnostic {
    EmptyName { index: usize },
    DuplicateName { name: String, first: usize, duplicate: usize },
}

impl std::fmt::Display for SchemaDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { index } => write!(f, "item #{} has an empty name", index),
            Self::DuplicateName {
                name,
                first,
                duplicate,
            } => write!(
                f,
                "name '{}' is used by items #{} and #{}; the later default wins",
                name, first, duplicate
            ),
        }
    }
}

/// Report empty or duplicated item names. Advisory only; rendering and
/// default computation accept such schemas as they are.
pub fn check_schema(items: &[DynamicFormItemSchema]) -> Vec<SchemaDiagnostic> {
    let mut diagnostics = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (index, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            diagnostics.push(SchemaDiagnostic::EmptyName { index });
            continue;
        }
        match seen.get(item.name.as_str()) {
            Some(&first) => diagnostics.push(SchemaDiagnostic::DuplicateName {
                name: item.name.clone(),
                first,
                duplicate: index,
            }),
            None => {
                seen.insert(&item.name, index);
            }
        }
    }

    diagnostics
}

pub fn parse_schema_json(content: &str) -> Result<Vec<DynamicFormItemSchema>, SchemaError> {
    Ok(serde_json::from_str(content)?)
}

pub fn parse_schema_yaml(content: &str) -> Result<Vec<DynamicFormItemSchema>, SchemaError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Load a schema list from a `.yaml`/`.yml` or JSON file.
pub fn load_schema(path: &Path) -> Result<Vec<DynamicFormItemSchema>, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|source| SchemaError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => parse_schema_yaml(&content),
        _ => parse_schema_json(&content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_last_write_wins() {
        let items = vec![
            DynamicFormItemSchema::new("a", FormItemType::Integer).with_default(json!(1)),
            DynamicFormItemSchema::new("a", FormItemType::Integer).with_default(json!(2)),
        ];
        let values = get_default_values(&items);
        assert_eq!(values.len(), 1);
        assert_eq!(values["a"], json!(2));
    }

    #[test]
    fn test_defaults_include_null_defaults() {
        let items = vec![
            DynamicFormItemSchema::new("model", FormItemType::LlmModelSelector),
            DynamicFormItemSchema::new("temperature", FormItemType::Float).with_default(json!(0.7)),
        ];
        let values = get_default_values(&items);
        assert_eq!(values["model"], Value::Null);
        assert_eq!(values["temperature"], json!(0.7));
    }

    #[test]
    fn test_item_type_parsing() {
        assert_eq!(FormItemType::parse("array[string]"), FormItemType::StringArray);
        assert_eq!(FormItemType::parse("knowledge-base-selector"), FormItemType::KnowledgeBaseSelector);
        assert_eq!(FormItemType::parse("color-picker"), FormItemType::Unknown);
        for t in FormItemType::ALL {
            assert_eq!(FormItemType::parse(t.as_str()), t);
        }
    }

    #[test]
    fn test_parse_json_schema() {
        let items = parse_schema_json(
            r#"[
                {"id": "1", "name": "api-key", "type": "string", "required": true,
                 "default": "", "label": {"en_US": "API Key", "zh_Hans": "API 密钥"}},
                {"name": "mode", "type": "select", "default": "fast",
                 "options": [{"name": "fast", "label": {"en_US": "Fast"}}]},
                {"name": "widget", "type": "sparkles"}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 3);
        assert!(items[0].required);
        assert_eq!(items[0].label.resolve(Locale::ZhHans), "API 密钥");
        assert_eq!(items[0].label.resolve(Locale::JaJp), "API Key");
        assert_eq!(items[1].options[0].name, "fast");
        assert_eq!(items[2].item_type, FormItemType::Unknown);
        assert_eq!(items[2].default, Value::Null);
    }

    #[test]
    fn test_non_string_or_missing_type_is_unknown() {
        let items = parse_schema_json(
            r#"[
                {"name": "a", "type": 5},
                {"name": "b"},
                {"name": "c", "type": null},
                {"name": "d", "type": {"nested": true}, "default": "x"}
            ]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|item| item.item_type == FormItemType::Unknown));
        assert_eq!(items[3].default, json!("x"));

        let items = parse_schema_yaml("- name: tags\n  type: [a, b]\n- name: n\n  type: integer\n").unwrap();
        assert_eq!(items[0].item_type, FormItemType::Unknown);
        assert_eq!(items[1].item_type, FormItemType::Integer);
    }

    #[test]
    fn test_unknown_type_serializes_as_unknown() {
        let item: DynamicFormItemSchema =
            serde_json::from_str(r#"{"name": "x", "type": "sparkles"}"#).unwrap();
        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["type"], json!("unknown"));
    }

    #[test]
    fn test_load_yaml_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("webhook.yaml");
        std::fs::write(
            &path,
            "- name: webhook-url\n  type: string\n  required: true\n  default: ''\n\
             - name: timeout\n  type: integer\n  default: 15\n",
        )
        .unwrap();

        let items = load_schema(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].item_type, FormItemType::Integer);
        assert_eq!(items[1].default, json!(15));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_schema(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SchemaError::ReadFailed { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_schema(&path).unwrap_err(), SchemaError::Json(_)));
    }

    #[test]
    fn test_check_schema_reports_problems() {
        let items = vec![
            DynamicFormItemSchema::new("a", FormItemType::String),
            DynamicFormItemSchema::new("", FormItemType::String),
            DynamicFormItemSchema::new("a", FormItemType::String),
        ];
        let diagnostics = check_schema(&items);
        assert_eq!(
            diagnostics,
            vec![
                SchemaDiagnostic::EmptyName { index: 1 },
                SchemaDiagnostic::DuplicateName {
                    name: "a".into(),
                    first: 0,
                    duplicate: 2
                },
            ]
        );
        assert!(diagnostics[1].to_string().contains("later default wins"));
    }

    #[test]
    fn test_check_schema_clean() {
        let items = vec![
            DynamicFormItemSchema::new("a", FormItemType::String),
            DynamicFormItemSchema::new("b", FormItemType::Boolean),
        ];
        assert!(check_schema(&items).is_empty());
    }
}
