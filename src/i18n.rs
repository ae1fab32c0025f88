//! Locale handling for user-facing console messages.
//!
//! The active locale lives in an explicit [`I18n`] context rather than a
//! process-wide singleton. The context reads and persists the choice through
//! an injected [`KeyValueStore`], so tests use [`MemoryStore`] and the CLI uses
//! [`TomlFileStore`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// Store key holding the persisted locale code.
pub const LANGUAGE_KEY: &str = "language";

/// Locales the console ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en_US")]
    EnUs,
    #[serde(rename = "zh_Hans")]
    ZhHans,
    #[serde(rename = "zh_Hant")]
    ZhHant,
    #[serde(rename = "ja_JP")]
    JaJp,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::EnUs, Locale::ZhHans, Locale::ZhHant, Locale::JaJp];

    pub fn code(&self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::ZhHans => "zh_Hans",
            Self::ZhHant => "zh_Hant",
            Self::JaJp => "ja_JP",
        }
    }

    /// Accepts both `en_US` and browser-style `en-US` spellings, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().replace('-', "_").to_lowercase();
        match normalized.as_str() {
            "en_us" | "en" => Some(Self::EnUs),
            "zh_hans" | "zh_cn" | "zh" => Some(Self::ZhHans),
            "zh_hant" | "zh_tw" | "zh_hk" => Some(Self::ZhHant),
            "ja_jp" | "ja" => Some(Self::JaJp),
            _ => None,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid locale '{}'. Valid values: en_US, zh_Hans, zh_Hant, ja_JP",
                s
            )
        })
    }
}

/// Keys of the built-in message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    FieldRequired,
    ExpectedNumber,
    ExpectedInteger,
    ExpectedBoolean,
    ExpectedString,
    ExpectedStringArray,
    ExpectedPromptMessages,
    TaskSucceeded,
    TaskFailed,
}

fn catalog(locale: Locale, message: Message) -> &'static str {
    use Locale::*;
    use Message::*;
    match (locale, message) {
        (EnUs, FieldRequired) => "This field is required",
        (ZhHans, FieldRequired) => "此字段为必填项",
        (ZhHant, FieldRequired) => "此欄位為必填",
        (JaJp, FieldRequired) => "この項目は必須です",

        (EnUs, ExpectedNumber) => "Expected a number",
        (ZhHans, ExpectedNumber) => "应为数字",
        (ZhHant, ExpectedNumber) => "應為數字",
        (JaJp, ExpectedNumber) => "数値を入力してください",

        (EnUs, ExpectedInteger) => "Expected an integer",
        (ZhHans, ExpectedInteger) => "应为整数",
        (ZhHant, ExpectedInteger) => "應為整數",
        (JaJp, ExpectedInteger) => "整数を入力してください",

        (EnUs, ExpectedBoolean) => "Expected true or false",
        (ZhHans, ExpectedBoolean) => "应为布尔值",
        (ZhHant, ExpectedBoolean) => "應為布林值",
        (JaJp, ExpectedBoolean) => "真偽値を指定してください",

        (EnUs, ExpectedString) => "Expected text",
        (ZhHans, ExpectedString) => "应为文本",
        (ZhHant, ExpectedString) => "應為文字",
        (JaJp, ExpectedString) => "テキストを入力してください",

        (EnUs, ExpectedStringArray) => "Expected a list of text values",
        (ZhHans, ExpectedStringArray) => "应为文本列表",
        (ZhHant, ExpectedStringArray) => "應為文字列表",
        (JaJp, ExpectedStringArray) => "テキストのリストを指定してください",

        (EnUs, ExpectedPromptMessages) => "Expected a list of {role, content} messages",
        (ZhHans, ExpectedPromptMessages) => "应为 {role, content} 消息列表",
        (ZhHant, ExpectedPromptMessages) => "應為 {role, content} 訊息列表",
        (JaJp, ExpectedPromptMessages) => "{role, content} メッセージのリストを指定してください",

        (EnUs, TaskSucceeded) => "Task completed",
        (ZhHans, TaskSucceeded) => "任务已完成",
        (ZhHant, TaskSucceeded) => "任務已完成",
        (JaJp, TaskSucceeded) => "タスクが完了しました",

        (EnUs, TaskFailed) => "Task failed",
        (ZhHans, TaskFailed) => "任务失败",
        (ZhHant, TaskFailed) => "任務失敗",
        (JaJp, TaskFailed) => "タスクが失敗しました",
    }
}

/// Minimal read/write key-value persistence.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat `key = "value"` TOML file, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }
}

impl KeyValueStore for TomlFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string(&entries)?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Locale context passed to everything that produces user-facing text.
pub struct I18n {
    locale: Locale,
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n").field("locale", &self.locale).finish()
    }
}

impl I18n {
    /// Build a context from the locale persisted in `store`, falling back to
    /// `fallback` when nothing (or something unrecognized) is stored.
    pub fn init(store: Box<dyn KeyValueStore>, fallback: Locale) -> Self {
        let locale = match store.get(LANGUAGE_KEY) {
            Ok(Some(code)) => Locale::from_code(&code).unwrap_or_else(|| {
                tracing::warn!(code = %code, "ignoring unknown persisted locale");
                fallback
            }),
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted locale");
                fallback
            }
        };
        Self { locale, store }
    }

    /// English context backed by a throwaway memory store.
    pub fn english() -> Self {
        Self::init(Box::new(MemoryStore::new()), Locale::EnUs)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Switch locale and persist the choice.
    pub fn set_locale(&mut self, locale: Locale) -> Result<(), StoreError> {
        self.store.set(LANGUAGE_KEY, locale.code())?;
        self.locale = locale;
        Ok(())
    }

    pub fn text(&self, message: Message) -> &'static str {
        catalog(self.locale, message)
    }
}

/// A piece of schema text with one entry per locale code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct I18nText(pub BTreeMap<String, String>);

impl I18nText {
    pub fn en(text: &str) -> Self {
        let mut map = BTreeMap::new();
        map.insert(Locale::EnUs.code().to_string(), text.to_string());
        Self(map)
    }

    /// Text for `locale`, else English, else any entry, else "".
    pub fn resolve(&self, locale: Locale) -> &str {
        self.0
            .get(locale.code())
            .or_else(|| self.0.get(Locale::EnUs.code()))
            .or_else(|| self.0.values().next())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_locale_from_code_accepts_variants() {
        assert_eq!(Locale::from_code("en_US"), Some(Locale::EnUs));
        assert_eq!(Locale::from_code("en-us"), Some(Locale::EnUs));
        assert_eq!(Locale::from_code("zh-CN"), Some(Locale::ZhHans));
        assert_eq!(Locale::from_code("zh_Hant"), Some(Locale::ZhHant));
        assert_eq!(Locale::from_code("ja"), Some(Locale::JaJp));
        assert_eq!(Locale::from_code("klingon"), None);
    }

    #[test]
    fn test_locale_from_str_error_lists_valid_values() {
        let err = "xx".parse::<Locale>().unwrap_err();
        assert!(err.to_string().contains("en_US"));
    }

    #[test]
    fn test_init_uses_persisted_locale() {
        let store = MemoryStore::with_entry(LANGUAGE_KEY, "ja_JP");
        let i18n = I18n::init(Box::new(store), Locale::EnUs);
        assert_eq!(i18n.locale(), Locale::JaJp);
        assert_eq!(i18n.text(Message::FieldRequired), "この項目は必須です");
    }

    #[test]
    fn test_init_falls_back_on_unknown_code() {
        let store = MemoryStore::with_entry(LANGUAGE_KEY, "tlh");
        let i18n = I18n::init(Box::new(store), Locale::ZhHans);
        assert_eq!(i18n.locale(), Locale::ZhHans);
    }

    #[test]
    fn test_set_locale_persists_to_file_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/prefs.toml");

        let mut i18n = I18n::init(Box::new(TomlFileStore::new(&path)), Locale::EnUs);
        assert_eq!(i18n.locale(), Locale::EnUs);
        i18n.set_locale(Locale::ZhHant).unwrap();

        let reloaded = I18n::init(Box::new(TomlFileStore::new(&path)), Locale::EnUs);
        assert_eq!(reloaded.locale(), Locale::ZhHant);
    }

    #[test]
    fn test_file_store_preserves_other_keys() {
        let dir = tempdir().unwrap();
        let store = TomlFileStore::new(dir.path().join("prefs.toml"));
        store.set("theme", "dark").unwrap();
        store.set(LANGUAGE_KEY, "en_US").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        let store = TomlFileStore::new(&path);
        assert!(matches!(store.get(LANGUAGE_KEY), Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_i18n_text_resolution_order() {
        let text: I18nText =
            serde_json::from_str(r#"{"en_US": "Timeout", "zh_Hans": "超时"}"#).unwrap();
        assert_eq!(text.resolve(Locale::ZhHans), "超时");
        assert_eq!(text.resolve(Locale::JaJp), "Timeout");

        let only_ja: I18nText = serde_json::from_str(r#"{"ja_JP": "タイムアウト"}"#).unwrap();
        assert_eq!(only_ja.resolve(Locale::EnUs), "タイムアウト");

        assert_eq!(I18nText::default().resolve(Locale::EnUs), "");
    }
}
