//! Live form state: touched values over schema defaults.

use serde_json::Value;
use tracing::debug;

use super::schema::{DynamicFormItemSchema, FormValues, get_default_values};
use super::validate::{ValidationErrors, validate};
use super::visibility::{AUTH_TYPE_FIELD, AlwaysVisible, VisibilityPredicate, visible_items};
use crate::events::{EventBus, Subscription};
use crate::i18n::I18n;

/// Emitted after every change with the full merged values.
#[derive(Debug, Clone, PartialEq)]
pub struct FormChange {
    pub values: FormValues,
    pub visible: Vec<String>,
}

/// An editable form over a schema list.
///
/// Every change recomputes the visible fields and notifies subscribers with
/// the complete value set, not only the field that changed.
pub struct FormSession {
    items: Vec<DynamicFormItemSchema>,
    values: FormValues,
    visible: Vec<String>,
    predicate: Box<dyn VisibilityPredicate>,
    changes: EventBus<FormChange>,
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("items", &self.items.len())
            .field("values", &self.values)
            .field("visible", &self.visible)
            .finish()
    }
}

impl FormSession {
    /// Session in which every item is visible.
    pub fn new(items: Vec<DynamicFormItemSchema>) -> Self {
        Self::with_visibility(items, AlwaysVisible)
    }

    pub fn with_visibility<P>(items: Vec<DynamicFormItemSchema>, predicate: P) -> Self
    where
        P: VisibilityPredicate + 'static,
    {
        let values = get_default_values(&items);
        let mut session = Self {
            items,
            values,
            visible: Vec::new(),
            predicate: Box::new(predicate),
            changes: EventBus::new(),
        };
        session.recompute_visible();
        session
    }

    pub fn items(&self) -> &[DynamicFormItemSchema] {
        &self.items
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Current value of the auth-type field, or "" when unset.
    pub fn auth_type(&self) -> &str {
        self.values
            .get(AUTH_TYPE_FIELD)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn visible_names(&self) -> &[String] {
        &self.visible
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.visible.iter().any(|n| n == name)
    }

    pub fn visible_items(&self) -> Vec<&DynamicFormItemSchema> {
        visible_items(&self.items, self.predicate.as_ref(), self.auth_type())
    }

    pub fn on_change<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&FormChange) + Send + Sync + 'static,
    {
        self.changes.subscribe(listener)
    }

    pub fn set_value(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
        self.changed();
    }

    /// Apply several values with a single notification.
    pub fn set_values(&mut self, values: FormValues) {
        if values.is_empty() {
            return;
        }
        self.values.extend(values);
        self.changed();
    }

    /// Discard touched values and return to the schema defaults.
    pub fn reset(&mut self) {
        self.values = get_default_values(&self.items);
        self.changed();
    }

    /// Validate the visible fields. Hidden fields cannot be edited and are skipped.
    pub fn validate(&self, i18n: &I18n) -> Result<(), ValidationErrors> {
        validate(self.visible_items(), &self.values, i18n)
    }

    fn recompute_visible(&mut self) {
        self.visible = self
            .visible_items()
            .into_iter()
            .map(|item| item.name.clone())
            .collect();
    }

    fn changed(&mut self) {
        self.recompute_visible();
        debug!(visible = self.visible.len(), "form values changed");
        self.changes.emit(&FormChange {
            values: self.values.clone(),
            visible: self.visible.clone(),
        });
    }
}
