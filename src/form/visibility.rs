//! Conditional field visibility.

use std::collections::BTreeSet;

use super::schema::DynamicFormItemSchema;

/// Name of the field whose value selects the visible field group.
pub const AUTH_TYPE_FIELD: &str = "auth-type";

/// Fields shown by [`AuthTypePrefixVisibility`] regardless of auth type.
pub const ALWAYS_VISIBLE_FIELDS: [&str; 4] = ["webhook-url", AUTH_TYPE_FIELD, "timeout", "output-key"];

/// Decides whether an item is shown for the current auth type.
pub trait VisibilityPredicate: Send + Sync {
    fn is_visible(&self, item: &DynamicFormItemSchema, auth_type: &str) -> bool;
}

impl<F> VisibilityPredicate for F
where
    F: Fn(&DynamicFormItemSchema, &str) -> bool + Send + Sync,
{
    fn is_visible(&self, item: &DynamicFormItemSchema, auth_type: &str) -> bool {
        self(item, auth_type)
    }
}

/// Shows every item.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysVisible;

impl VisibilityPredicate for AlwaysVisible {
    fn is_visible(&self, _item: &DynamicFormItemSchema, _auth_type: &str) -> bool {
        true
    }
}

/// Shows a fixed set of fields plus those named `<auth_type>-...`.
#[derive(Debug, Clone)]
pub struct AuthTypePrefixVisibility {
    always_visible: BTreeSet<String>,
}

impl Default for AuthTypePrefixVisibility {
    fn default() -> Self {
        Self::new(ALWAYS_VISIBLE_FIELDS)
    }
}

impl AuthTypePrefixVisibility {
    pub fn new<I, S>(always_visible: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            always_visible: always_visible.into_iter().map(Into::into).collect(),
        }
    }

    pub fn always_visible(&self) -> impl Iterator<Item = &str> {
        self.always_visible.iter().map(String::as_str)
    }
}

impl VisibilityPredicate for AuthTypePrefixVisibility {
    fn is_visible(&self, item: &DynamicFormItemSchema, auth_type: &str) -> bool {
        if self.always_visible.contains(&item.name) {
            return true;
        }
        !auth_type.is_empty()
            && item
                .name
                .strip_prefix(auth_type)
                .is_some_and(|rest| rest.starts_with('-'))
    }
}

/// Items of `items` that `predicate` shows, in schema order.
pub fn visible_items<'a>(
    items: &'a [DynamicFormItemSchema],
    predicate: &dyn VisibilityPredicate,
    auth_type: &str,
) -> Vec<&'a DynamicFormItemSchema> {
    items
        .iter()
        .filter(|item| predicate.is_visible(item, auth_type))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::schema::FormItemType;

    fn items(names: &[&str]) -> Vec<DynamicFormItemSchema> {
        names
            .iter()
            .map(|n| DynamicFormItemSchema::new(n, FormItemType::String))
            .collect()
    }

    fn visible_names(items: &[DynamicFormItemSchema], predicate: &dyn VisibilityPredicate, auth: &str) -> Vec<String> {
        visible_items(items, predicate, auth)
            .into_iter()
            .map(|i| i.name.clone())
            .collect()
    }

    #[test]
    fn test_auth_type_prefix_selects_group() {
        let items = items(&["webhook-url", "auth-type", "basic-user", "jwt-token"]);
        let predicate = AuthTypePrefixVisibility::default();
        assert_eq!(
            visible_names(&items, &predicate, "basic"),
            vec!["webhook-url", "auth-type", "basic-user"]
        );
        assert_eq!(
            visible_names(&items, &predicate, "jwt"),
            vec!["webhook-url", "auth-type", "jwt-token"]
        );
    }

    #[test]
    fn test_empty_auth_type_shows_only_fixed_fields() {
        let items = items(&["timeout", "output-key", "basic-user", "-odd"]);
        let predicate = AuthTypePrefixVisibility::default();
        assert_eq!(visible_names(&items, &predicate, ""), vec!["timeout", "output-key"]);
    }

    #[test]
    fn test_prefix_requires_dash_separator() {
        let items = items(&["basicuser", "basic-pass"]);
        let predicate = AuthTypePrefixVisibility::default();
        assert_eq!(visible_names(&items, &predicate, "basic"), vec!["basic-pass"]);
    }

    #[test]
    fn test_custom_always_visible_set() {
        let items = items(&["endpoint", "webhook-url", "none-x"]);
        let predicate = AuthTypePrefixVisibility::new(["endpoint"]);
        assert_eq!(visible_names(&items, &predicate, "none"), vec!["endpoint", "none-x"]);
    }

    #[test]
    fn test_closure_predicate() {
        let items = items(&["a", "b"]);
        let only_a = |item: &DynamicFormItemSchema, _: &str| item.name == "a";
        assert_eq!(visible_names(&items, &only_a, ""), vec!["a"]);
        assert_eq!(visible_names(&items, &AlwaysVisible, ""), vec!["a", "b"]);
    }
}
