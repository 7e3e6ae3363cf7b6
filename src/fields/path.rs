use serde_json::Value;

/// Separator for nested keys in field selectors, e.g. `problem/tests`
pub const PATH_SEPARATOR: char = '/';

/// Resolve a field selector against a record
///
/// A selector containing `/` descends one object per segment; any missing
/// key, or a non-object on the way, means the field is absent. Lists are
/// never traversed. A bare selector is a direct key lookup, so a present
/// `null` resolves to `Some(Value::Null)`.
pub fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if !path.contains(PATH_SEPARATOR) {
        return record.as_object()?.get(path);
    }
    path.split(PATH_SEPARATOR)
        .try_fold(record, |current, key| current.as_object()?.get(key))
}

/// Like [`resolve`], but a `null` at the end of the path counts as absent
pub fn resolve_nested<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    resolve(record, path).filter(|value| !value.is_null())
}
