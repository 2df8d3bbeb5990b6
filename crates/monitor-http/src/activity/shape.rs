use serde_json::Value;

/// Keys that may hold the transaction list in an object response, highest priority first.
pub const TRANSACTION_LIST_KEYS: [&str; 5] = [
    "items",
    "transactions",
    "data",
    "result",
    "internal_transactions",
];

/// Finds the transaction list in an explorer response.
///
/// Accepts a bare array, or an object whose first listed key holding an array
/// wins. A key present with a non-array value is skipped. Anything else is not
/// a transaction list.
pub fn extract_transactions(body: &Value) -> Option<&[Value]> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(fields) => TRANSACTION_LIST_KEYS
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice),
        _ => None,
    }
}
