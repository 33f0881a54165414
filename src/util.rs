use std::fmt::Display;

/// Joins values as `a`, `a and b`, `a, b and c`, falling back to `on_empty`.
pub fn format_iter<T: Display>(
    values: impl IntoIterator<Item = T>,
    conj: &str,
    on_empty: &str,
) -> String {
    let mut values = values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>();

    let Some(last) = values.pop() else {
        return on_empty.to_owned();
    };

    if values.is_empty() {
        last
    } else {
        format!("{} {conj} {last}", values.join(", "))
    }
}
