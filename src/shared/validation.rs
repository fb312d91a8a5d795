//! Validation Utilities

use validator::{ValidationErrors, ValidationErrorsKind};

/// Flatten validation errors into `path: message` entries.
///
/// Nested structs and list items are addressed with dotted paths, e.g.
/// `dishes[1].name`. Entries are sorted so messages are stable.
pub fn describe(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect("", errors, &mut out);
    out.sort();
    out
}

fn collect(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                for e in errs {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    out.push(format!("{}: {}", path, message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

/// Convert validation errors to a single message.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let entries = describe(errors);
    if entries.is_empty() {
        "Validation failed".into()
    } else {
        entries.join("; ")
    }
}
