use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::ValidationError;
use serde::Serialize;
use serde_json::Value;

/// A single constraint failure, localized to a property path in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Property path such as `items[0].name`. Empty for the document root.
    pub location: String,
    pub message: String,
}

impl Violation {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }

    pub(crate) fn from_error(error: &ValidationError<'_>, instance: &Value) -> Self {
        let mut location = property_path(&error.instance_path.to_string(), instance);
        if let ValidationErrorKind::Required { property } = &error.kind {
            let missing = match property {
                Value::String(name) => name.clone(),
                other => other.to_string(),
            };
            push_key(&mut location, &missing);
        }
        Self::new(location, error.to_string())
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.location, self.message)
        }
    }
}

/// Every violation found for one payload, in the order the validator reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Render a JSON Pointer as a property path, walking `instance` so that only
/// real array elements are shown as `[n]`.
pub(crate) fn property_path(pointer: &str, instance: &Value) -> String {
    let mut path = String::new();
    let mut node = Some(instance);

    for raw in pointer.split('/').skip(1) {
        let segment = raw.replace("~1", "/").replace("~0", "~");
        match node {
            Some(Value::Array(items)) => match segment.parse::<usize>() {
                Ok(index) => {
                    path.push_str(&format!("[{index}]"));
                    node = items.get(index);
                }
                Err(_) => {
                    push_key(&mut path, &segment);
                    node = None;
                }
            },
            Some(Value::Object(map)) => {
                node = map.get(&segment);
                push_key(&mut path, &segment);
            }
            _ => {
                push_key(&mut path, &segment);
                node = None;
            }
        }
    }

    path
}

fn push_key(path: &mut String, key: &str) {
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(key);
}
