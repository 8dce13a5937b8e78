//! Ordered key/value node returned by the YAML and JSON loaders.
//!
//! A [`ConfigBox`] keeps the parsed document as a `serde_json::Map` and offers
//! named-field access at every depth, either one level at a time through
//! [`ConfigBox::section`] or with a dotted path through [`ConfigBox::lookup`].
//! Typed structures are pulled out with [`ConfigBox::field`] and
//! [`ConfigBox::deserialize`].

use std::ops::Index;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ConfigError;

static NULL: Value = Value::Null;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigBox {
    inner: Map<String, Value>,
}

impl ConfigBox {
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(inner) => Ok(Self { inner }),
            other => Err(ConfigError::NotAMapping {
                found: kind_of(&other),
            }),
        }
    }

    /// Converts a parsed YAML document. Non-finite numbers such as `.nan`
    /// or `.inf` have no JSON form and are rejected with the offending key.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, ConfigError> {
        Self::from_value(yaml_to_json(value, "<root>")?)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Nested mapping stored under `key`.
    pub fn section(&self, key: &str) -> Result<ConfigBox, ConfigError> {
        let value = self.get(key).ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
        })?;
        ConfigBox::from_value(value.clone())
    }

    /// Resolves a dotted path such as `model.params.alpha`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.inner.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self.lookup(key).ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
        })?;
        serde_json::from_value(value.clone()).map_err(|source| ConfigError::InvalidValue {
            key: key.to_string(),
            source,
        })
    }

    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        serde_json::from_value(Value::Object(self.inner.clone())).map_err(|source| {
            ConfigError::InvalidValue {
                key: "<root>".to_string(),
                source,
            }
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.inner
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.inner)
    }
}

impl Index<&str> for ConfigBox {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.inner.get(key).unwrap_or(&NULL)
    }
}

impl PartialEq<Value> for ConfigBox {
    fn eq(&self, other: &Value) -> bool {
        other.as_object() == Some(&self.inner)
    }
}

impl TryFrom<Value> for ConfigBox {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        ConfigBox::from_value(value)
    }
}

fn yaml_to_json(value: serde_yaml::Value, key: &str) -> Result<Value, ConfigError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(flag) => Value::Bool(flag),
        Yaml::Number(number) => {
            if let Some(int) = number.as_i64() {
                Value::from(int)
            } else if let Some(uint) = number.as_u64() {
                Value::from(uint)
            } else {
                let float = number.as_f64().unwrap_or(f64::NAN);
                let json = serde_json::Number::from_f64(float).ok_or_else(|| {
                    ConfigError::NonFiniteNumber {
                        key: key.to_string(),
                        value: float,
                    }
                })?;
                Value::Number(json)
            }
        }
        Yaml::String(text) => Value::String(text),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| yaml_to_json(item, &format!("{key}[{index}]")))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = Map::new();
            for (name, item) in mapping {
                let name = match name {
                    Yaml::String(text) => text,
                    Yaml::Bool(flag) => flag.to_string(),
                    Yaml::Number(number) => number.to_string(),
                    _ => {
                        return Err(ConfigError::UnsupportedKey {
                            key: key.to_string(),
                        });
                    }
                };
                let path = if key == "<root>" {
                    name.clone()
                } else {
                    format!("{key}.{name}")
                };
                object.insert(name, yaml_to_json(item, &path)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value, key)?,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
