//! Typed entities over flat camelCase response mappings
//!
//! An entity is a plain serde struct whose fields are the snake_case forms
//! of a declared list of external property names:
//!
//! ```rust
//! use sakusou::Entity;
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct User {
//!     user_id: i64,
//!     user_name: Option<String>,
//! }
//!
//! impl Entity for User {
//!     const PROPERTY_NAMES: &'static [&'static str] = &["userId", "userName"];
//! }
//!
//! let body = json!({"userId": 7, "extra": true});
//! let user = User::from_response_value(&body).unwrap();
//! assert_eq!(user.user_id, 7);
//! assert_eq!(user.user_name, None);
//! assert_eq!(
//!     serde_json::Value::Object(user.properties().unwrap()),
//!     json!({"userId": 7, "userName": null})
//! );
//! ```

use crate::error::{Error, Result};
use sakusou_core::str_to_snake_case;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Contract for typed response entities.
///
/// Declared names missing from a response map to `null`, so optional
/// properties should be `Option<T>` fields.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// External (camelCase) property names, in output order.
    const PROPERTY_NAMES: &'static [&'static str];

    /// Build an entity from a response mapping.
    ///
    /// Only declared names are read; other keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Entity`] if the collected values do not fit the struct.
    fn from_response(response: &Map<String, Value>) -> Result<Self> {
        let fields: Map<String, Value> = Self::PROPERTY_NAMES
            .iter()
            .map(|name| {
                let value = response.get(*name).cloned().unwrap_or(Value::Null);
                (str_to_snake_case(name), value)
            })
            .collect();

        serde_json::from_value(Value::Object(fields))
            .map_err(|e| Error::entity(format!("{}: {}", std::any::type_name::<Self>(), e)))
    }

    /// Build an entity from a response body that should be an object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Entity`] if `body` is not an object or does not fit.
    fn from_response_value(body: &Value) -> Result<Self> {
        let response = body.as_object().ok_or_else(|| {
            Error::entity(format!(
                "{}: expected an object, got {}",
                std::any::type_name::<Self>(),
                body
            ))
        })?;
        Self::from_response(response)
    }

    /// Project the entity back to its external mapping.
    ///
    /// Keys follow [`PROPERTY_NAMES`](Self::PROPERTY_NAMES); unset values are
    /// `null`.
    fn properties(&self) -> Result<Map<String, Value>> {
        let internal = internal_fields(self)?;
        Ok(Self::PROPERTY_NAMES
            .iter()
            .map(|name| {
                let value = internal
                    .get(&str_to_snake_case(name))
                    .cloned()
                    .unwrap_or(Value::Null);
                (name.to_string(), value)
            })
            .collect())
    }

    /// Deep, independent copy.
    fn copy(&self) -> Self {
        self.clone()
    }

    /// Serialized fields not reachable from any declared property name.
    ///
    /// Useful in tests to keep `PROPERTY_NAMES` in sync with the struct.
    fn undeclared_fields(&self) -> Result<Vec<String>> {
        let declared: HashSet<String> = Self::PROPERTY_NAMES
            .iter()
            .map(|name| str_to_snake_case(name))
            .collect();

        Ok(internal_fields(self)?
            .keys()
            .filter(|field| !declared.contains(*field))
            .cloned()
            .collect())
    }
}

fn internal_fields<E: Serialize>(entity: &E) -> Result<Map<String, Value>> {
    match serde_json::to_value(entity)? {
        Value::Object(fields) => Ok(fields),
        other => Err(Error::entity(format!(
            "{} does not serialize to an object: {}",
            std::any::type_name::<E>(),
            other
        ))),
    }
}
