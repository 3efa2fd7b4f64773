//! Form-to-model binding

use super::model::FormModel;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use mongodb::bson::doc;
use mongodb::options::ReplaceOptions;

/// Validated form data bound to a model type
///
/// Holds the validated field values and, for updates, the existing
/// instance they are applied to.
#[derive(Debug)]
pub struct ModelForm<T: FormModel> {
    data: JsonObject,
    instance: Option<T>,
}

impl<T: FormModel> ModelForm<T> {
    /// Bind validated form data, optionally onto an existing instance
    pub fn bind(data: JsonObject, instance: Option<T>) -> Self {
        Self { data, instance }
    }

    /// The bound form data
    pub fn data(&self) -> &JsonObject {
        &self.data
    }

    /// Whether this form updates an existing instance
    pub fn is_update(&self) -> bool {
        self.instance.is_some()
    }

    /// Build the populated model value
    ///
    /// With an existing instance the declared fields present in the data are
    /// applied over it (update semantics); otherwise a new value is built
    /// from the data filtered to the declared field set. Either way,
    /// undeclared keys are dropped.
    pub fn build(&self) -> Result<T> {
        let object = match &self.instance {
            Some(existing) => {
                let mut object = to_object(existing)?;
                for field in T::field_names() {
                    if let Some(value) = self.data.get(*field) {
                        object.insert((*field).to_string(), value.clone());
                    }
                }
                object
            }
            None => T::field_names()
                .iter()
                .filter_map(|field| {
                    self.data
                        .get(*field)
                        .map(|value| ((*field).to_string(), value.clone()))
                })
                .collect(),
        };

        serde_json::from_value(JsonValue::Object(object))
            .map_err(|e| Error::form(format!("cannot populate model: {e}")))
    }

    /// Build the model value and, when `commit` is set, persist it
    ///
    /// With `commit` false the populated value is returned unsaved, leaving
    /// the transaction boundary with the caller. Persistence replaces by id
    /// when the value carries an `_id`, inserting otherwise.
    pub async fn save(&self, database: &mongodb::Database, commit: bool) -> Result<T> {
        let instance = self.build()?;
        if !commit {
            return Ok(instance);
        }

        let collection = database.collection::<T>(T::COLLECTION);
        let document = mongodb::bson::to_document(&instance)
            .map_err(|e| Error::form(format!("cannot serialize model: {e}")))?;

        if let Some(id) = document.get("_id") {
            let options = ReplaceOptions::builder().upsert(true).build();
            collection
                .replace_one(doc! { "_id": id.clone() }, &instance, options)
                .await?;
        } else {
            collection.insert_one(&instance, None).await?;
        }
        Ok(instance)
    }
}

fn to_object<T: FormModel>(value: &T) -> Result<JsonObject> {
    match serde_json::to_value(value)
        .map_err(|e| Error::form(format!("cannot serialize model: {e}")))?
    {
        JsonValue::Object(object) => Ok(object),
        _ => Err(Error::form("model does not serialize to a mapping")),
    }
}
