//! Model contract consumed by the form adapter

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A persistable model the form adapter can populate
///
/// The declared field names are the injection filter: form data outside
/// this set never reaches the model. The serde bounds are what the driver's
/// typed collections require.
pub trait FormModel: Serialize + DeserializeOwned + Unpin + Send + Sync {
    /// Collection this model persists into
    const COLLECTION: &'static str;

    /// Field names declared on the model
    fn field_names() -> &'static [&'static str];
}
