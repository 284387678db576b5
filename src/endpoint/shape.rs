use serde::de::DeserializeOwned;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A deserialized error value carried inside a failure.
pub trait ShapeValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> ShapeValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

type ConvertFn = fn(serde_json::Value) -> Result<Arc<dyn ShapeValue>, serde_json::Error>;

/// Identifies the Rust type an error body is converted into.
///
/// Shapes compare by type. [`ErrorShape::untyped`] is the sentinel for "keep the raw body".
#[derive(Clone, Copy)]
pub struct ErrorShape {
    name: &'static str,
    type_id: TypeId,
    convert: Option<ConvertFn>,
}

impl ErrorShape {
    pub fn of<T>() -> Self
    where
        T: DeserializeOwned + fmt::Debug + Send + Sync + 'static,
    {
        Self::named::<T>(std::any::type_name::<T>())
    }

    pub fn named<T>(name: &'static str) -> Self
    where
        T: DeserializeOwned + fmt::Debug + Send + Sync + 'static,
    {
        if TypeId::of::<T>() == TypeId::of::<String>() {
            return Self::untyped();
        }
        Self {
            name,
            type_id: TypeId::of::<T>(),
            convert: Some(convert_into::<T>),
        }
    }

    pub fn untyped() -> Self {
        Self {
            name: "String",
            type_id: TypeId::of::<String>(),
            convert: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn is_untyped(&self) -> bool {
        self.convert.is_none()
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub(crate) fn convert(
        &self,
        value: serde_json::Value,
    ) -> Option<Result<Arc<dyn ShapeValue>, serde_json::Error>> {
        self.convert.map(|convert| convert(value))
    }
}

fn convert_into<T>(value: serde_json::Value) -> Result<Arc<dyn ShapeValue>, serde_json::Error>
where
    T: DeserializeOwned + fmt::Debug + Send + Sync + 'static,
{
    let typed: T = serde_json::from_value(value)?;
    let shared: Arc<dyn ShapeValue> = Arc::new(typed);
    Ok(shared)
}

impl PartialEq for ErrorShape {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ErrorShape {}

impl Hash for ErrorShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ErrorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorShape").field(&self.name).finish()
    }
}
