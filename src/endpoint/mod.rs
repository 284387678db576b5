mod descriptor;
mod shape;

pub use descriptor::{EndpointCollection, EndpointDescriptor, ErrorRule, QueryNames};
pub use shape::{ErrorShape, ShapeValue};
