//! FAIRDOM-SEEK JSON:API model types.

mod document;
mod resource;

pub use document::*;
pub use resource::*;
