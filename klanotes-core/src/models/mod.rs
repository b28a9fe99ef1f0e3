mod flag;
mod note;
mod scope;

pub use note::*;
pub use scope::*;
