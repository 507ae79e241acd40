pub mod document;
pub mod lookup;
