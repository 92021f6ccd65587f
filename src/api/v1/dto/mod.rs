pub mod assignments;
pub mod scope;
