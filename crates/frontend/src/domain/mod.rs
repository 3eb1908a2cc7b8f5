pub mod builder;
pub mod deployment;
