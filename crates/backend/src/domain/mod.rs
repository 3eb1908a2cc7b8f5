pub mod configs;
pub mod deploy;
