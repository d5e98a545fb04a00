pub mod flatten;
pub mod gather;
pub mod profile;
