pub mod clarify;
pub mod health;
pub mod process;
pub mod submit;
