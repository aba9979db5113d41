pub mod crack;
pub mod encrypt;
pub mod score;
