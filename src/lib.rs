pub mod app;
pub mod domain;
pub mod entrez;
pub mod error;
pub mod input;
pub mod output;
pub mod table;
