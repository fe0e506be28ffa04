pub mod agenda;
pub mod month;
