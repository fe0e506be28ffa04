pub mod appointment_form;
pub mod delete_confirmation;
pub mod help;
