pub mod command_mode;
pub mod filter_mode;
pub mod form_mode;
pub mod normal_mode;
