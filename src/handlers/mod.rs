//! HTTP handlers, one module per endpoint family.

pub mod generic_handlers;
pub mod health_handlers;
pub mod payload;
pub mod register_handlers;
pub mod student_api_handlers;
pub mod user_info_handlers;
