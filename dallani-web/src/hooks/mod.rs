pub mod use_admin_action;
pub mod use_list_query;

pub use use_admin_action::{ActionHandle, use_admin_action};
pub use use_list_query::{ListHandle, use_list_query};
