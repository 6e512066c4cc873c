pub mod confirm_dialog;
pub mod form;
pub mod loading;
pub mod modal;
pub mod notice;
pub mod sidebar;
pub mod stat_card;
