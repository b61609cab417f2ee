pub mod embeds;
pub mod gatekeeper;
pub mod moderate_user;
pub mod temporary_action;
