pub mod add_data;
pub mod embeds;
pub mod get_data;
