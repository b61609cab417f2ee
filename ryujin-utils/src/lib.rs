/// Generic embed builders shared across commands.
pub mod embed;
/// Authorization check for moderation actions.
pub mod gate;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Pure parser helpers.
pub mod parse;
/// Permission and role-hierarchy resolution.
pub mod permissions;
/// Shared time helpers.
pub mod time;
