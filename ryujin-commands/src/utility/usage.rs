use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::{COMMANDS, CommandMeta};
use ryujin_core::Context;

pub const META: CommandMeta = CommandMeta {
    name: "usage",
    desc: "Show usage syntax for a specific command.",
    category: "utility",
    usage: "!usage <command>",
};

/// Find a command by name, ignoring case and a leading prefix.
pub fn lookup_command(raw_name: &str) -> Option<&'static CommandMeta> {
    let lookup = raw_name.trim().trim_start_matches('!').to_ascii_lowercase();
    COMMANDS.iter().find(|command| command.name == lookup)
}

/// Show usage for a specific command.
///
/// Error behavior:
/// - missing argument returns this command's usage.
/// - unknown command returns a short not-found message.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let Some(raw_name) = arg1 else {
        let usage = format!("Usage: `{}`", META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let Some(command) = lookup_command(raw_name) else {
        let out = format!("Unknown command: `{}`", raw_name.trim());
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    };

    let out = format!("Usage: `{}`", command.usage);
    http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}
