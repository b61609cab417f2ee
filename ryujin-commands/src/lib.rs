pub mod basic;
pub mod data;
pub mod moderation;
pub mod utility;

use tracing::{error, info};
use twilight_model::gateway::payload::incoming::MessageCreate;

use ryujin_core::Context;
use ryujin_utils::COMMAND_PREFIX;
use ryujin_utils::embed::blacklist_embed;

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    basic::example::META,
    basic::example_with_params::META,
    moderation::moderate_user::META,
    moderation::temporary_action::META,
    data::add_data::META,
    data::get_data::META,
    // Add new commands here
];

/// Arguments following a command name.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CommandArgs<'a> {
    /// Everything after the command name, trimmed.
    pub rest: Option<&'a str>,
    /// First whitespace-separated argument.
    pub first: Option<&'a str>,
    /// Everything after the first argument, trimmed.
    pub tail: Option<&'a str>,
}

/// Split a prefixed message into a lowercase command name and its arguments.
///
/// Returns `None` when the message does not start with the command prefix.
pub fn split_invocation(content: &str) -> Option<(String, CommandArgs<'_>)> {
    let content = content.trim().strip_prefix(COMMAND_PREFIX)?.trim();

    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    if cmd.is_empty() {
        return None;
    }

    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let (first, tail) = match rest {
        Some(value) => {
            let mut args = value.splitn(2, char::is_whitespace);
            let first = args.next().filter(|arg| !arg.is_empty());
            let tail = args
                .next()
                .map(str::trim)
                .filter(|remaining| !remaining.is_empty());

            (first, tail)
        }
        None => (None, None),
    };

    Some((cmd, CommandArgs { rest, first, tail }))
}

pub fn is_known_command(name: &str) -> bool {
    COMMANDS.iter().any(|command| command.name == name)
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.clone();
    let Some((cmd, args)) = split_invocation(&content) else {
        return Ok(());
    };

    if !is_known_command(&cmd) {
        return Ok(());
    }

    // The blacklist gates every command before any command logic runs.
    if let Some(reason) = ctx.blacklist_reason(msg.author.id).await? {
        info!(user_id = msg.author.id.get(), command = %cmd, "blocked blacklisted user");
        let embed = blacklist_embed(&reason)?;
        ctx.http
            .create_message(msg.channel_id)
            .embeds(&[embed])
            .await?;
        return Ok(());
    }

    let channel_id = msg.channel_id;
    if let Err(source) = dispatch(ctx.clone(), msg, &cmd, args).await {
        error!(?source, command = %cmd, "command failed");
        let notice = format!("❌ An error occurred: `{source}`");
        ctx.http.create_message(channel_id).content(&notice).await?;
    }

    Ok(())
}

async fn dispatch(
    ctx: Context,
    msg: Box<MessageCreate>,
    cmd: &str,
    args: CommandArgs<'_>,
) -> anyhow::Result<()> {
    match cmd {
        "ping" => utility::ping::run(ctx, msg).await?,
        "help" => utility::help::run(ctx, msg, args.first).await?,
        "usage" => utility::usage::run(ctx, msg, args.first).await?,

        "example" => basic::example::run(ctx, msg).await?,
        "example_with_params" => basic::example_with_params::run(ctx, msg, args.rest).await?,

        "moderate_user" => {
            moderation::moderate_user::run(ctx, msg, args.first, args.tail).await?
        }
        "temporary_action" => {
            moderation::temporary_action::run(ctx, msg, args.first, args.tail).await?
        }

        "add_data" => data::add_data::run(ctx, msg, args.first, args.tail).await?,
        "get_data" => data::get_data::run(ctx, msg, args.first).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}
