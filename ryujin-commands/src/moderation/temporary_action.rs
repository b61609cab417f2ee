use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::moderation::embeds::{
    default_reason, fetch_user_name, temporary_action_embed, user_label,
};
use crate::moderation::gatekeeper::{GateResolution, resolve_gate};
use ryujin_core::Context;
use ryujin_utils::gate::{GateVerdict, evaluate};
use ryujin_utils::parse::{
    DurationSpec, ParsedDuration, parse_duration_strict, parse_target_user_id,
};
use ryujin_utils::time::now_unix_secs;

pub const META: CommandMeta = CommandMeta {
    name: "temporary_action",
    desc: "An example command with duration parsing.",
    category: "moderation",
    usage: "!temporary_action <user> [duration] [reason]",
};

/// Duration and reason taken from the arguments after the target.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimedArgs<'a> {
    pub duration: DurationSpec,
    /// The duration token as typed, when one was given.
    pub raw_duration: Option<&'a str>,
    pub reason: Option<&'a str>,
}

/// Take the first token as a duration when it parses as one.
///
/// Otherwise the whole tail is the reason and the action is permanent.
pub fn split_duration_and_reason(arg_tail: Option<&str>) -> TimedArgs<'_> {
    let Some(tail) = arg_tail else {
        return TimedArgs {
            duration: DurationSpec::Permanent,
            raw_duration: None,
            reason: None,
        };
    };

    let mut parts = tail.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("");

    match parse_duration_strict(Some(first)) {
        ParsedDuration::Invalid(_) => TimedArgs {
            duration: DurationSpec::Permanent,
            raw_duration: None,
            reason: Some(tail),
        },
        parsed => TimedArgs {
            duration: parsed.or_permanent(),
            raw_duration: Some(first),
            reason: parts
                .next()
                .map(str::trim)
                .filter(|value| !value.is_empty()),
        },
    }
}

/// Apply a timed (or permanent) action to a target user.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;
    let Some(guild_id) = msg.guild_id else {
        http.create_message(msg.channel_id)
            .content("This command only works in servers.")
            .await?;
        return Ok(());
    };

    let Some(target_user_id) = arg1.and_then(parse_target_user_id) else {
        let usage = format!("Usage: `{}`", META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let gate = match resolve_gate(&ctx, guild_id, msg.author.id, target_user_id).await? {
        GateResolution::Resolved(gate) => gate,
        GateResolution::Refused(reply) => {
            http.create_message(msg.channel_id).content(reply).await?;
            return Ok(());
        }
    };

    if let GateVerdict::Denied(reason) = evaluate(&gate.context) {
        http.create_message(msg.channel_id)
            .content(reason.message())
            .await?;
        return Ok(());
    }

    let timed = split_duration_and_reason(arg_tail);
    let reason = timed.reason.unwrap_or(default_reason());
    let now = now_unix_secs();

    info!(
        guild_id = guild_id.get(),
        target_id = target_user_id.get(),
        moderator_id = msg.author.id.get(),
        expires_at = ?timed.duration.expires_at(now),
        "temporary action applied"
    );

    let actor_label = user_label(msg.author.id, Some(msg.author.name.as_str()));
    let target_name = fetch_user_name(http, target_user_id).await;
    let target_label = user_label(target_user_id, target_name.as_deref());

    let embed = temporary_action_embed(
        target_user_id,
        &target_label,
        &actor_label,
        reason,
        timed.duration,
        timed.raw_duration,
        now,
    )?;
    http.create_message(msg.channel_id).embeds(&[embed]).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tail_is_permanent_without_reason() {
        assert_eq!(
            split_duration_and_reason(None),
            TimedArgs {
                duration: DurationSpec::Permanent,
                raw_duration: None,
                reason: None,
            }
        );
    }

    #[test]
    fn leading_duration_is_consumed() {
        assert_eq!(
            split_duration_and_reason(Some("2h   spamming links")),
            TimedArgs {
                duration: DurationSpec::Span(7_200),
                raw_duration: Some("2h"),
                reason: Some("spamming links"),
            }
        );
    }

    #[test]
    fn permanent_keyword_is_consumed() {
        let timed = split_duration_and_reason(Some("PERM raiding"));

        assert_eq!(timed.duration, DurationSpec::Permanent);
        assert_eq!(timed.raw_duration, Some("PERM"));
        assert_eq!(timed.reason, Some("raiding"));
    }

    #[test]
    fn non_duration_tail_is_the_reason() {
        assert_eq!(
            split_duration_and_reason(Some("being rude")),
            TimedArgs {
                duration: DurationSpec::Permanent,
                raw_duration: None,
                reason: Some("being rude"),
            }
        );
    }
}
