use tracing::warn;
use twilight_http::Client;
use twilight_model::{channel::message::embed::Embed, id::Id, id::marker::UserMarker};

use ryujin_utils::embed::{
    COLOR_BLUE, COLOR_GREEN, COLOR_YELLOW, EmbedSystem, branded_embed, finish, footed_embed,
    neutralize_mentions, truncate_chars, with_field,
};
use ryujin_utils::parse::DurationSpec;
use ryujin_utils::time::relative_timestamp;

const MAX_REASON_CHARS: usize = 1_000;

pub fn default_reason() -> &'static str {
    "No reason provided"
}

/// Resolve a username for display, if the user can be fetched.
pub async fn fetch_user_name(http: &Client, user_id: Id<UserMarker>) -> Option<String> {
    let response = http.user(user_id).await.ok()?;
    let user = response.model().await.ok()?;
    Some(user.name)
}

/// `<@id> (name)`, falling back to the bare mention when the name is unknown.
pub fn user_label(user_id: Id<UserMarker>, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("<@{}> ({})", user_id.get(), name),
        None => format!("<@{}>", user_id.get()),
    }
}

fn display_reason(reason: &str) -> String {
    neutralize_mentions(&truncate_chars(reason, MAX_REASON_CHARS))
}

/// Direct message telling the target they were moderated.
pub fn moderation_dm_embed(
    guild_name: &str,
    reason: &str,
    moderator_label: &str,
) -> anyhow::Result<Embed> {
    let builder = footed_embed(
        "⚠️ You have been moderated",
        format!("You have been moderated in **{guild_name}**"),
        COLOR_YELLOW,
        EmbedSystem::Moderation,
    )?;
    let builder = with_field(builder, "Reason", display_reason(reason), false);
    let builder = with_field(builder, "Moderated by", moderator_label, false);

    finish(builder)
}

pub fn dm_status(dm_sent: bool) -> &'static str {
    if dm_sent {
        "✅ DM sent to user"
    } else {
        "❌ Could not send DM (DMs closed)"
    }
}

pub fn user_moderated_embed(
    target_id: Id<UserMarker>,
    target_label: &str,
    moderator_label: &str,
    reason: &str,
    dm_sent: bool,
) -> anyhow::Result<Embed> {
    let builder = branded_embed(
        "✅ User Moderated",
        format!("**<@{}>** has been moderated successfully.", target_id.get()),
        COLOR_GREEN,
        EmbedSystem::Moderation,
    )?;
    let builder = with_field(builder, "User", target_label, true);
    let builder = with_field(builder, "Moderated by", moderator_label, true);
    let builder = with_field(builder, "Reason", display_reason(reason), false);
    let builder = with_field(builder, "DM Status", dm_status(dm_sent), true);

    finish(builder)
}

/// Reason line for a timed action, annotated with the raw duration.
pub fn timed_reason(reason: &str, duration: DurationSpec, raw_duration: Option<&str>) -> String {
    match (duration, raw_duration) {
        (DurationSpec::Span(_), Some(raw)) => format!("{reason} (Duration: {raw})"),
        _ => reason.to_owned(),
    }
}

pub fn temporary_action_embed(
    target_id: Id<UserMarker>,
    target_label: &str,
    actor_label: &str,
    reason: &str,
    duration: DurationSpec,
    raw_duration: Option<&str>,
    now_secs: u64,
) -> anyhow::Result<Embed> {
    let builder = branded_embed(
        "⏰ Temporary Action",
        format!("**<@{}>** has been acted upon.", target_id.get()),
        COLOR_BLUE,
        EmbedSystem::Moderation,
    )?;
    let builder = with_field(builder, "User", target_label, true);
    let builder = with_field(builder, "Action by", actor_label, true);
    let builder = with_field(
        builder,
        "Reason",
        display_reason(&timed_reason(reason, duration, raw_duration)),
        false,
    );

    let builder = match (duration.expires_at(now_secs), raw_duration) {
        (Some(expires_at), Some(raw)) => {
            let builder = with_field(builder, "Duration", raw, true);
            with_field(builder, "Expires", relative_timestamp(expires_at), true)
        }
        _ => with_field(builder, "Duration", "Permanent", true),
    };

    finish(builder)
}

/// Best-effort direct message; returns whether it was delivered.
pub async fn send_direct_embed(http: &Client, user_id: Id<UserMarker>, embed: Embed) -> bool {
    let channel = match http.create_private_channel(user_id).await {
        Ok(response) => match response.model().await {
            Ok(channel) => channel,
            Err(source) => {
                warn!(?source, user_id = user_id.get(), "dm channel decode failed");
                return false;
            }
        },
        Err(source) => {
            warn!(?source, user_id = user_id.get(), "dm channel request failed");
            return false;
        }
    };

    match http.create_message(channel.id).embeds(&[embed]).await {
        Ok(_) => true,
        Err(source) => {
            warn!(?source, user_id = user_id.get(), "direct message failed");
            false
        }
    }
}
