use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::moderation::embeds::{
    default_reason, fetch_user_name, moderation_dm_embed, send_direct_embed, user_label,
    user_moderated_embed,
};
use crate::moderation::gatekeeper::{GateResolution, resolve_gate};
use ryujin_core::Context;
use ryujin_utils::gate::{GateVerdict, evaluate};
use ryujin_utils::parse::parse_target_user_id;

pub const META: CommandMeta = CommandMeta {
    name: "moderate_user",
    desc: "An example moderation command.",
    category: "moderation",
    usage: "!moderate_user <user> [reason]",
};

/// Moderate a target user once the moderation gate allows it.
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

    let reason = arg_tail.unwrap_or(default_reason());
    let moderator_label = user_label(msg.author.id, Some(msg.author.name.as_str()));
    let target_name = fetch_user_name(http, target_user_id).await;
    let target_label = user_label(target_user_id, target_name.as_deref());

    info!(
        guild_id = guild_id.get(),
        target_id = target_user_id.get(),
        moderator_id = msg.author.id.get(),
        "user moderated"
    );

    // Delivery failure only changes the reported DM status.
    let dm_embed = moderation_dm_embed(&gate.guild.name, reason, &moderator_label)?;
    let dm_sent = send_direct_embed(http, target_user_id, dm_embed).await;

    let embed = user_moderated_embed(
        target_user_id,
        &target_label,
        &moderator_label,
        reason,
        dm_sent,
    )?;
    http.create_message(msg.channel_id).embeds(&[embed]).await?;

    Ok(())
}
