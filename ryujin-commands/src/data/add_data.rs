use tracing::error;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::data::embeds::data_added_embed;
use crate::moderation::embeds::{fetch_user_name, user_label};
use crate::moderation::gatekeeper::MODERATION_PERMISSION;
use ryujin_core::Context;
use ryujin_utils::gate::DenyReason;
use ryujin_utils::parse::parse_target_user_id;
use ryujin_utils::permissions::has_member_permission;

pub const META: CommandMeta = CommandMeta {
    name: "add_data",
    desc: "An example command that adds data to the database.",
    category: "database",
    usage: "!add_data <user> <data>",
};

/// Store a warning-style record for a user and report the new total.
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

    if !has_member_permission(http, guild_id, msg.author.id, MODERATION_PERMISSION).await? {
        http.create_message(msg.channel_id)
            .content(DenyReason::ActorLacksPermission.message())
            .await?;
        return Ok(());
    }

    let (Some(target_user_id), Some(data)) = (arg1.and_then(parse_target_user_id), arg_tail)
    else {
        let usage = format!("Usage: `{}`", META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let record = match ctx
        .infractions
        .record(
            guild_id.get(),
            target_user_id.get(),
            msg.author.id.get(),
            data,
        )
        .await
    {
        Ok(record) => record,
        Err(source) => {
            error!(?source, "recording data failed");
            http.create_message(msg.channel_id)
                .content("❌ Failed to add data to database.")
                .await?;
            return Ok(());
        }
    };

    let total_count = ctx
        .infractions
        .count(guild_id.get(), target_user_id.get())
        .await?;

    let target_name = fetch_user_name(http, target_user_id).await;
    let target_label = user_label(target_user_id, target_name.as_deref());
    let moderator_label = user_label(msg.author.id, Some(msg.author.name.as_str()));

    let embed = data_added_embed(
        target_user_id,
        &target_label,
        &moderator_label,
        data,
        record.id,
        total_count,
    )?;
    http.create_message(msg.channel_id).embeds(&[embed]).await?;

    Ok(())
}
