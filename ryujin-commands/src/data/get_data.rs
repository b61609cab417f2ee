use std::collections::HashMap;

use twilight_model::{gateway::payload::incoming::MessageCreate, id::Id};

use crate::CommandMeta;
use crate::data::embeds::{HISTORY_PREVIEW_LIMIT, clean_record_embed, history_embed, history_text};
use crate::moderation::embeds::{fetch_user_name, user_label};
use crate::moderation::gatekeeper::MODERATION_PERMISSION;
use ryujin_core::Context;
use ryujin_utils::gate::DenyReason;
use ryujin_utils::parse::parse_target_user_id;
use ryujin_utils::permissions::has_member_permission;

pub const META: CommandMeta = CommandMeta {
    name: "get_data",
    desc: "An example command that retrieves data from the database.",
    category: "database",
    usage: "!get_data <user>",
};

/// Show the stored history for a user.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
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

    let Some(target_user_id) = arg1.and_then(parse_target_user_id) else {
        let usage = format!("Usage: `{}`", META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let entries = ctx
        .infractions
        .query(guild_id.get(), target_user_id.get())
        .await?;
    let total_count = ctx
        .infractions
        .count(guild_id.get(), target_user_id.get())
        .await?;

    let target_name = fetch_user_name(http, target_user_id).await;
    let target_label = user_label(target_user_id, target_name.as_deref());

    if entries.is_empty() {
        let embed = clean_record_embed(target_user_id, &target_label)?;
        http.create_message(msg.channel_id).embeds(&[embed]).await?;
        return Ok(());
    }

    let mut moderator_names = HashMap::new();
    for entry in entries.iter().take(HISTORY_PREVIEW_LIMIT) {
        if moderator_names.contains_key(&entry.moderator_id) {
            continue;
        }
        let Some(moderator_id) = Id::new_checked(entry.moderator_id) else {
            continue;
        };
        if let Some(name) = fetch_user_name(http, moderator_id).await {
            moderator_names.insert(entry.moderator_id, name);
        }
    }

    let history = history_text(&entries, &moderator_names);
    let embed = history_embed(target_user_id, &target_label, total_count, history)?;
    http.create_message(msg.channel_id).embeds(&[embed]).await?;

    Ok(())
}
