use std::collections::HashMap;

use twilight_model::{channel::message::embed::Embed, id::Id, id::marker::UserMarker};

use ryujin_database::warnings::InfractionEntry;
use ryujin_utils::embed::{
    COLOR_BLUE, COLOR_GREEN, EmbedSystem, branded_embed, finish, neutralize_mentions,
    truncate_chars, with_field,
};
use ryujin_utils::time::short_timestamp;

/// Most entries listed in a history embed.
pub const HISTORY_PREVIEW_LIMIT: usize = 10;

const FIELD_VALUE_LIMIT: usize = 1_024;
const HISTORY_REASON_CHARS: usize = 100;
const DATA_VALUE_CHARS: usize = 1_000;
// Room kept for the "... and N more items" line.
const MORE_ITEMS_RESERVE: usize = 40;

pub fn data_added_embed(
    target_id: Id<UserMarker>,
    target_label: &str,
    moderator_label: &str,
    data: &str,
    record_id: i64,
    total_count: u64,
) -> anyhow::Result<Embed> {
    let builder = branded_embed(
        "✅ Data Added",
        format!("Data has been added for **<@{}>**.", target_id.get()),
        COLOR_GREEN,
        EmbedSystem::Database,
    )?;
    let builder = with_field(builder, "User", target_label, true);
    let builder = with_field(builder, "Added by", moderator_label, true);
    let builder = with_field(
        builder,
        "Data",
        neutralize_mentions(&truncate_chars(data, DATA_VALUE_CHARS)),
        false,
    );
    let builder = with_field(builder, "ID", format!("#{record_id}"), true);
    let builder = with_field(builder, "Total Count", total_count.to_string(), true);

    finish(builder)
}

pub fn clean_record_embed(target_id: Id<UserMarker>, target_label: &str) -> anyhow::Result<Embed> {
    let builder = branded_embed(
        "📋 Data History",
        format!("**<@{}>** has no data in this server.", target_id.get()),
        COLOR_GREEN,
        EmbedSystem::Database,
    )?;
    let builder = with_field(builder, "User", target_label, true);
    let builder = with_field(builder, "Total Count", "0", true);
    let builder = with_field(builder, "Status", "✅ Clean record", true);

    finish(builder)
}

pub fn moderator_display_name(moderator_id: u64, names: &HashMap<u64, String>) -> String {
    names
        .get(&moderator_id)
        .cloned()
        .unwrap_or_else(|| format!("Unknown User ({moderator_id})"))
}

/// Render up to [`HISTORY_PREVIEW_LIMIT`] entries within one embed field.
///
/// Entries that do not fit are counted in a trailing "more items" line.
pub fn history_text(entries: &[InfractionEntry], names: &HashMap<u64, String>) -> String {
    let budget = FIELD_VALUE_LIMIT - MORE_ITEMS_RESERVE;
    let mut text = String::new();
    let mut used = 0_usize;
    let mut shown = 0_usize;

    for entry in entries.iter().take(HISTORY_PREVIEW_LIMIT) {
        let line = format!(
            "**#{}** | {} | {}\n└ {}\n\n",
            entry.id,
            moderator_display_name(entry.moderator_id, names),
            short_timestamp(entry.created_at),
            neutralize_mentions(&truncate_chars(&entry.reason, HISTORY_REASON_CHARS)),
        );
        let line_chars = line.chars().count();
        if used + line_chars > budget {
            break;
        }

        used += line_chars;
        text.push_str(&line);
        shown += 1;
    }

    if entries.len() > shown {
        text.push_str(&format!("*... and {} more items*", entries.len() - shown));
    }

    text
}

pub fn history_embed(
    target_id: Id<UserMarker>,
    target_label: &str,
    total_count: u64,
    history: String,
) -> anyhow::Result<Embed> {
    let builder = branded_embed(
        "📋 Data History",
        format!(
            "**<@{}>** has **{}** data entries in this server.",
            target_id.get(),
            total_count
        ),
        COLOR_BLUE,
        EmbedSystem::Database,
    )?;
    let builder = with_field(builder, "User", target_label, true);
    let builder = with_field(builder, "Total Count", total_count.to_string(), true);
    let builder = with_field(builder, "Recent Data", history, false);

    finish(builder)
}
