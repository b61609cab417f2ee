use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use ryujin_core::Context;
use ryujin_utils::embed::{COLOR_GREEN, EmbedSystem, branded_embed, finish};

pub const META: CommandMeta = CommandMeta {
    name: "example",
    desc: "An example command that demonstrates the basic structure.",
    category: "basic",
    usage: "!example",
};

/// Reply with a fixed result embed.
pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let result = "This is an example response!";

    let embed = finish(branded_embed(
        "✅ Example Command",
        format!("**Result:** {result}"),
        COLOR_GREEN,
        EmbedSystem::Information,
    )?)?;
    http.create_message(msg.channel_id).embeds(&[embed]).await?;

    Ok(())
}
