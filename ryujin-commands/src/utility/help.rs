use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::utility::embeds::{grouped_help_description, unknown_category_message};
use crate::{COMMANDS, CommandMeta};
use ryujin_core::Context;
use ryujin_utils::embed::{COLOR_BLUE, EmbedSystem, branded_embed, finish};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

/// Commands sorted by category then name, optionally filtered to one category.
pub fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut commands: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|command| category.is_none_or(|wanted| command.category == wanted))
        .collect();
    commands.sort_unstable_by_key(|command| (command.category, command.name));
    commands
}

pub fn categories() -> Vec<&'static str> {
    let mut categories: Vec<&'static str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

/// Render the command catalog, optionally filtered by category.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let category = arg1.map(str::to_ascii_lowercase);
    let available = categories();

    if let Some(wanted) = category.as_deref()
        && !available.contains(&wanted)
    {
        let out = unknown_category_message(wanted, &available);
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let commands = sorted_commands(category.as_deref());
    let embed = finish(branded_embed(
        "📖 Commands",
        grouped_help_description(&commands),
        COLOR_BLUE,
        EmbedSystem::Information,
    )?)?;
    http.create_message(msg.channel_id).embeds(&[embed]).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_unique_and_sorted() {
        assert_eq!(
            categories(),
            ["basic", "database", "moderation", "utility"]
        );
    }

    #[test]
    fn filter_keeps_only_requested_category() {
        let commands = sorted_commands(Some("moderation"));
        let names: Vec<_> = commands.iter().map(|command| command.name).collect();

        assert_eq!(names, ["moderate_user", "temporary_action"]);
    }

    #[test]
    fn description_groups_by_category() {
        let description = grouped_help_description(&sorted_commands(None));

        let basic = description.find("**basic**").unwrap();
        let utility = description.find("**utility**").unwrap();
        assert!(basic < utility);
        assert!(description.contains("`!ping` - Replies with Pong!"));
    }
}
