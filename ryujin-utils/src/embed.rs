use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{
    EmbedAuthorBuilder, EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder, ImageSource,
};

/// Avatar shown in every embed's author and footer line.
pub const BOT_LOGO_URL: &str =
    "https://cdn.discordapp.com/avatars/1059400568805785620/63a77f852ea29f37961f458c53fb5a97.png";
pub const BOT_NAME: &str = "Ryujin";
pub const FOOTER_COPYRIGHT: &str = "© Ryujin Bot (2023-2025)";

/// Longest stored blacklist reason echoed back to the user.
const MAX_BLACKLIST_REASON_CHARS: usize = 1_000;

pub const COLOR_GREEN: u32 = 0x2E_CC_71;
pub const COLOR_RED: u32 = 0xE7_4C_3C;
pub const COLOR_BLUE: u32 = 0x34_98_DB;
pub const COLOR_YELLOW: u32 = 0xFE_E7_5C;

/// Which subsystem an embed belongs to, shown in its footer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EmbedSystem {
    Information,
    Moderation,
    Database,
    Blacklist,
}

impl EmbedSystem {
    pub fn label(self) -> &'static str {
        match self {
            Self::Information => "Information System",
            Self::Moderation => "Moderation System",
            Self::Database => "Database System",
            Self::Blacklist => "Blacklist System",
        }
    }
}

pub fn footer_text(system: EmbedSystem) -> String {
    format!("{FOOTER_COPYRIGHT} | {}", system.label())
}

/// Start an embed with the bot's standard footer.
pub fn footed_embed(
    title: &str,
    description: impl Into<String>,
    color: u32,
    system: EmbedSystem,
) -> anyhow::Result<EmbedBuilder> {
    let footer = EmbedFooterBuilder::new(footer_text(system))
        .icon_url(ImageSource::url(BOT_LOGO_URL)?)
        .build();

    Ok(EmbedBuilder::new()
        .title(title)
        .color(color)
        .description(description)
        .footer(footer))
}

/// Start an embed with the bot's standard footer and author line.
pub fn branded_embed(
    title: &str,
    description: impl Into<String>,
    color: u32,
    system: EmbedSystem,
) -> anyhow::Result<EmbedBuilder> {
    let author = EmbedAuthorBuilder::new(BOT_NAME)
        .icon_url(ImageSource::url(BOT_LOGO_URL)?)
        .build();

    Ok(footed_embed(title, description, color, system)?.author(author))
}

/// Append a field to an embed under construction.
pub fn with_field(
    builder: EmbedBuilder,
    name: &str,
    value: impl Into<String>,
    inline: bool,
) -> EmbedBuilder {
    let field = EmbedFieldBuilder::new(name, value);
    let field = if inline { field.inline() } else { field };
    builder.field(field.build())
}

/// Validate and finish an embed builder.
pub fn finish(builder: EmbedBuilder) -> anyhow::Result<Embed> {
    Ok(builder.validate()?.build())
}

/// Embed shown to a user whose commands are blocked.
pub fn blacklist_embed(reason: &str) -> anyhow::Result<Embed> {
    let description = format!(
        "**You can't use {BOT_NAME}'s commands anymore because you have been blacklisted for `{}`.**",
        neutralize_mentions(&truncate_chars(reason, MAX_BLACKLIST_REASON_CHARS))
    );

    finish(branded_embed(
        "You are blacklisted!",
        description,
        COLOR_RED,
        EmbedSystem::Blacklist,
    )?)
}

/// Break `@` mentions so echoed user text cannot ping anyone.
pub fn neutralize_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

/// Shorten text to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blacklist_embed_is_red_and_branded() {
        let embed = blacklist_embed("spam").unwrap();

        assert_eq!(embed.title.as_deref(), Some("You are blacklisted!"));
        assert_eq!(embed.color, Some(COLOR_RED));
        assert!(embed.description.unwrap().contains("`spam`"));
        assert_eq!(
            embed.footer.unwrap().text,
            "© Ryujin Bot (2023-2025) | Blacklist System"
        );
        assert_eq!(embed.author.unwrap().name, BOT_NAME);
    }

    #[test]
    fn oversized_blacklist_reason_still_renders() {
        let reason = "x".repeat(5_000);
        let embed = blacklist_embed(&reason).unwrap();

        let description = embed.description.unwrap();
        assert!(description.chars().count() < 4_096);
        assert!(description.contains('…'));
    }

    #[test]
    fn fields_keep_order_and_inline_flag() {
        let builder = branded_embed("t", "d", COLOR_GREEN, EmbedSystem::Information).unwrap();
        let builder = with_field(builder, "User", "a", true);
        let builder = with_field(builder, "Reason", "b", false);
        let embed = finish(builder).unwrap();

        let names: Vec<_> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["User", "Reason"]);
        assert!(embed.fields[0].inline);
        assert!(!embed.fields[1].inline);
    }

    #[test]
    fn footed_embed_has_no_author() {
        let embed = finish(footed_embed("t", "d", COLOR_YELLOW, EmbedSystem::Moderation).unwrap())
            .unwrap();
        assert!(embed.author.is_none());
        assert_eq!(
            embed.footer.unwrap().text,
            "© Ryujin Bot (2023-2025) | Moderation System"
        );
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("ééééé", 3), "éé…");
        assert_eq!(truncate_chars("abcdef", 3).chars().count(), 3);
    }

    #[test]
    fn mentions_are_neutralized() {
        assert_eq!(neutralize_mentions("@everyone"), "@\u{200B}everyone");
    }
}
