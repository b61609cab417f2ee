use twilight_model::{channel::message::embed::Embed, gateway::payload::incoming::MessageCreate};

use crate::CommandMeta;
use ryujin_core::Context;
use ryujin_utils::embed::{
    COLOR_GREEN, EmbedSystem, branded_embed, finish, neutralize_mentions, truncate_chars,
};

pub const META: CommandMeta = CommandMeta {
    name: "example_with_params",
    desc: "An example command with parameters.",
    category: "basic",
    usage: "!example_with_params <text> [number]",
};

const MAX_TEXT_CHARS: usize = 1_000;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamsInput<'a> {
    pub text: &'a str,
    pub number: Option<i64>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParamsError {
    MissingText,
    NonPositiveNumber,
}

/// Split `<text> [number]`: a trailing integer token is the number when
/// some text remains in front of it.
pub fn parse_params(rest: Option<&str>) -> Result<ParamsInput<'_>, ParamsError> {
    let rest = rest.map(str::trim).filter(|value| !value.is_empty());
    let Some(rest) = rest else {
        return Err(ParamsError::MissingText);
    };

    let (text, number) = match rest.rsplit_once(char::is_whitespace) {
        Some((head, last)) => match last.parse::<i64>() {
            Ok(number) => (head.trim_end(), Some(number)),
            Err(_) => (rest, None),
        },
        None => (rest, None),
    };

    if number.is_some_and(|value| value <= 0) {
        return Err(ParamsError::NonPositiveNumber);
    }

    Ok(ParamsInput { text, number })
}

pub fn params_embed(input: &ParamsInput<'_>) -> anyhow::Result<Embed> {
    let mut result = format!(
        "Text: {}",
        neutralize_mentions(&truncate_chars(input.text, MAX_TEXT_CHARS))
    );
    if let Some(number) = input.number {
        result.push_str(&format!("\nNumber: {number}"));
    }

    finish(branded_embed(
        "✅ Parameters Example",
        format!("**Result:**\n{result}"),
        COLOR_GREEN,
        EmbedSystem::Information,
    )?)
}

/// Validate the parameters, then echo them back in an embed.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, rest: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let input = match parse_params(rest) {
        Ok(input) => input,
        Err(ParamsError::MissingText) => {
            let usage = format!("Usage: `{}`", META.usage);
            http.create_message(msg.channel_id).content(&usage).await?;
            return Ok(());
        }
        Err(ParamsError::NonPositiveNumber) => {
            http.create_message(msg.channel_id)
                .content("❌ Number must be positive.")
                .await?;
            return Ok(());
        }
    };

    let embed = params_embed(&input)?;
    http.create_message(msg.channel_id).embeds(&[embed]).await?;

    Ok(())
}
