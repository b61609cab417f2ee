use crate::CommandMeta;

/// Render commands grouped under bold category headings.
///
/// Expects `commands` sorted by category then name.
pub fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut description = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if current_category.is_some() {
                description.push('\n');
            }
            description.push_str(&format!("**{}**\n", command.category));
            current_category = Some(command.category);
        }

        description.push_str(&format!("`{}` - {}\n", command.usage, command.desc));
    }

    description
}

pub fn unknown_category_message(wanted: &str, categories: &[&str]) -> String {
    format!(
        "Unknown category `{}`. Available: {}",
        wanted,
        categories.join(", ")
    )
}
