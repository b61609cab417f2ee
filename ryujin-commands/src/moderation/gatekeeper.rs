use tracing::debug;
use twilight_model::{
    guild::Permissions,
    id::{
        Id,
        marker::{GuildMarker, UserMarker},
    },
};

use ryujin_core::Context;
use ryujin_utils::gate::{ActorContext, DenyReason};
use ryujin_utils::permissions::{GuildSnapshot, MemberStanding};

/// Permission both the moderator and the bot need for moderation commands.
pub const MODERATION_PERMISSION: Permissions = Permissions::MANAGE_MESSAGES;

/// Gate input plus the guild it was resolved against.
pub struct ResolvedGate {
    pub guild: GuildSnapshot,
    pub context: ActorContext,
}

pub struct Parties {
    pub actor_id: Id<UserMarker>,
    pub target_id: Id<UserMarker>,
    pub bot_id: Id<UserMarker>,
}

/// Assemble the gate input from already resolved member standings.
pub fn build_actor_context(
    parties: &Parties,
    actor: MemberStanding,
    target: MemberStanding,
    bot: MemberStanding,
    required: Permissions,
) -> ActorContext {
    ActorContext {
        actor_role_rank: actor.rank,
        target_role_rank: target.rank,
        bot_role_rank: bot.rank,
        actor_has_permission: actor.has(required),
        bot_has_permission: bot.has(required),
        actor_id: parties.actor_id.get(),
        target_id: parties.target_id.get(),
        bot_id: parties.bot_id.get(),
    }
}

/// Outcome of resolving the gate input for a moderation command.
pub enum GateResolution {
    Resolved(ResolvedGate),
    /// Stopped before the full gate ran; carries the reply for the author.
    Refused(&'static str),
}

/// Denial that can be decided from the actor alone, before any target lookup.
pub fn actor_denial(actor: &MemberStanding) -> Option<DenyReason> {
    (!actor.has(MODERATION_PERMISSION)).then_some(DenyReason::ActorLacksPermission)
}

/// Fetch the guild and all three members, then build the gate input.
///
/// The actor's permission is checked before the target is looked up, so
/// unprivileged users learn nothing about guild membership.
pub async fn resolve_gate(
    ctx: &Context,
    guild_id: Id<GuildMarker>,
    actor_id: Id<UserMarker>,
    target_id: Id<UserMarker>,
) -> anyhow::Result<GateResolution> {
    let http = &ctx.http;
    let guild = GuildSnapshot::fetch(http, guild_id).await?;

    let actor = guild.standing_of(http, actor_id).await?;
    if let Some(reason) = actor_denial(&actor) {
        return Ok(GateResolution::Refused(reason.message()));
    }

    let Some(target) = guild.try_standing_of(http, target_id).await? else {
        debug!(target_id = target_id.get(), "target is not a guild member");
        return Ok(GateResolution::Refused(target_not_member_message()));
    };
    let bot = guild.standing_of(http, ctx.bot_user_id).await?;

    let parties = Parties {
        actor_id,
        target_id,
        bot_id: ctx.bot_user_id,
    };
    let context = build_actor_context(&parties, actor, target, bot, MODERATION_PERMISSION);

    Ok(GateResolution::Resolved(ResolvedGate { guild, context }))
}

pub fn target_not_member_message() -> &'static str {
    "❌ That user is not a member of this server."
}

#[cfg(test)]
mod tests {
    use super::*;
    use ryujin_utils::gate::{GateVerdict, evaluate};

    fn standing(permissions: Permissions, rank: i64) -> MemberStanding {
        MemberStanding { permissions, rank }
    }

    fn parties() -> Parties {
        Parties {
            actor_id: Id::new(1),
            target_id: Id::new(2),
            bot_id: Id::new(3),
        }
    }

    #[test]
    fn administrator_counts_as_moderation_permission() {
        let ctx = build_actor_context(
            &parties(),
            standing(Permissions::ADMINISTRATOR, 5),
            standing(Permissions::empty(), 1),
            standing(MODERATION_PERMISSION, 9),
            MODERATION_PERMISSION,
        );

        assert!(ctx.actor_has_permission);
        assert_eq!(evaluate(&ctx), GateVerdict::Allowed);
    }

    #[test]
    fn bot_without_permission_is_reported() {
        let ctx = build_actor_context(
            &parties(),
            standing(MODERATION_PERMISSION, 5),
            standing(Permissions::empty(), 1),
            standing(Permissions::SEND_MESSAGES, 9),
            MODERATION_PERMISSION,
        );

        assert_eq!(
            evaluate(&ctx),
            GateVerdict::Denied(DenyReason::BotLacksPermission)
        );
    }

    #[test]
    fn ranks_and_ids_are_copied_through() {
        let ctx = build_actor_context(
            &parties(),
            standing(MODERATION_PERMISSION, 5),
            standing(Permissions::empty(), 2),
            standing(MODERATION_PERMISSION, 7),
            MODERATION_PERMISSION,
        );

        assert_eq!(
            (ctx.actor_role_rank, ctx.target_role_rank, ctx.bot_role_rank),
            (5, 2, 7)
        );
        assert_eq!((ctx.actor_id, ctx.target_id, ctx.bot_id), (1, 2, 3));
    }

    #[test]
    fn actor_without_permission_is_refused_before_target_lookup() {
        assert_eq!(
            actor_denial(&standing(Permissions::SEND_MESSAGES, 50)),
            Some(DenyReason::ActorLacksPermission)
        );
        assert_eq!(
            actor_denial(&standing(Permissions::empty(), 0)),
            Some(DenyReason::ActorLacksPermission)
        );
    }

    #[test]
    fn moderators_and_administrators_pass_the_actor_check() {
        assert_eq!(actor_denial(&standing(MODERATION_PERMISSION, 1)), None);
        assert_eq!(actor_denial(&standing(Permissions::ADMINISTRATOR, 1)), None);
    }
}
