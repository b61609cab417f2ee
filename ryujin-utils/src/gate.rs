//! Authorization check run before any moderation action.

/// Everything the gate needs to know about one moderation attempt.
///
/// Role ranks are totally ordered; a higher rank carries more authority.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActorContext {
    pub actor_role_rank: i64,
    pub target_role_rank: i64,
    pub bot_role_rank: i64,
    pub actor_has_permission: bool,
    pub bot_has_permission: bool,
    pub actor_id: u64,
    pub target_id: u64,
    pub bot_id: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DenyReason {
    ActorLacksPermission,
    BotLacksPermission,
    ActorHierarchyViolation,
    BotHierarchyViolation,
    SelfTarget,
    BotTarget,
}

impl DenyReason {
    /// User-facing explanation for the denial.
    pub fn message(self) -> &'static str {
        match self {
            Self::ActorLacksPermission => "❌ You don't have permission to use this command.",
            Self::BotLacksPermission => "❌ I don't have permission to use this command.",
            Self::ActorHierarchyViolation => {
                "❌ You can't moderate this user due to role hierarchy."
            }
            Self::BotHierarchyViolation => "❌ I can't moderate this user due to role hierarchy.",
            Self::SelfTarget => "❌ You can't moderate yourself.",
            Self::BotTarget => "❌ You can't moderate the bot.",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GateVerdict {
    Allowed,
    Denied(DenyReason),
}

impl GateVerdict {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decide whether a moderation action may proceed.
///
/// Checks run in a fixed order and the first failure wins: actor permission,
/// bot permission, actor hierarchy, bot hierarchy, self target, bot target.
/// Hierarchy is strict, so a target with an equal rank is denied.
pub fn evaluate(ctx: &ActorContext) -> GateVerdict {
    let checks = [
        (ctx.actor_has_permission, DenyReason::ActorLacksPermission),
        (ctx.bot_has_permission, DenyReason::BotLacksPermission),
        (
            ctx.target_role_rank < ctx.actor_role_rank,
            DenyReason::ActorHierarchyViolation,
        ),
        (
            ctx.target_role_rank < ctx.bot_role_rank,
            DenyReason::BotHierarchyViolation,
        ),
        (ctx.target_id != ctx.actor_id, DenyReason::SelfTarget),
        (ctx.target_id != ctx.bot_id, DenyReason::BotTarget),
    ];

    checks
        .into_iter()
        .find_map(|(passed, reason)| (!passed).then_some(GateVerdict::Denied(reason)))
        .unwrap_or(GateVerdict::Allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing() -> ActorContext {
        ActorContext {
            actor_role_rank: 5,
            target_role_rank: 3,
            bot_role_rank: 10,
            actor_has_permission: true,
            bot_has_permission: true,
            actor_id: 1,
            target_id: 2,
            bot_id: 3,
        }
    }

    #[test]
    fn passing_context_is_allowed() {
        assert_eq!(evaluate(&passing()), GateVerdict::Allowed);
    }

    #[test]
    fn bot_permission_checked_before_hierarchy() {
        let ctx = ActorContext {
            bot_has_permission: false,
            target_role_rank: 50,
            ..passing()
        };
        assert_eq!(
            evaluate(&ctx),
            GateVerdict::Denied(DenyReason::BotLacksPermission)
        );
    }

    #[test]
    fn bot_hierarchy_is_strict() {
        let ctx = ActorContext {
            actor_role_rank: 20,
            target_role_rank: 10,
            bot_role_rank: 10,
            ..passing()
        };
        assert_eq!(
            evaluate(&ctx),
            GateVerdict::Denied(DenyReason::BotHierarchyViolation)
        );
    }

    #[test]
    fn targeting_the_bot_is_denied_last() {
        let ctx = ActorContext {
            target_id: 3,
            ..passing()
        };
        assert_eq!(evaluate(&ctx), GateVerdict::Denied(DenyReason::BotTarget));
    }

    #[test]
    fn every_reason_has_a_message() {
        let reasons = [
            DenyReason::ActorLacksPermission,
            DenyReason::BotLacksPermission,
            DenyReason::ActorHierarchyViolation,
            DenyReason::BotHierarchyViolation,
            DenyReason::SelfTarget,
            DenyReason::BotTarget,
        ];
        for reason in reasons {
            assert!(reason.message().starts_with('❌'));
        }
    }
}
