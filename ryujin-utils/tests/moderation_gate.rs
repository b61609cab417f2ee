use ryujin_utils::gate::{ActorContext, DenyReason, GateVerdict, evaluate};
use ryujin_utils::parse::{DurationSpec, parse_duration};

fn context(actor_rank: i64, target_rank: i64) -> ActorContext {
    ActorContext {
        actor_role_rank: actor_rank,
        target_role_rank: target_rank,
        bot_role_rank: 10,
        actor_has_permission: true,
        bot_has_permission: true,
        actor_id: 11,
        target_id: 22,
        bot_id: 33,
    }
}

#[test]
fn moderator_above_target_is_allowed() {
    assert_eq!(evaluate(&context(5, 3)), GateVerdict::Allowed);
}

#[test]
fn target_outranking_actor_is_denied() {
    assert_eq!(
        evaluate(&context(3, 5)),
        GateVerdict::Denied(DenyReason::ActorHierarchyViolation)
    );
}

#[test]
fn equal_ranks_are_denied() {
    assert_eq!(
        evaluate(&context(4, 4)),
        GateVerdict::Denied(DenyReason::ActorHierarchyViolation)
    );
}

#[test]
fn missing_actor_permission_short_circuits_everything() {
    let ranks = [-1_i64, 0, 3, 10, 50];
    let ids = [11_u64, 22, 33];

    for actor_rank in ranks {
        for target_rank in ranks {
            for bot_rank in ranks {
                for bot_has_permission in [true, false] {
                    for target_id in ids {
                        let ctx = ActorContext {
                            actor_role_rank: actor_rank,
                            target_role_rank: target_rank,
                            bot_role_rank: bot_rank,
                            actor_has_permission: false,
                            bot_has_permission,
                            actor_id: 11,
                            target_id,
                            bot_id: 33,
                        };
                        assert_eq!(
                            evaluate(&ctx),
                            GateVerdict::Denied(DenyReason::ActorLacksPermission),
                            "{ctx:?}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn self_target_is_denied_once_hierarchy_passes() {
    let ctx = ActorContext {
        target_id: 11,
        ..context(5, 3)
    };
    assert_eq!(evaluate(&ctx), GateVerdict::Denied(DenyReason::SelfTarget));
}

#[test]
fn timed_action_uses_parsed_span() {
    let duration = parse_duration(Some("1d"));

    assert_eq!(duration, DurationSpec::Span(86_400));
    assert_eq!(duration.expires_at(1_000), Some(87_400));
    assert!(parse_duration(Some("forever")).is_permanent());
}
