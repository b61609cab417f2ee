use twilight_http::{Client, error::ErrorType};
use twilight_model::{
    guild::{Permissions, Role},
    id::{
        Id,
        marker::{GuildMarker, RoleMarker, UserMarker},
    },
};

/// The parts of a guild role that matter for permission and hierarchy checks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RoleInfo {
    pub id: Id<RoleMarker>,
    pub permissions: Permissions,
    pub position: i64,
}

impl From<&Role> for RoleInfo {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            permissions: role.permissions,
            position: role.position,
        }
    }
}

/// A member's effective guild permissions and the rank of their top role.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MemberStanding {
    pub permissions: Permissions,
    /// Position of the member's highest role; `@everyone` sits at 0.
    pub rank: i64,
}

impl MemberStanding {
    /// Whether the member holds `required` directly or through `ADMINISTRATOR`.
    pub fn has(&self, required: Permissions) -> bool {
        self.permissions.contains(Permissions::ADMINISTRATOR)
            || self.permissions.contains(required)
    }
}

/// Combine the roles a member holds into a [`MemberStanding`].
///
/// The `@everyone` role (same ID as the guild) always applies. Guild owners
/// receive every permission but keep their role-based rank.
pub fn member_standing(
    guild_id: Id<GuildMarker>,
    roles: &[RoleInfo],
    member_roles: &[Id<RoleMarker>],
    is_owner: bool,
) -> MemberStanding {
    let everyone_id = guild_id.cast::<RoleMarker>();
    let mut permissions = Permissions::empty();
    let mut rank = 0_i64;

    for role in roles {
        if role.id == everyone_id {
            permissions |= role.permissions;
        } else if member_roles.contains(&role.id) {
            permissions |= role.permissions;
            rank = rank.max(role.position);
        }
    }

    if is_owner {
        permissions = Permissions::all();
    }

    MemberStanding { permissions, rank }
}

/// Roles and owner of one guild, fetched once per command.
#[derive(Clone, Debug)]
pub struct GuildSnapshot {
    pub guild_id: Id<GuildMarker>,
    pub name: String,
    pub owner_id: Id<UserMarker>,
    pub roles: Vec<RoleInfo>,
}

impl GuildSnapshot {
    /// Fetch the guild and its role list over HTTP.
    pub async fn fetch(http: &Client, guild_id: Id<GuildMarker>) -> anyhow::Result<Self> {
        let guild = http.guild(guild_id).await?.model().await?;
        let roles = http.roles(guild_id).await?.model().await?;

        Ok(Self {
            guild_id,
            name: guild.name,
            owner_id: guild.owner_id,
            roles: roles.iter().map(RoleInfo::from).collect(),
        })
    }

    /// Standing of a member whose role IDs are already known.
    pub fn standing_for(
        &self,
        user_id: Id<UserMarker>,
        member_roles: &[Id<RoleMarker>],
    ) -> MemberStanding {
        member_standing(
            self.guild_id,
            &self.roles,
            member_roles,
            user_id == self.owner_id,
        )
    }

    /// Fetch a member and resolve their standing.
    pub async fn standing_of(
        &self,
        http: &Client,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<MemberStanding> {
        let member = http
            .guild_member(self.guild_id, user_id)
            .await?
            .model()
            .await?;

        Ok(self.standing_for(user_id, &member.roles))
    }

    /// Like [`Self::standing_of`], but `None` when the user is not in the guild.
    ///
    /// Only a 404 from the member lookup means "not a member"; every other
    /// failure is returned as an error.
    pub async fn try_standing_of(
        &self,
        http: &Client,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<Option<MemberStanding>> {
        match self.standing_of(http, user_id).await {
            Ok(standing) => Ok(Some(standing)),
            Err(source) if is_not_found(&source) => Ok(None),
            Err(source) => Err(source),
        }
    }
}

const NOT_FOUND: u16 = 404;

fn response_status(kind: &ErrorType) -> Option<u16> {
    match kind {
        ErrorType::Response { status, .. } => Some(status.get()),
        _ => None,
    }
}

/// Whether Discord answered the failed request with 404 Not Found.
pub fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<twilight_http::Error>()
        .and_then(|error| response_status(error.kind()))
        == Some(NOT_FOUND)
}

/// Check whether a guild member has a required permission (or administrator).
pub async fn has_member_permission(
    http: &Client,
    guild_id: Id<GuildMarker>,
    user_id: Id<UserMarker>,
    required: Permissions,
) -> anyhow::Result<bool> {
    let snapshot = GuildSnapshot::fetch(http, guild_id).await?;
    let standing = snapshot.standing_of(http, user_id).await?;

    Ok(standing.has(required))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUILD: u64 = 100;

    fn role(id: u64, permissions: Permissions, position: i64) -> RoleInfo {
        RoleInfo {
            id: Id::new(id),
            permissions,
            position,
        }
    }

    fn roles() -> Vec<RoleInfo> {
        vec![
            role(GUILD, Permissions::SEND_MESSAGES, 0),
            role(1, Permissions::MANAGE_MESSAGES, 4),
            role(2, Permissions::ADMINISTRATOR, 9),
            role(3, Permissions::empty(), 2),
        ]
    }

    #[test]
    fn everyone_role_applies_without_membership() {
        let standing = member_standing(Id::new(GUILD), &roles(), &[], false);

        assert_eq!(standing.rank, 0);
        assert!(standing.has(Permissions::SEND_MESSAGES));
        assert!(!standing.has(Permissions::MANAGE_MESSAGES));
    }

    #[test]
    fn rank_is_highest_held_role() {
        let held = [Id::new(3), Id::new(1)];
        let standing = member_standing(Id::new(GUILD), &roles(), &held, false);

        assert_eq!(standing.rank, 4);
        assert!(standing.has(Permissions::MANAGE_MESSAGES));
    }

    #[test]
    fn administrator_implies_everything() {
        let standing = member_standing(Id::new(GUILD), &roles(), &[Id::new(2)], false);

        assert_eq!(standing.rank, 9);
        assert!(standing.has(Permissions::BAN_MEMBERS));
    }

    #[test]
    fn owner_gets_permissions_but_keeps_rank() {
        let snapshot = GuildSnapshot {
            guild_id: Id::new(GUILD),
            name: "guild".to_owned(),
            owner_id: Id::new(7),
            roles: roles(),
        };
        let standing = snapshot.standing_for(Id::new(7), &[]);

        assert_eq!(standing.rank, 0);
        assert!(standing.has(Permissions::MANAGE_MESSAGES));
    }

    #[test]
    fn only_a_response_status_is_classified() {
        assert_eq!(response_status(&ErrorType::RequestTimedOut), None);
        assert_eq!(response_status(&ErrorType::Unauthorized), None);
    }

    #[test]
    fn transport_and_decode_failures_are_not_missing_members() {
        assert!(!is_not_found(&anyhow::anyhow!("connection reset")));
        assert!(!is_not_found(&anyhow::Error::msg("429 Too Many Requests")));
    }
}
