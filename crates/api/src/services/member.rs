//! Member authorization and operation logging.

use phonelive_core::error::CoreError;
use phonelive_core::permissions;
use phonelive_data::models::log_operation::NewLogOperation;
use phonelive_data::models::member::Member;
use phonelive_data::repositories::{LogOperationRepo, MemberRepo, RoleRepo};

use crate::auth::jwt::JwtPayload;
use crate::error::{AppError, AppResult};

/// Resolves what a session's member may do and records what it did.
#[derive(Debug, Clone)]
pub struct MemberService {
    members: MemberRepo,
    roles: RoleRepo,
    log_operations: LogOperationRepo,
}

impl MemberService {
    pub fn new(members: MemberRepo, roles: RoleRepo, log_operations: LogOperationRepo) -> Self {
        Self {
            members,
            roles,
            log_operations,
        }
    }

    /// Load the session's member and check its stored role grants
    /// `permission`. Rejects with 403 when the member is unknown, inactive,
    /// belongs to another company than the token says, or lacks the
    /// permission.
    ///
    /// The returned member is the only source of company scoping for the
    /// feature service.
    pub async fn authorize(&self, session: &JwtPayload, permission: &str) -> AppResult<Member> {
        let member = self
            .members
            .find_by_id(session.member_id)
            .await?
            .ok_or_else(|| forbidden("Member account not found"))?;

        if !member.is_active {
            return Err(forbidden("Member account is inactive"));
        }
        if member.company_id != session.company_id {
            tracing::warn!(
                member_id = member.id,
                token_company = session.company_id,
                stored_company = member.company_id,
                "Session company does not match member record",
            );
            return Err(forbidden("Session does not match member company"));
        }

        let role = self
            .roles
            .find_by_id(member.role_id)
            .await?
            .ok_or_else(|| forbidden("Member role not found"))?;

        if !permissions::grants(&role.name, &role.permissions, permission) {
            tracing::info!(
                member_id = member.id,
                role = %role.name,
                permission,
                "Permission denied",
            );
            return Err(forbidden(&format!("Permission '{permission}' required")));
        }

        Ok(member)
    }

    /// Append an entry to the operation log.
    ///
    /// Failures are logged, never returned.
    pub async fn record(&self, session: &JwtPayload, action: &str, description: String) {
        let entry = NewLogOperation {
            member_id: session.member_id,
            company_id: session.company_id,
            action: action.to_string(),
            description,
        };
        if let Err(e) = self.log_operations.create(&entry).await {
            tracing::warn!(
                member_id = session.member_id,
                action,
                error = %e,
                "Failed to write operation log",
            );
        }
    }
}

fn forbidden(msg: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(msg.to_string()))
}
