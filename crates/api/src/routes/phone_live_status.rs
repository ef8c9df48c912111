//! Route registrar for the phone live status feature.
//!
//! [`setup_init`] builds the feature's dependency graph (repositories, then
//! services, then the controller) and mounts every [`Endpoint`] under
//! [`GROUP_PATH`]. The route table is plain data so its verbs, paths and
//! middleware chains can be inspected without sending requests.
//!
//! ```text
//! GET    /jobs                          auth -> jwt-extract            list_jobs
//! GET    /jobs-summary/export           auth -> jwt-extract            export_jobs_summary
//! GET    /jobs-summary                  auth -> jwt-extract            get_jobs_summary
//! GET    /jobs/{id}/details             auth -> jwt-extract            get_job_details
//! GET    /jobs/{id}/details/export      auth -> jwt-extract            export_job_details
//! POST   /single-request                auth -> validate -> jwt-extract single_search
//! POST   /bulk-request                  auth -> jwt-extract            bulk_search
//! ```

use std::sync::Arc;

use axum::http::Method;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use phonelive_data::models::search::SingleSearchRequest;
use phonelive_data::repositories::{LogOperationRepo, MemberRepo, PhoneLiveStatusRepo, RoleRepo};

use crate::auth::jwt::JwtConfig;
use crate::config::ServerConfig;
use crate::controllers::phone_live_status::{self as handlers, PhoneLiveStatusController};
use crate::middleware::auth::require_auth;
use crate::middleware::jwt_payload::extract_jwt_payload;
use crate::middleware::validate::validate_body;
use crate::services::{MemberService, PhoneLiveStatusService};

/// Prefix every route of this feature is nested under.
pub const GROUP_PATH: &str = "/phone-live-status";

/// Request body shapes checked by [`Guard::ValidateBody`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySchema {
    SingleSearch,
}

/// One step of a route's middleware chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Valid session token required.
    Auth,
    /// JSON body must match the schema.
    ValidateBody(BodySchema),
    /// Member session attached to the request.
    JwtPayload,
}

const AUTHENTICATED: &[Guard] = &[Guard::Auth, Guard::JwtPayload];
const AUTHENTICATED_SINGLE_SEARCH: &[Guard] = &[
    Guard::Auth,
    Guard::ValidateBody(BodySchema::SingleSearch),
    Guard::JwtPayload,
];

/// Every endpoint this feature registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListJobs,
    ExportJobsSummary,
    GetJobsSummary,
    GetJobDetails,
    ExportJobDetails,
    SingleSearch,
    BulkSearch,
}

impl Endpoint {
    /// Registration order.
    pub const ALL: [Endpoint; 7] = [
        Endpoint::ListJobs,
        Endpoint::ExportJobsSummary,
        Endpoint::GetJobsSummary,
        Endpoint::GetJobDetails,
        Endpoint::ExportJobDetails,
        Endpoint::SingleSearch,
        Endpoint::BulkSearch,
    ];

    pub fn method(self) -> Method {
        match self {
            Endpoint::SingleSearch | Endpoint::BulkSearch => Method::POST,
            _ => Method::GET,
        }
    }

    /// Path relative to [`GROUP_PATH`].
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::ListJobs => "/jobs",
            Endpoint::ExportJobsSummary => "/jobs-summary/export",
            Endpoint::GetJobsSummary => "/jobs-summary",
            Endpoint::GetJobDetails => "/jobs/{id}/details",
            Endpoint::ExportJobDetails => "/jobs/{id}/details/export",
            Endpoint::SingleSearch => "/single-request",
            Endpoint::BulkSearch => "/bulk-request",
        }
    }

    /// Middleware chain, in the order the guards run.
    pub fn guards(self) -> &'static [Guard] {
        match self {
            Endpoint::SingleSearch => AUTHENTICATED_SINGLE_SEARCH,
            _ => AUTHENTICATED,
        }
    }

    fn handler(self) -> MethodRouter<Arc<PhoneLiveStatusController>> {
        match self {
            Endpoint::ListJobs => get(handlers::list_jobs),
            Endpoint::ExportJobsSummary => get(handlers::export_jobs_summary),
            Endpoint::GetJobsSummary => get(handlers::get_jobs_summary),
            Endpoint::GetJobDetails => get(handlers::get_job_details),
            Endpoint::ExportJobDetails => get(handlers::export_job_details),
            Endpoint::SingleSearch => post(handlers::single_search),
            Endpoint::BulkSearch => post(handlers::bulk_search),
        }
    }

    /// The handler wrapped in its guards.
    ///
    /// The last layer added runs first, so guards are applied in reverse.
    fn guarded(self, jwt: &Arc<JwtConfig>) -> MethodRouter<Arc<PhoneLiveStatusController>> {
        self.guards()
            .iter()
            .rev()
            .fold(self.handler(), |route, guard| match guard {
                Guard::Auth => route.layer(from_fn_with_state(Arc::clone(jwt), require_auth)),
                Guard::ValidateBody(BodySchema::SingleSearch) => {
                    route.layer(from_fn(validate_body::<SingleSearchRequest>))
                }
                Guard::JwtPayload => {
                    route.layer(from_fn_with_state(Arc::clone(jwt), extract_jwt_payload))
                }
            })
    }
}

/// Build the feature's collaborators and register its routes on `router`
/// under [`GROUP_PATH`].
///
/// Construction performs no I/O and cannot fail: configuration problems
/// already aborted startup in [`ServerConfig::from_env`]. Each call builds
/// its own collaborators, so mounting the feature on two routers yields
/// two independent route sets sharing only `config` and `http`.
pub fn setup_init<S>(router: Router<S>, config: &ServerConfig, http: &reqwest::Client) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let feature_repo = PhoneLiveStatusRepo::new(&config.upstream, http);
    let member_repo = MemberRepo::new(&config.upstream, http);
    let role_repo = RoleRepo::new(&config.upstream, http);
    let log_operation_repo = LogOperationRepo::new(&config.upstream, http);

    let feature_service = PhoneLiveStatusService::new(feature_repo);
    let member_service = MemberService::new(member_repo, role_repo, log_operation_repo);

    let controller = Arc::new(PhoneLiveStatusController::new(
        feature_service,
        member_service,
    ));

    let jwt = Arc::new(config.jwt.clone());
    let group = Endpoint::ALL
        .iter()
        .fold(Router::new(), |group, endpoint| {
            group.route(endpoint.path(), endpoint.guarded(&jwt))
        })
        .with_state(controller);

    tracing::debug!(
        group = GROUP_PATH,
        routes = Endpoint::ALL.len(),
        "Registered phone live status routes",
    );

    router.nest(GROUP_PATH, group)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn registers_exactly_the_seven_feature_routes() {
        let routes: Vec<(Method, &str)> = Endpoint::ALL
            .iter()
            .map(|e| (e.method(), e.path()))
            .collect();

        assert_eq!(
            routes,
            vec![
                (Method::GET, "/jobs"),
                (Method::GET, "/jobs-summary/export"),
                (Method::GET, "/jobs-summary"),
                (Method::GET, "/jobs/{id}/details"),
                (Method::GET, "/jobs/{id}/details/export"),
                (Method::POST, "/single-request"),
                (Method::POST, "/bulk-request"),
            ]
        );
    }

    #[test]
    fn paths_are_unique() {
        let paths: HashSet<&str> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        assert_eq!(paths.len(), Endpoint::ALL.len());
    }

    #[test]
    fn auth_runs_first_and_jwt_extraction_last() {
        for endpoint in Endpoint::ALL {
            let guards = endpoint.guards();
            assert_eq!(guards.first(), Some(&Guard::Auth), "{endpoint:?}");
            assert_eq!(guards.last(), Some(&Guard::JwtPayload), "{endpoint:?}");
        }
    }

    #[test]
    fn only_single_search_validates_its_body() {
        for endpoint in Endpoint::ALL {
            let expected: &[Guard] = if endpoint == Endpoint::SingleSearch {
                &[
                    Guard::Auth,
                    Guard::ValidateBody(BodySchema::SingleSearch),
                    Guard::JwtPayload,
                ]
            } else {
                &[Guard::Auth, Guard::JwtPayload]
            };
            assert_eq!(endpoint.guards(), expected, "{endpoint:?}");
        }
    }
}
