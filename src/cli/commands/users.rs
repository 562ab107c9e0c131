//! `strato users` and `strato users roles`

use crate::api::{queries, query};
use crate::cli::dispatch::ParsedOptions;
use crate::cli::tree::HandlerFuture;

/// List users, optionally filtered by organization membership
pub fn list(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let document = list_query(options.get_str("org-id"), options.get_flag("no-org"));
        query::run_query(&options, &document, "allUsers").await
    })
}

pub fn roles_add(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let document = role_mutation(
            "addRoleToUser",
            super::required(&options, "user")?,
            super::required(&options, "role")?,
            super::required(&options, "resource")?,
        );
        query::run_query(&options, &document, "addRoleToUser").await
    })
}

pub fn roles_remove(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let document = role_mutation(
            "removeRoleFromUser",
            super::required(&options, "user")?,
            super::required(&options, "role")?,
            super::required(&options, "resource")?,
        );
        query::run_query(&options, &document, "removeRoleFromUser").await
    })
}

pub fn roles_list(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move { query::run_query(&options, queries::ALL_ROLES, "allRoles").await })
}

fn list_query(org_id: Option<&str>, no_org: bool) -> String {
    let mut document = queries::ALL_USERS.to_string();
    if let Some(org_id) = org_id {
        let filtered = format!(
            "allUsers (filter: {{by: ORGANIZATION_ID, op: EQ, value: \"{org_id}\"}})"
        );
        document = document.replacen("allUsers", &filtered, 1);
    } else if no_org {
        document = document.replacen("allUsers", "allUsers (noOrg: true)", 1);
    }
    document
}

fn role_mutation(field: &str, user: &str, role_fqn: &str, resource: &str) -> String {
    format!(
        "mutation {{
    {field}(input: {{userId: \"{user}\", roleFqn: \"{role_fqn}\", resourceId: \"{resource}\"}}) {{
        success
    }}
}}"
    )
}
