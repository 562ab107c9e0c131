//! `strato organizations`

use crate::api::{queries, query};
use crate::cli::dispatch::ParsedOptions;
use crate::cli::tree::HandlerFuture;

pub fn create(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let document = create_mutation(
            super::required(&options, "name")?,
            super::required_int(&options, "plan-type")?,
        );
        query::run_query(&options, &document, "createOrganization").await
    })
}

pub fn list(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        query::run_query(&options, queries::ALL_ORGANIZATIONS, "allOrganizations").await
    })
}

pub fn users_add(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let document = membership_mutation(
            "addUserToOrganization",
            super::required(&options, "user")?,
            super::required(&options, "org-id")?,
        );
        query::run_query(&options, &document, "addUserToOrganization").await
    })
}

pub fn users_remove(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let document = membership_mutation(
            "removeUserFromOrganization",
            super::required(&options, "user")?,
            super::required(&options, "org-id")?,
        );
        query::run_query(&options, &document, "removeUserFromOrganization").await
    })
}

fn create_mutation(name: &str, plan_type: i64) -> String {
    format!(
        "mutation {{
    createOrganization(input: {{name: \"{name}\", planType: {plan_type}}}) {{
        id
        name
        planType
    }}
}}"
    )
}

fn membership_mutation(field: &str, user: &str, org_id: &str) -> String {
    format!(
        "mutation {{
    {field}(input: {{user: \"{user}\", organizationId: \"{org_id}\"}}) {{
        user {{
            uid
            email
            organizationId
        }}
    }}
}}"
    )
}
