//! `strato projects`

use crate::api::{queries, query};
use crate::cli::dispatch::ParsedOptions;
use crate::cli::tree::HandlerFuture;

pub fn create(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let document = create_mutation(
            super::required(&options, "name")?,
            super::required(&options, "org-id")?,
        );
        query::run_query(&options, &document, "createProject").await
    })
}

pub fn list(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move { query::run_query(&options, queries::ALL_PROJECTS, "allProjects").await })
}

fn create_mutation(name: &str, org_id: &str) -> String {
    format!(
        "mutation {{
    createProject(input: {{name: \"{name}\", organizationId: \"{org_id}\"}}) {{
        id
        name
        region
        organizationId
    }}
}}"
    )
}
