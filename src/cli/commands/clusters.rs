//! `strato clusters`

use crate::api::{queries, query};
use crate::cli::dispatch::ParsedOptions;
use crate::cli::tree::HandlerFuture;

/// List clusters, optionally narrowed to a single project
pub fn list(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let document = list_query(options.get_str("project-id"));
        query::run_query(&options, &document, "allClusters").await
    })
}

/// Splice a project filter into the cluster listing document
fn list_query(project_id: Option<&str>) -> String {
    let mut document = queries::ALL_CLUSTERS.to_string();
    if let Some(project_id) = project_id {
        let filtered = format!(
            "allClusters (filter: {{by: PROJECT_ID, op: EQ, value: \"{project_id}\"}})"
        );
        document = document.replacen("allClusters", &filtered, 1);
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_without_filter() {
        assert_eq!(list_query(None), queries::ALL_CLUSTERS);
    }

    #[test]
    fn test_list_query_with_project_filter() {
        let document = list_query(Some("project-1"));
        assert!(document.contains(
            "allClusters (filter: {by: PROJECT_ID, op: EQ, value: \"project-1\"})"
        ));
        // the field selection is untouched
        assert!(document.contains("numNodes"));
    }
}
