//! `strato products deploy`

use crate::api::query;
use crate::cli::dispatch::ParsedOptions;
use crate::cli::tree::HandlerFuture;

pub fn deploy(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let document = deploy_mutation(&options)?;
        query::run_query(&options, &document, "deployProduct").await
    })
}

fn deploy_mutation(options: &ParsedOptions) -> anyhow::Result<String> {
    Ok(format!(
        "mutation {{
    deployProduct(input: {{
        name: \"{name}\",
        tier: \"{tier}\",
        unit: {unit},
        version: \"{version}\",
        username: \"{username}\",
        password: \"{password}\",
        organizationId: \"{org_id}\",
        consumer: {{
            eventhub: {{
                connectionString: \"{connection_string}\",
                consumerGroup: \"{consumer_group}\",
                leaseStorageConnectionString: \"{lease_connection_string}\",
                leaseStorageContainer: \"{lease_container}\",
            }},
            schema: \"{schema}\",
            table: \"{table}\",
        }}
    }}) {{
        id
        url
    }}
}}",
        name = super::required(options, "product-name")?,
        tier = super::required(options, "tier")?,
        unit = super::required_int(options, "unit")?,
        version = super::required(options, "version")?,
        username = super::required(options, "username")?,
        password = super::required(options, "password")?,
        org_id = super::required(options, "org-id")?,
        connection_string = super::required(options, "consumer-eventhub-connection-string")?,
        consumer_group = super::required(options, "consumer-eventhub-consumer-group")?,
        lease_connection_string =
            super::required(options, "consumer-eventhub-lease-storage-connection-string")?,
        lease_container = super::required(options, "consumer-eventhub-lease-storage-container")?,
        schema = super::required(options, "consumer-schema")?,
        table = super::required(options, "consumer-table")?,
    ))
}
