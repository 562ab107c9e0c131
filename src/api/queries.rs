//! Static GraphQL documents
//!
//! Query strings are data; commands that need request-specific arguments
//! splice them in before execution (see the per-command modules).

pub const ME: &str = "\
{
    me {
        email
        username
        name
    }
}";

pub const ALL_CLUSTERS: &str = "\
{
    allClusters {
        data {
            id
            name
            numNodes
            dbVersion
            projectId
            username
            fqdn
        }
    }
}";

pub const ALL_PROJECTS: &str = "\
{
    allProjects {
        data {
            id
            name
            region
            organizationId
        }
    }
}";

pub const ALL_ORGANIZATIONS: &str = "\
{
    allOrganizations {
        data {
            id
            name
            planType
            notificationsEnabled
        }
    }
}";

pub const ALL_USERS: &str = "\
{
    allUsers {
        data {
            uid
            email
            username
            organizationId
        }
    }
}";

pub const ALL_ROLES: &str = "\
{
    allRoles {
        data {
            fqn
            friendlyName
        }
    }
}";
