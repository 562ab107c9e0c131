//! Command implementations
//!
//! One module per command group, plus the declarative command table the
//! dispatcher walks. Handlers receive the validated options of their level
//! and perform all I/O themselves.

pub mod clusters;
pub mod config;
pub mod login;
pub mod logout;
pub mod me;
pub mod organizations;
pub mod products;
pub mod projects;
pub mod users;

use anyhow::{anyhow, Result};

use crate::cli::args;
use crate::cli::dispatch::ParsedOptions;
use crate::cli::tree::{CommandNode, CommandTable};

/// Fetch an option the dispatcher guarantees to be present
pub(crate) fn required<'a>(options: &'a ParsedOptions, id: &str) -> Result<&'a str> {
    options
        .get_str(id)
        .ok_or_else(|| anyhow!("missing required option --{id}"))
}

pub(crate) fn required_int(options: &ParsedOptions, id: &str) -> Result<i64> {
    options
        .get_int(id)
        .ok_or_else(|| anyhow!("missing required option --{id}"))
}

/// The full command surface of the client
pub fn command_table() -> CommandTable {
    CommandTable::new(vec![
        (
            "me",
            CommandNode::leaf("Prints the current logged in user.", me::me, vec![]),
        ),
        (
            "login",
            CommandNode::leaf("Log in to StratoDB Cloud.", login::login, vec![]),
        ),
        (
            "logout",
            CommandNode::leaf("Log out of StratoDB Cloud.", logout::logout, vec![]),
        ),
        (
            "config",
            CommandNode::branch(
                "Manage the local configuration.",
                vec![
                    (
                        "get",
                        CommandNode::choice(
                            "Read a configuration setting.",
                            config::get,
                            &["env", "region", "output-fmt"],
                        ),
                    ),
                    (
                        "set",
                        CommandNode::leaf(
                            "Change configuration settings.",
                            config::set,
                            vec![args::region, args::output_fmt],
                        ),
                    ),
                ],
            ),
        ),
        (
            "clusters",
            CommandNode::branch(
                "Manage clusters.",
                vec![(
                    "list",
                    CommandNode::leaf(
                        "List all clusters the current user has access to.",
                        clusters::list,
                        vec![args::region, args::project_id, args::output_fmt],
                    ),
                )],
            ),
        ),
        (
            "projects",
            CommandNode::branch(
                "Manage projects.",
                vec![
                    (
                        "create",
                        CommandNode::leaf(
                            "Create a project in an organization.",
                            projects::create,
                            vec![args::project_name, args::org_id_required],
                        ),
                    ),
                    (
                        "list",
                        CommandNode::leaf(
                            "List all projects the current user has access to.",
                            projects::list,
                            vec![args::region, args::output_fmt],
                        ),
                    ),
                ],
            ),
        ),
        (
            "organizations",
            CommandNode::branch(
                "Manage organizations.",
                vec![
                    (
                        "create",
                        CommandNode::leaf(
                            "Create an organization.",
                            organizations::create,
                            vec![args::org_name, args::org_plan_type, args::output_fmt],
                        ),
                    ),
                    (
                        "list",
                        CommandNode::leaf(
                            "List all organizations the current user belongs to.",
                            organizations::list,
                            vec![args::output_fmt],
                        ),
                    ),
                    (
                        "users",
                        CommandNode::branch(
                            "Manage organization members.",
                            vec![
                                (
                                    "add",
                                    CommandNode::leaf(
                                        "Add a user to an organization.",
                                        organizations::users_add,
                                        vec![args::user_id_required, args::org_id_required],
                                    ),
                                ),
                                (
                                    "remove",
                                    CommandNode::leaf(
                                        "Remove a user from an organization.",
                                        organizations::users_remove,
                                        vec![args::user_id_required, args::org_id_required],
                                    ),
                                ),
                            ],
                        ),
                    ),
                ],
            ),
        ),
        (
            "users",
            CommandNode::branch(
                "Manage users.",
                vec![
                    (
                        "list",
                        CommandNode::leaf(
                            "List all users.",
                            users::list,
                            vec![args::org_id_optional, args::no_org, args::output_fmt],
                        ),
                    ),
                    (
                        "roles",
                        CommandNode::branch(
                            "Manage user roles.",
                            vec![
                                (
                                    "add",
                                    CommandNode::leaf(
                                        "Assign a role to a user.",
                                        users::roles_add,
                                        vec![
                                            args::user_id_required,
                                            args::role_fqn,
                                            args::resource_id_required,
                                        ],
                                    ),
                                ),
                                (
                                    "remove",
                                    CommandNode::leaf(
                                        "Remove a role from a user.",
                                        users::roles_remove,
                                        vec![
                                            args::user_id_required,
                                            args::role_fqn,
                                            args::resource_id_required,
                                        ],
                                    ),
                                ),
                                (
                                    "list",
                                    CommandNode::leaf(
                                        "List all available roles.",
                                        users::roles_list,
                                        vec![args::output_fmt],
                                    ),
                                ),
                            ],
                        ),
                    ),
                ],
            ),
        ),
        (
            "products",
            CommandNode::branch(
                "Manage product deployments.",
                vec![(
                    "deploy",
                    CommandNode::leaf(
                        "Deploy a product into an organization.",
                        products::deploy,
                        vec![
                            args::product_name,
                            args::product_tier,
                            args::product_unit,
                            args::db_version,
                            args::db_username,
                            args::db_password,
                            args::org_id_required,
                            args::consumer_connection_string,
                            args::consumer_group,
                            args::consumer_lease_storage_connection_string,
                            args::consumer_lease_storage_container,
                            args::consumer_schema,
                            args::consumer_table,
                            args::region,
                        ],
                    ),
                )],
            ),
        ),
    ])
}
