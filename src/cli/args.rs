//! Option registry
//!
//! Each command level owns an [`ArgumentSet`] with a required and an optional
//! partition, shown under separate headings in help output. The registration
//! functions below each add exactly one option definition; command tree leaves
//! reference them by function pointer. Options whose required-ness differs per
//! command (org id, user id, resource id) take a `required` flag and expose
//! thin `_required`/`_optional` wrappers for use in the tree.

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction};

use crate::cli::{OPTIONALS_TITLE, REQUIRED_TITLE};

/// An option registration function, applied to a level's argument set
pub type RegisterFn = fn(&mut ArgumentSet);

/// Value type of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// String value, optionally restricted to an enumerated choice set
    Str,
    /// Integer value, optionally restricted to an inclusive range
    Int,
    /// Boolean flag taking no value
    Flag,
}

/// A single option definition
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// Key under which the parsed value is stored
    pub id: &'static str,
    pub long: &'static str,
    pub short: Option<char>,
    pub kind: ValueKind,
    pub choices: &'static [&'static str],
    pub range: Option<(i64, i64)>,
    pub help: &'static str,
}

impl OptionSpec {
    fn new(id: &'static str, long: &'static str, kind: ValueKind) -> Self {
        Self {
            id,
            long,
            short: None,
            kind,
            choices: &[],
            range: None,
            help: "",
        }
    }

    pub fn str(id: &'static str, long: &'static str) -> Self {
        Self::new(id, long, ValueKind::Str)
    }

    pub fn int(id: &'static str, long: &'static str) -> Self {
        Self::new(id, long, ValueKind::Int)
    }

    pub fn flag(id: &'static str, long: &'static str) -> Self {
        Self::new(id, long, ValueKind::Flag)
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    /// Placeholder shown for this option's value in usage lines
    pub fn metavar(&self) -> String {
        match self.kind {
            ValueKind::Flag => String::new(),
            ValueKind::Int => match self.range {
                Some((min, max)) => format!("{{{min}..{max}}}"),
                None => self.id.replace('-', "_").to_uppercase(),
            },
            ValueKind::Str => {
                if self.choices.is_empty() {
                    self.id.replace('-', "_").to_uppercase()
                } else {
                    format!("{{{}}}", self.choices.join(","))
                }
            }
        }
    }

    /// Build the clap argument for this spec
    pub(crate) fn to_arg(&self, required: bool) -> Arg {
        let mut arg = Arg::new(self.id)
            .long(self.long)
            .help(self.help)
            .required(required)
            .help_heading(if required {
                REQUIRED_TITLE
            } else {
                OPTIONALS_TITLE
            });
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        match self.kind {
            ValueKind::Flag => arg.action(ArgAction::SetTrue),
            ValueKind::Int => {
                let parser = match self.range {
                    Some((min, max)) => clap::value_parser!(i64).range(min..=max),
                    None => clap::value_parser!(i64),
                };
                arg.action(ArgAction::Set).value_parser(parser)
            }
            ValueKind::Str => {
                let mut arg = arg.action(ArgAction::Set);
                if !self.choices.is_empty() {
                    arg = arg.value_parser(PossibleValuesParser::new(self.choices.iter().copied()));
                }
                arg
            }
        }
    }
}

/// The required/optional option partitions of a single command level
#[derive(Default)]
pub struct ArgumentSet {
    pub required: Vec<OptionSpec>,
    pub optional: Vec<OptionSpec>,
}

impl ArgumentSet {
    fn push(&mut self, required: bool, spec: OptionSpec) {
        if required {
            self.required.push(spec);
        } else {
            self.optional.push(spec);
        }
    }

    /// All specs of the level, required partition first
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.required.iter().chain(self.optional.iter())
    }
}

/// Shared auth-context switch, attached to every flag-taking leaf
pub fn env(args: &mut ArgumentSet) {
    args.optional.push(
        OptionSpec::str("env", "env")
            .choices(&["prod", "dev"])
            .help("Switches auth context."),
    );
}

pub fn region(args: &mut ArgumentSet) {
    args.optional.push(
        OptionSpec::str("region", "region")
            .short('r')
            .choices(&[
                "westeurope.azure",
                "eastus.azure",
                "eastus2.azure",
                "bregenz.a1",
            ])
            .help("Switch region that command will be run on."),
    );
}

pub fn output_fmt(args: &mut ArgumentSet) {
    args.optional.push(
        OptionSpec::str("output-fmt", "output-fmt")
            .short('o')
            .choices(&["table", "json"])
            .help("Switches output format."),
    );
}

pub fn project_id(args: &mut ArgumentSet) {
    args.optional.push(
        OptionSpec::str("project-id", "project-id")
            .short('p')
            .help("Filter by project ID."),
    );
}

pub fn project_name(args: &mut ArgumentSet) {
    args.required
        .push(OptionSpec::str("name", "name").help("Project Name."));
}

pub fn org_id(args: &mut ArgumentSet, required: bool) {
    args.push(
        required,
        OptionSpec::str("org-id", "org-id").help("Organization ID."),
    );
}

pub fn org_id_required(args: &mut ArgumentSet) {
    org_id(args, true);
}

pub fn org_id_optional(args: &mut ArgumentSet) {
    org_id(args, false);
}

pub fn no_org(args: &mut ArgumentSet) {
    args.optional.push(
        OptionSpec::flag("no-org", "no-org")
            .help("Only show users that are not part of any organization."),
    );
}

pub fn org_name(args: &mut ArgumentSet) {
    args.required
        .push(OptionSpec::str("name", "name").help("Organization Name."));
}

pub fn org_plan_type(args: &mut ArgumentSet) {
    args.required.push(
        OptionSpec::int("plan-type", "plan-type")
            .range(1, 6)
            .help("Plan type for organization."),
    );
}

pub fn resource_id(args: &mut ArgumentSet, required: bool) {
    args.push(
        required,
        OptionSpec::str("resource", "resource").help("Resource ID."),
    );
}

pub fn resource_id_required(args: &mut ArgumentSet) {
    resource_id(args, true);
}

pub fn resource_id_optional(args: &mut ArgumentSet) {
    resource_id(args, false);
}

pub fn role_fqn(args: &mut ArgumentSet) {
    args.required.push(
        OptionSpec::str("role", "role")
            .help("Role FQN. Run `strato users roles list` for a list of available roles."),
    );
}

pub fn user_id(args: &mut ArgumentSet, required: bool) {
    args.push(required, OptionSpec::str("user", "user").help("User ID."));
}

pub fn user_id_required(args: &mut ArgumentSet) {
    user_id(args, true);
}

pub fn user_id_optional(args: &mut ArgumentSet) {
    user_id(args, false);
}

pub fn product_tier(args: &mut ArgumentSet) {
    args.required
        .push(OptionSpec::str("tier", "tier").help("Product Tier."));
}

pub fn product_unit(args: &mut ArgumentSet) {
    args.required
        .push(OptionSpec::int("unit", "unit").help("Product Scale Unit."));
}

pub fn product_name(args: &mut ArgumentSet) {
    args.required
        .push(OptionSpec::str("product-name", "product-name").help("Name of the product."));
}

pub fn db_version(args: &mut ArgumentSet) {
    args.required
        .push(OptionSpec::str("version", "version").help("StratoDB version."));
}

pub fn db_username(args: &mut ArgumentSet) {
    args.required
        .push(OptionSpec::str("username", "username").help("StratoDB username."));
}

pub fn db_password(args: &mut ArgumentSet) {
    args.required
        .push(OptionSpec::str("password", "password").help("StratoDB password."));
}

pub fn consumer_connection_string(args: &mut ArgumentSet) {
    args.required.push(
        OptionSpec::str(
            "consumer-eventhub-connection-string",
            "consumer-eventhub-connection-string",
        )
        .help("Connection string of the EventHub from which to consume."),
    );
}

pub fn consumer_group(args: &mut ArgumentSet) {
    args.required.push(
        OptionSpec::str(
            "consumer-eventhub-consumer-group",
            "consumer-eventhub-consumer-group",
        )
        .help("EventHub Consumer Group from which to consume."),
    );
}

pub fn consumer_lease_storage_connection_string(args: &mut ArgumentSet) {
    args.required.push(
        OptionSpec::str(
            "consumer-eventhub-lease-storage-connection-string",
            "consumer-eventhub-lease-storage-connection-string",
        )
        .help("Connection string of the lease storage for the EventHub consumer."),
    );
}

pub fn consumer_lease_storage_container(args: &mut ArgumentSet) {
    args.required.push(
        OptionSpec::str(
            "consumer-eventhub-lease-storage-container",
            "consumer-eventhub-lease-storage-container",
        )
        .help("Container of the lease storage for the EventHub consumer."),
    );
}

pub fn consumer_schema(args: &mut ArgumentSet) {
    args.required.push(
        OptionSpec::str("consumer-schema", "consumer-schema")
            .help("Database schema in which to insert."),
    );
}

pub fn consumer_table(args: &mut ArgumentSet) {
    args.required.push(
        OptionSpec::str("consumer-table", "consumer-table")
            .help("Database table in which to insert."),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_registers_optional_choice() {
        let mut args = ArgumentSet::default();
        env(&mut args);
        assert!(args.required.is_empty());
        assert_eq!(args.optional.len(), 1);
        let spec = &args.optional[0];
        assert_eq!(spec.id, "env");
        assert_eq!(spec.choices, &["prod", "dev"]);
    }

    #[test]
    fn test_project_name_registers_required() {
        let mut args = ArgumentSet::default();
        project_name(&mut args);
        assert_eq!(args.required.len(), 1);
        assert!(args.optional.is_empty());
    }

    #[test]
    fn test_parameterized_option_switches_partition() {
        let mut required = ArgumentSet::default();
        org_id_required(&mut required);
        assert_eq!(required.required.len(), 1);
        assert!(required.optional.is_empty());

        let mut optional = ArgumentSet::default();
        org_id_optional(&mut optional);
        assert!(optional.required.is_empty());
        assert_eq!(optional.optional.len(), 1);

        // both wrappers instantiate the same logical option
        assert_eq!(required.required[0].id, optional.optional[0].id);
    }

    #[test]
    fn test_metavar_rendering() {
        let mut args = ArgumentSet::default();
        env(&mut args);
        output_fmt(&mut args);
        org_plan_type(&mut args);
        assert_eq!(args.optional[0].metavar(), "{prod,dev}");
        assert_eq!(args.optional[1].metavar(), "{table,json}");
        assert_eq!(args.required[0].metavar(), "{1..6}");

        let plain = OptionSpec::str("project-id", "project-id");
        assert_eq!(plain.metavar(), "PROJECT_ID");
    }

    #[test]
    fn test_iter_orders_required_first() {
        let mut args = ArgumentSet::default();
        env(&mut args);
        role_fqn(&mut args);
        let ids: Vec<&str> = args.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["role", "env"]);
    }
}
