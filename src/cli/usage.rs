//! Usage formatter
//!
//! Usage lines are rebuilt per invocation so that the displayed command prefix
//! matches the tokens the user actually typed (`strato users roles add`), with
//! help flags and an optionally supplied invalid token filtered out. The
//! output is purely a function of `argv` and the level's argument set.

use crate::cli::args::{ArgumentSet, ValueKind};

/// Strip a path down to its final component
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// The command chain the user typed up to `end` (exclusive), with `argv[0]`
/// reduced to the program basename, help flags removed, and at most one
/// occurrence of `invalid` removed.
pub fn invocation_prefix(argv: &[String], end: usize, invalid: Option<&str>) -> String {
    let end = end.min(argv.len());
    let mut parts: Vec<&str> = argv[..end]
        .iter()
        .map(String::as_str)
        .filter(|arg| *arg != "-h" && *arg != "--help")
        .collect();
    if let Some(first) = parts.first_mut() {
        *first = basename(first);
    }
    if let Some(bad) = invalid {
        if let Some(pos) = parts.iter().position(|part| *part == bad) {
            // never drop the program name itself
            if pos > 0 {
                parts.remove(pos);
            }
        }
    }
    parts.join(" ")
}

/// Usage line for a branch level (subcommand routing)
pub fn branch_usage(argv: &[String], end: usize, invalid: Option<&str>) -> String {
    format!(
        "{} [subcommand] {{parameters}}",
        invocation_prefix(argv, end, invalid)
    )
}

/// Usage line for a flag-taking terminal level
pub fn leaf_usage(argv: &[String], end: usize, args: &ArgumentSet) -> String {
    let mut usage = invocation_prefix(argv, end, None);
    usage.push_str(" [-h]");
    for spec in &args.required {
        usage.push_str(&format!(" --{} {}", spec.long, spec.metavar()));
    }
    for spec in &args.optional {
        match spec.kind {
            ValueKind::Flag => usage.push_str(&format!(" [--{}]", spec.long)),
            _ => usage.push_str(&format!(" [--{} {}]", spec.long, spec.metavar())),
        }
    }
    usage
}

/// Usage line for a choice leaf (single enumerated positional)
pub fn choice_usage(argv: &[String], end: usize, choices: &[&str]) -> String {
    format!(
        "{} [-h] {{{}}}",
        invocation_prefix(argv, end, None),
        choices.join(",")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args;
    use proptest::prelude::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_basename_strips_path() {
        assert_eq!(basename("/usr/local/bin/strato"), "strato");
        assert_eq!(basename("strato"), "strato");
        assert_eq!(basename(r"C:\tools\strato.exe"), "strato.exe");
    }

    #[test]
    fn test_prefix_matches_typed_chain() {
        let argv = argv(&["/usr/bin/app", "users", "roles", "add", "--help"]);
        assert_eq!(invocation_prefix(&argv, 4, None), "app users roles add");
    }

    #[test]
    fn test_prefix_filters_help_flags() {
        let argv = argv(&["app", "users", "--help", "roles", "add"]);
        assert_eq!(invocation_prefix(&argv, 5, None), "app users roles add");
        let argv = argv_with_short_help();
        assert_eq!(invocation_prefix(&argv, 3, None), "app users");
    }

    fn argv_with_short_help() -> Vec<String> {
        argv(&["app", "users", "-h"])
    }

    #[test]
    fn test_prefix_filters_invalid_token() {
        let with_bogus = argv(&["app", "bogus"]);
        assert_eq!(invocation_prefix(&with_bogus, 2, Some("bogus")), "app");
        // the program name is kept even if it equals the invalid token
        let bare = argv(&["app"]);
        assert_eq!(invocation_prefix(&bare, 1, Some("app")), "app");
    }

    #[test]
    fn test_leaf_usage_partitions() {
        let mut set = args::ArgumentSet::default();
        args::role_fqn(&mut set);
        args::user_id_required(&mut set);
        args::env(&mut set);
        let argv = argv(&["app", "users", "roles", "add"]);
        assert_eq!(
            leaf_usage(&argv, 4, &set),
            "app users roles add [-h] --role ROLE --user USER [--env {prod,dev}]"
        );
    }

    #[test]
    fn test_leaf_usage_flag_option() {
        let mut set = args::ArgumentSet::default();
        args::no_org(&mut set);
        let argv = argv(&["app", "users", "list"]);
        assert_eq!(leaf_usage(&argv, 3, &set), "app users list [-h] [--no-org]");
    }

    #[test]
    fn test_choice_usage() {
        let argv = argv(&["app", "config", "get"]);
        assert_eq!(
            choice_usage(&argv, 3, &["env", "region"]),
            "app config get [-h] {env,region}"
        );
    }

    #[test]
    fn test_branch_usage_with_invalid_token() {
        let argv = argv(&["app", "nope"]);
        assert_eq!(
            branch_usage(&argv, 2, Some("nope")),
            "app [subcommand] {parameters}"
        );
    }

    proptest! {
        /// Same argv prefix always yields the same usage string.
        #[test]
        fn prop_prefix_deterministic(
            tokens in proptest::collection::vec("[a-z]{1,8}", 1..5),
            end in 0usize..6,
        ) {
            let argv: Vec<String> = tokens.clone();
            let first = invocation_prefix(&argv, end, None);
            let second = invocation_prefix(&argv, end, None);
            prop_assert_eq!(first, second);
        }

        /// The prefix never contains help flags.
        #[test]
        fn prop_prefix_never_contains_help(
            tokens in proptest::collection::vec(
                prop_oneof![Just("-h".to_string()), Just("--help".to_string()), "[a-z]{1,8}"],
                1..6,
            ),
        ) {
            let end = tokens.len();
            let prefix = invocation_prefix(&tokens, end, None);
            prop_assert!(!prefix.split(' ').any(|p| p == "-h" || p == "--help"));
        }
    }
}
