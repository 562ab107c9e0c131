//! Parser tree builder and dispatcher
//!
//! [`resolve`] walks the command tree and `argv` in lock-step, one tree level
//! per argv position, and reduces the invocation to a single [`Outcome`].
//! Nothing in this module prints or exits; the translation of an outcome into
//! process exit codes lives in `main.rs`.
//!
//! Exit code contract: 0 for help/version and successful dispatch, 1 for an
//! unmatched command token, 2 for malformed or missing arguments.

use std::collections::BTreeMap;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command};

use crate::cli::args::{self, ArgumentSet, ValueKind};
use crate::cli::tree::{CommandNode, CommandTable, Handler};
use crate::cli::usage;
use crate::cli::{COMMANDS_TITLE, OPTIONALS_TITLE};

/// A typed option value
#[derive(Debug, Clone, PartialEq)]
pub enum OptValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

/// Validated, typed option values handed to a handler
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedOptions {
    values: BTreeMap<String, OptValue>,
}

impl ParsedOptions {
    pub fn insert_str(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(id.into(), OptValue::Str(value.into()));
    }

    pub fn insert_int(&mut self, id: impl Into<String>, value: i64) {
        self.values.insert(id.into(), OptValue::Int(value));
    }

    pub fn insert_bool(&mut self, id: impl Into<String>, value: bool) {
        self.values.insert(id.into(), OptValue::Bool(value));
    }

    pub fn get_str(&self, id: &str) -> Option<&str> {
        match self.values.get(id) {
            Some(OptValue::Str(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_int(&self, id: &str) -> Option<i64> {
        match self.values.get(id) {
            Some(OptValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_flag(&self, id: &str) -> bool {
        matches!(self.values.get(id), Some(OptValue::Bool(true)))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The single result of resolving an invocation
#[derive(Debug)]
pub enum Outcome {
    /// A terminal command was resolved; run its handler
    Dispatch {
        handler: Handler,
        options: ParsedOptions,
    },
    /// Help was requested (or nothing further was given); stdout, exit 0
    Help { text: String },
    /// The version flag was given; stdout, exit 0
    Version { text: String },
    /// A token matched no command at its level; help on stderr, exit 1
    Unmatched { help: String },
    /// Malformed flags, a bad choice, or a missing required option; exit 2
    Usage { message: String, help: String },
}

/// Resolve `argv` against the command table.
///
/// `argv[0]` is the program path; command tokens start at position 1.
pub fn resolve(argv: &[String], table: &CommandTable) -> Outcome {
    tracing::debug!(?argv, "resolving command");
    walk(argv, 1, &table.children, true)
}

/// One level of the lock-step walk over the tree and `argv`.
///
/// `depth` indexes the argv position holding this level's command token. When
/// no token remains at `depth`, the previous token is inspected instead; it
/// can only ever be the parent's own name (or the program path), so it never
/// matches a sibling and the walk degrades to showing this level's help.
fn walk(
    argv: &[String],
    depth: usize,
    children: &[(&'static str, CommandNode)],
    is_root: bool,
) -> Outcome {
    let token = argv
        .get(depth)
        .or_else(|| argv.get(depth.saturating_sub(1)))
        .map(|raw| usage::basename(raw).to_string());

    let matched = token
        .as_deref()
        .and_then(|token| children.iter().find(|(name, _)| *name == token));

    match matched {
        Some((_, CommandNode::Branch { children: sub, .. })) => walk(argv, depth + 1, sub, false),
        Some((name, node)) => dispatch_terminal(argv, depth, name, node),
        None => unmatched(argv, depth, children, is_root),
    }
}

/// Build the context for a terminal node, parse the remainder of `argv`
/// against it, and hand the validated options to the resolved handler.
fn dispatch_terminal(argv: &[String], depth: usize, name: &str, node: &CommandNode) -> Outcome {
    let rest: Vec<&str> = argv
        .get(depth + 1..)
        .unwrap_or(&[])
        .iter()
        .map(String::as_str)
        .collect();

    match node {
        CommandNode::Leaf { handler, args, .. } => {
            let mut set = ArgumentSet::default();
            for register in args {
                register(&mut set);
            }
            args::env(&mut set);

            // required specs first so their help section precedes the optionals
            let mut context = base_context().override_usage(usage::leaf_usage(argv, depth + 1, &set));
            for spec in &set.required {
                context = context.arg(spec.to_arg(true));
            }
            context = context.arg(help_arg());
            for spec in &set.optional {
                context = context.arg(spec.to_arg(false));
            }

            match context.clone().try_get_matches_from(rest) {
                Ok(matches) => {
                    let mut options = ParsedOptions::default();
                    for spec in set.iter() {
                        match spec.kind {
                            ValueKind::Flag => {
                                options.insert_bool(spec.id, matches.get_flag(spec.id));
                            }
                            ValueKind::Int => {
                                if let Some(value) = matches.get_one::<i64>(spec.id) {
                                    options.insert_int(spec.id, *value);
                                }
                            }
                            ValueKind::Str => {
                                if let Some(value) = matches.get_one::<String>(spec.id) {
                                    options.insert_str(spec.id, value.clone());
                                }
                            }
                        }
                    }
                    Outcome::Dispatch {
                        handler: *handler,
                        options,
                    }
                }
                Err(err) => classify(err, context),
            }
        }
        CommandNode::Choice {
            handler, choices, ..
        } => {
            let context = base_context()
                .override_usage(usage::choice_usage(argv, depth + 1, choices))
                .arg(help_arg())
                .arg(
                    Arg::new(name.to_string())
                        .required(true)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            choices.iter().copied(),
                        ))
                        .help(node.help()),
                );

            match context.clone().try_get_matches_from(rest) {
                Ok(matches) => {
                    let mut options = ParsedOptions::default();
                    if let Some(value) = matches.get_one::<String>(name) {
                        options.insert_str(name, value.clone());
                    }
                    Outcome::Dispatch {
                        handler: *handler,
                        options,
                    }
                }
                Err(err) => classify(err, context),
            }
        }
        CommandNode::Branch { .. } => unreachable!("branches are handled by the walk"),
    }
}

/// No child matched the current token.
///
/// Flag-like tokens are run through this level's parser so that `-h` (and
/// `-v` at the root) keep their short-circuit behavior and malformed flags
/// surface as usage errors; anything else is an unknown command.
fn unmatched(
    argv: &[String],
    depth: usize,
    children: &[(&'static str, CommandNode)],
    is_root: bool,
) -> Outcome {
    let mut level = level_parser(argv, depth, children, is_root);

    let Some(token) = argv.get(depth) else {
        return Outcome::Help {
            text: level.render_help().to_string(),
        };
    };

    if token.starts_with('-') {
        return match level.clone().try_get_matches_from([token.as_str()]) {
            Ok(_) => Outcome::Help {
                text: level.render_help().to_string(),
            },
            Err(err) => classify(err, level),
        };
    }

    Outcome::Unmatched {
        help: level.render_help().to_string(),
    }
}

/// The shared skeleton of a terminal parser context; callers add `-h` where
/// it belongs within their argument ordering
fn base_context() -> Command {
    Command::new("strato")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .no_binary_name(true)
}

/// The parser for one tree level: all sibling commands registered for help
/// display, plus `-h` (and `-v/--version` at the root).
fn level_parser(
    argv: &[String],
    depth: usize,
    children: &[(&'static str, CommandNode)],
    is_root: bool,
) -> Command {
    let invalid = argv.get(depth).map(String::as_str);
    let prog = argv.first().map(String::as_str).unwrap_or("strato");

    let mut level = Command::new(usage::basename(prog).to_string())
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true)
        .no_binary_name(true)
        .subcommand_help_heading(COMMANDS_TITLE)
        .subcommand_value_name("command")
        .override_usage(usage::branch_usage(argv, depth + 1, invalid))
        .arg(help_arg());

    if is_root {
        level = level
            .about("A command line interface for StratoDB Cloud.")
            .version(env!("CARGO_PKG_VERSION"))
            .arg(
                Arg::new("version")
                    .short('v')
                    .long("version")
                    .action(ArgAction::Version)
                    .help("Show program's version number and exit.")
                    .help_heading(OPTIONALS_TITLE),
            );
    }

    for (name, node) in children {
        level = level.subcommand(Command::new(*name).about(node.help()));
    }

    level
}

fn help_arg() -> Arg {
    Arg::new("help")
        .short('h')
        .long("help")
        .action(ArgAction::Help)
        .help("Show this help message and exit.")
        .help_heading(OPTIONALS_TITLE)
}

/// Map a clap parse error onto the outcome taxonomy
fn classify(err: clap::Error, mut context: Command) -> Outcome {
    match err.kind() {
        ErrorKind::DisplayHelp => Outcome::Help {
            text: context.render_help().to_string(),
        },
        ErrorKind::DisplayVersion => Outcome::Version {
            text: err.to_string(),
        },
        _ => Outcome::Usage {
            message: usage_message(&err),
            help: context.render_help().to_string(),
        },
    }
}

/// Single capitalized message line for a usage error.
///
/// Clap renders some errors over several lines (missing required arguments
/// list each offender on its own line) followed by its own usage block; the
/// message part is collapsed into one line and the usage block dropped, since
/// the scoped help is printed separately.
fn usage_message(err: &clap::Error) -> String {
    let raw = err.to_string();
    let message = raw
        .lines()
        .take_while(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with("Usage:")
        })
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    let message = message.strip_prefix("error: ").unwrap_or(&message);
    if message.is_empty() {
        return "Invalid arguments".to_string();
    }
    capitalize(message)
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OptionSpec;
    use crate::cli::tree::HandlerFuture;

    fn handler_a(_options: ParsedOptions) -> HandlerFuture {
        Box::pin(async { Ok(()) })
    }

    fn handler_b(_options: ParsedOptions) -> HandlerFuture {
        Box::pin(async { Ok(()) })
    }

    fn opt_required(args: &mut ArgumentSet) {
        args.required
            .push(OptionSpec::str("opt", "opt").help("Test option."));
    }

    fn opt_optional(args: &mut ArgumentSet) {
        args.optional
            .push(OptionSpec::str("opt", "opt").help("Test option."));
    }

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    fn nested_table() -> CommandTable {
        CommandTable::new(vec![(
            "a",
            CommandNode::branch(
                "Level a.",
                vec![("b", CommandNode::leaf("Level b.", handler_a, vec![opt_required]))],
            ),
        )])
    }

    fn same_handler(outcome: &Outcome, expected: Handler) -> bool {
        match outcome {
            Outcome::Dispatch { handler, .. } => *handler as usize == expected as usize,
            _ => false,
        }
    }

    #[test]
    fn test_nested_leaf_resolves_handler_and_options() {
        let table = nested_table();
        let argv = argv(&["app", "a", "b", "--opt", "x"]);
        let outcome = resolve(&argv, &table);
        assert!(same_handler(&outcome, handler_a));
        let Outcome::Dispatch { options, .. } = outcome else {
            panic!("expected dispatch");
        };
        assert_eq!(options.get_str("opt"), Some("x"));
        // the shared env option is registered but unset
        assert_eq!(options.get_str("env"), None);
    }

    #[test]
    fn test_unmatched_subcommand_exits_one_with_parent_help() {
        let table = nested_table();
        let argv = argv(&["app", "a", "c"]);
        let Outcome::Unmatched { help } = resolve(&argv, &table) else {
            panic!("expected unmatched");
        };
        assert!(help.contains(COMMANDS_TITLE));
        assert!(help.contains("Level b."));
    }

    #[test]
    fn test_unmatched_root_token_exits_one() {
        let table = nested_table();
        let argv = argv(&["app", "bogus"]);
        assert!(matches!(
            resolve(&argv, &table),
            Outcome::Unmatched { .. }
        ));
    }

    #[test]
    fn test_missing_required_option_is_usage_error() {
        let table = nested_table();
        let argv = argv(&["app", "a", "b"]);
        let Outcome::Usage { message, help } = resolve(&argv, &table) else {
            panic!("expected usage error");
        };
        assert!(message.contains("--opt"));
        // capitalized single-line message
        assert!(message.chars().next().unwrap().is_uppercase());
        assert!(!message.contains('\n'));
        assert!(help.contains("app a b [-h] --opt OPT"));
    }

    #[test]
    fn test_optional_option_may_be_absent() {
        let table = CommandTable::new(vec![(
            "b",
            CommandNode::leaf("Leaf.", handler_a, vec![opt_optional]),
        )]);
        let outcome = resolve(&argv(&["app", "b"]), &table);
        assert!(same_handler(&outcome, handler_a));
    }

    #[test]
    fn test_malformed_flag_is_usage_error() {
        let table = nested_table();
        let argv = argv(&["app", "a", "b", "--opt", "x", "--bogus"]);
        assert!(matches!(resolve(&argv, &table), Outcome::Usage { .. }));
    }

    #[test]
    fn test_no_arguments_shows_root_help() {
        let table = nested_table();
        let Outcome::Help { text } = resolve(&argv(&["/usr/bin/app"]), &table) else {
            panic!("expected help");
        };
        assert!(text.contains(COMMANDS_TITLE));
        assert!(text.contains("StratoDB Cloud"));
    }

    #[test]
    fn test_help_flag_at_root() {
        let table = nested_table();
        assert!(matches!(
            resolve(&argv(&["app", "--help"]), &table),
            Outcome::Help { .. }
        ));
        assert!(matches!(
            resolve(&argv(&["app", "-h"]), &table),
            Outcome::Help { .. }
        ));
    }

    #[test]
    fn test_version_flag_at_root() {
        let table = nested_table();
        let Outcome::Version { text } = resolve(&argv(&["app", "-v"]), &table) else {
            panic!("expected version");
        };
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_version_flag_is_root_only() {
        let table = nested_table();
        // at a branch level -v is an unknown flag, a usage error
        assert!(matches!(
            resolve(&argv(&["app", "a", "-v"]), &table),
            Outcome::Usage { .. }
        ));
    }

    #[test]
    fn test_branch_without_further_token_shows_level_help() {
        let table = nested_table();
        let Outcome::Help { text } = resolve(&argv(&["app", "a"]), &table) else {
            panic!("expected help");
        };
        assert!(text.contains(COMMANDS_TITLE));
    }

    #[test]
    fn test_help_flag_at_leaf_level() {
        let table = nested_table();
        let Outcome::Help { text } = resolve(&argv(&["app", "a", "b", "--help"]), &table) else {
            panic!("expected help");
        };
        assert!(text.contains("app a b [-h] --opt OPT"));
    }

    #[test]
    fn test_usage_prefix_at_depth_three() {
        let table = CommandTable::new(vec![(
            "users",
            CommandNode::branch(
                "User management.",
                vec![(
                    "roles",
                    CommandNode::branch(
                        "Role management.",
                        vec![(
                            "add",
                            CommandNode::leaf("Add a role.", handler_a, vec![opt_required]),
                        )],
                    ),
                )],
            ),
        )]);
        let argv = argv(&["app", "users", "roles", "add", "--help"]);
        let Outcome::Help { text } = resolve(&argv, &table) else {
            panic!("expected help");
        };
        assert!(text.contains("app users roles add [-h]"));
        assert!(!text.contains("add --help"));
    }

    #[test]
    fn test_choice_leaf_accepts_listed_value() {
        let table = CommandTable::new(vec![(
            "cfg",
            CommandNode::choice("Read a setting.", handler_b, &["env", "region"]),
        )]);
        let outcome = resolve(&argv(&["app", "cfg", "region"]), &table);
        assert!(same_handler(&outcome, handler_b));
        let Outcome::Dispatch { options, .. } = outcome else {
            panic!("expected dispatch");
        };
        assert_eq!(options.get_str("cfg"), Some("region"));
    }

    #[test]
    fn test_choice_leaf_rejects_unlisted_value() {
        let table = CommandTable::new(vec![(
            "cfg",
            CommandNode::choice("Read a setting.", handler_b, &["env", "region"]),
        )]);
        assert!(matches!(
            resolve(&argv(&["app", "cfg", "nope"]), &table),
            Outcome::Usage { .. }
        ));
    }

    #[test]
    fn test_choice_leaf_is_terminal() {
        // trailing tokens after the positional are rejected, never recursed into
        let table = CommandTable::new(vec![(
            "cfg",
            CommandNode::choice("Read a setting.", handler_b, &["env", "region"]),
        )]);
        assert!(matches!(
            resolve(&argv(&["app", "cfg", "env", "extra"]), &table),
            Outcome::Usage { .. }
        ));
    }

    #[test]
    fn test_int_option_parsing_and_range() {
        fn plan(args: &mut ArgumentSet) {
            args.required
                .push(OptionSpec::int("plan-type", "plan-type").range(1, 6).help("Plan."));
        }
        let table = CommandTable::new(vec![(
            "create",
            CommandNode::leaf("Create.", handler_a, vec![plan]),
        )]);

        let outcome = resolve(&argv(&["app", "create", "--plan-type", "3"]), &table);
        let Outcome::Dispatch { options, .. } = outcome else {
            panic!("expected dispatch");
        };
        assert_eq!(options.get_int("plan-type"), Some(3));

        assert!(matches!(
            resolve(&argv(&["app", "create", "--plan-type", "9"]), &table),
            Outcome::Usage { .. }
        ));
    }

    #[test]
    fn test_flag_option_defaults_to_false() {
        fn flag(args: &mut ArgumentSet) {
            args.optional
                .push(OptionSpec::flag("no-org", "no-org").help("Flag."));
        }
        let table = CommandTable::new(vec![(
            "list",
            CommandNode::leaf("List.", handler_a, vec![flag]),
        )]);

        let Outcome::Dispatch { options, .. } = resolve(&argv(&["app", "list"]), &table) else {
            panic!("expected dispatch");
        };
        assert!(!options.get_flag("no-org"));

        let Outcome::Dispatch { options, .. } =
            resolve(&argv(&["app", "list", "--no-org"]), &table)
        else {
            panic!("expected dispatch");
        };
        assert!(options.get_flag("no-org"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let table = nested_table();
        let argv = argv(&["app", "a", "b", "--opt", "x"]);
        let first = resolve(&argv, &table);
        let second = resolve(&argv, &table);
        let (Outcome::Dispatch { options: opts1, .. }, Outcome::Dispatch { options: opts2, .. }) =
            (first, second)
        else {
            panic!("expected two dispatches");
        };
        assert_eq!(opts1, opts2);

        let help_argv = self::argv(&["app", "a", "b", "--help"]);
        let (Outcome::Help { text: help1 }, Outcome::Help { text: help2 }) =
            (resolve(&help_argv, &table), resolve(&help_argv, &table))
        else {
            panic!("expected two help outcomes");
        };
        assert_eq!(help1, help2);
    }

    #[test]
    fn test_env_is_attached_to_every_flag_leaf() {
        let table = CommandTable::new(vec![(
            "me",
            CommandNode::leaf("Who am I.", handler_a, vec![]),
        )]);
        let Outcome::Dispatch { options, .. } =
            resolve(&argv(&["app", "me", "--env", "dev"]), &table)
        else {
            panic!("expected dispatch");
        };
        assert_eq!(options.get_str("env"), Some("dev"));

        // bad choice is rejected at parse time
        assert!(matches!(
            resolve(&argv(&["app", "me", "--env", "staging"]), &table),
            Outcome::Usage { .. }
        ));
    }

    #[test]
    fn test_full_table_paths_resolve() {
        // every terminal path without required options resolves straight to
        // a dispatch, never to an unmatched command
        let table = crate::cli::commands::command_table();
        let paths: &[&[&str]] = &[
            &["me"],
            &["login"],
            &["logout"],
            &["config", "get", "env"],
            &["config", "set"],
            &["clusters", "list"],
            &["projects", "list"],
            &["organizations", "list"],
            &["users", "list"],
            &["users", "roles", "list"],
        ];
        for path in paths {
            let mut full = vec!["strato".to_string()];
            full.extend(path.iter().map(ToString::to_string));
            let outcome = resolve(&full, &table);
            assert!(
                matches!(outcome, Outcome::Dispatch { .. }),
                "path {path:?} did not dispatch: {outcome:?}"
            );
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("unexpected argument"), "Unexpected argument");
        assert_eq!(capitalize(""), "");
    }
}
