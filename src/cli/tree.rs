//! Command tree model
//!
//! The CLI surface is declared as a static tree of [`CommandNode`]s. A node is
//! either a branch holding further subcommands, a flag-taking leaf with a
//! handler, or a choice leaf taking a single enumerated positional value. The
//! tagged representation makes a node with both a handler and subcommands
//! unrepresentable.

use futures::future::BoxFuture;

use crate::cli::args::RegisterFn;
use crate::cli::dispatch::ParsedOptions;

/// Future returned by a command handler
pub type HandlerFuture = BoxFuture<'static, anyhow::Result<()>>;

/// A command handler, invoked with the validated options of its level
pub type Handler = fn(ParsedOptions) -> HandlerFuture;

/// A node in the command tree
pub enum CommandNode {
    /// An intermediate command that only routes to subcommands
    Branch {
        /// One-line description shown in the parent's command listing
        help: &'static str,
        /// Subcommands in declaration order
        children: Vec<(&'static str, CommandNode)>,
    },
    /// A terminal command taking flag arguments
    Leaf {
        help: &'static str,
        handler: Handler,
        /// Option registrations applied to this level's argument set
        args: Vec<RegisterFn>,
    },
    /// A terminal command taking exactly one enumerated positional value
    Choice {
        help: &'static str,
        handler: Handler,
        choices: &'static [&'static str],
    },
}

impl CommandNode {
    pub fn branch(help: &'static str, children: Vec<(&'static str, CommandNode)>) -> Self {
        CommandNode::Branch { help, children }
    }

    pub fn leaf(help: &'static str, handler: Handler, args: Vec<RegisterFn>) -> Self {
        CommandNode::Leaf {
            help,
            handler,
            args,
        }
    }

    pub fn choice(
        help: &'static str,
        handler: Handler,
        choices: &'static [&'static str],
    ) -> Self {
        CommandNode::Choice {
            help,
            handler,
            choices,
        }
    }

    /// One-line description used in the parent's command listing
    pub fn help(&self) -> &'static str {
        match self {
            CommandNode::Branch { help, .. }
            | CommandNode::Leaf { help, .. }
            | CommandNode::Choice { help, .. } => help,
        }
    }
}

/// The root of the command tree
pub struct CommandTable {
    pub children: Vec<(&'static str, CommandNode)>,
}

impl CommandTable {
    pub fn new(children: Vec<(&'static str, CommandNode)>) -> Self {
        Self { children }
    }
}
