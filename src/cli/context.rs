//! CLI context for storing global options during command execution

use std::cell::RefCell;

thread_local! {
    static CLI_CONTEXT: RefCell<Option<CliContext>> = const { RefCell::new(None) };
}

/// Context containing global CLI options
#[derive(Debug, Clone, Copy, Default)]
pub struct CliContext {
    pub verbose: bool,
    pub quiet: bool,
    pub yes: bool,
    pub no_progress: bool,
    /// 1 and above forward the output of external commands
    pub log_level: u8,
}

impl CliContext {
    /// Set the global CLI context for the current thread
    pub fn set(context: CliContext) {
        CLI_CONTEXT.with(|c| {
            *c.borrow_mut() = Some(context);
        });
    }

    /// Get the current CLI context
    pub fn get() -> CliContext {
        CLI_CONTEXT.with(|c| (*c.borrow()).unwrap_or_default())
    }

    /// Raise the log level for the rest of the command
    pub fn raise_log_level(level: u8) {
        let mut context = Self::get();
        context.log_level = context.log_level.max(level);
        Self::set(context);
    }

    pub fn is_verbose() -> bool {
        Self::get().verbose
    }

    pub fn is_quiet() -> bool {
        Self::get().quiet
    }

    /// Check if auto-answer yes is enabled
    pub fn is_yes() -> bool {
        Self::get().yes
    }

    /// Progress spinners are shown on a terminal unless disabled
    pub fn show_progress() -> bool {
        let context = Self::get();
        !context.no_progress && !context.quiet && atty::is(atty::Stream::Stderr)
    }

    /// Forward external command output when verbose or at log level 1+
    pub fn echo_commands() -> bool {
        let context = Self::get();
        context.verbose || context.log_level >= 1
    }
}
