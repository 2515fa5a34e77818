//! Command execution context

/// Outcome marker for one executed command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandStatus {
    #[default]
    Succeeded,
    Failed,
}

/// Output collected while executing one command line
#[derive(Debug, Default)]
pub struct CommandContext {
    pub status: CommandStatus,
    output: Vec<String>,
}

impl CommandContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one output line
    pub fn append(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    /// Mark the command failed and append a message
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = CommandStatus::Failed;
        self.append(message);
    }

    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }
}
