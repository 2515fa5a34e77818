//! Token management commands
//!
//! The grammar mirrors the server's admin vocabulary: `tokens`,
//! `token-generate`, `token-rename`, `token-modify`, `token-revoke`.
//! Lines are split like a shell would, parsed with clap and executed
//! against the token store; parse errors render as FAILED output.

use crate::context::CommandContext;
use clap::{Parser, Subcommand};
use depot_token::{PathPattern, Permission, Route, TokenStore};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "depot", no_binary_name = true, disable_version_flag = true)]
struct ConsoleInput {
    #[command(subcommand)]
    command: TokenCommand,
}

#[derive(Debug, Subcommand)]
enum TokenCommand {
    /// List all generated tokens
    Tokens,
    /// Generate a new access token
    #[command(name = "token-generate")]
    TokenGenerate {
        /// Override generated token with custom secret
        #[arg(long, short)]
        secret: Option<String>,
        /// Access token name
        name: String,
        /// Access token permissions, e.g. `m` for a management token
        #[arg(default_value = "")]
        permissions: String,
    },
    /// Change token name
    #[command(name = "token-rename")]
    TokenRename { name: String, new_name: String },
    /// Change token permissions
    #[command(name = "token-modify")]
    TokenModify { name: String, permissions: String },
    /// Revoke token
    #[command(name = "token-revoke")]
    TokenRevoke { name: String },
}

/// Console bound to one token store
pub struct Console {
    tokens: Arc<TokenStore>,
}

impl Console {
    #[must_use]
    pub fn new(tokens: Arc<TokenStore>) -> Self {
        Console { tokens }
    }

    /// Execute one operator line
    #[must_use]
    pub fn execute(&self, line: &str) -> CommandContext {
        let mut context = CommandContext::new();

        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(error) => {
                context.fail(format!("invalid input: {error}"));
                return context;
            }
        };
        if words.is_empty() {
            return context;
        }

        match ConsoleInput::try_parse_from(words) {
            Ok(input) => self.run(input.command, &mut context),
            Err(error) => context.fail(error.to_string()),
        }
        context
    }

    fn run(&self, command: TokenCommand, context: &mut CommandContext) {
        match command {
            TokenCommand::Tokens => self.list_tokens(context),
            TokenCommand::TokenGenerate {
                secret,
                name,
                permissions,
            } => self.generate_token(context, &name, secret, &permissions),
            TokenCommand::TokenRename { name, new_name } => {
                self.rename_token(context, &name, &new_name);
            }
            TokenCommand::TokenModify { name, permissions } => {
                self.modify_token(context, &name, &permissions);
            }
            TokenCommand::TokenRevoke { name } => {
                self.tokens.delete_token(&name);
                context.append(format!("Token for '{name}' has been revoked"));
            }
        }
    }

    fn list_tokens(&self, context: &mut CommandContext) {
        context.append(format!("Tokens ({})", self.tokens.count()));
        for token in self.tokens.tokens() {
            context.append(format!("- {}:", token.name));
            if token.routes.is_empty() {
                context.append("  > ~ no routes ~");
                continue;
            }
            for route in &token.routes {
                context.append(format!(
                    "  > {} : {}",
                    route.path,
                    Permission::render_set(&route.permissions)
                ));
            }
        }
    }

    fn generate_token(
        &self,
        context: &mut CommandContext,
        name: &str,
        secret: Option<String>,
        permissions: &str,
    ) {
        let permissions_set = match Permission::parse_set(permissions) {
            Ok(set) => set,
            Err(error) => {
                context.fail(error.to_string());
                return;
            }
        };

        match self.tokens.create_token(name, secret, permissions_set) {
            Ok(created) => {
                context.append(format!(
                    "Generated new access token for {name} with '{permissions}' permissions. Secret:"
                ));
                context.append(created.secret);
            }
            Err(error) => context.fail(error.to_string()),
        }
    }

    fn rename_token(&self, context: &mut CommandContext, name: &str, new_name: &str) {
        let Some(mut token) = self.tokens.get_token(name) else {
            context.fail(format!("Token '{name}' not found"));
            return;
        };
        token.name = new_name.to_string();
        match self.tokens.update_token(token) {
            Ok(()) => context.append(format!(
                "Token name has been changed from '{name}' to '{new_name}'"
            )),
            Err(error) => context.fail(error.to_string()),
        }
    }

    fn modify_token(&self, context: &mut CommandContext, name: &str, permissions: &str) {
        let permissions_set = match Permission::parse_set(permissions) {
            Ok(set) => set,
            Err(error) => {
                context.fail(error.to_string());
                return;
            }
        };

        let Some(mut token) = self.tokens.get_token(name) else {
            context.fail(format!("Token '{name}' not found"));
            return;
        };

        let previous = token
            .routes
            .iter()
            .flat_map(|route| route.permissions.iter().copied())
            .collect();
        token.routes = if permissions_set.is_empty() {
            Default::default()
        } else {
            [Route::new(PathPattern::Prefix(String::new()), permissions_set)].into()
        };

        match self.tokens.update_token(token) {
            Ok(()) => context.append(format!(
                "Permissions have been changed from '{}' to '{permissions}'",
                Permission::render_set(&previous)
            )),
            Err(error) => context.fail(error.to_string()),
        }
    }
}
