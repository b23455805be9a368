//! Terminal output for the rolegate CLI.
//!
//! Every line goes through [`Output::mark`], which picks a colored symbol or a
//! plain `[TAG]` depending on `--no-color`.

use crate::auth::jwt::TokenPayload;
use crate::db::User;
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Ok,
    Info,
    Warn,
    Fail,
    Skip,
}

impl Mark {
    fn tag(self) -> &'static str {
        match self {
            Mark::Ok => "[OK]",
            Mark::Info => "[INFO]",
            Mark::Warn => "[WARN]",
            Mark::Fail => "[ERROR]",
            Mark::Skip => "[SKIPPED]",
        }
    }
}

/// CLI printer.
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    fn mark(&self, mark: Mark, message: &str) -> String {
        if !self.colored {
            return format!("  {} {}", mark.tag(), message);
        }

        match mark {
            Mark::Ok => format!("  {} {}", "✓".green().bold(), message.green()),
            Mark::Info => format!("  {} {}", "•".blue(), message),
            Mark::Warn => format!("  {} {}", "⚠".yellow().bold(), message.yellow()),
            Mark::Fail => format!("  {} {}", "✗".red().bold(), message.red()),
            Mark::Skip => format!("  {} {}", "○".yellow(), message.dimmed()),
        }
    }

    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!("\n   {} {}", "rolegate".bright_cyan().bold(), version.dimmed());
            println!("   {}\n", "Role-based authentication server".bright_white());
        } else {
            println!("\n   rolegate {}\n   Role-based authentication server\n", version);
        }
    }

    pub fn success(&self, message: &str) {
        println!("{}", self.mark(Mark::Ok, message));
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.mark(Mark::Info, message));
    }

    pub fn warning(&self, message: &str) {
        println!("{}", self.mark(Mark::Warn, message));
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.mark(Mark::Fail, message));
    }

    /// A scaffolded file or directory, e.g. `created("config", "rolegate.toml")`.
    pub fn created(&self, kind: &str, path: &str) {
        println!("{}", self.mark(Mark::Ok, &format!("{} {}", kind, path)));
    }

    pub fn skipped(&self, path: &str, reason: &str) {
        println!("{}", self.mark(Mark::Skip, &format!("{} ({})", path, reason)));
    }

    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {}", message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// A shell command the user is told to run.
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            println!("     $ {}", cmd);
        }
    }

    pub fn newline(&self) {
        println!();
    }

    /// Public fields of a stored user. The hash is never printed.
    pub fn user(&self, user: &User) {
        self.success(&format!("User '{}' created", user.username));
        self.kv("id", &user.id.to_string());
        self.kv("role_name", &user.role_name);
    }

    /// Claims and validity window of a verified token.
    pub fn token(&self, payload: &TokenPayload) {
        self.header("Token");
        self.kv("subject", &payload.subject.to_string());
        self.kv("username", &payload.username);
        self.kv("role_name", &payload.role_name);
        self.kv("issued_at", &rfc3339(payload.iat));
        self.kv("expires_at", &rfc3339(payload.exp));
    }
}

fn rfc3339(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_marks_use_tags() {
        let output = Output::no_color();

        assert_eq!(output.mark(Mark::Ok, "done"), "  [OK] done");
        assert_eq!(output.mark(Mark::Fail, "nope"), "  [ERROR] nope");
        assert_eq!(
            output.mark(Mark::Skip, "data (already exists)"),
            "  [SKIPPED] data (already exists)"
        );
    }

    #[test]
    fn test_colored_marks_keep_message() {
        let output = Output::new();
        assert!(output.mark(Mark::Warn, "careful").contains("careful"));
        assert!(!output.mark(Mark::Warn, "careful").contains("[WARN]"));
    }

    #[test]
    fn test_rfc3339() {
        assert_eq!(rfc3339(0), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_printing_does_not_panic() {
        let payload = TokenPayload {
            subject: 1,
            username: "anna".to_string(),
            role_name: "angel".to_string(),
            iat: 0,
            exp: 86_400,
        };
        let user = User {
            id: 1,
            username: "anna".to_string(),
            password_hash: "hash".to_string(),
            role_name: "angel".to_string(),
            created_at: 0,
        };

        for output in [Output::no_color(), Output::new()] {
            output.banner();
            output.token(&payload);
            output.user(&user);
            output.skipped("data", "already exists");
            output.hint("hint");
            output.command("rolegate-server");
        }
    }
}
