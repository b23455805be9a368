//! Init command implementation
//!
//! Scaffolds a new rolegate project: `rolegate.toml`, `.env.example`, the
//! `data/` directory and a `.gitignore`.

use super::output::Output;
use std::fs;
use std::path::Path;

/// Result of the init operation
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Project already exists (rolegate.toml found)
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: std::path::PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Host address for the server
    pub host: String,
    /// Port for the server
    pub port: u16,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing rolegate project");

    let base_path = &config.path;

    let config_path = base_path.join("rolegate.toml");
    if config_path.exists() && !config.force {
        output.warning("rolegate.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    output.subheader("Creating directories");

    let data_dir = base_path.join("data");
    if !data_dir.exists() {
        if let Err(e) = fs::create_dir_all(&data_dir) {
            output.error(&format!("Failed to create data: {}", e));
            return InitResult::Error(e.to_string());
        }
        output.created("directory", "data");
    } else {
        output.skipped("data", "already exists");
    }

    output.subheader("Creating configuration files");

    let toml_content = generate_rolegate_toml(&config);
    if let Err(e) = write_file(&config_path, &toml_content, config.force) {
        output.error(&format!("Failed to create rolegate.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "rolegate.toml");

    let env_example_path = base_path.join(".env.example");
    if let Err(e) = write_file(&env_example_path, generate_env_example(), config.force) {
        output.error(&format!("Failed to create .env.example: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("env", ".env.example");

    // Never clobber an existing .gitignore, even with --force
    let gitignore_path = base_path.join(".gitignore");
    if !gitignore_path.exists() {
        if let Err(e) = write_file(&gitignore_path, generate_gitignore(), false) {
            output.warning(&format!("Failed to create .gitignore: {}", e));
        } else {
            output.created("file", ".gitignore");
        }
    }

    output.newline();
    output.success("rolegate project initialized successfully!");

    output.header("Next Steps");
    output.newline();
    output.info("1. Set up environment variables:");
    output.command("cp .env.example .env");
    output.command("# Edit .env and set JWT_SECRET (min 32 chars)");
    output.newline();
    output.info("2. Create an admin account:");
    output.command("rolegate-server user create -u admin -p <password> --role admin");
    output.newline();
    output.info("3. Start the server:");
    output.command("rolegate-server");
    output.newline();

    output.hint(&format!(
        "Server will be available at http://{}:{}",
        config.host, config.port
    ));
    output.hint("API docs available at /swagger-ui/ (requires 'swagger-ui' feature)");

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(()); // Skip existing files unless force is true
    }
    fs::write(path, content)
}

fn generate_rolegate_toml(config: &InitConfig) -> String {
    format!(
        r#"# rolegate configuration
# ======================
# Secrets never live in this file: [auth] names the environment variable
# that holds the token signing secret.

[server]
host = "{host}"
port = {port}
log_level = "info"

[auth]
# Must be set (e.g. in .env) to at least 32 bytes.
# Changing it invalidates every outstanding token.
jwt_secret_env = "JWT_SECRET"

[database]
# Local libsql/SQLite file, or ":memory:" for a throwaway store
url = "./data/rolegate.db"
"#,
        host = config.host,
        port = config.port,
    )
}

fn generate_env_example() -> &'static str {
    r#"# rolegate Environment Variables
# ==============================
# Copy this file to .env and fill in the values.

# REQUIRED: token signing secret (minimum 32 characters)
# Generate with: openssl rand -base64 32
JWT_SECRET=change-me-in-production-use-at-least-32-characters

# Optional: log filter, overrides server.log_level (e.g. rolegate=debug,tower_http=info)
# RUST_LOG=info
"#
}

fn generate_gitignore() -> &'static str {
    r#"# rolegate generated files
/data/
*.db
*.db-journal

# Environment
.env
.env.local
.env.*.local

# Rust
/target/
"#
}
