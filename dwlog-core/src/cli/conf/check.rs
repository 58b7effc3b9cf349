use crate::conf::{ConfigError, DwlogConfig, load_config};
use crate::corpus::discover_sources;
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            for line in summary(&cfg) {
                println!("✔ {line}");
            }
            Ok(())
        }
        Err(err) => {
            print_config_error(err, plain);
            std::process::exit(1);
        }
    }
}

/// One line per checked setting.
pub fn summary(cfg: &DwlogConfig) -> Vec<String> {
    let sources = discover_sources(&cfg.paths.source_dir).len();

    vec![
        "Config loaded successfully".to_string(),
        format!("listening on {}", cfg.server.listen),
        format!(
            "{} source files in {}",
            sources,
            cfg.paths.source_dir.display()
        ),
        format!("exports written to {}", cfg.paths.export_dir.display()),
        format!("users stored in {}", cfg.paths.users_file.display()),
        format!("pages served from {}", cfg.paths.web_root.display()),
        format!("export mode {}", cfg.export.mode),
    ]
}

fn print_config_error(err: ConfigError, plain: bool) {
    let hint = config_error_hint(&err);
    if plain {
        eprintln!("error: {err}");
    } else {
        eprintln!();
        eprintln!("{}: {}", "error".red().bold(), err);
    }
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => Some(
            "Pass the config file or the directory that contains dwlog.hcl.\n\
             \n\
             Create a fresh one with:\n\
             \n\
             dwlog conf init config",
        ),

        ConfigError::Parse { .. } => Some(
            "The config must declare `server` and `paths` blocks.\n\
             \n\
             Example:\n\
             \n\
             server {\n\
             \x20 listen = \"127.0.0.1:9000\"\n\
             }\n\
             \n\
             paths {\n\
             \x20 source_dir = \"DW\"\n\
             \x20 export_dir = \"web/exports\"\n\
             \x20 users_file = \"backend/users.json\"\n\
             \x20 web_root   = \"web\"\n\
             }",
        ),

        ConfigError::InvalidListen { .. } => Some(
            "server.listen must be an IP address and port, e.g. \"0.0.0.0:9000\".\n\
             \n\
             Host names are not resolved.",
        ),

        ConfigError::InvalidThreads => Some("Remove server.threads to let the server decide."),

        ConfigError::InvalidBodyLimit => {
            Some("Remove server.max_body_bytes to use the default of 64 MiB.")
        }

        ConfigError::EmptyPath { .. } => None,
    }
}
