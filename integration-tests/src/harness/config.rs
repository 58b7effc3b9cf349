use dwlog_core::conf::DwlogConfig;
use std::path::Path;

/// Points the fixture config at a scratch root and a free port.
pub(crate) fn patch_for_test(mut cfg: DwlogConfig, listen_port: u16, root: &Path) -> DwlogConfig {
    cfg.server.listen = format!("127.0.0.1:{listen_port}");
    cfg.server.threads = Some(1);
    cfg.server.pid_file = None;

    cfg.paths.source_dir = root.join("DW");
    cfg.paths.export_dir = root.join("web/exports");
    cfg.paths.users_file = root.join("backend/users.json");
    cfg.paths.web_root = root.join("web");

    cfg
}
