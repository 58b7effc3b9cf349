use http::Method;
use std::str::FromStr;

/// Every fixed API path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Ping,
    StatsHeader,
    ChartsSummary,
    Alarms,
    Notifications,
    Restarts,
    Metrics,
    NodeSummary,
    FilesList,
    FilesUpload,
    FilesDelete,
    ExportStart,
    ExportStatus,
    ExportDownload,
    Users,
    UserCreate,
    UserUpdate,
    UserDelete,
    Login,
}

impl FromStr for Endpoint {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/api/ping" => Ok(Endpoint::Ping),
            "/api/stats/header" => Ok(Endpoint::StatsHeader),
            "/api/charts/summary" => Ok(Endpoint::ChartsSummary),
            "/api/lga" => Ok(Endpoint::Alarms),
            "/api/lge" => Ok(Endpoint::Notifications),
            "/api/lgd" => Ok(Endpoint::Restarts),
            "/api/lgd_metrics" => Ok(Endpoint::Metrics),
            "/api/node/summary" => Ok(Endpoint::NodeSummary),
            "/api/files/list" => Ok(Endpoint::FilesList),
            "/api/files/upload" => Ok(Endpoint::FilesUpload),
            "/api/files/delete" => Ok(Endpoint::FilesDelete),
            "/export/start" => Ok(Endpoint::ExportStart),
            "/export/status" => Ok(Endpoint::ExportStatus),
            "/export/download" => Ok(Endpoint::ExportDownload),
            "/api/admin/users" => Ok(Endpoint::Users),
            "/api/admin/users/create" => Ok(Endpoint::UserCreate),
            "/api/admin/users/update" => Ok(Endpoint::UserUpdate),
            "/api/admin/users/delete" => Ok(Endpoint::UserDelete),
            "/api/auth/login" => Ok(Endpoint::Login),
            _ => Err("invalid api endpoint"),
        }
    }
}

impl Endpoint {
    /// The one method the endpoint answers. GET endpoints also take HEAD.
    pub fn method(&self) -> Method {
        match self {
            Endpoint::FilesUpload
            | Endpoint::FilesDelete
            | Endpoint::ExportStart
            | Endpoint::UserCreate
            | Endpoint::UserUpdate
            | Endpoint::UserDelete
            | Endpoint::Login => Method::POST,
            _ => Method::GET,
        }
    }

    pub fn accepts(&self, method: &Method) -> bool {
        let expected = self.method();
        *method == expected || (expected == Method::GET && *method == Method::HEAD)
    }
}
