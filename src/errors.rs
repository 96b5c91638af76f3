use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotatorError {
    Config(String),
    DatabaseConfig(String),
    StoreUnavailable(String),
    StoreOperation(String),
    NotFound(String),
    NoActiveBanners(String),
    InvalidArgument(String),
    Timeout(String),
}

impl RotatorError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            RotatorError::Config(_) => "E001",
            RotatorError::DatabaseConfig(_) => "E002",
            RotatorError::StoreUnavailable(_) => "E003",
            RotatorError::StoreOperation(_) => "E004",
            RotatorError::NotFound(_) => "E005",
            RotatorError::NoActiveBanners(_) => "E006",
            RotatorError::InvalidArgument(_) => "E007",
            RotatorError::Timeout(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            RotatorError::Config(_) => "Configuration Error",
            RotatorError::DatabaseConfig(_) => "Database Configuration Error",
            RotatorError::StoreUnavailable(_) => "Store Unavailable",
            RotatorError::StoreOperation(_) => "Store Operation Error",
            RotatorError::NotFound(_) => "Resource Not Found",
            RotatorError::NoActiveBanners(_) => "No Active Banners",
            RotatorError::InvalidArgument(_) => "Invalid Argument",
            RotatorError::Timeout(_) => "Operation Timed Out",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            RotatorError::Config(msg)
            | RotatorError::DatabaseConfig(msg)
            | RotatorError::StoreUnavailable(msg)
            | RotatorError::StoreOperation(msg)
            | RotatorError::NotFound(msg)
            | RotatorError::NoActiveBanners(msg)
            | RotatorError::InvalidArgument(msg)
            | RotatorError::Timeout(msg) => msg,
        }
    }

    /// HTTP 状态码映射（API 层使用）
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            RotatorError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            RotatorError::NotFound(_) | RotatorError::NoActiveBanners(_) => StatusCode::NOT_FOUND,
            RotatorError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RotatorError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            RotatorError::Config(_)
            | RotatorError::DatabaseConfig(_)
            | RotatorError::StoreOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wraps the message with the name of the operation that failed,
    /// keeping the variant so callers can still match on the kind.
    pub fn with_context(self, operation: &str) -> Self {
        let wrap = |msg: String| format!("{}: {}", operation, msg);
        match self {
            RotatorError::Config(msg) => RotatorError::Config(wrap(msg)),
            RotatorError::DatabaseConfig(msg) => RotatorError::DatabaseConfig(wrap(msg)),
            RotatorError::StoreUnavailable(msg) => RotatorError::StoreUnavailable(wrap(msg)),
            RotatorError::StoreOperation(msg) => RotatorError::StoreOperation(wrap(msg)),
            RotatorError::NotFound(msg) => RotatorError::NotFound(wrap(msg)),
            RotatorError::NoActiveBanners(msg) => RotatorError::NoActiveBanners(wrap(msg)),
            RotatorError::InvalidArgument(msg) => RotatorError::InvalidArgument(wrap(msg)),
            RotatorError::Timeout(msg) => RotatorError::Timeout(wrap(msg)),
        }
    }

    /// 格式化为彩色输出（启动失败时打印到终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for RotatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RotatorError {}

// 便捷的构造函数
impl RotatorError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        RotatorError::Config(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        RotatorError::DatabaseConfig(msg.into())
    }

    pub fn store_unavailable<T: Into<String>>(msg: T) -> Self {
        RotatorError::StoreUnavailable(msg.into())
    }

    pub fn store_operation<T: Into<String>>(msg: T) -> Self {
        RotatorError::StoreOperation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        RotatorError::NotFound(msg.into())
    }

    pub fn no_active_banners<T: Into<String>>(msg: T) -> Self {
        RotatorError::NoActiveBanners(msg.into())
    }

    pub fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        RotatorError::InvalidArgument(msg.into())
    }

    pub fn timeout<T: Into<String>>(msg: T) -> Self {
        RotatorError::Timeout(msg.into())
    }
}

// 连接类错误映射为 StoreUnavailable，其余数据库错误为 StoreOperation
impl From<sea_orm::DbErr> for RotatorError {
    fn from(err: sea_orm::DbErr) -> Self {
        if crate::storage::backend::classify::is_connectivity_error(&err) {
            RotatorError::StoreUnavailable(err.to_string())
        } else {
            RotatorError::StoreOperation(err.to_string())
        }
    }
}

impl From<uuid::Error> for RotatorError {
    fn from(err: uuid::Error) -> Self {
        RotatorError::InvalidArgument(err.to_string())
    }
}

impl From<config::ConfigError> for RotatorError {
    fn from(err: config::ConfigError) -> Self {
        RotatorError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RotatorError>;
