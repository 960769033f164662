use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum ClicktrailError {
    Validation(String),
    NotFound(String),
    DuplicateId(String),
    GenerationExhausted(String),
    StorageUnavailable(String),
    DatabaseConfig(String),
}

impl ClicktrailError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ClicktrailError::Validation(_) => "E001",
            ClicktrailError::NotFound(_) => "E002",
            ClicktrailError::DuplicateId(_) => "E003",
            ClicktrailError::GenerationExhausted(_) => "E004",
            ClicktrailError::StorageUnavailable(_) => "E005",
            ClicktrailError::DatabaseConfig(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ClicktrailError::Validation(_) => "Validation Error",
            ClicktrailError::NotFound(_) => "Resource Not Found",
            ClicktrailError::DuplicateId(_) => "Duplicate Identifier",
            ClicktrailError::GenerationExhausted(_) => "Identifier Generation Exhausted",
            ClicktrailError::StorageUnavailable(_) => "Storage Unavailable",
            ClicktrailError::DatabaseConfig(_) => "Database Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ClicktrailError::Validation(msg) => msg,
            ClicktrailError::NotFound(msg) => msg,
            ClicktrailError::DuplicateId(msg) => msg,
            ClicktrailError::GenerationExhausted(msg) => msg,
            ClicktrailError::StorageUnavailable(msg) => msg,
            ClicktrailError::DatabaseConfig(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    ///
    /// `DuplicateId` 正常情况下不会到达边界（LinkService 内部重试），
    /// 如果真的泄漏出去则视为服务端错误。
    pub fn http_status(&self) -> StatusCode {
        match self {
            ClicktrailError::Validation(_) => StatusCode::BAD_REQUEST,
            ClicktrailError::NotFound(_) => StatusCode::NOT_FOUND,
            ClicktrailError::DuplicateId(_)
            | ClicktrailError::GenerationExhausted(_)
            | ClicktrailError::StorageUnavailable(_)
            | ClicktrailError::DatabaseConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否属于客户端错误
    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }

    /// 格式化为彩色输出（用于启动失败时的终端输出）
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

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClicktrailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClicktrailError {}

// 便捷的构造函数
impl ClicktrailError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ClicktrailError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ClicktrailError::NotFound(msg.into())
    }

    pub fn duplicate_id<T: Into<String>>(msg: T) -> Self {
        ClicktrailError::DuplicateId(msg.into())
    }

    pub fn generation_exhausted<T: Into<String>>(msg: T) -> Self {
        ClicktrailError::GenerationExhausted(msg.into())
    }

    pub fn storage_unavailable<T: Into<String>>(msg: T) -> Self {
        ClicktrailError::StorageUnavailable(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ClicktrailError::DatabaseConfig(msg.into())
    }
}

impl From<sea_orm::DbErr> for ClicktrailError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClicktrailError::StorageUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClicktrailError>;
