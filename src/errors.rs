use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkbioError {
    /// 输入不合法（包括重排时 id 集合不匹配）
    Validation(String),
    /// 资源不存在或不属于调用者，两者对外不可区分
    NotFoundOrForbidden(String),
    HandleTaken(String),
    Unauthorized(String),
    /// 存储不可达、超时或执行失败
    StoreUnavailable(String),
    DatabaseConfig(String),
    Serialization(String),
}

impl LinkbioError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkbioError::Validation(_) => "E001",
            LinkbioError::NotFoundOrForbidden(_) => "E002",
            LinkbioError::HandleTaken(_) => "E003",
            LinkbioError::Unauthorized(_) => "E004",
            LinkbioError::StoreUnavailable(_) => "E005",
            LinkbioError::DatabaseConfig(_) => "E006",
            LinkbioError::Serialization(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkbioError::Validation(_) => "Validation Error",
            LinkbioError::NotFoundOrForbidden(_) => "Not Found",
            LinkbioError::HandleTaken(_) => "Handle Taken",
            LinkbioError::Unauthorized(_) => "Unauthorized",
            LinkbioError::StoreUnavailable(_) => "Store Unavailable",
            LinkbioError::DatabaseConfig(_) => "Database Configuration Error",
            LinkbioError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkbioError::Validation(msg)
            | LinkbioError::NotFoundOrForbidden(msg)
            | LinkbioError::HandleTaken(msg)
            | LinkbioError::Unauthorized(msg)
            | LinkbioError::StoreUnavailable(msg)
            | LinkbioError::DatabaseConfig(msg)
            | LinkbioError::Serialization(msg) => msg,
        }
    }

    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkbioError::Validation(_) => StatusCode::BAD_REQUEST,
            LinkbioError::NotFoundOrForbidden(_) => StatusCode::NOT_FOUND,
            LinkbioError::HandleTaken(_) => StatusCode::CONFLICT,
            LinkbioError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LinkbioError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            LinkbioError::DatabaseConfig(_) | LinkbioError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 格式化为彩色输出（用于命令行）
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

impl fmt::Display for LinkbioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkbioError {}

// 便捷的构造函数
impl LinkbioError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkbioError::Validation(msg.into())
    }

    pub fn not_found_or_forbidden<T: Into<String>>(msg: T) -> Self {
        LinkbioError::NotFoundOrForbidden(msg.into())
    }

    pub fn handle_taken<T: Into<String>>(msg: T) -> Self {
        LinkbioError::HandleTaken(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LinkbioError::Unauthorized(msg.into())
    }

    pub fn store_unavailable<T: Into<String>>(msg: T) -> Self {
        LinkbioError::StoreUnavailable(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkbioError::DatabaseConfig(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkbioError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for LinkbioError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkbioError::StoreUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for LinkbioError {
    fn from(err: serde_json::Error) -> Self {
        LinkbioError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkbioError>;
