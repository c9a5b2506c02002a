use thiserror::Error;

/// 服务器启动 / 运行错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(err.into())
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
