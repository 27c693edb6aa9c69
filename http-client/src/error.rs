use super::http::{header::InvalidHeaderValue, url::ParseError as UrlParseError, Method, Request};
use serde_json::Error as JsonError;
use thiserror::Error;

/// 请求构建错误
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BuildError {
    /// URL 解析错误
    #[error("Parse URL error: {path}: {source}")]
    InvalidUrl {
        /// 无法解析的路径
        path: String,
        /// 解析错误
        #[source]
        source: UrlParseError,
    },

    /// 不支持的 HTTP 方法
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(Method),

    /// 该 HTTP 方法不支持此操作
    #[error("Unsupported operation for HTTP method: {0}")]
    UnsupportedOperation(Method),

    /// 请求体序列化错误
    ///
    /// 携带已经构建完成的部分请求（不含请求体）
    #[error("Serialize request body error: {source}")]
    Serialization {
        /// 序列化错误
        #[source]
        source: JsonError,
        /// 不含请求体的部分请求
        request: Box<Request>,
    },

    /// 非法的 HTTP 头
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
}

impl BuildError {
    /// 获取序列化失败时已经构建完成的部分请求
    #[inline]
    pub fn into_partial_request(self) -> Option<Request> {
        match self {
            Self::Serialization { request, .. } => Some(*request),
            _ => None,
        }
    }
}

/// 请求构建结果
pub type BuildResult<T> = Result<T, BuildError>;
