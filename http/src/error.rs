use std::{error, fmt};

/// HTTP 响应错误类型
///
/// 传输层按失败原因选择错误类型，Worker 原样交给完成回调
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 非法的 URL
    InvalidUrl,

    /// 网络连接失败
    ConnectError,

    /// 发送失败
    SendError,

    /// 接受失败
    ReceiveError,

    /// 本地 IO 失败
    LocalIoError,

    /// 超时失败
    TimeoutError,

    /// 未知错误
    UnknownError,

    /// 用户取消
    UserCanceled,
}

/// HTTP 响应错误
///
/// 由传输层产生，原样交给请求完成回调
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    error: Box<dyn error::Error + Send + Sync>,
}

impl Error {
    /// 创建 HTTP 响应错误
    #[inline]
    pub fn new(kind: ErrorKind, err: impl Into<Box<dyn error::Error + Send + Sync>>) -> Self {
        Error {
            kind,
            error: err.into(),
        }
    }

    /// 创建用户取消错误
    #[inline]
    pub fn user_canceled() -> Self {
        Self::new(ErrorKind::UserCanceled, "Task is canceled by user")
    }

    /// 获取 HTTP 响应错误类型
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 是否为用户取消错误
    #[inline]
    pub fn is_canceled(&self) -> bool {
        self.kind == ErrorKind::UserCanceled
    }

    /// 获取内部错误
    #[inline]
    pub fn into_inner(self) -> Box<dyn error::Error + Send + Sync> {
        self.error
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.error)
    }
}

impl error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_and_message() {
        let err = Error::new(ErrorKind::TimeoutError, "request timed out");
        assert_eq!(err.kind(), ErrorKind::TimeoutError);
        assert!(!err.is_canceled());
        assert_eq!(err.to_string(), "[TimeoutError] request timed out");

        let err = Error::user_canceled();
        assert!(err.is_canceled());
        assert_eq!(err.into_inner().to_string(), "Task is canceled by user");
    }
}
