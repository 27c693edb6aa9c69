use std::{borrow::Borrow, fmt};
use uuid::Uuid;

/// 任务句柄
///
/// 标识一个正在执行的请求，由 `RemoteWorker::execute` 生成，可用于取消该请求
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TaskHandle(Box<str>);

impl TaskHandle {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4().to_string().to_uppercase().into())
    }

    /// 获取任务句柄字符串
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskHandle {
    #[inline]
    fn from(handle: &str) -> Self {
        Self(handle.into())
    }
}

impl From<String> for TaskHandle {
    #[inline]
    fn from(handle: String) -> Self {
        Self(handle.into_boxed_str())
    }
}

impl AsRef<str> for TaskHandle {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TaskHandle {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskHandle {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for TaskHandle {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
