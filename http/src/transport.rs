use super::{Request, ResponseResult};
use std::{fmt::Debug, sync::Arc, time::Duration};

/// 请求完成回调
///
/// 传输层必须对每个已启动的任务恰好调用一次
pub type OnComplete = Box<dyn FnOnce(ResponseResult) + Send + 'static>;

/// 传输层选项
///
/// 由配置提供者在 Worker 创建时给出，原样传给传输层，本层不做解释
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    appended_user_agent: String,
}

impl TransportOptions {
    /// 连接超时时长
    #[inline]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// 请求超时时长
    #[inline]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// 追加的 UserAgent
    #[inline]
    pub fn appended_user_agent(&self) -> &str {
        &self.appended_user_agent
    }

    /// 设置连接超时时长
    #[inline]
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// 设置请求超时时长
    #[inline]
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// 设置追加的 UserAgent
    #[inline]
    #[must_use]
    pub fn with_appended_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.appended_user_agent = user_agent.into();
        self
    }
}

/// 异步传输层
///
/// 实现该接口，即可执行所有 Worker 发出的 HTTP 请求。
/// 任务先由 [`Transport::prepare`] 创建，Worker 登记后再调用 [`TransportTask::resume`] 启动。
pub trait Transport: Debug + Send + Sync {
    /// 创建传输任务，此时还不能开始发送请求
    ///
    /// 请求由 Worker 与传输层共享，传输层不得修改
    fn prepare(&self, request: Arc<Request>, options: &TransportOptions, on_complete: OnComplete) -> Arc<dyn TransportTask>;
}

/// 传输任务
pub trait TransportTask: Debug + Send + Sync {
    /// 启动任务
    fn resume(&self);

    /// 请求取消任务
    ///
    /// 尽力而为，传输层决定是否中止请求。被取消的任务依然会调用完成回调，
    /// 通常携带 [`crate::ResponseErrorKind::UserCanceled`] 错误。
    /// 对已经完成的任务调用不应产生任何效果。
    fn cancel(&self);
}

/// 阻塞 HTTP 请求处理函数
///
/// 实现该接口的类型可以被包装为异步传输层
pub trait HttpCaller: Debug + Send + Sync {
    /// 同步发送 HTTP 请求
    fn call(&self, request: &Request, options: &TransportOptions) -> ResponseResult;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    #[inline]
    fn prepare(&self, request: Arc<Request>, options: &TransportOptions, on_complete: OnComplete) -> Arc<dyn TransportTask> {
        T::prepare(self, request, options, on_complete)
    }
}

impl<T: HttpCaller + ?Sized> HttpCaller for Arc<T> {
    #[inline]
    fn call(&self, request: &Request, options: &TransportOptions) -> ResponseResult {
        T::call(self, request, options)
    }
}
