use super::{
    config::{ConfigProvider, GlobalConfigProvider},
    http::{Request, ResponseError, ResponseErrorKind, ResponseResult, Transport, TransportOptions, TransportTask},
    TaskHandle,
};
use assert_impl::assert_impl;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};
use dashmap::{mapref::entry::Entry, DashMap};
use log::{info, warn};
use std::{
    str,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

// 句柄先以空位登记，传输任务创建后再填入
type Registry = DashMap<TaskHandle, Option<Arc<dyn TransportTask>>>;

/// 远程请求执行器
///
/// 将不可修改的 [`Request`] 交给传输层执行，并登记每个正在执行的任务，以便通过 [`TaskHandle`] 取消。
/// 每次执行都恰好调用一次完成回调，回调被调用前任务已经从登记表中移除。
///
/// 可以在多个线程中共享使用。
#[derive(Debug)]
pub struct RemoteWorker {
    transport: Arc<dyn Transport>,
    active_tasks: Arc<Registry>,
    logging_enabled: Arc<AtomicBool>,
    transport_options: TransportOptions,
}

impl RemoteWorker {
    /// 使用全局配置创建远程请求执行器
    #[inline]
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::builder(transport).build()
    }

    /// 创建远程请求执行器构建器
    #[inline]
    pub fn builder(transport: impl Transport + 'static) -> RemoteWorkerBuilder {
        RemoteWorkerBuilder {
            transport: Arc::new(transport),
            config_provider: Box::new(GlobalConfigProvider),
            logging_enabled: None,
            transport_options: None,
        }
    }

    /// 执行请求
    ///
    /// 任务登记后才会启动，返回的任务句柄在完成回调被调用前一直有效。该方法不会阻塞。
    pub fn execute(&self, request: Request, on_complete: impl FnOnce(ResponseResult) + Send + 'static) -> TaskHandle {
        let request = Arc::new(request);
        let handle = self.reserve_handle();
        let active_tasks = Arc::downgrade(&self.active_tasks);
        let logging_enabled = self.logging_enabled.to_owned();
        let completion = {
            let handle = handle.to_owned();
            let request = request.to_owned();
            move |result: ResponseResult| {
                if let Some(active_tasks) = active_tasks.upgrade() {
                    active_tasks.remove(&handle);
                }
                if logging_enabled.load(Ordering::Relaxed) {
                    log_exchange(&handle, &request, &result);
                }
                on_complete(result);
            }
        };
        let task = self
            .transport
            .prepare(request, &self.transport_options, Box::new(completion));
        if let Some(mut slot) = self.active_tasks.get_mut(&handle) {
            *slot = Some(task.to_owned());
        }
        task.resume();
        handle
    }

    /// 执行请求，通过 [`PendingResponse`] 获取结果
    pub fn submit(&self, request: Request) -> (TaskHandle, PendingResponse) {
        let (sender, receiver) = bounded(1);
        let handle = self.execute(request, move |result| {
            sender.send(result).ok();
        });
        (
            handle,
            PendingResponse {
                receiver,
                taken: false,
            },
        )
    }

    /// 取消任务
    ///
    /// 任务不存在或已经完成时不做任何事。被取消的任务依然会调用完成回调，由传输层决定传递的结果。
    pub fn cancel(&self, handle: &TaskHandle) {
        let task = self.active_tasks.get(handle).and_then(|task| task.value().to_owned());
        if let Some(task) = task {
            if self.is_logging_enabled() {
                warn!("WARNING: Task < {} > canceled", handle);
            }
            task.cancel();
        }
    }

    /// 任务是否正在执行
    #[inline]
    pub fn is_active(&self, handle: &TaskHandle) -> bool {
        self.active_tasks.contains_key(handle)
    }

    /// 正在执行的任务数量
    #[inline]
    pub fn active_tasks(&self) -> usize {
        self.active_tasks.len()
    }

    /// 是否输出请求与响应日志
    #[inline]
    pub fn is_logging_enabled(&self) -> bool {
        self.logging_enabled.load(Ordering::Relaxed)
    }

    /// 设置是否输出请求与响应日志
    ///
    /// 在任务完成时读取，因此对正在执行的任务同样有效
    #[inline]
    pub fn set_logging_enabled(&self, enabled: bool) {
        self.logging_enabled.store(enabled, Ordering::Relaxed);
    }

    /// 传输层选项
    #[inline]
    pub fn transport_options(&self) -> &TransportOptions {
        &self.transport_options
    }

    fn reserve_handle(&self) -> TaskHandle {
        loop {
            if let Entry::Vacant(entry) = self.active_tasks.entry(TaskHandle::generate()) {
                let handle = entry.key().to_owned();
                entry.insert(None);
                return handle;
            }
        }
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

fn log_exchange(handle: &TaskHandle, request: &Request, result: &ResponseResult) {
    info!("[{}] REQUEST URL: {} {}", handle, request.method(), request.url());
    info!("[{}] REQUEST HEADERS: {:?}", handle, request.headers());
    if let Some(body) = request.body().and_then(|body| str::from_utf8(body).ok()) {
        info!("[{}] REQUEST BODY: {}", handle, body);
    }
    match result {
        Ok(response) => {
            info!("[{}] RESPONSE CODE: {}", handle, response.status_code().as_u16());
            info!("[{}] RESPONSE HEADERS: {:?}", handle, response.headers());
            match str::from_utf8(response.body()) {
                Ok(body) => info!("[{}] RESPONSE DATA: {}", handle, body),
                Err(_) => info!("[{}] RESPONSE DATA: UNKNOWN", handle),
            }
        }
        Err(err) => {
            info!("[{}] RESPONSE ERROR: {}", handle, err);
            info!("[{}] RESPONSE DATA: UNKNOWN", handle);
        }
    }
}

/// 远程请求执行器构建器
#[derive(Debug)]
pub struct RemoteWorkerBuilder {
    transport: Arc<dyn Transport>,
    config_provider: Box<dyn ConfigProvider>,
    logging_enabled: Option<bool>,
    transport_options: Option<TransportOptions>,
}

impl RemoteWorkerBuilder {
    /// 设置配置提供者，默认使用全局配置提供者
    #[inline]
    pub fn config_provider(&mut self, provider: impl ConfigProvider + 'static) -> &mut Self {
        self.config_provider = Box::new(provider);
        self
    }

    /// 设置是否输出请求与响应日志，覆盖配置提供者给出的值
    #[inline]
    pub fn logging_enabled(&mut self, enabled: bool) -> &mut Self {
        self.logging_enabled = Some(enabled);
        self
    }

    /// 设置传输层选项，覆盖配置提供者给出的值
    #[inline]
    pub fn transport_options(&mut self, options: TransportOptions) -> &mut Self {
        self.transport_options = Some(options);
        self
    }

    /// 构建远程请求执行器
    ///
    /// 配置提供者在此时被读取一次
    pub fn build(&mut self) -> RemoteWorker {
        let config = self.config_provider.get();
        RemoteWorker {
            transport: self.transport.to_owned(),
            active_tasks: Default::default(),
            logging_enabled: Arc::new(AtomicBool::new(
                self.logging_enabled.unwrap_or_else(|| config.logging_enabled()),
            )),
            transport_options: self
                .transport_options
                .to_owned()
                .unwrap_or_else(|| config.transport_options().to_owned()),
        }
    }
}

/// 等待中的响应
///
/// 由 [`RemoteWorker::submit`] 返回，结果只能取出一次
#[derive(Debug)]
pub struct PendingResponse {
    receiver: Receiver<ResponseResult>,
    taken: bool,
}

impl PendingResponse {
    /// 阻塞等待响应
    pub fn wait(self) -> ResponseResult {
        if self.taken {
            return Err(already_taken());
        }
        self.receiver.recv().unwrap_or_else(|_| Err(dropped()))
    }

    /// 在指定时长内等待响应，超时返回 `None`
    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<ResponseResult> {
        if self.taken {
            return None;
        }
        let result = match self.receiver.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => return None,
            Err(RecvTimeoutError::Disconnected) => Err(dropped()),
        };
        self.taken = true;
        Some(result)
    }

    /// 尝试取出响应，尚未完成时返回 `None`
    pub fn try_take(&mut self) -> Option<ResponseResult> {
        if self.taken {
            return None;
        }
        let result = match self.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(dropped()),
        };
        self.taken = true;
        Some(result)
    }
}

fn dropped() -> ResponseError {
    ResponseError::new(
        ResponseErrorKind::UnknownError,
        "Transport dropped the task without completing it",
    )
}

fn already_taken() -> ResponseError {
    ResponseError::new(ResponseErrorKind::UnknownError, "Response has already been taken")
}
