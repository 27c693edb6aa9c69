use super::http::{
    HttpCaller, OnComplete, Request, ResponseError, ResponseErrorKind, ResponseResult, Transport, TransportOptions,
    TransportTask,
};
use assert_impl::assert_impl;
use log::warn;
use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex, PoisonError,
    },
    thread,
};

static THREAD_ID: AtomicUsize = AtomicUsize::new(0);

/// 线程传输层
///
/// 将阻塞的 [`HttpCaller`] 包装为异步传输层，每个任务启动后在独立的线程中发送请求。
/// 任务在请求发送前被取消将不再发送请求；请求完成后才被取消，结果将被替换为用户取消错误。
#[derive(Debug)]
pub struct ThreadedTransport<C> {
    caller: Arc<C>,
}

impl<C> ThreadedTransport<C> {
    /// 创建线程传输层
    #[inline]
    pub fn new(caller: C) -> Self {
        Self {
            caller: Arc::new(caller),
        }
    }

    /// 获取 HTTP 请求处理函数
    #[inline]
    pub fn caller(&self) -> &C {
        &self.caller
    }
}

impl<C> Clone for ThreadedTransport<C> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            caller: self.caller.to_owned(),
        }
    }
}

impl<C: HttpCaller + 'static> Transport for ThreadedTransport<C> {
    fn prepare(&self, request: Arc<Request>, options: &TransportOptions, on_complete: OnComplete) -> Arc<dyn TransportTask> {
        Arc::new(ThreadedTask {
            caller: self.caller.to_owned(),
            request,
            options: options.to_owned(),
            state: Arc::new(TaskState {
                started: AtomicBool::new(false),
                canceled: AtomicBool::new(false),
                on_complete: Mutex::new(Some(on_complete)),
            }),
        })
    }
}

struct TaskState {
    started: AtomicBool,
    canceled: AtomicBool,
    on_complete: Mutex<Option<OnComplete>>,
}

impl TaskState {
    fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }

    fn complete(&self, result: ResponseResult) {
        let on_complete = self.on_complete.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(on_complete) = on_complete {
            on_complete(result);
        }
    }
}

struct ThreadedTask<C> {
    caller: Arc<C>,
    request: Arc<Request>,
    options: TransportOptions,
    state: Arc<TaskState>,
}

impl<C: HttpCaller + 'static> TransportTask for ThreadedTask<C> {
    fn resume(&self) {
        if self.state.started.swap(true, Ordering::AcqRel) {
            return;
        }
        let caller = self.caller.to_owned();
        let request = self.request.to_owned();
        let options = self.options.to_owned();
        let state = self.state.to_owned();
        let spawned = thread::Builder::new()
            .name(format!("acnet-task-{}", THREAD_ID.fetch_add(1, Ordering::Relaxed)))
            .spawn(move || {
                let result = if state.is_canceled() {
                    Err(ResponseError::user_canceled())
                } else {
                    let result = caller.call(&request, &options);
                    if state.is_canceled() {
                        Err(ResponseError::user_canceled())
                    } else {
                        result
                    }
                };
                state.complete(result);
            });
        if let Err(err) = spawned {
            warn!("Failed to spawn thread for {} {}: {}", self.request.method(), self.request.url(), err);
            self.state.complete(Err(ResponseError::new(ResponseErrorKind::LocalIoError, err)));
        }
    }

    fn cancel(&self) {
        self.state.canceled.store(true, Ordering::Release);
        if !self.state.started.swap(true, Ordering::AcqRel) {
            self.state.complete(Err(ResponseError::user_canceled()));
        }
    }
}

impl<C> fmt::Debug for ThreadedTask<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadedTask")
            .field("method", &self.request.method())
            .field("url", &self.request.url().as_str())
            .field("started", &self.state.started.load(Ordering::Relaxed))
            .field("canceled", &self.state.canceled.load(Ordering::Relaxed))
            .finish()
    }
}

#[allow(dead_code)]
fn ignore() {
    assert_impl!(Send: TaskState);
    assert_impl!(Sync: TaskState);
}
