use super::super::http::{
    OnComplete, Request, Response, ResponseError, ResponseResult, Transport, TransportOptions, TransportTask,
};
use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
};

struct CompletionSlot(Mutex<Option<OnComplete>>);

impl CompletionSlot {
    fn new(on_complete: OnComplete) -> Self {
        Self(Mutex::new(Some(on_complete)))
    }

    fn fire(&self, result: ResponseResult) -> bool {
        let on_complete = self.0.lock().unwrap_or_else(PoisonError::into_inner).take();
        match on_complete {
            Some(on_complete) => {
                on_complete(result);
                true
            }
            None => false,
        }
    }

    fn is_pending(&self) -> bool {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

/// 由测试手动完成任务的传输层
#[derive(Debug, Default)]
pub(crate) struct ManualTransport {
    tasks: Mutex<Vec<Arc<ManualTask>>>,
}

impl ManualTransport {
    pub(crate) fn tasks(&self) -> Vec<Arc<ManualTask>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).to_owned()
    }

    pub(crate) fn last_task(&self) -> Option<Arc<ManualTask>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

impl Transport for ManualTransport {
    fn prepare(&self, request: Arc<Request>, options: &TransportOptions, on_complete: OnComplete) -> Arc<dyn TransportTask> {
        let task = Arc::new(ManualTask {
            request,
            options: options.to_owned(),
            resumed: AtomicBool::new(false),
            canceled: AtomicBool::new(false),
            completion: CompletionSlot::new(on_complete),
        });
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(task.to_owned());
        task
    }
}

pub(crate) struct ManualTask {
    request: Arc<Request>,
    options: TransportOptions,
    resumed: AtomicBool,
    canceled: AtomicBool,
    completion: CompletionSlot,
}

impl ManualTask {
    pub(crate) fn request(&self) -> &Request {
        &self.request
    }

    pub(crate) fn options(&self) -> &TransportOptions {
        &self.options
    }

    pub(crate) fn is_resumed(&self) -> bool {
        self.resumed.load(Ordering::SeqCst)
    }

    pub(crate) fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.completion.is_pending()
    }

    /// 完成任务，返回完成回调是否被调用
    pub(crate) fn complete(&self, result: ResponseResult) -> bool {
        self.completion.fire(result)
    }
}

impl TransportTask for ManualTask {
    fn resume(&self) {
        self.resumed.store(true, Ordering::SeqCst);
    }

    fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
        self.completion.fire(Err(ResponseError::user_canceled()));
    }
}

impl fmt::Debug for ManualTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTask")
            .field("request", &self.request)
            .field("resumed", &self.is_resumed())
            .field("canceled", &self.is_canceled())
            .finish()
    }
}

/// 在启动任务时同步完成的传输层
#[derive(Debug, Default)]
pub(crate) struct ImmediateTransport {
    response: Response,
}

impl ImmediateTransport {
    pub(crate) fn new(response: Response) -> Self {
        Self { response }
    }
}

impl Transport for ImmediateTransport {
    fn prepare(&self, _request: Arc<Request>, _options: &TransportOptions, on_complete: OnComplete) -> Arc<dyn TransportTask> {
        Arc::new(ImmediateTask {
            response: self.response.to_owned(),
            completion: CompletionSlot::new(on_complete),
        })
    }
}

struct ImmediateTask {
    response: Response,
    completion: CompletionSlot,
}

impl TransportTask for ImmediateTask {
    fn resume(&self) {
        self.completion.fire(Ok(self.response.to_owned()));
    }

    fn cancel(&self) {
        self.completion.fire(Err(ResponseError::user_canceled()));
    }
}

impl fmt::Debug for ImmediateTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImmediateTask").field("response", &self.response).finish()
    }
}
