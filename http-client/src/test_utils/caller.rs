use super::super::http::{
    HttpCaller, Request, Response, ResponseError, ResponseErrorKind, ResponseResult, TransportOptions,
};
use anyhow::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

#[derive(Debug)]
pub(crate) struct FixedResponseCaller {
    response: Response,
    calls: AtomicUsize,
}

impl FixedResponseCaller {
    pub(crate) fn new(response: Response) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HttpCaller for FixedResponseCaller {
    fn call(&self, _request: &Request, _options: &TransportOptions) -> ResponseResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.to_owned())
    }
}

#[derive(Debug)]
pub(crate) struct ErrorCaller {
    kind: ResponseErrorKind,
    message: &'static str,
}

impl ErrorCaller {
    pub(crate) fn new(kind: ResponseErrorKind, message: &'static str) -> Self {
        Self { kind, message }
    }
}

impl HttpCaller for ErrorCaller {
    fn call(&self, _request: &Request, _options: &TransportOptions) -> ResponseResult {
        Err(ResponseError::new(self.kind, self.message))
    }
}

/// 阻塞直到测试放行的 HTTP 请求处理函数
#[derive(Debug)]
pub(crate) struct BlockingCaller {
    started_tx: Sender<()>,
    started_rx: Receiver<()>,
    release_tx: Sender<()>,
    release_rx: Receiver<()>,
}

impl BlockingCaller {
    pub(crate) fn new() -> Self {
        let (started_tx, started_rx) = unbounded();
        let (release_tx, release_rx) = unbounded();
        Self {
            started_tx,
            started_rx,
            release_tx,
            release_rx,
        }
    }

    pub(crate) fn release_handle(&self) -> Sender<()> {
        self.release_tx.to_owned()
    }

    pub(crate) fn wait_started(&self, timeout: Duration) -> Result<()> {
        self.started_rx.recv_timeout(timeout)?;
        Ok(())
    }
}

impl HttpCaller for BlockingCaller {
    fn call(&self, _request: &Request, _options: &TransportOptions) -> ResponseResult {
        self.started_tx.send(()).ok();
        self.release_rx.recv().ok();
        Ok(Response::default())
    }
}
