use super::ResponseError;
use assert_impl::assert_impl;
use http::{
    header::{HeaderMap, HeaderName, HeaderValue},
    status::StatusCode,
};
use std::{mem::take, result};

/// HTTP 响应信息
///
/// 不包含响应体信息
#[derive(Debug, Clone, Default)]
pub struct ResponseParts {
    status_code: StatusCode,
    headers: HeaderMap,
}

impl ResponseParts {
    /// HTTP 状态码
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// HTTP Headers
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// 获取 HTTP 响应 Header
    #[inline]
    pub fn header(&self, header_name: &HeaderName) -> Option<&HeaderValue> {
        self.headers.get(header_name)
    }
}

/// HTTP 响应
///
/// 只包含状态码，HTTP 头和原始响应体，不对响应体做任何解析
#[derive(Debug, Clone, Default)]
pub struct Response {
    parts: ResponseParts,
    body: Vec<u8>,
}

impl Response {
    /// 返回 HTTP 响应构建器
    #[inline]
    pub fn builder() -> ResponseBuilder {
        Default::default()
    }

    /// HTTP 响应信息
    #[inline]
    pub fn parts(&self) -> &ResponseParts {
        &self.parts
    }

    /// HTTP 状态码
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        self.parts.status_code
    }

    /// HTTP Headers
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// HTTP 响应体
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// 拆分出 HTTP 响应信息和响应体
    #[inline]
    pub fn into_parts_and_body(self) -> (ResponseParts, Vec<u8>) {
        (self.parts, self.body)
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

/// HTTP 响应构建器
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    inner: Response,
}

impl ResponseBuilder {
    /// 设置 HTTP 状态码
    #[inline]
    pub fn status_code(&mut self, status_code: StatusCode) -> &mut Self {
        self.inner.parts.status_code = status_code;
        self
    }

    /// 设置 HTTP Headers
    #[inline]
    pub fn headers(&mut self, headers: HeaderMap) -> &mut Self {
        self.inner.parts.headers = headers;
        self
    }

    /// 添加 HTTP Header
    #[inline]
    pub fn header(&mut self, header_name: HeaderName, header_value: HeaderValue) -> &mut Self {
        self.inner.parts.headers.insert(header_name, header_value);
        self
    }

    /// 设置 HTTP 响应体
    #[inline]
    pub fn body(&mut self, body: impl Into<Vec<u8>>) -> &mut Self {
        self.inner.body = body.into();
        self
    }

    /// 构建 HTTP 响应
    #[inline]
    pub fn build(&mut self) -> Response {
        take(&mut self.inner)
    }
}

/// HTTP 响应结果
pub type Result = result::Result<Response, ResponseError>;
