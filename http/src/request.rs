use super::Method;
use assert_impl::assert_impl;
use http::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::mem::take;
use url::Url;

/// HTTP 请求
///
/// 请求一旦构建就不可修改，由 `RequestFactory` 生成，交给 Worker 执行一次后丢弃。
/// 查询类方法（`GET`，`HEAD`）的请求总是不携带请求体。
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl Request {
    /// 创建 HTTP 请求构建器
    #[inline]
    pub fn builder(method: Method, url: Url) -> RequestBuilder {
        RequestBuilder {
            inner: Request {
                method,
                url,
                headers: Default::default(),
                body: None,
            },
        }
    }

    /// 获取请求 HTTP 方法
    #[inline]
    pub fn method(&self) -> Method {
        self.method
    }

    /// 获取 HTTP 请求 URL
    #[inline]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// 获取请求 HTTP Headers
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// 获取请求体
    #[inline]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// 拆分出请求体
    #[inline]
    pub fn into_body(self) -> Option<Vec<u8>> {
        self.body
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

/// HTTP 请求构建器
///
/// 同名 HTTP 头后写入者覆盖先写入者
#[derive(Debug)]
pub struct RequestBuilder {
    inner: Request,
}

impl RequestBuilder {
    /// 设置 HTTP 请求头
    #[inline]
    pub fn set_header(&mut self, header_name: impl IntoHeaderName, header_value: HeaderValue) -> &mut Self {
        self.inner.headers.insert(header_name, header_value);
        self
    }

    /// 合并 HTTP 请求头，已有的同名 HTTP 头将被覆盖
    #[inline]
    pub fn merge_headers(&mut self, headers: &HeaderMap) -> &mut Self {
        for (name, value) in headers.iter() {
            self.inner.headers.insert(name.to_owned(), value.to_owned());
        }
        self
    }

    /// 设置请求体
    #[inline]
    pub fn body(&mut self, body: impl Into<Vec<u8>>) -> &mut Self {
        self.inner.body = Some(body.into());
        self
    }

    /// 构建 HTTP 请求
    ///
    /// 查询类方法设置的请求体将被丢弃
    pub fn build(&mut self) -> Request {
        let mut request = Request {
            method: self.inner.method,
            url: self.inner.url.to_owned(),
            headers: take(&mut self.inner.headers),
            body: take(&mut self.inner.body),
        };
        if request.method.is_query_only() {
            request.body = None;
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;
    use std::error::Error;

    #[test]
    fn test_later_header_write_wins() -> Result<(), Box<dyn Error>> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        headers.insert("x-extra", HeaderValue::from_static("1"));

        let request = Request::builder(Method::POST, "http://x/y".parse()?)
            .set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .merge_headers(&headers)
            .body(b"{}".to_vec())
            .build();
        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(request.body(), Some(b"{}".as_slice()));
        Ok(())
    }

    #[test]
    fn test_query_only_request_drops_body() -> Result<(), Box<dyn Error>> {
        for method in [Method::GET, Method::HEAD] {
            let request = Request::builder(method, "http://x/y".parse()?).body("ignored").build();
            assert!(request.body().is_none());
        }
        Ok(())
    }
}
