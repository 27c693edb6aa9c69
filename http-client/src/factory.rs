use super::{
    append_query, encode_parameters,
    http::{
        header::{HeaderMap, HeaderValue, CONTENT_TYPE},
        Method, Request, RequestBuilder, Url,
    },
    BuildError, BuildResult, Multipart, Parameters, UploadFile,
};
use log::error;
use serde::Serialize;

const APPLICATION_JSON: &str = "application/json";

/// 请求体类型
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BodyType {
    /// JSON 请求体
    Json,
    /// 表单请求体
    ///
    /// 按 Multipart 格式编码，`Content-Type` 为 `application/form-data; boundary=...`
    FormData,
}

impl Default for BodyType {
    #[inline]
    fn default() -> Self {
        Self::Json
    }
}

/// HTTP 请求工厂
///
/// 将路径，请求参数，HTTP 头和文件组装成不可修改的 [`Request`]，不执行任何 IO。
/// 构建失败时除了返回错误，还会以 `error` 级别输出日志。
#[derive(Debug, Copy, Clone, Default)]
pub struct RequestFactory;

impl RequestFactory {
    /// 构建 HTTP 请求
    ///
    /// 查询类方法将请求参数编码为查询字符串追加到路径上，不携带请求体。
    /// 请求体类方法按 `body_type` 将请求参数编码为请求体，调用者提供的 HTTP 头最后合并，
    /// 因此可以覆盖 `Content-Type`。
    pub fn request(
        method: Method,
        path: &str,
        parameters: Option<&Parameters>,
        headers: Option<&HeaderMap>,
        body_type: BodyType,
    ) -> BuildResult<Request> {
        log_error(
            method,
            path,
            Self::build_request(method, path, parameters, headers, body_type),
        )
    }

    /// 构建以对象序列化得到的 JSON 作为请求体的 HTTP 请求
    ///
    /// 仅支持请求体类方法。序列化失败时，返回的错误中携带不含请求体的部分请求。
    pub fn request_with_object<T: Serialize + ?Sized>(
        method: Method,
        path: &str,
        object: &T,
        headers: Option<&HeaderMap>,
    ) -> BuildResult<Request> {
        log_error(
            method,
            path,
            Self::build_request_with_object(method, path, object, headers),
        )
    }

    /// 构建上传文件的 `POST` 请求
    ///
    /// 先写入文本字段，再以 `field_key` 为字段名写入所有文件。
    /// 调用者提供的 HTTP 头先写入，`Content-Type` 最后设置，总是与请求体的分隔符一致。
    pub fn upload(
        path: &str,
        field_key: &str,
        files: &[UploadFile],
        parameters: Option<&Parameters>,
        headers: Option<&HeaderMap>,
    ) -> BuildResult<Request> {
        log_error(
            Method::POST,
            path,
            Self::build_upload(path, field_key, files, parameters, headers),
        )
    }

    fn build_request(
        method: Method,
        path: &str,
        parameters: Option<&Parameters>,
        headers: Option<&HeaderMap>,
        body_type: BodyType,
    ) -> BuildResult<Request> {
        if method.is_unsupported() {
            return Err(BuildError::UnsupportedMethod(method));
        }
        if method.is_query_only() {
            let query = parameters.map(encode_parameters).unwrap_or_default();
            let mut builder = Request::builder(method, parse_url(&append_query(path, &query))?);
            merge_headers(&mut builder, headers);
            return Ok(builder.build());
        }

        let mut builder = Request::builder(method, parse_url(path)?);
        match body_type {
            BodyType::Json => {
                builder.set_header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
                if let Some(parameters) = parameters {
                    match serde_json::to_vec(parameters) {
                        Ok(body) => {
                            builder.body(body);
                        }
                        Err(err) => return Err(serialization_error(err, builder, headers)),
                    }
                }
            }
            BodyType::FormData => {
                let mut multipart = Multipart::new();
                builder.set_header(
                    CONTENT_TYPE,
                    HeaderValue::from_str(&format!("application/form-data; boundary={}", multipart.boundary()))?,
                );
                if let Some(parameters) = parameters {
                    multipart = multipart.add_parameters(parameters);
                    builder.body(multipart.to_bytes());
                }
            }
        }
        merge_headers(&mut builder, headers);
        Ok(builder.build())
    }

    fn build_request_with_object<T: Serialize + ?Sized>(
        method: Method,
        path: &str,
        object: &T,
        headers: Option<&HeaderMap>,
    ) -> BuildResult<Request> {
        if method.is_unsupported() {
            return Err(BuildError::UnsupportedMethod(method));
        }
        if method.is_query_only() {
            return Err(BuildError::UnsupportedOperation(method));
        }
        let mut builder = Request::builder(method, parse_url(path)?);
        builder.set_header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        match serde_json::to_vec(object) {
            Ok(body) => {
                builder.body(body);
            }
            Err(err) => return Err(serialization_error(err, builder, headers)),
        }
        merge_headers(&mut builder, headers);
        Ok(builder.build())
    }

    fn build_upload(
        path: &str,
        field_key: &str,
        files: &[UploadFile],
        parameters: Option<&Parameters>,
        headers: Option<&HeaderMap>,
    ) -> BuildResult<Request> {
        let mut builder = Request::builder(Method::POST, parse_url(path)?);
        merge_headers(&mut builder, headers);

        let mut multipart = Multipart::new();
        if let Some(parameters) = parameters {
            multipart = multipart.add_parameters(parameters);
        }
        for file in files {
            multipart = multipart.add_file(field_key, file);
        }
        builder
            .set_header(
                CONTENT_TYPE,
                HeaderValue::from_str(&format!("multipart/form-data; boundary={}", multipart.boundary()))?,
            )
            .body(multipart.to_bytes());
        Ok(builder.build())
    }
}

fn parse_url(path: &str) -> BuildResult<Url> {
    Url::parse(path).map_err(|source| BuildError::InvalidUrl {
        path: path.to_owned(),
        source,
    })
}

fn merge_headers(builder: &mut RequestBuilder, headers: Option<&HeaderMap>) {
    if let Some(headers) = headers {
        builder.merge_headers(headers);
    }
}

fn serialization_error(source: serde_json::Error, mut builder: RequestBuilder, headers: Option<&HeaderMap>) -> BuildError {
    merge_headers(&mut builder, headers);
    BuildError::Serialization {
        source,
        request: Box::new(builder.build()),
    }
}

fn log_error(method: Method, path: &str, result: BuildResult<Request>) -> BuildResult<Request> {
    result.map_err(|err| {
        error!("Failed to build {} request for {}: {}", method, path, err);
        err
    })
}
