#![cfg_attr(feature = "docs", feature(doc_cfg))]
#![deny(
    single_use_lifetimes,
    missing_debug_implementations,
    absolute_paths_not_starting_with_crate,
    anonymous_parameters,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_docs,
    non_ascii_idents,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unstable_features,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications
)]

//! # acnet-http
//!
//! ## HTTP 接口库
//!
//! 为 `acnet-http-client` 和传输层实现者提供共用的 HTTP 类型：
//! 不可修改的 HTTP 请求，原始 HTTP 响应，传输层错误以及传输层接口。
//! 本库不实现任何网络 IO。

mod error;
mod method;
mod request;
mod response;
mod transport;

pub use error::{Error as ResponseError, ErrorKind as ResponseErrorKind};
pub use http::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    status::StatusCode,
};
pub use method::{InvalidMethod, Method};
pub use request::{Request, RequestBuilder};
pub use response::{Response, ResponseBuilder, ResponseParts, Result as ResponseResult};
pub use transport::{HttpCaller, OnComplete, Transport, TransportOptions, TransportTask};
pub use url::{self, Url};
