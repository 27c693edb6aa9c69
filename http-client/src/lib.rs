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

//! # acnet-http-client
//!
//! ## 轻量级 HTTP 客户端
//!
//! 将路径，请求参数，HTTP 头和上传文件组装为不可修改的 HTTP 请求，
//! 交给可替换的传输层执行，并登记正在执行的任务以便取消。
//!
//! - [`RequestFactory`] 构建请求：查询类方法将参数编码为查询字符串，
//!   请求体类方法将参数编码为 JSON 或 Multipart 请求体，[`RequestFactory::upload`] 上传文件。
//! - [`RemoteWorker`] 执行请求，每个请求恰好调用一次完成回调，可以通过 [`TaskHandle`] 取消。
//! - [`ThreadedTransport`] 将任意阻塞的 [`http::HttpCaller`] 包装为传输层。
//!
//! 本库不实现网络 IO，不重试，不解析响应体。

mod config;
mod error;
mod factory;
mod multipart;
mod parameters;
mod query;
mod task_handle;
mod threaded;
mod worker;

#[cfg(test)]
mod test_utils;

/// HTTP 接口库
pub extern crate acnet_http as http;

pub use config::{
    Config, ConfigBuilder, ConfigProvider, EnvConfigProvider, GlobalConfigProvider, StaticConfigProvider,
    ACNET_LOGGING_ENABLED_ENV_KEY,
};
pub use error::{BuildError, BuildResult};
pub use factory::{BodyType, RequestFactory};
pub use multipart::{Boundary, Multipart, UploadFile};
pub use parameters::{Iter as ParametersIter, ParameterValue, Parameters};
pub use query::{append_query, encode_parameters};
pub use task_handle::TaskHandle;
pub use threaded::ThreadedTransport;
pub use worker::{PendingResponse, RemoteWorker, RemoteWorkerBuilder};
