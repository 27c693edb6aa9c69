use super::http::TransportOptions;
use once_cell::sync::Lazy;
use std::{
    env,
    fmt::Debug,
    sync::{Arc, PoisonError, RwLock},
};

/// Worker 配置
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    logging_enabled: bool,
    transport_options: TransportOptions,
}

impl Config {
    /// 创建 Worker 配置构建器
    #[inline]
    pub fn builder() -> ConfigBuilder {
        Default::default()
    }

    /// 是否输出请求与响应日志
    #[inline]
    pub fn logging_enabled(&self) -> bool {
        self.logging_enabled
    }

    /// 传输层选项
    #[inline]
    pub fn transport_options(&self) -> &TransportOptions {
        &self.transport_options
    }
}

/// Worker 配置构建器
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    inner: Config,
}

impl ConfigBuilder {
    /// 设置是否输出请求与响应日志
    #[inline]
    pub fn logging_enabled(&mut self, enabled: bool) -> &mut Self {
        self.inner.logging_enabled = enabled;
        self
    }

    /// 设置传输层选项
    #[inline]
    pub fn transport_options(&mut self, options: TransportOptions) -> &mut Self {
        self.inner.transport_options = options;
        self
    }

    /// 构建 Worker 配置
    #[inline]
    pub fn build(&mut self) -> Config {
        self.inner.to_owned()
    }
}

/// 配置提供者
///
/// Worker 在创建时读取一次配置
pub trait ConfigProvider: Debug + Send + Sync {
    /// 获取配置
    fn get(&self) -> Config;
}

impl<T: ConfigProvider + ?Sized> ConfigProvider for Arc<T> {
    #[inline]
    fn get(&self) -> Config {
        T::get(self)
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProvider for Box<T> {
    #[inline]
    fn get(&self) -> Config {
        T::get(self)
    }
}

/// 静态配置提供者，总是返回固定的配置
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticConfigProvider {
    config: Config,
}

impl StaticConfigProvider {
    /// 创建静态配置提供者
    #[inline]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigProvider for StaticConfigProvider {
    #[inline]
    fn get(&self) -> Config {
        self.config.to_owned()
    }
}

impl From<Config> for StaticConfigProvider {
    #[inline]
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}

/// 全局配置提供者，可以将配置保存在全局变量中。任何全局配置提供者实例都可以设置和访问全局配置。
///
/// 未设置全局配置时返回默认配置
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct GlobalConfigProvider;

static GLOBAL_CONFIG: Lazy<RwLock<Option<Config>>> = Lazy::new(|| RwLock::new(None));

impl GlobalConfigProvider {
    /// 配置全局配置
    pub fn setup(config: Config) {
        *GLOBAL_CONFIG.write().unwrap_or_else(PoisonError::into_inner) = Some(config);
    }

    /// 清空全局配置
    pub fn clear() {
        *GLOBAL_CONFIG.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl ConfigProvider for GlobalConfigProvider {
    fn get(&self) -> Config {
        GLOBAL_CONFIG
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .cloned()
            .unwrap_or_default()
    }
}

/// 设置是否输出请求与响应日志的环境变量
pub const ACNET_LOGGING_ENABLED_ENV_KEY: &str = "ACNET_LOGGING_ENABLED";

/// 环境变量配置提供者
///
/// 从环境变量 `ACNET_LOGGING_ENABLED` 读取日志开关，接受 `1`，`true`，`yes`，`on`（不区分大小写），
/// 其余配置项使用默认值
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct EnvConfigProvider;

impl ConfigProvider for EnvConfigProvider {
    fn get(&self) -> Config {
        let logging_enabled = env::var(ACNET_LOGGING_ENABLED_ENV_KEY).map_or(false, |value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        });
        Config::builder().logging_enabled(logging_enabled).build()
    }
}
