use std::{error::Error, fmt, str::FromStr};

/// HTTP 方法
///
/// 按照请求参数的提交方式分为三类：
///
/// - 查询类方法（`GET`，`HEAD`），参数只能通过 URL 查询字符串提交，不携带请求体
/// - 请求体类方法（`POST`，`PUT`，`PATCH`，`DELETE`），参数通过请求体提交
/// - 暂不支持的方法（`OPTIONS`，`TRACE`，`CONNECT`）
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET 方法
    GET,
    /// HEAD 方法
    HEAD,
    /// POST 方法
    POST,
    /// PUT 方法
    PUT,
    /// PATCH 方法
    PATCH,
    /// DELETE 方法
    DELETE,
    /// OPTIONS 方法
    OPTIONS,
    /// TRACE 方法
    TRACE,
    /// CONNECT 方法
    CONNECT,
}

impl Method {
    /// 将 HTTP 方法转换成字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
            Method::TRACE => "TRACE",
            Method::CONNECT => "CONNECT",
        }
    }

    /// 是否为查询类方法
    #[inline]
    pub fn is_query_only(&self) -> bool {
        matches!(self, Method::GET | Method::HEAD)
    }

    /// 是否为请求体类方法
    #[inline]
    pub fn is_body_capable(&self) -> bool {
        matches!(self, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
    }

    /// 是否为暂不支持的方法
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Method::OPTIONS | Method::TRACE | Method::CONNECT)
    }
}

impl FromStr for Method {
    type Err = InvalidMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            "OPTIONS" => Ok(Method::OPTIONS),
            "TRACE" => Ok(Method::TRACE),
            "CONNECT" => Ok(Method::CONNECT),
            method => Err(InvalidMethod(method.into())),
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::HEAD => http::Method::HEAD,
            Method::POST => http::Method::POST,
            Method::PUT => http::Method::PUT,
            Method::PATCH => http::Method::PATCH,
            Method::DELETE => http::Method::DELETE,
            Method::OPTIONS => http::Method::OPTIONS,
            Method::TRACE => http::Method::TRACE,
            Method::CONNECT => http::Method::CONNECT,
        }
    }
}

impl AsRef<str> for Method {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Method {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<'a> PartialEq<&'a str> for Method {
    #[inline]
    fn eq(&self, other: &&'a str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Method {
    #[inline]
    fn default() -> Method {
        Method::GET
    }
}

/// 非法的 HTTP 方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMethod(Box<str>);

impl InvalidMethod {
    /// 获取非法的方法名称
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvalidMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid HTTP method: {}", self.0)
    }
}

impl Error for InvalidMethod {}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Method; 9] = [
        Method::GET,
        Method::HEAD,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
        Method::TRACE,
        Method::CONNECT,
    ];

    #[test]
    fn test_method_categories_are_disjoint() {
        for method in ALL {
            let categories = [method.is_query_only(), method.is_body_capable(), method.is_unsupported()];
            assert_eq!(categories.iter().filter(|&&c| c).count(), 1, "{}", method);
        }
        assert!(Method::HEAD.is_query_only());
        assert!(Method::DELETE.is_body_capable());
        assert!(Method::CONNECT.is_unsupported());
    }

    #[test]
    fn test_method_from_str() {
        for method in ALL {
            assert_eq!(method.as_str().parse::<Method>(), Ok(method));
            assert_eq!(http::Method::from(method).as_str(), method.as_str());
        }
        let err = "get".parse::<Method>().unwrap_err();
        assert_eq!(err.as_str(), "get");
    }
}
