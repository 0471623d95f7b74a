//! 取消分组标记。

use std::fmt;
use std::sync::Arc;

/// 调用方提供的分组标记：同一组下载请求共享同一个 sign，
/// 之后可以用 [`DispatchQueue::cancel_all`](crate::dispatch::DispatchQueue::cancel_all) 一次性取消整组。
///
/// 字符串和整数是两类不同的标记：`Sign::from(7)` 与 `Sign::from("7")` 不相等。
/// 整数按数值比较，与构造时的整数宽度无关。clone 开销很小。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sign(SignRepr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SignRepr {
    Str(Arc<str>),
    Int(i128),
}

impl Sign {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(SignRepr::Str(Arc::from(value.as_ref())))
    }

    /// 字符串标记的内容，整数标记返回 `None`
    pub fn as_str(&self) -> Option<&str> {
        match &self.0 {
            SignRepr::Str(value) => Some(value),
            SignRepr::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i128> {
        match self.0 {
            SignRepr::Int(value) => Some(value),
            SignRepr::Str(_) => None,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            SignRepr::Str(value) => f.write_str(value),
            SignRepr::Int(value) => write!(f, "#{}", value),
        }
    }
}

impl From<&str> for Sign {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Sign {
    fn from(value: String) -> Self {
        Self(SignRepr::Str(Arc::from(value)))
    }
}

impl From<i32> for Sign {
    fn from(value: i32) -> Self {
        Self(SignRepr::Int(i128::from(value)))
    }
}

impl From<u32> for Sign {
    fn from(value: u32) -> Self {
        Self(SignRepr::Int(i128::from(value)))
    }
}

impl From<i64> for Sign {
    fn from(value: i64) -> Self {
        Self(SignRepr::Int(i128::from(value)))
    }
}

impl From<u64> for Sign {
    fn from(value: u64) -> Self {
        Self(SignRepr::Int(i128::from(value)))
    }
}

impl From<&Sign> for Sign {
    fn from(value: &Sign) -> Self {
        value.clone()
    }
}
