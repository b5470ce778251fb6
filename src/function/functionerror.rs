use thiserror::Error;

/// 結構性錯誤（programmer error）。
///
/// 與 `UnivariateFunction::Undefined` 不同：undefined 是資料層級的缺值，
/// 會在運算中靜默傳遞；`FunctionError` 則必須回報給呼叫方。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunctionError {
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),
}

impl FunctionError {
    pub fn invalid_operation(message: impl Into<String>) -> FunctionError {
        FunctionError::InvalidOperation(message.into())
    }

    pub fn invalid_construction(message: impl Into<String>) -> FunctionError {
        FunctionError::InvalidConstruction(message.into())
    }
}
