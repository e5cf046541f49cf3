/// Configuration mistakes rejected when a wheel or adapter is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelError {
    InvalidVisibleItems { count: i32 },
    InvalidRange { min: i64, max: i64 },
}

impl std::fmt::Display for WheelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WheelError::InvalidVisibleItems { count } => {
                write!(f, "visible item count must be positive, got {count}")
            }
            WheelError::InvalidRange { min, max } => {
                write!(f, "numeric range is empty: min {min} > max {max}")
            }
        }
    }
}

impl std::error::Error for WheelError {}
