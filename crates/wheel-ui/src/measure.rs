/// Constraint handed down by the host layout pass for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeasureSpec {
    Exactly(i32),
    AtMost(i32),
    Unspecified,
}

impl MeasureSpec {
    pub fn size(&self) -> i32 {
        match self {
            MeasureSpec::Exactly(size) | MeasureSpec::AtMost(size) => *size,
            MeasureSpec::Unspecified => 0,
        }
    }
}
