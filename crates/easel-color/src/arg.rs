/// A numeric argument as the guest supplied it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorArg {
    /// Supplied as an integer: channel value, degrees or percent.
    Integer(i64),
    /// Supplied as a real number: fraction of full scale.
    Real(f64),
}

impl ColorArg {
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// The argument's numeric value, regardless of tag.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(v) => v as f64,
            Self::Real(v) => v,
        }
    }
}

impl From<i64> for ColorArg {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ColorArg {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}
