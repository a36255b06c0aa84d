use std::fmt::{Display, Formatter};

/// Common UART baud rates.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u32)]
pub enum BaudRate {
    /// 9600 baud.
    B9600 = 9_600,
    /// 19200 baud.
    B19200 = 19_200,
    /// 38400 baud.
    B38400 = 38_400,
    /// 57600 baud.
    B57600 = 57_600,
    /// 115200 baud.
    #[default]
    B115200 = 115_200,
}

impl From<BaudRate> for u32 {
    fn from(baud_rate: BaudRate) -> Self {
        baud_rate as Self
    }
}

impl Display for BaudRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u32::from(*self))
    }
}

#[cfg(feature = "cli")]
impl clap::ValueEnum for BaudRate {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::B9600,
            Self::B19200,
            Self::B38400,
            Self::B57600,
            Self::B115200,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::B9600 => clap::builder::PossibleValue::new("9600").alias("B9600"),
            Self::B19200 => clap::builder::PossibleValue::new("19200").alias("B19200"),
            Self::B38400 => clap::builder::PossibleValue::new("38400").alias("B38400"),
            Self::B57600 => clap::builder::PossibleValue::new("57600").alias("B57600"),
            Self::B115200 => clap::builder::PossibleValue::new("115200").alias("B115200"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::BaudRate;

    #[test]
    fn test_into_u32() {
        assert_eq!(u32::from(BaudRate::B9600), 9600);
        assert_eq!(u32::from(BaudRate::default()), 115_200);
    }

    #[test]
    fn test_to_string() {
        assert_eq!(BaudRate::B57600.to_string(), "57600");
    }
}
