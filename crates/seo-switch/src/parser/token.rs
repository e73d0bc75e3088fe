use std::fmt::{Display, Formatter, Result as FmtResult};

/// A recognized placeholder with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `#CompSwitch_<slot>_<category_id>#`
    CompSwitch { slot: u32, category_id: u32 },
    /// `#CompSwitch_<category_id>#`, resolves the main slot.
    CompSwitchSelf { category_id: u32 },
    /// `#LinkGammeCar_<category_id>#`
    LinkGammeCar { category_id: u32 },
    /// `#VCarosserie#`
    BodyStyle,
    /// `#VMotorisation#`
    FuelType,
    /// `#VCodeMoteur#`
    EngineCodes,
    /// `#PrixPasCher#`
    CheapPriceVariant,
    /// `#VousPropose#`
    OfferVariant,
    /// `#MinPrice#`
    MinPrice,
}

/// Canonical placeholder spelling, including delimiters.
impl Display for Placeholder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Placeholder::CompSwitch { slot, category_id } => {
                write!(f, "#CompSwitch_{slot}_{category_id}#")
            }
            Placeholder::CompSwitchSelf { category_id } => write!(f, "#CompSwitch_{category_id}#"),
            Placeholder::LinkGammeCar { category_id } => write!(f, "#LinkGammeCar_{category_id}#"),
            Placeholder::BodyStyle => f.write_str("#VCarosserie#"),
            Placeholder::FuelType => f.write_str("#VMotorisation#"),
            Placeholder::EngineCodes => f.write_str("#VCodeMoteur#"),
            Placeholder::CheapPriceVariant => f.write_str("#PrixPasCher#"),
            Placeholder::OfferVariant => f.write_str("#VousPropose#"),
            Placeholder::MinPrice => f.write_str("#MinPrice#"),
        }
    }
}

/// One item of a parsed template.
///
/// Both variants borrow from the template, so scanning never copies text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text emitted unchanged.
    Literal(&'a str),
    /// A recognized placeholder and the exact source text it was parsed from.
    Placeholder {
        placeholder: Placeholder,
        source: &'a str,
    },
}

impl<'a> Token<'a> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Token::Placeholder { .. })
    }

    /// The template text this token was scanned from.
    pub fn source(&self) -> &'a str {
        match self {
            Token::Literal(text) => text,
            Token::Placeholder { source, .. } => source,
        }
    }
}
