//! Placeholder grammar using winnow.
//!
//! Input is the text between the two `#` delimiters. The whole span must be
//! consumed for a match; anything else is not a placeholder.

use winnow::ascii::digit1;
use winnow::combinator::{alt, eof, opt, preceded, terminated};
use winnow::prelude::*;

use super::token::Placeholder;

/// Parse the inner text of a `#...#` span into a placeholder.
///
/// Returns `None` if the span is not part of the placeholder vocabulary.
///
/// ```
/// use seo_switch::parser::{Placeholder, parse_placeholder};
///
/// assert_eq!(
///     parse_placeholder("CompSwitch_3_2066"),
///     Some(Placeholder::CompSwitch { slot: 3, category_id: 2066 })
/// );
/// assert_eq!(parse_placeholder("Unknown"), None);
/// ```
pub fn parse_placeholder(inner: &str) -> Option<Placeholder> {
    let mut input = inner;
    terminated(placeholder, eof).parse_next(&mut input).ok()
}

fn placeholder(input: &mut &str) -> ModalResult<Placeholder> {
    alt((comp_switch, link_gamme_car, derived)).parse_next(input)
}

/// `CompSwitch_<slot>_<category>` or `CompSwitch_<category>`.
fn comp_switch(input: &mut &str) -> ModalResult<Placeholder> {
    preceded("CompSwitch", (id_segment, opt(id_segment)))
        .map(|(first, second)| match second {
            Some(category_id) => Placeholder::CompSwitch {
                slot: first,
                category_id,
            },
            None => Placeholder::CompSwitchSelf { category_id: first },
        })
        .parse_next(input)
}

fn link_gamme_car(input: &mut &str) -> ModalResult<Placeholder> {
    preceded("LinkGammeCar", id_segment)
        .map(|category_id| Placeholder::LinkGammeCar { category_id })
        .parse_next(input)
}

fn derived(input: &mut &str) -> ModalResult<Placeholder> {
    alt((
        "VCarosserie".value(Placeholder::BodyStyle),
        "VMotorisation".value(Placeholder::FuelType),
        "VCodeMoteur".value(Placeholder::EngineCodes),
        "PrixPasCher".value(Placeholder::CheapPriceVariant),
        "VousPropose".value(Placeholder::OfferVariant),
        "MinPrice".value(Placeholder::MinPrice),
    ))
    .parse_next(input)
}

/// `_<digits>`, leading zeros allowed.
fn id_segment(input: &mut &str) -> ModalResult<u32> {
    preceded('_', digit1.try_map(str::parse::<u32>)).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_trailing_segments() {
        assert_eq!(parse_placeholder("CompSwitch_1_2_3"), None);
        assert_eq!(parse_placeholder("MinPrice_1"), None);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert_eq!(parse_placeholder("CompSwitch_a_2"), None);
        assert_eq!(parse_placeholder("LinkGammeCar_"), None);
        assert_eq!(parse_placeholder("CompSwitch"), None);
    }

    #[test]
    fn rejects_overflowing_ids() {
        assert_eq!(parse_placeholder("CompSwitch_99999999999"), None);
    }

    #[test]
    fn zero_padded_ids() {
        assert_eq!(
            parse_placeholder("CompSwitch_05_9"),
            Some(Placeholder::CompSwitch {
                slot: 5,
                category_id: 9
            })
        );
        assert_eq!(
            parse_placeholder("LinkGammeCar_0042"),
            Some(Placeholder::LinkGammeCar { category_id: 42 })
        );
        assert_eq!(
            parse_placeholder("CompSwitch_0"),
            Some(Placeholder::CompSwitchSelf { category_id: 0 })
        );
        assert_eq!(parse_placeholder("CompSwitch_000099999999999"), None);
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(parse_placeholder("minprice"), None);
        assert_eq!(parse_placeholder("MinPrice"), Some(Placeholder::MinPrice));
    }
}
