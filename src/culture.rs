//! Locale descriptors and number-style flags for the parsing helpers.

use bitflags::bitflags;
use log::warn;

use crate::constants::CULTURE_ENV_VARS;

bitflags! {
    /// Which lexical elements a numeric literal may contain.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NumberStyles: u16 {
        const ALLOW_LEADING_WHITE = 0b0000_0000_0001;
        const ALLOW_TRAILING_WHITE = 0b0000_0000_0010;
        const ALLOW_LEADING_SIGN = 0b0000_0000_0100;
        const ALLOW_TRAILING_SIGN = 0b0000_0000_1000;
        const ALLOW_PARENTHESES = 0b0000_0001_0000;
        const ALLOW_DECIMAL_POINT = 0b0000_0010_0000;
        const ALLOW_THOUSANDS = 0b0000_0100_0000;
        const ALLOW_EXPONENT = 0b0000_1000_0000;
        const ALLOW_CURRENCY_SYMBOL = 0b0001_0000_0000;
        const ALLOW_HEX_SPECIFIER = 0b0010_0000_0000;

        const INTEGER = Self::ALLOW_LEADING_WHITE.bits()
            | Self::ALLOW_TRAILING_WHITE.bits()
            | Self::ALLOW_LEADING_SIGN.bits();
        const HEX_NUMBER = Self::ALLOW_LEADING_WHITE.bits()
            | Self::ALLOW_TRAILING_WHITE.bits()
            | Self::ALLOW_HEX_SPECIFIER.bits();
        const NUMBER = Self::INTEGER.bits()
            | Self::ALLOW_TRAILING_SIGN.bits()
            | Self::ALLOW_DECIMAL_POINT.bits()
            | Self::ALLOW_THOUSANDS.bits();
        const FLOAT = Self::INTEGER.bits()
            | Self::ALLOW_DECIMAL_POINT.bits()
            | Self::ALLOW_EXPONENT.bits();
        const CURRENCY = Self::NUMBER.bits()
            | Self::ALLOW_PARENTHESES.bits()
            | Self::ALLOW_CURRENCY_SYMBOL.bits();
        const ANY = Self::CURRENCY.bits() | Self::ALLOW_EXPONENT.bits();
    }
}

/// Field order used when a date is written with slashes or dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

/// Locale rules for numeric separators, signs, dates and casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
    pub name: &'static str,
    pub decimal_separator: &'static str,
    pub group_separator: &'static str,
    pub negative_sign: &'static str,
    pub positive_sign: &'static str,
    pub currency_symbol: &'static str,
    pub date_order: DateOrder,
    /// Turkic casing: `i` upper-cases to `İ` and `I` lower-cases to `ı`.
    pub dotted_i: bool,
}

const INVARIANT: Culture = Culture {
    name: "",
    decimal_separator: ".",
    group_separator: ",",
    negative_sign: "-",
    positive_sign: "+",
    currency_symbol: "\u{a4}",
    date_order: DateOrder::MonthDayYear,
    dotted_i: false,
};

const KNOWN_CULTURES: &[Culture] = &[
    Culture { name: "en-US", currency_symbol: "$", ..INVARIANT },
    Culture {
        name: "en-GB",
        currency_symbol: "\u{a3}",
        date_order: DateOrder::DayMonthYear,
        ..INVARIANT
    },
    Culture {
        name: "pt-BR",
        decimal_separator: ",",
        group_separator: ".",
        currency_symbol: "R$",
        date_order: DateOrder::DayMonthYear,
        ..INVARIANT
    },
    Culture {
        name: "de-DE",
        decimal_separator: ",",
        group_separator: ".",
        currency_symbol: "\u{20ac}",
        date_order: DateOrder::DayMonthYear,
        ..INVARIANT
    },
    Culture {
        name: "fr-FR",
        decimal_separator: ",",
        group_separator: "\u{a0}",
        currency_symbol: "\u{20ac}",
        date_order: DateOrder::DayMonthYear,
        ..INVARIANT
    },
    Culture {
        name: "tr-TR",
        decimal_separator: ",",
        group_separator: ".",
        currency_symbol: "\u{20ba}",
        date_order: DateOrder::DayMonthYear,
        dotted_i: true,
        ..INVARIANT
    },
];

impl Culture {
    pub fn invariant() -> Self {
        INVARIANT
    }

    /// Looks up a culture by name.
    ///
    /// Accepts BCP-47 (`pt-BR`) and POSIX locale (`pt_BR.UTF-8`) spellings,
    /// and bare languages (`pt`) which resolve to the first known region.
    /// `C`, `POSIX` and the empty string are the invariant culture.
    pub fn from_name(name: &str) -> Option<Self> {
        let base = name.split(['.', '@']).next().unwrap_or_default().replace('_', "-");
        if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
            return Some(INVARIANT);
        }
        if base.eq_ignore_ascii_case("invariant") {
            return Some(INVARIANT);
        }
        KNOWN_CULTURES
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(&base))
            .or_else(|| {
                let language = base.split('-').next().unwrap_or_default();
                KNOWN_CULTURES.iter().find(|c| {
                    c.name
                        .split('-')
                        .next()
                        .is_some_and(|l| l.eq_ignore_ascii_case(language))
                })
            })
            .cloned()
    }

    /// The culture of the running process, from the first non-empty of the
    /// locale environment variables. Unknown locales fall back to invariant.
    pub fn current() -> Self {
        let Some(locale) = CULTURE_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
        else {
            return INVARIANT;
        };

        Self::from_name(&locale).unwrap_or_else(|| {
            warn!("Unknown locale '{locale}', using the invariant culture");
            INVARIANT
        })
    }

    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    pub fn push_upper(&self, c: char, out: &mut String) {
        match c {
            'i' if self.dotted_i => out.push('\u{130}'),
            _ => out.extend(c.to_uppercase()),
        }
    }

    pub fn push_lower(&self, c: char, out: &mut String) {
        match c {
            'I' if self.dotted_i => out.push('\u{131}'),
            '\u{130}' if self.dotted_i => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}
