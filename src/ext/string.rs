use cruet::case::{
    camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case, snake::to_snake_case,
    train::to_train_case,
};
use md5::{Digest, Md5};
use sha2::Sha256;

use crate::culture::Culture;
use crate::error::{Error, Result};
use crate::xml;

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}')
}

/// Extension trait adding text utilities to `str`.
pub trait StrExt {
    /// Title-cases the string using the current culture.
    ///
    /// # Examples
    /// ```
    /// use convext::ext::StrExt;
    ///
    /// assert_eq!("hello world".capitalize(), "Hello World");
    /// ```
    fn capitalize(&self) -> String;

    /// Title-cases the string with the casing rules of `culture`.
    ///
    /// A word is a run of letters, apostrophes included when they sit between
    /// two letters. Words already written entirely in upper case are treated
    /// as acronyms and left alone; every other word gets an upper-case first
    /// letter followed by lower case.
    fn capitalize_with(&self, culture: &Culture) -> String;

    /// Splits on a literal separator and drops empty segments.
    ///
    /// An empty separator yields the whole string as its only segment.
    fn split_non_empty<'a>(&'a self, separator: &str) -> Vec<&'a str>;

    /// Keeps only ASCII letters and digits.
    fn remove_special_characters(&self) -> String;

    /// MD5 digest of the ASCII bytes as upper-case hex.
    ///
    /// # Errors
    /// Returns `Error::Encoding` for the first character outside ASCII.
    fn to_md5(&self) -> Result<String>;

    /// SHA-256 digest of the UTF-8 bytes as upper-case hex.
    fn to_sha256(&self) -> String;

    /// Joins every character with `separator`.
    fn join_chars(&self, separator: &str) -> String;

    fn to_camel_case(&self) -> String;
    fn to_pascal_case(&self) -> String;
    fn to_snake_case(&self) -> String;
    fn to_kebab_case(&self) -> String;
    fn to_train_case(&self) -> String;

    /// See [`xml::xml_to_json`].
    fn xml_to_json(&self) -> Result<String>;

    /// See [`xml::json_to_xml`].
    fn json_to_xml(&self) -> Result<String>;
}

impl StrExt for str {
    fn capitalize(&self) -> String {
        self.capitalize_with(&Culture::current())
    }

    fn capitalize_with(&self, culture: &Culture) -> String {
        let chars: Vec<char> = self.chars().collect();
        let mut out = String::with_capacity(self.len());
        let mut i = 0;

        while i < chars.len() {
            if !chars[i].is_alphabetic() {
                out.push(chars[i]);
                i += 1;
                continue;
            }

            let start = i;
            while i < chars.len()
                && (chars[i].is_alphabetic()
                    || (is_apostrophe(chars[i])
                        && chars.get(i + 1).is_some_and(|c| c.is_alphabetic())))
            {
                i += 1;
            }
            let word = &chars[start..i];

            if word.iter().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase()) {
                out.extend(word);
                continue;
            }
            culture.push_upper(word[0], &mut out);
            for &c in &word[1..] {
                culture.push_lower(c, &mut out);
            }
        }
        out
    }

    fn split_non_empty<'a>(&'a self, separator: &str) -> Vec<&'a str> {
        if separator.is_empty() {
            return if self.is_empty() { Vec::new() } else { vec![self] };
        }
        self.split(separator).filter(|part| !part.is_empty()).collect()
    }

    fn remove_special_characters(&self) -> String {
        self.chars().filter(char::is_ascii_alphanumeric).collect()
    }

    fn to_md5(&self) -> Result<String> {
        if let Some((position, character)) = self.chars().enumerate().find(|(_, c)| !c.is_ascii())
        {
            return Err(Error::Encoding { character, position });
        }
        Ok(hex::encode_upper(Md5::digest(self.as_bytes())))
    }

    fn to_sha256(&self) -> String {
        hex::encode_upper(Sha256::digest(self.as_bytes()))
    }

    fn join_chars(&self, separator: &str) -> String {
        let mut out = String::with_capacity(self.len() * (separator.len() + 1));
        for (i, c) in self.chars().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push(c);
        }
        out
    }

    fn to_camel_case(&self) -> String {
        to_camel_case(self)
    }

    fn to_pascal_case(&self) -> String {
        to_pascal_case(self)
    }

    fn to_snake_case(&self) -> String {
        to_snake_case(self)
    }

    fn to_kebab_case(&self) -> String {
        to_kebab_case(self)
    }

    fn to_train_case(&self) -> String {
        to_train_case(self)
    }

    fn xml_to_json(&self) -> Result<String> {
        xml::xml_to_json(self)
    }

    fn json_to_xml(&self) -> Result<String> {
        xml::json_to_xml(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_title_cases_words() {
        let invariant = Culture::invariant();
        assert_eq!("hello world".capitalize_with(&invariant), "Hello World");
        assert_eq!("hELLO wORLD".capitalize_with(&invariant), "Hello World");
        assert_eq!("".capitalize_with(&invariant), "");
        assert_eq!("  two  spaces ".capitalize_with(&invariant), "  Two  Spaces ");
    }

    #[test]
    fn capitalize_keeps_acronyms_and_contractions() {
        let invariant = Culture::invariant();
        assert_eq!("the NASA rover".capitalize_with(&invariant), "The NASA Rover");
        assert_eq!("don't stop".capitalize_with(&invariant), "Don't Stop");
        assert_eq!("o'neil-smith".capitalize_with(&invariant), "O'neil-Smith");
    }

    #[test]
    fn capitalize_follows_turkish_casing() {
        let tr = Culture::from_name("tr-TR").unwrap();
        assert_eq!("istanbul".capitalize_with(&tr), "\u{130}stanbul");
        assert_eq!("izMIR".capitalize_with(&tr), "\u{130}zm\u{131}r");
    }

    #[test]
    fn split_drops_empty_segments() {
        assert_eq!("a,,b,".split_non_empty(","), vec!["a", "b"]);
        assert_eq!("a--b----c".split_non_empty("--"), vec!["a", "b", "c"]);
        assert!(",,,".split_non_empty(",").is_empty());
        assert!("".split_non_empty(",").is_empty());
        assert_eq!("abc".split_non_empty(""), vec!["abc"]);
    }

    #[test]
    fn remove_special_characters_keeps_ascii_alphanumerics() {
        assert_eq!("Héllo, Wörld! 42".remove_special_characters(), "HlloWrld42");
        assert_eq!("".remove_special_characters(), "");
    }

    #[test]
    fn md5_is_upper_case_hex() {
        assert_eq!("".to_md5().unwrap(), "D41D8CD98F00B204E9800998ECF8427E");
        assert_eq!("abc".to_md5().unwrap(), "900150983CD24FB0D6963F7D28E17F72");
        assert_ne!("abc".to_md5().unwrap(), "abd".to_md5().unwrap());
    }

    #[test]
    fn md5_rejects_non_ascii() {
        let err = "ab\u{e7}d".to_md5().unwrap_err();
        assert!(matches!(err, Error::Encoding { character: '\u{e7}', position: 2 }));
    }

    #[test]
    fn sha256_is_upper_case_hex() {
        assert_eq!(
            "abc".to_sha256(),
            "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD"
        );
    }

    #[test]
    fn join_chars_interleaves_the_separator() {
        assert_eq!("abc".join_chars("-"), "a-b-c");
        assert_eq!("a".join_chars(", "), "a");
        assert_eq!("".join_chars("-"), "");
    }

    #[test]
    fn case_conversions() {
        assert_eq!("order line item".to_camel_case(), "orderLineItem");
        assert_eq!("order_line_item".to_pascal_case(), "OrderLineItem");
        assert_eq!("OrderLineItem".to_snake_case(), "order_line_item");
        assert_eq!("OrderLineItem".to_kebab_case(), "order-line-item");
        assert_eq!("order_line_item".to_train_case(), "Order-Line-Item");
    }
}
