use encoding_rs::WINDOWS_1251;
use oem_cp::decode_string_complete_table;
use oem_cp::code_table::DECODING_TABLE_CP850;
use std::path::Path;

use crate::error::{Error, Result};

/// Codepage used to decode strings embedded in a savegame.
///
/// Selected once, from the save's file name, before parsing begins; see
/// [`determine_encoding`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Encoding {
    /// Strict UTF-8, falling back to IBM code page 850 on invalid bytes.
    Utf8OrLatin1,
    /// Windows-1251 (Cyrillic).
    Cyrillic,
}

impl Encoding {
    pub(crate) fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Utf8OrLatin1 => match std::str::from_utf8(bytes) {
                Ok(s) => Ok(s.to_owned()),
                Err(_) => Ok(decode_string_complete_table(bytes, &DECODING_TABLE_CP850)),
            },
            Self::Cyrillic => {
                let (text, _, had_errors) = WINDOWS_1251.decode(bytes);
                if had_errors {
                    Err(Error::Decode)
                } else {
                    Ok(text.into_owned())
                }
            }
        }
    }
}

/// Picks an encoding from a save's file name.
///
/// The file's 4-character extension (this crate's formats all use a
/// 4-character extension, `.ess` or `.fos`) is dropped, then digits,
/// `-`, `.`, and space are filtered out of what remains. If what's left
/// is more than half Cyrillic code points (`U+0400..=U+052F`), the save
/// is assumed to be named in Cyrillic and decoded as Windows-1251.
pub(crate) fn determine_encoding(path: &Path) -> Encoding {
    let stem: String = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => {
            let chars: Vec<char> = name.chars().collect();
            let keep = chars.len().saturating_sub(4);
            chars[..keep].iter().collect()
        }
        None => String::new(),
    };

    let filtered: Vec<char> = stem
        .chars()
        .filter(|c| !(c.is_ascii_digit() || *c == '-' || *c == '.' || *c == ' '))
        .collect();

    if filtered.is_empty() {
        return Encoding::Utf8OrLatin1;
    }

    let cyrillic = filtered
        .iter()
        .filter(|c| ('\u{0400}'..='\u{052F}').contains(c))
        .count();

    if cyrillic * 2 > filtered.len() {
        Encoding::Cyrillic
    } else {
        Encoding::Utf8OrLatin1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cyrillic_name_is_detected() {
        let path = PathBuf::from("Иван-01.ess");
        assert_eq!(determine_encoding(&path), Encoding::Cyrillic);
    }

    #[test]
    fn latin_name_is_utf8_or_latin1() {
        let path = PathBuf::from("Save 7.ess");
        assert_eq!(determine_encoding(&path), Encoding::Utf8OrLatin1);
    }

    #[test]
    fn empty_after_filtering_falls_back() {
        let path = PathBuf::from("0001.ess");
        assert_eq!(determine_encoding(&path), Encoding::Utf8OrLatin1);
    }

    #[test]
    fn ascii_round_trips() {
        assert_eq!(
            Encoding::Utf8OrLatin1.decode(b"Whiterun").unwrap(),
            "Whiterun"
        );
    }
}
