//! Input parsing and validation for Glyphart requests
//!
//! The first stop for anything a user types or uploads. Text gets its line
//! endings normalized and control characters stripped; images get their size
//! and signature checked before anyone tries to decode them.

use glyphart_core::{
    error::ValidationError,
    request::{keyword_stem, RasterSource},
    traits::{InputValidator, TextField},
};

/// Size limits applied by [`DefaultValidator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    pub max_text_chars: usize,
    pub max_poem_chars: usize,
    pub max_keyword_chars: usize,
    pub max_image_bytes: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_text_chars: 1000,
            max_poem_chars: 5000,
            max_keyword_chars: 40,
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Image encodings we are willing to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSignature {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

/// Identify an encoding from its leading magic bytes
pub fn sniff_signature(bytes: &[u8]) -> Option<ImageSignature> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some(ImageSignature::Png)
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageSignature::Jpeg)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(ImageSignature::Gif)
    } else if bytes.starts_with(b"BM") {
        Some(ImageSignature::Bmp)
    } else {
        None
    }
}

/// The validator the coordinator uses unless told otherwise
#[derive(Debug, Clone, Default)]
pub struct DefaultValidator {
    limits: ValidationLimits,
}

impl DefaultValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> ValidationLimits {
        self.limits
    }

    fn max_chars(&self, field: TextField) -> usize {
        match field {
            TextField::Banner => self.limits.max_text_chars,
            TextField::Poem => self.limits.max_poem_chars,
            TextField::Keyword => self.limits.max_keyword_chars,
        }
    }
}

impl InputValidator for DefaultValidator {
    fn validate_text(&self, input: &str, field: TextField) -> Result<String, ValidationError> {
        let cleaned = sanitize(input);
        let cleaned = match field {
            TextField::Banner => cleaned.trim().to_string(),
            TextField::Poem => trim_poem(&cleaned),
            TextField::Keyword => {
                let word = keyword_stem(&cleaned);
                if word.is_empty() && !cleaned.trim().is_empty() {
                    return Err(ValidationError::InvalidCharacters {
                        field: field.label(),
                    });
                }
                word
            },
        };

        if cleaned.is_empty() {
            return Err(ValidationError::Empty {
                field: field.label(),
            });
        }

        let actual = cleaned.chars().count();
        let max = self.max_chars(field);
        if actual > max {
            return Err(ValidationError::TooLong {
                field: field.label(),
                max,
                actual,
            });
        }

        Ok(cleaned)
    }

    fn validate_image_source(&self, source: &RasterSource) -> Result<(), ValidationError> {
        if source.is_empty() {
            return Err(ValidationError::Empty { field: "image" });
        }
        if source.len() > self.limits.max_image_bytes {
            return Err(ValidationError::TooLarge {
                max: self.limits.max_image_bytes,
                actual: source.len(),
            });
        }
        match sniff_signature(&source.bytes) {
            Some(signature) => {
                log::trace!("Image source looks like {signature:?} ({} bytes)", source.len());
                Ok(())
            },
            None => Err(ValidationError::UnsupportedFormat),
        }
    }
}

/// Unify line endings, turn tabs into spaces, and drop other control characters
fn sanitize(input: &str) -> String {
    let unified = input.replace("\r\n", "\n").replace('\r', "\n");
    unified
        .chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Strip trailing spaces from every line and blank lines from both ends
fn trim_poem(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').map(str::trim_end).collect();
    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphart_core::traits::InputValidator;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_banner_is_trimmed_and_cleaned() {
        let validator = DefaultValidator::new();
        assert_eq!(
            validator.validate_text("  Hi\u{7}\tthere \r\n", TextField::Banner),
            Ok("Hi there".to_string())
        );
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let validator = DefaultValidator::new();
        assert_eq!(
            validator.validate_text(" \n\t ", TextField::Banner),
            Err(ValidationError::Empty { field: "text" })
        );
    }

    #[test]
    fn test_length_limit_per_field() {
        let validator = DefaultValidator::with_limits(ValidationLimits {
            max_text_chars: 3,
            ..ValidationLimits::default()
        });
        assert!(validator.validate_text("abc", TextField::Banner).is_ok());
        assert_eq!(
            validator.validate_text("abcd", TextField::Banner),
            Err(ValidationError::TooLong {
                field: "text",
                max: 3,
                actual: 4
            })
        );
        assert!(validator.validate_text("abcd", TextField::Poem).is_ok());
    }

    #[test]
    fn test_poem_keeps_inner_blank_lines() {
        let validator = DefaultValidator::new();
        let poem = "\n\n  roses are red   \n\n  violets are blue\n\n";
        assert_eq!(
            validator.validate_text(poem, TextField::Poem),
            Ok("  roses are red\n\n  violets are blue".to_string())
        );
    }

    #[test]
    fn test_keyword_is_stemmed() {
        let validator = DefaultValidator::new();
        assert_eq!(
            validator.validate_text(" Knight! ", TextField::Keyword),
            Ok("knight".to_string())
        );
        assert_eq!(
            validator.validate_text("?!", TextField::Keyword),
            Err(ValidationError::InvalidCharacters { field: "keyword" })
        );
    }

    #[test]
    fn test_image_signature_checks() {
        let validator = DefaultValidator::new();
        let mut png = PNG_MAGIC.to_vec();
        png.extend_from_slice(&[0; 16]);
        assert!(validator.validate_image_source(&RasterSource::new(png)).is_ok());

        assert_eq!(
            validator.validate_image_source(&RasterSource::new(b"%PDF-1.7".to_vec())),
            Err(ValidationError::UnsupportedFormat)
        );
        assert_eq!(
            validator.validate_image_source(&RasterSource::new(Vec::new())),
            Err(ValidationError::Empty { field: "image" })
        );
    }

    #[test]
    fn test_image_size_cap() {
        let validator = DefaultValidator::with_limits(ValidationLimits {
            max_image_bytes: 8,
            ..ValidationLimits::default()
        });
        let mut png = PNG_MAGIC.to_vec();
        png.push(0);
        assert_eq!(
            validator.validate_image_source(&RasterSource::new(png)),
            Err(ValidationError::TooLarge { max: 8, actual: 9 })
        );
    }

    #[test]
    fn test_sniff_signatures() {
        assert_eq!(sniff_signature(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageSignature::Jpeg));
        assert_eq!(sniff_signature(b"GIF89a...."), Some(ImageSignature::Gif));
        assert_eq!(sniff_signature(b"BM\0\0"), Some(ImageSignature::Bmp));
        assert_eq!(sniff_signature(b"GIF"), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Cleaned banner text never carries control characters or edge whitespace
        #[test]
        fn prop_banner_output_is_clean(s in "\\PC{0,64}|[\\t\\r\\n a-z]{0,16}") {
            let validator = DefaultValidator::new();
            if let Ok(cleaned) = validator.validate_text(&s, TextField::Banner) {
                prop_assert!(cleaned.chars().all(|c| c == '\n' || !c.is_control()));
                prop_assert_eq!(cleaned.trim(), cleaned.as_str());
                prop_assert!(!cleaned.is_empty());
            }
        }

        // Validation is idempotent on its own output
        #[test]
        fn prop_validation_is_idempotent(s in "[ a-zA-Z0-9\\t\\r\\n!?.]{0,64}") {
            let validator = DefaultValidator::new();
            if let Ok(once) = validator.validate_text(&s, TextField::Poem) {
                let twice = validator.validate_text(&once, TextField::Poem);
                prop_assert_eq!(twice, Ok(once));
            }
        }
    }
}
