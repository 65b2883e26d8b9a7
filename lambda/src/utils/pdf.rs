//! Base64 handling for the embedded report

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::errors::RelayError;

/// Every PDF starts with this header; used for diagnostics only.
pub const PDF_SIGNATURE: &[u8] = b"%PDF-";

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

static STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
static URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Decodes the `pdfBase64` field into raw bytes.
///
/// Line breaks and other ASCII whitespace are ignored, padding is optional,
/// and the URL-safe alphabet is accepted when the input uses it. The result
/// is not checked to be a PDF.
///
/// # Errors
///
/// Returns `RelayError::Decode` if the input is not base64 in either alphabet.
pub fn decode_pdf_base64(encoded: &str) -> Result<Vec<u8>, RelayError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let engine = if compact.contains(['-', '_']) {
        &URL_SAFE_LENIENT
    } else {
        &STANDARD_LENIENT
    };

    Ok(engine.decode(compact.as_bytes())?)
}

#[must_use]
pub fn has_pdf_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_SIGNATURE)
}
