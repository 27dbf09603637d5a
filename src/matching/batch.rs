use tracing::info;

use crate::core::decoded::DecodedReference;
use crate::matching::engine::ReferenceDecoder;

/// Placeholder written by the listing cleaner when no reference was found
pub const NO_REFERENCE: &str = "No Reference";

/// True for values that carry no reference: empty, or containing the
/// `No Reference` marker in any case. Whitespace-only values are not missing;
/// they decode to the sentinel fields.
#[must_use]
pub fn is_missing_reference(value: &str) -> bool {
    value.is_empty()
        || value
            .to_lowercase()
            .contains(&NO_REFERENCE.to_lowercase())
}

/// Decoded records plus the count of inputs dropped as missing
#[derive(Debug, Clone, Default)]
pub struct BatchOutput {
    pub records: Vec<DecodedReference>,
    pub skipped: usize,
}

/// Decode every usable reference, preserving input order.
///
/// Each input is decoded independently; missing values are counted and
/// dropped.
pub fn decode_batch<I, S>(decoder: &ReferenceDecoder<'_>, references: I) -> BatchOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut output = BatchOutput::default();

    for reference in references {
        let reference = reference.as_ref();
        if is_missing_reference(reference) {
            output.skipped += 1;
            continue;
        }
        output.records.push(decoder.decode(reference));
    }

    info!(
        decoded = output.records.len(),
        skipped = output.skipped,
        "batch decoded"
    );
    output
}
