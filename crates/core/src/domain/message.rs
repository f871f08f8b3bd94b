// Message Domain Model

/// Default upper bound on a message payload, in bytes.
///
/// Matches the fixed report-line buffers of classic resource monitors:
/// one snapshot fits comfortably, anything longer is noise.
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 255;

/// One resource snapshot at one point in time.
///
/// Immutable, bounded-length text. Oversized input is truncated on a
/// UTF-8 character boundary at construction, never rejected: the queue
/// contract is "a submitted message always eventually arrives", so the
/// length policy must not introduce a failure path. The queue itself
/// treats the payload as an opaque blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    /// Create a message bounded by [`DEFAULT_MAX_MESSAGE_BYTES`].
    pub fn new(text: impl Into<String>) -> Self {
        Self::bounded(text, DEFAULT_MAX_MESSAGE_BYTES)
    }

    /// Create a message bounded by `max_bytes`, truncating deterministically.
    pub fn bounded(text: impl Into<String>, max_bytes: usize) -> Self {
        let mut text = text.into();
        if text.len() > max_bytes {
            let cut = floor_char_boundary(&text, max_bytes);
            text.truncate(cut);
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Largest index `<= max` that is a char boundary of `s`.
///
/// `str::floor_char_boundary` is still unstable, so do it by hand. A
/// boundary is at most 3 bytes back from any index.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    let mut idx = max.min(s.len());
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
