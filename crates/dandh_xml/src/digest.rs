/// BLAKE3 fingerprint of a document, used to correlate log lines for one
/// exchange without logging the document (which carries credentials).
pub fn document_digest(bytes: &[u8]) -> String {
    let hash = blake3::hash(bytes);
    format!("b3:{}", hex::encode(&hash.as_bytes()[..8]))
}
