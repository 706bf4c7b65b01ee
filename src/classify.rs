//! Device classification: pure inference over a record's textual signals.

use crate::models::DeviceRecord;

/// Infers a coarse device type and a confidence score from a `DeviceRecord`.
///
/// The engine depends on this trait rather than a concrete type so the
/// keyword heuristic below can be swapped for something smarter (a trained
/// model, a fingerprint database) without touching the scheduler.
pub trait DeviceClassifier: Send + Sync {
    fn infer(&self, record: &DeviceRecord) -> (String, f64);
}

/// Signal substrings matched against `vendor + hostname + services`
/// (lower-cased). Table order matters: the first matching rule wins.
const RULES: &[(&[&str], &str, f64)] = &[
    (&["esp", "tuya"], "IoT Device", 0.90),
    (&["windows", "smb"], "Desktop / Laptop", 0.85),
    (&["printer", "_ipp._tcp"], "Printer", 0.95),
    (&["ipcamera", "rtsp"], "Security Camera", 0.90),
];

const UNKNOWN_LABEL: &str = "Unknown Device";
const UNKNOWN_CONFIDENCE: f64 = 0.30;

/// Default classifier: keyword match over accumulated vendor/hostname/service
/// strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl DeviceClassifier for KeywordClassifier {
    fn infer(&self, record: &DeviceRecord) -> (String, f64) {
        let text = record.classification_text();
        for (signals, label, confidence) in RULES {
            if signals.iter().any(|signal| text.contains(signal)) {
                return (label.to_string(), *confidence);
            }
        }
        (UNKNOWN_LABEL.to_string(), UNKNOWN_CONFIDENCE)
    }
}
