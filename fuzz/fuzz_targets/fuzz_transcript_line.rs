#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pyconsole_core::{LineKind, Transcript, TranscriptLine, TranscriptSink};

#[derive(Debug, Arbitrary)]
struct Input {
    kinds: Vec<u8>,
    text: String,
}

fuzz_target!(|input: Input| {
    let transcript = Transcript::new();
    for &selector in input.kinds.iter().take(64) {
        let kind = LineKind::ALL[usize::from(selector) % LineKind::ALL.len()];
        let line = TranscriptLine::new(kind, input.text.clone());

        // Only stdout is normalized, and by at most one trailing newline.
        if kind == LineKind::RuntimeStdout {
            assert!(input.text.starts_with(&line.text));
            assert!(input.text.len() - line.text.len() <= 1);
        } else {
            assert_eq!(line.text, input.text);
        }
        transcript.append(line);
    }

    assert_eq!(transcript.len(), input.kinds.len().min(64));
});
