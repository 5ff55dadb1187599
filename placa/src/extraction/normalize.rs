use crate::models::DetectionMode;

/// Clean one raw recognized fragment for pattern matching: uppercase, drop
/// everything outside `A-Z`, `0-9`, space and hyphen, collapse whitespace
/// runs to a single space, trim.
///
/// In `Cropped` mode every `O` becomes `0` and every `I` becomes `1`. The
/// correction applies only to cropped captures: a full frame carries real
/// words that the substitution would corrupt, while a pre-isolated plate
/// region mostly holds digits the recognizer misreads as those letters.
pub fn normalize_text(raw: &str, mode: DetectionMode) -> String {
    let mut kept = String::with_capacity(raw.len());
    for c in raw.to_uppercase().chars() {
        match c {
            'A'..='Z' | '0'..='9' | '-' => kept.push(c),
            c if c.is_whitespace() => kept.push(' '),
            _ => {}
        }
    }
    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");

    match mode {
        DetectionMode::General => collapsed,
        DetectionMode::Cropped => collapsed.replace('O', "0").replace('I', "1"),
    }
}
