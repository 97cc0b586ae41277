use std::fmt::Write as _;

use viewstate::Key;

const POINTER_BINDINGS: [(&str, &str); 3] = [
    ("Wheel", "zoom (x1.15 up, x0.9 down); with Space held, rotate by 2 degrees"),
    ("Left drag", "pan the image"),
    ("Window close", "exit"),
];

/// Human-readable table of every key and pointer binding.
pub fn keymap_table() -> String {
    let width = Key::ALL
        .iter()
        .map(|key| key.label().len())
        .chain(POINTER_BINDINGS.iter().map(|(label, _)| label.len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for key in Key::ALL {
        let _ = writeln!(out, "{:<width$}  {}", key.label(), key.action().describe());
    }
    for (label, description) in POINTER_BINDINGS {
        let _ = writeln!(out, "{label:<width$}  {description}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_key_once() {
        let table = keymap_table();
        assert_eq!(
            table.lines().count(),
            Key::ALL.len() + POINTER_BINDINGS.len()
        );
        assert!(table.lines().any(|line| line.starts_with("Escape")));
        assert!(table.contains("mandrill"));
        assert!(table.contains("grayscale"));
    }
}
